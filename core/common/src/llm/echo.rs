//! Echoプロバイダの実装
//!
//! このプロバイダは実際にLLM APIを呼び出さず、受け取った内容の要約を返すだけです。
//! デバッグやテスト用に使用します（API キー不要）。

use crate::compliance::document::{ArtifactHandle, DocumentBuffer};
use crate::error::Error;
use crate::llm::provider::LlmProvider;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Echoプロバイダ
#[derive(Debug, Default)]
pub struct EchoProvider {
    uploads: AtomicUsize,
}

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self::default()
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo"
    }

    fn upload_file(&self, document: &DocumentBuffer) -> Result<ArtifactHandle, Error> {
        // 呼び出しごとに連番のハンドルを払い出す（実際の保存はしない）
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        let name = format!("files/echo-{}", n);
        Ok(ArtifactHandle::new(
            name.clone(),
            format!("echo://{}", name),
            document.mime_type(),
            document.display_name(),
        ))
    }

    fn generate_content(&self, files: &[&ArtifactHandle], prompt: &str) -> Result<String, Error> {
        let names: Vec<&str> = files.iter().map(|f| f.display_name.as_str()).collect();
        Ok(format!(
            "[Echo Provider] Received {} document(s) ({}) and a {}-character prompt (no actual LLM call made)",
            files.len(),
            names.join(", "),
            prompt.chars().count()
        ))
    }
}
