//! Comparator: 2 つのハンドルと固定プロンプトで 1 回だけ生成し、応答をそのまま返す

use crate::compliance::document::{ArtifactHandle, ComparisonReport};
use crate::compliance::prompt::compliance_prompt;
use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord, LlmProvider};
use std::sync::Arc;

pub struct Comparator {
    provider: Arc<dyn LlmProvider>,
    logger: Arc<dyn Log>,
}

impl Comparator {
    pub fn new(provider: Arc<dyn LlmProvider>, logger: Arc<dyn Log>) -> Self {
        Self { provider, logger }
    }

    /// `[sop, policy, prompt]` の順で generateContent を 1 回呼ぶ
    ///
    /// 応答テキストは加工しない（見出し構成の検証もしない）。空の応答は Generation エラー。
    pub fn compare(
        &self,
        sop: &ArtifactHandle,
        policy: &ArtifactHandle,
    ) -> Result<ComparisonReport, Error> {
        let prompt = compliance_prompt();
        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Info, "generation started")
                .layer("compliance")
                .kind("generation")
                .field("provider", self.provider.name())
                .field("model", self.provider.model())
                .field("sop", sop.name.as_str())
                .field("policy", policy.name.as_str()),
        );

        let text = self
            .provider
            .generate_content(&[sop, policy], prompt)
            .map_err(into_generation_error)
            .and_then(|text| {
                if text.is_empty() {
                    Err(Error::generation("Model returned an empty response"))
                } else {
                    Ok(text)
                }
            })
            .map_err(|e| {
                let _ = self.logger.log(
                    &LogRecord::new(LogLevel::Warn, "generation failed")
                        .layer("compliance")
                        .kind("generation")
                        .field("error", e.to_string()),
                );
                e
            })?;

        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Info, "generation finished")
                .layer("compliance")
                .kind("generation")
                .field("chars", text.chars().count()),
        );
        Ok(ComparisonReport::new(text))
    }
}

/// Configuration と Generation 以外の失敗を Generation に揃える
fn into_generation_error(e: Error) -> Error {
    match e {
        Error::Configuration(_) | Error::Generation(_) => e,
        other => Error::generation(other.to_string()),
    }
}
