//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成します。

use crate::compliance::document::{ArtifactHandle, DocumentBuffer};
use crate::domain::{ApiKey, ModelName};
use crate::error::Error;
use crate::llm::echo::EchoProvider;
use crate::llm::gemini::GeminiProvider;
use crate::llm::provider::LlmProvider;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Gemini（Files API + generateContent）
    Gemini,
    /// Echo（リモートを呼ばない）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Echo => "echo",
        }
    }

    /// このタイプが API キーを必要とするか
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::Gemini)
    }
}

/// プロバイダのenumラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    Gemini(GeminiProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::Gemini(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn model(&self) -> &str {
        match self {
            Self::Gemini(p) => p.model(),
            Self::Echo(p) => p.model(),
        }
    }

    fn check_ready(&self) -> Result<(), Error> {
        match self {
            Self::Gemini(p) => p.check_ready(),
            Self::Echo(p) => p.check_ready(),
        }
    }

    fn upload_file(&self, document: &DocumentBuffer) -> Result<ArtifactHandle, Error> {
        match self {
            Self::Gemini(p) => p.upload_file(document),
            Self::Echo(p) => p.upload_file(document),
        }
    }

    fn generate_content(&self, files: &[&ArtifactHandle], prompt: &str) -> Result<String, Error> {
        match self {
            Self::Gemini(p) => p.generate_content(files, prompt),
            Self::Echo(p) => p.generate_content(files, prompt),
        }
    }
}

/// プロバイダを作成する
///
/// # Arguments
/// * `provider_type` - プロバイダタイプ
/// * `model` - モデル名（オプション、デフォルト値が使用される）
/// * `api_key` - API キー（Gemini 用。None でも作成はでき、最初のリモート呼び出しの前に Configuration エラーになる）
/// * `base_url` - ベース URL（Gemini 用。None のときデフォルト）
/// * `temperature` - 温度（Gemini 用。None のとき API のデフォルト）
pub fn create_provider(
    provider_type: ProviderType,
    model: Option<ModelName>,
    api_key: Option<ApiKey>,
    base_url: Option<String>,
    temperature: Option<f32>,
) -> AnyProvider {
    match provider_type {
        ProviderType::Gemini => AnyProvider::Gemini(
            GeminiProvider::new(model, api_key, base_url).with_temperature(temperature),
        ),
        ProviderType::Echo => AnyProvider::Echo(EchoProvider::new()),
    }
}
