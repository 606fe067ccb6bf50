//! profiles.json 用の設定型
//!
//! プロバイダ名から ProviderType とオプション（base_url / model / api_key_env / temperature）を解決するための構造体。

use serde::Deserialize;
use std::collections::HashMap;

/// profiles.json のルート
#[derive(Debug, Clone, Default)]
pub struct ProfilesConfig {
    /// 未指定時に使うプロバイダ名
    pub default_provider: Option<String>,
    /// プロバイダ名 -> プロファイル
    pub providers: HashMap<String, ProviderProfile>,
}

/// 1 プロバイダ分の設定
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    /// プロバイダ種別: gemini | echo
    pub type_: ProviderTypeKind,
    /// API のベース URL（省略時は各プロバイダのデフォルト）
    pub base_url: Option<String>,
    /// モデル名（省略時は各プロバイダのデフォルト）
    pub model: Option<String>,
    /// API キーを読む環境変数名（省略時は GEMINI_API_KEY）
    pub api_key_env: Option<String>,
    /// 温度（省略時は API のデフォルト）
    pub temperature: Option<f32>,
}

/// JSON の "type" で使うプロバイダ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderTypeKind {
    Gemini,
    Echo,
}

/// serde 用の内部構造（type が予約語のため）
#[derive(Debug, Deserialize)]
struct ProfilesConfigRaw {
    #[serde(alias = "default")]
    default_provider: Option<String>,
    providers: Option<HashMap<String, ProviderProfileRaw>>,
}

#[derive(Debug, Deserialize)]
struct ProviderProfileRaw {
    #[serde(rename = "type", alias = "provider")]
    type_: ProviderTypeKindSerde,
    base_url: Option<String>,
    #[serde(alias = "default_model")]
    model: Option<String>,
    api_key_env: Option<String>,
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ProviderTypeKindSerde {
    #[serde(alias = "google")]
    Gemini,
    Echo,
}

impl From<ProviderTypeKindSerde> for ProviderTypeKind {
    fn from(s: ProviderTypeKindSerde) -> Self {
        match s {
            ProviderTypeKindSerde::Gemini => ProviderTypeKind::Gemini,
            ProviderTypeKindSerde::Echo => ProviderTypeKind::Echo,
        }
    }
}

impl ProfilesConfig {
    /// JSON 文字列からパース（ファイル読みは resolver で行う）
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: ProfilesConfigRaw = serde_json::from_str(json)?;
        let providers = raw
            .providers
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k, v.into()))
            .collect();
        Ok(ProfilesConfig {
            default_provider: raw.default_provider,
            providers,
        })
    }
}

impl From<ProviderProfileRaw> for ProviderProfile {
    fn from(r: ProviderProfileRaw) -> Self {
        ProviderProfile {
            type_: r.type_.into(),
            base_url: r.base_url,
            model: r.model,
            api_key_env: r.api_key_env,
            temperature: r.temperature,
        }
    }
}
