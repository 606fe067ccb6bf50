//! profiles.json の読み込みとプロバイダ解決

use crate::domain::{ApiKey, ModelName, ProviderName};
use crate::error::Error;
use crate::llm::config::{ProfilesConfig, ProviderTypeKind};
use crate::llm::factory::{create_provider, AnyProvider, ProviderType};
use crate::ports::outbound::{EnvResolver, FileSystem};

/// API キーを読む既定の環境変数
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// 解決済みプロバイダ（ProviderType + オプション）
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    /// 解決に使ったプロファイル名（例: "gemini", "audit"）。エラー表示用
    pub profile_name: String,
    pub provider_type: ProviderType,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
}

impl ResolvedProvider {
    /// API キーを読む環境変数名
    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }
}

/// profiles.json を読み込む。ファイルが無ければ Ok(None)、JSON が壊れていれば Err（メッセージにパス含める）
///
/// ホームディレクトリが決まらない（AUDIT_AI_HOME / XDG_CONFIG_HOME / HOME がどれも無い）場合も
/// ファイル無しとして扱い、ビルトインのプロファイルだけで動く。
pub fn load_profiles_config(
    fs: &dyn FileSystem,
    env: &dyn EnvResolver,
) -> Result<Option<ProfilesConfig>, Error> {
    let path = match env.resolve_profiles_config_path() {
        Ok(path) => path,
        Err(_) => return Ok(None),
    };
    if !fs.exists(path.as_path()) {
        return Ok(None);
    }
    let contents = fs
        .read_to_string(path.as_path())
        .map_err(|e| Error::io_msg(format!("{}: {}", path.display(), e)))?;
    ProfilesConfig::parse(&contents)
        .map_err(|e| Error::configuration(format!("{}: {}", path.display(), e)))
        .map(Some)
}

fn provider_type_kind_to_provider_type(k: ProviderTypeKind) -> ProviderType {
    match k {
        ProviderTypeKind::Gemini => ProviderType::Gemini,
        ProviderTypeKind::Echo => ProviderType::Echo,
    }
}

/// 利用可能なビルトインプロバイダ名
fn builtin_provider_names() -> &'static [&'static str] {
    &["gemini", "echo"]
}

/// 要求されたプロバイダ名（None の場合は default）と ProfilesConfig から ResolvedProvider を解決する。
/// 不明なプロバイダの場合は Error::invalid_argument（is_usage == true）で利用可能一覧を返す。
pub fn resolve_provider(
    requested: Option<&ProviderName>,
    cfg: Option<&ProfilesConfig>,
) -> Result<ResolvedProvider, Error> {
    let effective_name: &str = requested.map(|r| r.as_ref()).unwrap_or_else(|| {
        cfg.and_then(|c| c.default_provider.as_deref())
            .unwrap_or("gemini")
    });

    // 1) cfg.providers に名前があればそれを優先
    if let Some(cfg) = cfg {
        if let Some(profile) = cfg.providers.get(effective_name) {
            return Ok(ResolvedProvider {
                profile_name: effective_name.to_string(),
                provider_type: provider_type_kind_to_provider_type(profile.type_),
                base_url: profile.base_url.clone(),
                model: profile.model.clone(),
                api_key_env: profile.api_key_env.clone(),
                temperature: profile.temperature,
            });
        }
    }

    // 2) ビルトイン (ProviderType::from_str) を試す
    if let Some(provider_type) = ProviderType::from_str(effective_name) {
        return Ok(ResolvedProvider {
            profile_name: effective_name.to_string(),
            provider_type,
            base_url: None,
            model: None,
            api_key_env: None,
            temperature: None,
        });
    }

    // 3) どれも無ければ usage エラー
    let (available, _) = list_profiles(cfg);
    Err(Error::invalid_argument(format!(
        "Unknown provider: '{}'. Available: {}",
        effective_name,
        available.join(", ")
    )))
}

/// ビルトイン + profiles.json のプロファイル名一覧（ソート済み）と default 名を返す
pub fn list_profiles(cfg: Option<&ProfilesConfig>) -> (Vec<String>, Option<String>) {
    let mut names: Vec<String> = builtin_provider_names()
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    if let Some(cfg) = cfg {
        for k in cfg.providers.keys() {
            if !names.contains(k) {
                names.push(k.clone());
            }
        }
    }
    names.sort();
    let default = cfg
        .and_then(|c| c.default_provider.clone())
        .unwrap_or_else(|| "gemini".to_string());
    (names, Some(default))
}

/// 解決済みプロファイルからプロバイダを組み立てる
///
/// API キーは `api_key_env`（既定 GEMINI_API_KEY）から 1 度だけ読む。未設定でも組み立ては成功し、
/// リモート呼び出しの前に `check_ready` が Configuration エラーを返す。
pub fn build_provider(
    resolved: &ResolvedProvider,
    model_override: Option<&ModelName>,
    env: &dyn EnvResolver,
) -> AnyProvider {
    let model = model_override
        .cloned()
        .or_else(|| resolved.model.clone().map(ModelName::new));
    let api_key = if resolved.provider_type.requires_api_key() {
        env.var(resolved.api_key_env()).map(ApiKey::new)
    } else {
        None
    };
    create_provider(
        resolved.provider_type,
        model,
        api_key,
        resolved.base_url.clone(),
        resolved.temperature,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{MapEnvResolver, StdFileSystem};
    use crate::llm::config::ProviderProfile;
    use crate::llm::provider::LlmProvider;
    use std::collections::HashMap;

    fn cfg_with_audit_profile() -> ProfilesConfig {
        let mut providers = HashMap::new();
        providers.insert(
            "audit".to_string(),
            ProviderProfile {
                type_: ProviderTypeKind::Gemini,
                base_url: Some("http://localhost:8080".to_string()),
                model: Some("gemini-2.5-pro".to_string()),
                api_key_env: Some("AUDIT_GEMINI_KEY".to_string()),
                temperature: Some(0.1),
            },
        );
        ProfilesConfig {
            default_provider: Some("audit".to_string()),
            providers,
        }
    }

    #[test]
    fn test_resolve_provider_no_cfg_requested_none() {
        let r = resolve_provider(None, None).unwrap();
        assert_eq!(r.profile_name, "gemini");
        assert_eq!(r.provider_type, ProviderType::Gemini);
        assert_eq!(r.api_key_env(), "GEMINI_API_KEY");
    }

    #[test]
    fn test_resolve_provider_builtin_echo() {
        let r = resolve_provider(Some(&ProviderName::new("echo")), None).unwrap();
        assert_eq!(r.provider_type, ProviderType::Echo);
    }

    #[test]
    fn test_resolve_provider_uses_cfg_default() {
        let cfg = cfg_with_audit_profile();
        let r = resolve_provider(None, Some(&cfg)).unwrap();
        assert_eq!(r.profile_name, "audit");
        assert_eq!(r.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(r.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(r.api_key_env(), "AUDIT_GEMINI_KEY");
        assert_eq!(r.temperature, Some(0.1));
    }

    #[test]
    fn test_resolve_provider_unknown_is_usage_error() {
        let cfg = cfg_with_audit_profile();
        let err = resolve_provider(Some(&ProviderName::new("gpt")), Some(&cfg)).unwrap_err();
        assert!(err.is_usage());
        let msg = err.to_string();
        assert!(msg.contains("Unknown provider: 'gpt'"));
        assert!(msg.contains("audit, echo, gemini"));
    }

    #[test]
    fn test_list_profiles() {
        let (names, default) = list_profiles(None);
        assert_eq!(names, vec!["echo".to_string(), "gemini".to_string()]);
        assert_eq!(default.as_deref(), Some("gemini"));

        let cfg = cfg_with_audit_profile();
        let (names, default) = list_profiles(Some(&cfg));
        assert_eq!(names, vec!["audit", "echo", "gemini"]);
        assert_eq!(default.as_deref(), Some("audit"));
    }

    #[test]
    fn test_build_provider_reads_key_from_profile_env() {
        let cfg = cfg_with_audit_profile();
        let r = resolve_provider(None, Some(&cfg)).unwrap();

        let env = MapEnvResolver::new().with("GEMINI_API_KEY", "default-key");
        let p = build_provider(&r, None, &env);
        assert_eq!(p.model(), "gemini-2.5-pro");
        // AUDIT_GEMINI_KEY が無いので GEMINI_API_KEY があっても準備未完了
        assert!(matches!(p.check_ready(), Err(Error::Configuration(_))));

        let env = MapEnvResolver::new().with("AUDIT_GEMINI_KEY", "k");
        let p = build_provider(&r, Some(&ModelName::new("gemini-2.0")), &env);
        assert_eq!(p.model(), "gemini-2.0");
        assert!(p.check_ready().is_ok());
    }

    #[test]
    fn test_build_provider_echo_needs_no_key() {
        let r = resolve_provider(Some(&ProviderName::new("echo")), None).unwrap();
        let p = build_provider(&r, None, &MapEnvResolver::new());
        assert_eq!(p.name(), "echo");
        assert!(p.check_ready().is_ok());
    }

    #[test]
    fn test_load_profiles_config() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().to_str().unwrap();
        let env = MapEnvResolver::new().with("AUDIT_AI_HOME", home);
        let fs = StdFileSystem;

        assert!(load_profiles_config(&fs, &env).unwrap().is_none());

        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        let path = dir.path().join("config").join("profiles.json");
        std::fs::write(&path, r#"{"default_provider":"dry","providers":{"dry":{"type":"echo"}}}"#)
            .unwrap();
        let cfg = load_profiles_config(&fs, &env).unwrap().unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("dry"));

        std::fs::write(&path, "{ broken").unwrap();
        let err = load_profiles_config(&fs, &env).unwrap_err();
        assert!(matches!(err, Error::Configuration(ref m) if m.contains("profiles.json")));
    }

    #[test]
    fn test_load_profiles_config_without_any_home_is_none() {
        let env = MapEnvResolver::new();
        assert!(env.resolve_profiles_config_path().is_err());
        assert!(load_profiles_config(&StdFileSystem, &env).unwrap().is_none());
    }
}
