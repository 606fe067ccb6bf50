//! 環境変数解決 Outbound ポート
//!
//! API キー・ホームディレクトリ・設定ファイル・ログファイルの場所を環境変数から解決する。
//! usecase はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::HomeDir;
use crate::error::Error;
use std::path::PathBuf;

/// ホームディレクトリを上書きする環境変数
pub const HOME_ENV: &str = "AUDIT_AI_HOME";

/// XDG_CONFIG_HOME / ~/.config 配下のディレクトリ名
const CONFIG_DIR_NAME: &str = "audit-ai";

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用の `MapEnvResolver` など。
/// `var` 以外はデフォルト実装で `var` から組み立てる。
pub trait EnvResolver: Send + Sync {
    /// 環境変数を 1 つ読む（未設定・空文字は None）
    fn var(&self, name: &str) -> Option<String>;

    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. AUDIT_AI_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/audit-ai（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/audit-ai
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        if let Some(home) = self.var(HOME_ENV) {
            return Ok(HomeDir::new(PathBuf::from(home)));
        }
        let config_base = self
            .var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| self.var("HOME").map(|h| PathBuf::from(h).join(".config")))
            .ok_or_else(|| Error::configuration("HOME is not set"))?;
        Ok(HomeDir::new(config_base.join(CONFIG_DIR_NAME)))
    }

    /// プロバイダプロファイル設定ファイルのパス
    /// AUDIT_AI_HOME があれば $AUDIT_AI_HOME/config/profiles.json、なければ resolve_home_dir() 直下の profiles.json
    fn resolve_profiles_config_path(&self) -> Result<PathBuf, Error> {
        if let Some(home) = self.var(HOME_ENV) {
            return Ok(PathBuf::from(home).join("config").join("profiles.json"));
        }
        Ok(self.resolve_home_dir()?.join("profiles.json"))
    }

    /// 構造化ログ（JSONL）の出力先
    fn resolve_log_file_path(&self) -> Result<PathBuf, Error> {
        Ok(self.resolve_home_dir()?.join("log").join("audit.jsonl"))
    }
}
