//! エラーハンドリング
//!
//! 失敗はすべてこの `Error` に集約し、呼び出し元へそのまま返す（内部で握りつぶさない・リトライしない）。
//! 終了コードは sysexits.h に揃える。

/// エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 設定不備（API キー未設定・プロファイル不正など）
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// ドキュメントのアップロード失敗
    #[error("Upload failed: {0}")]
    Upload(String),
    /// レポート生成（generateContent）の失敗
    #[error("Generation failed: {0}")]
    Generation(String),
    /// 引数不正（usage を表示する）
    #[error("{0}")]
    InvalidArgument(String),
    /// ローカルのファイル I/O
    #[error("I/O error: {0}")]
    Io(String),
    /// JSON のシリアライズ・パース
    #[error("JSON error: {0}")]
    Json(String),
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// 引数不正エラー
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    /// usage を併せて表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Json(_) => 65,
            Self::Upload(_) | Self::Generation(_) => 69,
            Self::Io(_) => 74,
            Self::Configuration(_) => 78,
        }
    }
}
