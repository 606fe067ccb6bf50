//! audit コマンドの enum（Command Pattern）

use common::domain::{ModelName, ProviderName};
use std::path::PathBuf;

/// audit の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum AuditCommand {
    /// ヘルプ表示
    Help,
    /// プロファイル一覧
    ListProfiles,
    /// 固定プロンプトの表示
    PrintPrompt,
    /// SOP とポリシーの比較
    Compare(CompareRequest),
}

/// 比較 1 回分の入力
#[derive(Debug, Clone, PartialEq)]
pub struct CompareRequest {
    pub sop: PathBuf,
    pub policy: PathBuf,
    /// None なら標準出力
    pub output: Option<PathBuf>,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
}
