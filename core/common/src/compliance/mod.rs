//! SOP とポリシーの準拠比較
//!
//! 流れは Uploader(SOP) → Uploader(Policy) → Comparator の 3 段だけ。どこかで失敗したら
//! その場で打ち切り、途中結果は返さない。

pub mod comparator;
pub mod document;
pub mod prompt;
pub mod uploader;

pub use comparator::Comparator;
pub use document::{ArtifactHandle, ComparisonReport, DocumentBuffer};
pub use prompt::{compliance_prompt, COMPLIANCE_PROMPT};
pub use uploader::Uploader;

use crate::error::Error;
use crate::ports::outbound::{Log, LlmProvider};
use std::sync::Arc;

/// SOP ドキュメントのアップロード時の表示名
pub const SOP_DISPLAY_NAME: &str = "SOP_Document";

/// ポリシードキュメントのアップロード時の表示名
pub const POLICY_DISPLAY_NAME: &str = "Policy_Document";

/// 2 つのドキュメントから比較レポートを作る入口
pub struct DocumentComparator {
    provider: Arc<dyn LlmProvider>,
    uploader: Uploader,
    comparator: Comparator,
}

impl DocumentComparator {
    pub fn new(provider: Arc<dyn LlmProvider>, logger: Arc<dyn Log>) -> Self {
        Self {
            uploader: Uploader::new(Arc::clone(&provider), Arc::clone(&logger)),
            comparator: Comparator::new(Arc::clone(&provider), logger),
            provider,
        }
    }

    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// SOP とポリシーの PDF バイト列から比較レポートを生成する
    ///
    /// 1. プロバイダの準備確認（API キーが無ければここで Configuration、通信は発生しない）
    /// 2. SOP を "SOP_Document" としてアップロード
    /// 3. ポリシーを "Policy_Document" としてアップロード
    /// 4. 2 つのハンドルと固定プロンプトで 1 回生成
    pub fn generate_report(
        &self,
        sop_data: &[u8],
        policy_data: &[u8],
    ) -> Result<ComparisonReport, Error> {
        self.provider.check_ready()?;
        let sop = self.uploader.upload(sop_data, SOP_DISPLAY_NAME)?;
        let policy = self.uploader.upload(policy_data, POLICY_DISPLAY_NAME)?;
        self.comparator.compare(&sop, &policy)
    }
}
