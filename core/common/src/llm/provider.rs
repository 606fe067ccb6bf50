//! LLMプロバイダのトレイト定義

use crate::compliance::document::{ArtifactHandle, DocumentBuffer};
use crate::error::Error;

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（Gemini、Echo など）はこのトレイトを実装する必要があります。
/// リモートに対して行うのは「ファイルのアップロード」と「ファイル + プロンプトからの生成」の 2 つだけ。
pub trait LlmProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// generateContent に使うモデル名
    fn model(&self) -> &str;

    /// リモート呼び出しの前に必要な設定（API キーなど）が揃っているか確認する
    ///
    /// ネットワークには触れない。
    fn check_ready(&self) -> Result<(), Error> {
        Ok(())
    }

    /// ドキュメントをアップロードしてハンドルを返す
    ///
    /// # Returns
    /// * `Ok(ArtifactHandle)` - リモートに保存されたファイルへの参照
    /// * `Err(Error::Upload)` - 拒否・サイズ超過・認証失敗・通信失敗
    /// * `Err(Error::Configuration)` - API キー未設定
    fn upload_file(&self, document: &DocumentBuffer) -> Result<ArtifactHandle, Error>;

    /// アップロード済みファイルとプロンプトを 1 回の生成リクエストで送り、応答テキストを返す
    ///
    /// `files` は渡した順に、プロンプトより前に並べて送る。
    ///
    /// # Returns
    /// * `Ok(String)` - 応答テキスト（加工しない。空文字列は Comparator が Generation エラーにする）
    /// * `Err(Error::Generation)` - 通信失敗・クォータ・不正な応答
    /// * `Err(Error::Configuration)` - API キー未設定
    fn generate_content(&self, files: &[&ArtifactHandle], prompt: &str) -> Result<String, Error>;
}
