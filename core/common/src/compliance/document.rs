//! 比較に流れる値（入力バッファ・アップロード済みハンドル・レポート）

/// アップロードするドキュメントの MIME タイプ
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// アップロード前のドキュメント（生バイト列 + 表示名）
///
/// 中身は検証しない。PDF かどうかの判定はリモート側に任せる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentBuffer {
    bytes: Vec<u8>,
    display_name: String,
    mime_type: String,
}

impl DocumentBuffer {
    pub fn new(bytes: impl Into<Vec<u8>>, display_name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            display_name: display_name.into(),
            mime_type: PDF_MIME_TYPE.to_string(),
        }
    }

    pub fn pdf(bytes: &[u8], display_name: &str) -> Self {
        Self::new(bytes.to_vec(), display_name)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// リモートに保存されたファイルへの参照
///
/// 寿命はリモート側が管理する。ここでは 1 回の比較で使って捨てるだけ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHandle {
    /// リソース名（例: files/abc123）
    pub name: String,
    /// generateContent の file_data に渡す URI
    pub uri: String,
    pub mime_type: String,
    pub display_name: String,
}

impl ArtifactHandle {
    pub fn new(
        name: impl Into<String>,
        uri: impl Into<String>,
        mime_type: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            mime_type: mime_type.into(),
            display_name: display_name.into(),
        }
    }
}

/// モデルが返した比較レポート（構造は強制しない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport(String);

impl ComparisonReport {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::ops::Deref for ComparisonReport {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
