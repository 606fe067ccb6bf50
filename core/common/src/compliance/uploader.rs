//! Uploader: バイト列 + 表示名をリモートへ送り、ArtifactHandle を受け取る

use crate::compliance::document::{ArtifactHandle, DocumentBuffer};
use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord, LlmProvider};
use std::sync::Arc;

/// ドキュメントを 1 件ずつアップロードする
pub struct Uploader {
    provider: Arc<dyn LlmProvider>,
    logger: Arc<dyn Log>,
}

impl Uploader {
    pub fn new(provider: Arc<dyn LlmProvider>, logger: Arc<dyn Log>) -> Self {
        Self { provider, logger }
    }

    /// `bytes` を PDF として `display_name` でアップロードする
    ///
    /// 失敗は Upload（API キー未設定のみ Configuration）として返す。リトライしない。
    pub fn upload(&self, bytes: &[u8], display_name: &str) -> Result<ArtifactHandle, Error> {
        let document = DocumentBuffer::pdf(bytes, display_name);
        self.upload_document(&document)
    }

    pub fn upload_document(&self, document: &DocumentBuffer) -> Result<ArtifactHandle, Error> {
        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Info, "upload started")
                .layer("compliance")
                .kind("upload")
                .field("provider", self.provider.name())
                .field("display_name", document.display_name())
                .field("bytes", document.len()),
        );

        let handle = self
            .provider
            .upload_file(document)
            .map_err(into_upload_error)
            .map_err(|e| {
                let _ = self.logger.log(
                    &LogRecord::new(LogLevel::Warn, "upload failed")
                        .layer("compliance")
                        .kind("upload")
                        .field("display_name", document.display_name())
                        .field("error", e.to_string()),
                );
                e
            })?;

        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Info, "upload finished")
                .layer("compliance")
                .kind("upload")
                .field("display_name", handle.display_name.as_str())
                .field("handle", handle.name.as_str()),
        );
        Ok(handle)
    }
}

/// Configuration と Upload 以外の失敗を Upload に揃える
fn into_upload_error(e: Error) -> Error {
    match e {
        Error::Configuration(_) | Error::Upload(_) => e,
        other => Error::upload(other.to_string()),
    }
}
