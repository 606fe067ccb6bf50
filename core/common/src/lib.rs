//! Audit AI 共通ライブラリ
//!
//! `audit` コマンドから使う比較処理・LLM プロバイダ・ポートとアダプタを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// SOP とポリシーの準拠比較（アップロード → 生成）
pub mod compliance;

/// LLMプロバイダ
pub mod llm;

/// Outbound ポート
pub mod ports;

/// ポートの標準実装
pub mod adapter;

pub use compliance::{ComparisonReport, DocumentComparator};
pub use error::Error;
