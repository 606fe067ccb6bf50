//! LLM プロバイダ Outbound ポート
//!
//! トレイト定義は llm/provider にある（Gemini / Echo の実装と同じ場所に置く）。ここでは re-export のみ。

pub use crate::llm::provider::LlmProvider;
