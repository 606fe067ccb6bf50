//! LLMプロバイダの実装
//!
//! アップロードと生成の 2 操作だけを `LlmProvider` に切り出し、Gemini（実通信）と Echo（オフライン）を揃える。

pub mod config;
pub mod echo;
pub mod factory;
pub mod gemini;
pub mod provider;
pub mod resolver;

pub use factory::{create_provider, AnyProvider, ProviderType};
pub use provider::LlmProvider;
pub use resolver::{build_provider, list_profiles, load_profiles_config, resolve_provider, ResolvedProvider};
