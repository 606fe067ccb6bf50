//! アダプター（外界の I/O を trait で抽象化）
//!
//! usecase はこのモジュールの実装を ports::outbound の trait 越しに受け取る。
//! 実装は標準実装（Std*）やテスト用の実装（Noop / Map）を注入する。

pub mod file_json_log;
pub mod stderr_log;
pub mod std_env_resolver;
pub mod std_fs;

pub use crate::ports::outbound::{EnvResolver, FileMetadata, FileSystem, Log};
pub use file_json_log::{FileJsonLog, NoopLog};
pub use stderr_log::{StderrLog, TeeLog};
pub use std_env_resolver::{MapEnvResolver, StdEnvResolver};
pub use std_fs::StdFileSystem;
