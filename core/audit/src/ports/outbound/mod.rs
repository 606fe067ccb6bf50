//! Outbound ポート（audit 固有）

pub mod console;

pub use console::Console;
