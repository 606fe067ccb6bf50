//! アダプター（audit 固有の outbound ポート実装）

mod std_console;

pub use std_console::StdConsole;
