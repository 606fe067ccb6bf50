//! CLI（引数解析）

mod args;

pub use args::{config_to_command, parse_args, print_completion, Config, ParseOutcome, BIN_NAME};
