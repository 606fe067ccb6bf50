//! 標準出力 / 標準エラーへ書く Console 実装

use common::error::Error;
use std::io::{self, Write};

use crate::ports::outbound::Console;

#[derive(Debug, Clone, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn print(&self, text: &str) -> Result<(), Error> {
        let write = || -> io::Result<()> {
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                out.write_all(b"\n")?;
            }
            out.flush()
        };
        write().map_err(|e| Error::io_msg(format!("Failed to write stdout: {}", e)))
    }

    fn notice(&self, line: &str) -> Result<(), Error> {
        writeln!(io::stderr(), "{}", line)
            .map_err(|e| Error::io_msg(format!("Failed to write stderr: {}", e)))
    }
}
