//! stderr へ 1 行ずつ出す Log 実装（-v / --verbose 用）と、複数の Log へ配る TeeLog

use crate::error::Error;
use crate::ports::outbound::{Log, LogRecord};
use std::io::Write;
use std::sync::Arc;

/// `[level] layer/kind: message key=value ...` の形式で stderr に出す
#[derive(Debug, Clone, Default)]
pub struct StderrLog;

impl StderrLog {
    pub fn format(record: &LogRecord) -> String {
        let mut line = format!("[{}] ", record.level.as_str());
        match (&record.layer, &record.kind) {
            (Some(l), Some(k)) => line.push_str(&format!("{}/{}: ", l, k)),
            (Some(l), None) => line.push_str(&format!("{}: ", l)),
            (None, Some(k)) => line.push_str(&format!("{}: ", k)),
            (None, None) => {}
        }
        line.push_str(&record.message);
        if let Some(ref fields) = record.fields {
            for (k, v) in fields {
                match v.as_str() {
                    Some(s) => line.push_str(&format!(" {}={}", k, s)),
                    None => line.push_str(&format!(" {}={}", k, v)),
                }
            }
        }
        line
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut err = std::io::stderr().lock();
        writeln!(err, "{}", Self::format(record)).map_err(|e| Error::io_msg(e.to_string()))
    }
}

/// 全ての Log に同じレコードを渡す。どれかが失敗しても残りには書き、最初のエラーを返す。
pub struct TeeLog {
    logs: Vec<Arc<dyn Log>>,
}

impl TeeLog {
    pub fn new(logs: Vec<Arc<dyn Log>>) -> Self {
        Self { logs }
    }
}

impl Log for TeeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for log in &self.logs {
            if let Err(e) = log.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
