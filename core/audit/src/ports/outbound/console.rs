//! 端末出力 Outbound ポート
//!
//! レポート本文は標準出力、進捗やファイル情報は標準エラーに分ける（リダイレクトしてもレポートだけが残るように）。

use common::error::Error;

pub trait Console: Send + Sync {
    /// レポート本文など、結果そのものを出す
    fn print(&self, text: &str) -> Result<(), Error>;
    /// 進捗・補足を出す
    fn notice(&self, line: &str) -> Result<(), Error>;
}
