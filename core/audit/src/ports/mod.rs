//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが端末に出力するための trait（ファイル・環境変数・ログは common のポートを使う）

pub mod inbound;
pub mod outbound;
