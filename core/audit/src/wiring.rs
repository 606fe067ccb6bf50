//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, NoopLog, StderrLog, StdEnvResolver, StdFileSystem, TeeLog};
use common::ports::outbound::{EnvResolver, FileSystem, Log};

use crate::adapter::StdConsole;
use crate::ports::outbound::Console;
use crate::usecase::CompareUseCase;

/// 配線で組み立てたポート群（main の Command ディスパッチで利用）
pub struct App {
    /// 構造化ログ（ファイルへ JSONL、-v 時は stderr にも）。エラー時のコンソール表示とは別。
    pub logger: Arc<dyn Log>,
    pub console: Arc<dyn Console>,
    pub compare_use_case: CompareUseCase,
}

/// 配線: 標準アダプタで App を組み立てる
///
/// ログファイルのパスが決まらない環境（HOME 未設定など）ではファイルログを諦めて NoopLog にする。
pub fn wire_audit(verbose: bool) -> App {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let env_resolver: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let file_log: Arc<dyn Log> = env_resolver
        .resolve_log_file_path()
        .map(|path| Arc::new(FileJsonLog::new(Arc::clone(&fs), path)) as Arc<dyn Log>)
        .unwrap_or_else(|_| Arc::new(NoopLog));
    let logger: Arc<dyn Log> = if verbose {
        Arc::new(TeeLog::new(vec![file_log, Arc::new(StderrLog)]))
    } else {
        file_log
    };
    wire_with(env_resolver, fs, Arc::new(StdConsole), logger)
}

/// 任意のアダプタで App を組み立てる（テストからも使う）
pub fn wire_with(
    env_resolver: Arc<dyn EnvResolver>,
    fs: Arc<dyn FileSystem>,
    console: Arc<dyn Console>,
    logger: Arc<dyn Log>,
) -> App {
    let compare_use_case = CompareUseCase::new(
        fs,
        env_resolver,
        Arc::clone(&logger),
        Arc::clone(&console),
    );
    App {
        logger,
        console,
        compare_use_case,
    }
}
