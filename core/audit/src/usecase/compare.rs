//! 比較ユースケース: 2 つの PDF を読み、プロファイルからプロバイダを組み立て、レポートを出力する

use std::path::Path;
use std::sync::Arc;

use common::compliance::DocumentComparator;
use common::error::Error;
use common::llm::{build_provider, list_profiles, load_profiles_config, resolve_provider, LlmProvider};
use common::ports::outbound::{EnvResolver, FileSystem, Log, LogLevel, LogRecord};

use crate::domain::CompareRequest;
use crate::ports::outbound::Console;

pub struct CompareUseCase {
    fs: Arc<dyn FileSystem>,
    env_resolver: Arc<dyn EnvResolver>,
    logger: Arc<dyn Log>,
    console: Arc<dyn Console>,
}

impl CompareUseCase {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        env_resolver: Arc<dyn EnvResolver>,
        logger: Arc<dyn Log>,
        console: Arc<dyn Console>,
    ) -> Self {
        Self {
            fs,
            env_resolver,
            logger,
            console,
        }
    }

    /// ビルトイン + profiles.json のプロファイル名と default 名
    pub fn list_profiles(&self) -> Result<(Vec<String>, Option<String>), Error> {
        let cfg = load_profiles_config(self.fs.as_ref(), self.env_resolver.as_ref())?;
        Ok(list_profiles(cfg.as_ref()))
    }

    /// SOP とポリシーを比較し、レポートを標準出力またはファイルに出す
    pub fn run(&self, req: &CompareRequest) -> Result<(), Error> {
        let cfg = load_profiles_config(self.fs.as_ref(), self.env_resolver.as_ref())?;
        let resolved = resolve_provider(req.profile.as_ref(), cfg.as_ref())?;
        let provider = build_provider(&resolved, req.model.as_ref(), self.env_resolver.as_ref());
        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Debug, "provider resolved")
                .layer("usecase")
                .kind("config")
                .field("profile", resolved.profile_name.as_str())
                .field("provider", provider.name())
                .field("model", provider.model()),
        );

        let sop = self.read_document("SOP document", &req.sop)?;
        let policy = self.read_document("Policy document", &req.policy)?;

        self.console
            .notice("Analyzing documents... This may take a minute...")?;
        let comparator = DocumentComparator::new(Arc::new(provider), Arc::clone(&self.logger));
        let report = comparator.generate_report(&sop, &policy)?;

        match req.output {
            Some(ref path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    self.fs.create_dir_all(parent)?;
                }
                self.fs.write(path, report.as_str())?;
                self.console
                    .notice(&format!("Report written to {}", path.display()))?;
            }
            None => self.console.print(report.as_str())?,
        }
        Ok(())
    }

    /// 入力 PDF を読む。中身の検証はしない（空ファイルも許す）
    fn read_document(&self, label: &str, path: &Path) -> Result<Vec<u8>, Error> {
        let bytes = self.fs.read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.console.notice(&format!(
            "{}: {} ({})",
            label,
            name,
            format_size_kb(bytes.len())
        ))?;
        Ok(bytes)
    }
}

/// バイト数を "12.34 KB" 形式にする
fn format_size_kb(len: usize) -> String {
    format!("{:.2} KB", len as f64 / 1024.0)
}
