use std::path::Path;
use std::sync::{Arc, Mutex};

use common::adapter::{MapEnvResolver, NoopLog, StdFileSystem};
use common::compliance::COMPLIANCE_PROMPT;
use common::domain::{ModelName, ProviderName};
use common::error::Error;
use tempfile::TempDir;

use crate::cli::Config;
use crate::ports::inbound::UseCaseRunner;
use crate::ports::outbound::Console;
use crate::wiring;

/// print / notice を溜める Console
#[derive(Default)]
struct RecordingConsole {
    printed: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
}

impl RecordingConsole {
    fn printed(&self) -> Vec<String> {
        self.printed.lock().unwrap().clone()
    }

    fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Console for RecordingConsole {
    fn print(&self, text: &str) -> Result<(), Error> {
        self.printed.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn notice(&self, line: &str) -> Result<(), Error> {
        self.notices.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

/// AUDIT_AI_HOME を一時ディレクトリに向けた環境
struct Fixture {
    home: TempDir,
    console: Arc<RecordingConsole>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            home: tempfile::tempdir().unwrap(),
            console: Arc::new(RecordingConsole::default()),
        }
    }

    fn home(&self) -> &Path {
        self.home.path()
    }

    fn write_pdf(&self, name: &str, body: &[u8]) -> std::path::PathBuf {
        let path = self.home().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    fn write_profiles(&self, json: &str) {
        let dir = self.home().join("config");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("profiles.json"), json).unwrap();
    }

    fn run_with_env(&self, env: MapEnvResolver, config: Config) -> Result<i32, Error> {
        let app = wiring::wire_with(
            Arc::new(env.with("AUDIT_AI_HOME", self.home().to_str().unwrap())),
            Arc::new(StdFileSystem),
            Arc::clone(&self.console) as Arc<dyn Console>,
            Arc::new(NoopLog),
        );
        let runner = crate::Runner { app };
        runner.run(config)
    }

    fn run(&self, config: Config) -> Result<i32, Error> {
        self.run_with_env(MapEnvResolver::new(), config)
    }

    fn compare_config(&self, profile: Option<&str>) -> Config {
        Config {
            profile: profile.map(ProviderName::new),
            sop: Some(self.write_pdf("sop.pdf", b"%PDF-1.4 sop")),
            policy: Some(self.write_pdf("policy.pdf", b"%PDF-1.4 policy")),
            ..Default::default()
        }
    }
}

#[test]
fn test_run_app_with_help() {
    let fx = Fixture::new();
    let config = Config {
        help: true,
        ..Default::default()
    };
    assert_eq!(fx.run(config).unwrap(), 0);
}

#[test]
fn test_run_app_without_documents() {
    let fx = Fixture::new();
    let err = fx.run(Config::default()).unwrap_err();
    assert!(err.to_string().contains("Please provide an SOP document"));
    assert_eq!(err.exit_code(), 64);
}

#[test]
fn test_run_app_echo_profile_prints_report() {
    let fx = Fixture::new();
    let code = fx.run(fx.compare_config(Some("echo"))).unwrap();
    assert_eq!(code, 0);

    let printed = fx.console.printed();
    assert_eq!(printed.len(), 1);
    assert!(printed[0].starts_with("[Echo Provider] Received 2 document(s)"));
    assert!(printed[0].contains("SOP_Document, Policy_Document"));

    let notices = fx.console.notices();
    assert!(notices.iter().any(|n| n == "SOP document: sop.pdf (0.01 KB)"));
    assert!(notices.iter().any(|n| n == "Policy document: policy.pdf (0.01 KB)"));
}

#[test]
fn test_run_app_writes_report_to_output_file() {
    let fx = Fixture::new();
    let output = fx.home().join("reports").join("compliance_report.md");
    let config = Config {
        output: Some(output.clone()),
        ..fx.compare_config(Some("echo"))
    };
    assert_eq!(fx.run(config).unwrap(), 0);

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("[Echo Provider]"));
    assert!(fx.console.printed().is_empty());
    assert!(fx
        .console
        .notices()
        .iter()
        .any(|n| n.starts_with("Report written to")));
}

#[test]
fn test_run_app_gemini_without_api_key_is_configuration_error() {
    let fx = Fixture::new();
    let err = fx.run(fx.compare_config(None)).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert!(err.to_string().contains("GEMINI_API_KEY"));
    assert_eq!(err.exit_code(), 78);
    assert!(fx.console.printed().is_empty());
}

#[test]
fn test_run_app_profile_default_from_profiles_json() {
    let fx = Fixture::new();
    fx.write_profiles(r#"{"default_provider":"dry","providers":{"dry":{"type":"echo"}}}"#);
    let config = Config {
        model: Some(ModelName::new("ignored-by-echo")),
        ..fx.compare_config(None)
    };
    assert_eq!(fx.run(config).unwrap(), 0);
    assert!(fx.console.printed()[0].starts_with("[Echo Provider]"));
}

#[test]
fn test_run_app_unknown_profile_is_usage_error() {
    let fx = Fixture::new();
    let err = fx.run(fx.compare_config(Some("gpt"))).unwrap_err();
    assert!(err.is_usage());
    assert!(err.to_string().contains("Unknown provider: 'gpt'"));
}

#[test]
fn test_run_app_missing_input_file_is_io_error() {
    let fx = Fixture::new();
    let config = Config {
        profile: Some(ProviderName::new("echo")),
        sop: Some(fx.home().join("missing.pdf")),
        policy: Some(fx.write_pdf("policy.pdf", b"%PDF-1.4 policy")),
        ..Default::default()
    };
    let err = fx.run(config).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.exit_code(), 74);
}

#[test]
fn test_run_app_print_prompt() {
    let fx = Fixture::new();
    let config = Config {
        print_prompt: true,
        ..Default::default()
    };
    assert_eq!(fx.run(config).unwrap(), 0);
    assert_eq!(fx.console.printed(), vec![COMPLIANCE_PROMPT.to_string()]);
}

#[test]
fn test_run_app_list_profiles_marks_default() {
    let fx = Fixture::new();
    fx.write_profiles(r#"{"default_provider":"dry","providers":{"dry":{"type":"echo"}}}"#);
    let config = Config {
        list_profiles: true,
        ..Default::default()
    };
    assert_eq!(fx.run(config).unwrap(), 0);
    assert_eq!(fx.console.printed(), vec!["dry (default)\necho\ngemini".to_string()]);
}

#[test]
fn test_run_app_broken_profiles_json_is_configuration_error() {
    let fx = Fixture::new();
    fx.write_profiles("{ not json");
    let err = fx.run(fx.compare_config(Some("echo"))).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn test_run_app_without_any_home_uses_builtin_profiles() {
    // AUDIT_AI_HOME / XDG_CONFIG_HOME / HOME がどれも無い環境
    let fx = Fixture::new();
    let app = wiring::wire_with(
        Arc::new(MapEnvResolver::new()),
        Arc::new(StdFileSystem),
        Arc::clone(&fx.console) as Arc<dyn Console>,
        Arc::new(NoopLog),
    );
    let runner = crate::Runner { app };
    assert_eq!(runner.run(fx.compare_config(Some("echo"))).unwrap(), 0);
    assert!(fx.console.printed()[0].starts_with("[Echo Provider]"));

    let config = Config {
        list_profiles: true,
        ..Default::default()
    };
    assert_eq!(runner.run(config).unwrap(), 0);
    assert_eq!(fx.console.printed()[1], "echo\ngemini (default)");
}
