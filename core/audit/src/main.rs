mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;
use common::compliance::compliance_prompt;
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome, BIN_NAME};
use domain::AuditCommand;
use ports::inbound::UseCaseRunner;
use wiring::{wire_audit, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(config)?;
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = match cmd {
            AuditCommand::Help => {
                print_help();
                Ok(0)
            }
            AuditCommand::ListProfiles => self.list_profiles(),
            AuditCommand::PrintPrompt => self.app.console.print(compliance_prompt()).map(|_| 0),
            AuditCommand::Compare(req) => self.app.compare_use_case.run(&req).map(|_| 0),
        };

        let code = match result {
            Ok(code) => code,
            Err(ref e) => e.exit_code(),
        };
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }
}

impl Runner {
    fn list_profiles(&self) -> Result<i32, Error> {
        let (names, default) = self.app.compare_use_case.list_profiles()?;
        let lines: Vec<String> = names
            .iter()
            .map(|name| {
                if default.as_deref() == Some(name.as_str()) {
                    format!("{} (default)", name)
                } else {
                    name.clone()
                }
            })
            .collect();
        self.app.console.print(&lines.join("\n"))?;
        Ok(0)
    }
}

fn cmd_name_for_log(cmd: &AuditCommand) -> &'static str {
    match cmd {
        AuditCommand::Help => "help",
        AuditCommand::ListProfiles => "list-profiles",
        AuditCommand::PrintPrompt => "print-prompt",
        AuditCommand::Compare(_) => "compare",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("{}: {}", BIN_NAME, e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let outcome = parse_args()?;
    let config = match outcome {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let app = wire_audit(config.verbose);
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: audit [options] <sop.pdf> <policy.pdf>");
}

fn print_help() {
    println!("Usage: audit [options] <sop.pdf> <policy.pdf>");
    println!("Compare a Policy document against an SOP document and print a Markdown compliance report.");
    println!();
    println!("Options:");
    println!("  -h, --help                    Show this help message");
    println!("  -o, --output <path>           Write the report to a file instead of stdout");
    println!("  -p, --profile <profile>       Specify provider profile (gemini, echo, or a name from profiles.json)");
    println!("  -m, --model <model>           Specify model name (default: gemini-3-flash-preview)");
    println!("  -L, --list-profiles           List currently available provider profiles (from profiles.json + built-ins)");
    println!("      --print-prompt            Print the instructional prompt sent with the documents");
    println!("  -v, --verbose                 Mirror structured log records to stderr");
    println!("      --generate <shell>        Generate shell completion script (bash, zsh, fish, elvish, powershell)");
    println!();
    println!("Environment:");
    println!("  GEMINI_API_KEY   API key for the gemini provider (a profile may name another variable via api_key_env)");
    println!("  AUDIT_AI_HOME    Home directory (config/profiles.json, log/audit.jsonl). Default: $XDG_CONFIG_HOME/audit-ai or ~/.config/audit-ai.");
}
