use crate::domain::{AuditCommand, CompareRequest};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;
use std::path::PathBuf;

/// コマンド名（usage・補完スクリプトで使う）
pub const BIN_NAME: &str = "audit";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -L / --list-profiles: 現在有効なプロファイル一覧を表示
    pub list_profiles: bool,
    /// --print-prompt: モデルに送る固定プロンプトを表示
    pub print_prompt: bool,
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    /// -o / --output: レポートの保存先（省略時は標準出力）
    pub output: Option<PathBuf>,
    /// 1 番目の位置引数: SOP の PDF
    pub sop: Option<PathBuf>,
    /// 2 番目の位置引数: ポリシーの PDF
    pub policy: Option<PathBuf>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new(BIN_NAME)
        .about("Compare a Policy document against an SOP document and print a compliance report")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("list-profiles")
                .short('L')
                .long("list-profiles")
                .help("List currently available provider profiles")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("print-prompt")
                .long("print-prompt")
                .help("Print the instructional prompt sent with the documents")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Mirror structured log records to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("Specify provider profile (gemini, echo, or a name from profiles.json)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Specify model name (e.g. gemini-3-flash-preview)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .value_name("path")
                .help("Write the report to a file instead of stdout (e.g. compliance_report.md)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("sop")
                .index(1)
                .value_name("sop.pdf")
                .help("Standard Operating Procedure document (PDF)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            clap::Arg::new("policy")
                .index(2)
                .value_name("policy.pdf")
                .help("Policy document to check against the SOP (PDF)")
                .value_parser(value_parser!(PathBuf)),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        list_profiles: matches.get_flag("list-profiles"),
        print_prompt: matches.get_flag("print-prompt"),
        verbose: matches.get_flag("verbose"),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        output: matches.get_one::<PathBuf>("output").cloned(),
        sop: matches.get_one::<PathBuf>("sop").cloned(),
        policy: matches.get_one::<PathBuf>("policy").cloned(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[cfg(test)]
fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut std::io::stdout());
}

/// Config を AuditCommand に変換する
///
/// 比較には SOP とポリシーの両方が必要。片方でも欠けていれば usage エラー。
pub fn config_to_command(config: Config) -> Result<AuditCommand, Error> {
    if config.help {
        return Ok(AuditCommand::Help);
    }

    if config.list_profiles {
        return Ok(AuditCommand::ListProfiles);
    }

    if config.print_prompt {
        return Ok(AuditCommand::PrintPrompt);
    }

    match (config.sop, config.policy) {
        (Some(sop), Some(policy)) => Ok(AuditCommand::Compare(CompareRequest {
            sop,
            policy,
            output: config.output,
            profile: config.profile,
            model: config.model,
        })),
        (None, _) => Err(Error::invalid_argument("Please provide an SOP document")),
        (Some(_), None) => Err(Error::invalid_argument("Please provide a Policy document")),
    }
}
