use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use reportcheck::cmd::{check, rules};
use reportcheck::domain::config::{ConfigOverrides, RuleSet};
use reportcheck::domain::report::PipelineReport;
use reportcheck::io::DEFAULT_REPORT_PATH;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Parser)]
#[command(
    name = "reportcheck",
    version,
    about = "Pre-submission gate for assignment report.json files"
)]
struct Cli {
    /// Report file to validate.
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    report: PathBuf,

    /// TOML file overriding the rule policy.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rule set to enforce.
    #[arg(long, value_enum)]
    rule_set: Option<CliRuleSet>,

    /// GitHub organization required by the strict rule set.
    #[arg(long)]
    organization: Option<String>,

    /// Repository name prefix required by the strict rule set.
    #[arg(long)]
    repository_prefix: Option<String>,

    /// Print the active rules as JSON and exit.
    #[arg(long, default_value_t = false)]
    list_rules: bool,

    /// Print a JSON pipeline report to stderr after the run.
    #[arg(long, default_value_t = false)]
    emit_pipeline: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliRuleSet {
    Strict,
    Loose,
}

impl From<CliRuleSet> for RuleSet {
    fn from(value: CliRuleSet) -> Self {
        match value {
            CliRuleSet::Strict => Self::Strict,
            CliRuleSet::Loose => Self::Loose,
        }
    }
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            rule_set: self.rule_set.map(Into::into),
            organization: self.organization.clone(),
            repository_prefix: self.repository_prefix.clone(),
        }
    }
}

#[derive(Serialize)]
struct CliError<'a> {
    error: &'a str,
    message: String,
    code: i32,
    details: Value,
}

fn main() {
    env_logger::init();
    process::exit(run());
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return handle_parse_error(error),
    };

    if cli.list_rules {
        run_list_rules(&cli)
    } else {
        run_check(cli)
    }
}

fn handle_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{error}");
            0
        }
        _ => {
            emit_error(
                "input_usage_error",
                error.to_string(),
                json!({"kind": "cli_parse_error"}),
                3,
            );
            3
        }
    }
}

fn run_check(cli: Cli) -> i32 {
    let args = check::CheckCommandArgs {
        overrides: cli.overrides(),
        report: cli.report,
        config: cli.config,
    };

    let stdout = io::stdout();
    let mut output = stdout.lock();
    let response = check::run(&args, &mut output);

    let exit_code = match &response.result {
        Ok(_) => {
            if writeln!(output, "SUCCESS\nYou can upload your report now").is_ok() {
                0
            } else {
                1
            }
        }
        Err(error) => {
            let (code, _) = error.exit_code_and_kind();
            // Nothing better to do if stdout itself is gone.
            let _ = writeln!(output, "ERROR: {error}");
            code
        }
    };
    drop(output);

    if cli.emit_pipeline {
        emit_pipeline_report(&response.pipeline);
    }
    exit_code
}

fn run_list_rules(cli: &Cli) -> i32 {
    match rules::list_payload(cli.config.as_deref(), cli.overrides()) {
        Ok(payload) => {
            if emit_json_stdout(&payload) {
                0
            } else {
                emit_error(
                    "internal_error",
                    "failed to serialize rule listing".to_string(),
                    json!({"command": "list_rules"}),
                    1,
                );
                1
            }
        }
        Err(error) => {
            let (code, kind) = error.exit_code_and_kind();
            emit_error(kind, error.to_string(), json!({"command": "list_rules"}), code);
            code
        }
    }
}

fn emit_json_stdout(value: &Value) -> bool {
    match serde_json::to_string(value) {
        Ok(serialized) => {
            println!("{serialized}");
            true
        }
        Err(_) => false,
    }
}

fn emit_pipeline_report(report: &PipelineReport) {
    match serde_json::to_string(report) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(error) => emit_error(
            "internal_error",
            format!("failed to serialize pipeline report: {error}"),
            json!({"command": "emit_pipeline"}),
            1,
        ),
    }
}

fn emit_error(error: &str, message: String, details: Value, code: i32) {
    let payload = CliError {
        error,
        message,
        code,
        details,
    };
    match serde_json::to_string(&payload) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(_) => eprintln!(
            "{{\"error\":\"internal_error\",\"message\":\"failed to serialize error\",\"code\":1}}"
        ),
    }
}
