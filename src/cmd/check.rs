use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::domain::config::{CheckConfig, ConfigOverrides};
use crate::domain::error::CheckError;
use crate::domain::report::{
    CheckEvent, PipelineInputSource, PipelineReport, PipelineStatus, ValidationOutcome,
};
use crate::engine::check::{self, Registry};
use crate::io::{self, reader};

/// Input arguments for check command execution API.
#[derive(Debug, Clone)]
pub struct CheckCommandArgs {
    pub report: PathBuf,
    pub config: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

impl Default for CheckCommandArgs {
    fn default() -> Self {
        Self {
            report: PathBuf::from(io::DEFAULT_REPORT_PATH),
            config: None,
            overrides: ConfigOverrides::default(),
        }
    }
}

/// Outcome of one run plus the diagnostics collected along the way.
#[derive(Debug)]
pub struct CheckCommandResponse {
    pub result: Result<ValidationOutcome, CheckError>,
    pub pipeline: PipelineReport,
}

impl CheckCommandResponse {
    pub fn exit_code(&self) -> i32 {
        match &self.result {
            Ok(_) => 0,
            Err(error) => error.exit_code_and_kind().0,
        }
    }
}

/// Resolves the rule policy from an optional TOML file and CLI overrides.
pub fn resolve_config(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<CheckConfig, CheckError> {
    let file = config_path.map(reader::read_config).transpose()?;
    let config = CheckConfig::resolve(file, overrides)?;
    info!(
        "using {} rule set (organization `{}`, prefix `{}`)",
        config.rule_set, config.organization, config.repository_prefix
    );
    Ok(config)
}

/// Loads the report and validates it, writing progress lines to `out`.
///
/// Failures are returned, not printed; the caller owns the final
/// `ERROR`/`SUCCESS` line and the exit status.
pub fn run<W: Write>(args: &CheckCommandArgs, out: &mut W) -> CheckCommandResponse {
    let mut pipeline = PipelineReport::new(
        "check",
        PipelineInputSource::report(args.report.display().to_string()),
        args.overrides.rule_set.unwrap_or_default(),
    );

    let result = execute(args, out, &mut pipeline);
    match &result {
        Ok(outcome) => {
            pipeline.checked_fields = outcome.checked_fields.clone();
            pipeline.warnings = outcome.warnings.clone();
            pipeline.status = PipelineStatus::Passed;
        }
        Err(error) => {
            pipeline.status = PipelineStatus::Failed {
                error: error.exit_code_and_kind().1.to_string(),
                message: error.to_string(),
            };
        }
    }

    CheckCommandResponse { result, pipeline }
}

fn execute<W: Write>(
    args: &CheckCommandArgs,
    out: &mut W,
    pipeline: &mut PipelineReport,
) -> Result<ValidationOutcome, CheckError> {
    pipeline.push_step("resolve_config");
    let config = resolve_config(args.config.as_deref(), args.overrides.clone())?;
    pipeline.rule_set = config.rule_set;
    let registry = Registry::for_config(&config);

    let report_name = args.report.display();
    pipeline.push_step("locate_report");
    progress(out, format_args!("Looking for {report_name}"))?;
    reader::locate_report(&args.report)?;

    pipeline.push_step("open_report");
    progress(out, format_args!("Opening {report_name}..."))?;
    let file = reader::open_report(&args.report)?;

    pipeline.push_step("parse_json");
    progress(out, format_args!("Parsing JSON..."))?;
    let document = reader::read_document(file)?;

    pipeline.push_step("check_fields");
    progress(out, format_args!("Checking contents..."))?;

    let mut write_error = None;
    let validation = check::execute_check(&document, &registry, |event| {
        if write_error.is_some() {
            return;
        }
        let written = match event {
            CheckEvent::Checking(field) => writeln!(out, "Checking {field}"),
            CheckEvent::Warning(warning) => writeln!(out, "WARNING: {}", warning.message),
        };
        if let Err(error) = written {
            write_error = Some(error);
        }
    });
    if let Some(error) = write_error {
        return Err(CheckError::Output(error));
    }
    validation.map_err(CheckError::from)
}

fn progress<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) -> Result<(), CheckError> {
    writeln!(out, "{line}").map_err(CheckError::Output)
}
