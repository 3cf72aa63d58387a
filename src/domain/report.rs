use serde::Serialize;

use crate::domain::config::RuleSet;

/// Non-fatal finding that does not stop the run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckWarning {
    pub field: String,
    pub message: String,
}

/// Progress notification raised while walking the registration sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckEvent<'a> {
    Checking(&'a str),
    Warning(&'a CheckWarning),
}

/// Result of a validation pass in which every registered field passed.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub checked_fields: Vec<String>,
    pub warnings: Vec<CheckWarning>,
}

/// Diagnostics report emitted when `--emit-pipeline` is enabled.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PipelineReport {
    pub command: String,
    pub input: PipelineInputSource,
    pub rule_set: RuleSet,
    pub steps: Vec<String>,
    pub checked_fields: Vec<String>,
    pub warnings: Vec<CheckWarning>,
    pub status: PipelineStatus,
}

impl PipelineReport {
    pub fn new(command: impl Into<String>, input: PipelineInputSource, rule_set: RuleSet) -> Self {
        Self {
            command: command.into(),
            input,
            rule_set,
            steps: Vec::new(),
            checked_fields: Vec::new(),
            warnings: Vec::new(),
            status: PipelineStatus::Pending,
        }
    }

    pub fn push_step(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }
}

/// Input-source descriptor used in pipeline diagnostics.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PipelineInputSource {
    pub label: String,
    pub path: String,
    pub format: String,
}

impl PipelineInputSource {
    pub fn report(path: impl Into<String>) -> Self {
        Self {
            label: "report".to_string(),
            path: path.into(),
            format: "json".to_string(),
        }
    }
}

/// Final state of the run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineStatus {
    Pending,
    Passed,
    Failed { error: String, message: String },
}
