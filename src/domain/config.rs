use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

pub const DEFAULT_ORGANIZATION: &str = "ucll-vgo2122";
pub const DEFAULT_REPOSITORY_PREFIX: &str = "minesweeper";
pub const DEFAULT_MIN_EXTENSIONS: usize = 3;
pub const DEFAULT_FRAMEWORKS: [&str; 2] = ["WPF", "Avalonia"];

/// Which snapshot of the assignment rules is active for a run.
///
/// `Strict` scopes `github-url` to the assignment organization and requires
/// `framework`; `Loose` accepts any GitHub URL and has no `framework` rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSet {
    #[default]
    Strict,
    Loose,
}

impl RuleSet {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Loose => "loose",
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional TOML policy file. Every key falls back to the built-in default.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub rule_set: Option<RuleSet>,
    pub organization: Option<String>,
    pub repository_prefix: Option<String>,
    pub min_extensions: Option<usize>,
    pub frameworks: Option<Vec<String>>,
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub rule_set: Option<RuleSet>,
    pub organization: Option<String>,
    pub repository_prefix: Option<String>,
}

/// Fully resolved rule policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckConfig {
    pub rule_set: RuleSet,
    pub organization: String,
    pub repository_prefix: String,
    pub min_extensions: usize,
    pub frameworks: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            rule_set: RuleSet::default(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            repository_prefix: DEFAULT_REPOSITORY_PREFIX.to_string(),
            min_extensions: DEFAULT_MIN_EXTENSIONS,
            frameworks: DEFAULT_FRAMEWORKS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CheckConfig {
    /// Layers command-line overrides over the config file over defaults.
    pub fn resolve(
        file: Option<ConfigFile>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let config = Self {
            rule_set: overrides
                .rule_set
                .or(file.rule_set)
                .unwrap_or(defaults.rule_set),
            organization: overrides
                .organization
                .or(file.organization)
                .unwrap_or(defaults.organization),
            repository_prefix: overrides
                .repository_prefix
                .or(file.repository_prefix)
                .unwrap_or(defaults.repository_prefix),
            min_extensions: file.min_extensions.unwrap_or(defaults.min_extensions),
            frameworks: file.frameworks.unwrap_or(defaults.frameworks),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.organization.trim().is_empty() {
            return Err(ConfigError::EmptyValue { key: "organization" });
        }
        if self.repository_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                key: "repository_prefix",
            });
        }
        if self.frameworks.is_empty() {
            return Err(ConfigError::EmptyValue { key: "frameworks" });
        }
        if let Some(blank) = self.frameworks.iter().position(|name| name.trim().is_empty()) {
            return Err(ConfigError::BlankFramework { index: blank });
        }
        Ok(())
    }
}
