use serde::Serialize;

pub const GITHUB_ORIGIN: &str = "https://github.com/";

/// Check applied to the value of one registered field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldRule {
    /// Value must be a JSON string.
    String,
    /// Value must be a GitHub repository URL accepted by `policy`.
    GithubUrl { policy: UrlPolicy },
    /// Value must be an array of strings; shorter than `warn_below` only warns.
    StringList { warn_below: usize },
    /// Value must be a string equal to one of `allowed`, ignoring case.
    OneOf { allowed: Vec<String> },
}

impl FieldRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::GithubUrl { .. } => "github_url",
            Self::StringList { .. } => "string_list",
            Self::OneOf { .. } => "one_of",
        }
    }
}

/// Accepted shape of a `github-url` value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum UrlPolicy {
    /// `https://github.com/<organization>/<repository_prefix>-<login>`.
    Strict {
        organization: String,
        repository_prefix: String,
    },
    /// Anything under `https://github.com/`.
    Loose,
}

impl UrlPolicy {
    /// Human-readable form shown when a URL is rejected.
    pub fn expected_shape(&self) -> String {
        match self {
            Self::Strict {
                organization,
                repository_prefix,
            } => format!("{GITHUB_ORIGIN}{organization}/{repository_prefix}-LOGIN"),
            Self::Loose => format!("{GITHUB_ORIGIN}..."),
        }
    }
}

/// One entry of the registration sequence.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Registration {
    pub field: String,
    pub rule: FieldRule,
}

impl Registration {
    pub fn new(field: impl Into<String>, rule: FieldRule) -> Self {
        Self {
            field: field.into(),
            rule,
        }
    }
}
