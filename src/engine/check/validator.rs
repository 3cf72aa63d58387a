use log::{debug, warn};
use regex::Regex;
use serde_json::Value;

use crate::domain::document::{Document, json_type_name};
use crate::domain::error::ValidationError;
use crate::domain::report::{CheckEvent, CheckWarning, ValidationOutcome};
use crate::domain::rules::{FieldRule, GITHUB_ORIGIN, UrlPolicy};
use crate::engine::check::Registry;

pub fn validate<F>(
    document: &Document,
    registry: &Registry,
    mut on_event: F,
) -> Result<ValidationOutcome, ValidationError>
where
    F: FnMut(CheckEvent<'_>),
{
    let mut outcome = ValidationOutcome::default();
    if registry.is_empty() {
        warn!("no rules registered; every report passes");
    }
    debug!("validating {} registered fields", registry.len());

    for entry in registry {
        let field = entry.field.as_str();
        on_event(CheckEvent::Checking(field));

        let Some(value) = document.get(field) else {
            return Err(ValidationError::MissingField {
                field: field.to_string(),
            });
        };

        debug!("checking `{field}` with {} rule", entry.rule.as_str());
        if let Some(warning) = check_rule(field, &entry.rule, value)? {
            on_event(CheckEvent::Warning(&warning));
            outcome.warnings.push(warning);
        }
        outcome.checked_fields.push(field.to_string());
    }

    Ok(outcome)
}

/// Applies one rule; `Ok(Some(_))` passes with a warning.
pub fn check_rule(
    field: &str,
    rule: &FieldRule,
    value: &Value,
) -> Result<Option<CheckWarning>, ValidationError> {
    match rule {
        FieldRule::String => {
            expect_str(field, value)?;
            Ok(None)
        }
        FieldRule::GithubUrl { policy } => {
            check_github_url(field, policy, value)?;
            Ok(None)
        }
        FieldRule::StringList { warn_below } => check_string_list(field, *warn_below, value),
        FieldRule::OneOf { allowed } => {
            check_one_of(field, allowed, value)?;
            Ok(None)
        }
    }
}

fn expect_str<'a>(field: &str, value: &'a Value) -> Result<&'a str, ValidationError> {
    value.as_str().ok_or_else(|| ValidationError::TypeMismatch {
        field: field.to_string(),
        expected: "string",
        actual: json_type_name(value),
    })
}

fn check_github_url(field: &str, policy: &UrlPolicy, value: &Value) -> Result<(), ValidationError> {
    let url = expect_str(field, value)?;
    let accepted = match policy {
        UrlPolicy::Strict {
            organization,
            repository_prefix,
        } => strict_url_pattern(field, organization, repository_prefix)?.is_match(url),
        UrlPolicy::Loose => url.starts_with(GITHUB_ORIGIN),
    };

    if accepted {
        Ok(())
    } else {
        let message = match policy {
            UrlPolicy::Strict { .. } => {
                format!("it should have the form {}", policy.expected_shape())
            }
            UrlPolicy::Loose => format!("it should start with {GITHUB_ORIGIN}"),
        };
        Err(ValidationError::FormatViolation {
            field: field.to_string(),
            message,
        })
    }
}

fn strict_url_pattern(
    field: &str,
    organization: &str,
    repository_prefix: &str,
) -> Result<Regex, ValidationError> {
    let pattern = format!(
        "^{}{}/{}-[^./\\s]+$",
        regex::escape(GITHUB_ORIGIN),
        regex::escape(organization),
        regex::escape(repository_prefix)
    );
    Regex::new(&pattern).map_err(|err| ValidationError::InvalidRule {
        field: field.to_string(),
        message: err.to_string(),
    })
}

fn check_string_list(
    field: &str,
    warn_below: usize,
    value: &Value,
) -> Result<Option<CheckWarning>, ValidationError> {
    let items = match value {
        Value::Array(items) if items.iter().all(Value::is_string) => items,
        other => {
            return Err(ValidationError::TypeMismatch {
                field: field.to_string(),
                expected: "array of strings",
                actual: json_type_name(other),
            });
        }
    };

    if items.len() < warn_below {
        return Ok(Some(CheckWarning {
            field: field.to_string(),
            message: format!("You only have {} {field}!", items.len()),
        }));
    }
    Ok(None)
}

fn check_one_of(field: &str, allowed: &[String], value: &Value) -> Result<(), ValidationError> {
    let actual = expect_str(field, value)?.to_lowercase();
    if allowed.iter().any(|candidate| candidate.to_lowercase() == actual) {
        return Ok(());
    }
    Err(ValidationError::FormatViolation {
        field: field.to_string(),
        message: format!("it should be {}", describe_choices(allowed)),
    })
}

fn describe_choices(allowed: &[String]) -> String {
    match allowed {
        [only] => only.clone(),
        [first, second] => format!("either {first} or {second}"),
        _ => format!("one of {}", allowed.join(", ")),
    }
}
