use std::path::Path;

use serde_json::{Value, json};

use crate::cmd::check::resolve_config;
use crate::domain::config::ConfigOverrides;
use crate::domain::error::CheckError;
use crate::engine::check::Registry;

/// Describes the active registration sequence without reading a report.
pub fn list_payload(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<Value, CheckError> {
    let config = resolve_config(config_path, overrides)?;
    let registry = Registry::for_config(&config);
    Ok(json!({
        "rule_set": config.rule_set,
        "rules": registry,
    }))
}
