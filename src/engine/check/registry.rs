use std::slice;

use serde::Serialize;

use crate::domain::config::{CheckConfig, RuleSet};
use crate::domain::rules::{FieldRule, Registration, UrlPolicy};

/// Ordered registration sequence. Order is check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    registrations: Vec<Registration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule. Duplicate field names are kept and run in order.
    pub fn register(&mut self, field: impl Into<String>, rule: FieldRule) -> &mut Self {
        self.registrations.push(Registration::new(field, rule));
        self
    }

    /// Builds the rule sequence for the configured assignment policy.
    pub fn for_config(config: &CheckConfig) -> Self {
        let url_policy = match config.rule_set {
            RuleSet::Strict => UrlPolicy::Strict {
                organization: config.organization.clone(),
                repository_prefix: config.repository_prefix.clone(),
            },
            RuleSet::Loose => UrlPolicy::Loose,
        };

        let mut registry = Self::new();
        registry
            .register("first-name", FieldRule::String)
            .register("last-name", FieldRule::String)
            .register("github-url", FieldRule::GithubUrl { policy: url_policy })
            .register(
                "extensions",
                FieldRule::StringList {
                    warn_below: config.min_extensions,
                },
            );
        if config.rule_set == RuleSet::Strict {
            registry.register(
                "framework",
                FieldRule::OneOf {
                    allowed: config.frameworks.clone(),
                },
            );
        }
        registry
    }

    pub fn iter(&self) -> slice::Iter<'_, Registration> {
        self.registrations.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|entry| entry.field.as_str())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Registration;
    type IntoIter = slice::Iter<'a, Registration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
