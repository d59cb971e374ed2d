//! Rest argument: consumes the entire remaining text as one value.
//!
//! Never fails on shape; the remainder after it is always empty. It carries
//! the same constraint set as a string argument and runs the shared check
//! routine against the whole text.

use super::string::StringChecks;
use super::{ArgMeta, Value};
use crate::error::ParseError;
use regex::Regex;

/// An argument consuming the rest of the line.
#[derive(Debug, Clone)]
pub struct RestArgument {
    meta: ArgMeta,
    checks: StringChecks,
}

impl RestArgument {
    pub fn new(name: &str) -> Self {
        Self { meta: ArgMeta::new(name), checks: StringChecks::default() }
    }

    pub fn display_name(mut self, display_name: &str) -> Self {
        self.meta.set_display_name(display_name);
        self
    }

    pub fn optional(mut self) -> Self {
        self.meta.set_optional(None);
        self
    }

    pub fn optional_with(mut self, default: impl Into<Value>) -> Self {
        self.meta.set_optional(Some(default.into()));
        self
    }

    pub fn force_upper_case(mut self) -> Self {
        self.checks.force_upper();
        self
    }

    pub fn force_lower_case(mut self) -> Self {
        self.checks.force_lower();
        self
    }

    pub fn min(mut self, min: usize) -> Self {
        self.checks.set_min(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.checks.set_max(max);
        self
    }

    pub fn whitelist<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checks.set_whitelist(allowed);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.checks.set_pattern(pattern);
        self
    }

    pub(crate) fn meta(&self) -> &ArgMeta {
        &self.meta
    }

    pub fn validate(&self, remaining: &str) -> Result<(Value, String), ParseError> {
        let value = self.checks.apply(remaining)?;
        Ok((Value::Str(value), String::new()))
    }
}
