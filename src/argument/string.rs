//! String argument: consumes one token and checks it against its
//! constraints, in order: case-forcing, minimum length, maximum length,
//! whitelist membership, pattern match. The first failing check
//! short-circuits.

use super::{ArgMeta, Value, split_token};
use crate::error::ParseError;
use regex::Regex;

/// Upper/lower case forcing. Mutually exclusive; last set wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CaseForce {
    Upper,
    Lower,
}

/// The constraint set shared by [`StringArgument`] and
/// [`super::RestArgument`]. Constraints are pure predicates, set once via
/// the builder and evaluated at validation time.
#[derive(Debug, Clone, Default)]
pub(crate) struct StringChecks {
    case: Option<CaseForce>,
    min: Option<usize>,
    max: Option<usize>,
    whitelist: Option<Vec<String>>,
    pattern: Option<Regex>,
}

impl StringChecks {
    pub(crate) fn force_upper(&mut self) {
        self.case = Some(CaseForce::Upper);
    }

    pub(crate) fn force_lower(&mut self) {
        self.case = Some(CaseForce::Lower);
    }

    pub(crate) fn set_min(&mut self, min: usize) {
        self.min = Some(min);
    }

    pub(crate) fn set_max(&mut self, max: usize) {
        self.max = Some(max);
    }

    pub(crate) fn set_whitelist<I, S>(&mut self, allowed: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = Some(allowed.into_iter().map(Into::into).collect());
    }

    pub(crate) fn set_pattern(&mut self, pattern: Regex) {
        self.pattern = Some(pattern);
    }

    /// Apply case-forcing, then run every check against the forced value.
    pub(crate) fn apply(&self, token: &str) -> Result<String, ParseError> {
        let value = match self.case {
            Some(CaseForce::Upper) => token.to_uppercase(),
            Some(CaseForce::Lower) => token.to_lowercase(),
            None => token.to_string(),
        };

        if let Some(min) = self.min
            && value.chars().count() < min
        {
            return Err(ParseError::TooShort { value, min });
        }
        if let Some(max) = self.max
            && value.chars().count() > max
        {
            return Err(ParseError::TooLong { value, max });
        }
        if let Some(allowed) = &self.whitelist
            && !allowed.iter().any(|a| a == &value)
        {
            return Err(ParseError::NotWhitelisted { value });
        }
        if let Some(pattern) = &self.pattern
            && !pattern.is_match(&value)
        {
            return Err(ParseError::PatternMismatch { value });
        }

        Ok(value)
    }
}

/// A single-token string argument.
#[derive(Debug, Clone)]
pub struct StringArgument {
    meta: ArgMeta,
    checks: StringChecks,
}

impl StringArgument {
    pub fn new(name: &str) -> Self {
        Self { meta: ArgMeta::new(name), checks: StringChecks::default() }
    }

    pub fn display_name(mut self, display_name: &str) -> Self {
        self.meta.set_display_name(display_name);
        self
    }

    /// Mark this argument optional with no default; a failure records
    /// [`Value::None`].
    pub fn optional(mut self) -> Self {
        self.meta.set_optional(None);
        self
    }

    /// Mark this argument optional with a default substituted on failure.
    pub fn optional_with(mut self, default: impl Into<Value>) -> Self {
        self.meta.set_optional(Some(default.into()));
        self
    }

    /// Force the token to upper case before any checks run.
    pub fn force_upper_case(mut self) -> Self {
        self.checks.force_upper();
        self
    }

    /// Force the token to lower case before any checks run.
    pub fn force_lower_case(mut self) -> Self {
        self.checks.force_lower();
        self
    }

    /// Minimum length in characters.
    pub fn min(mut self, min: usize) -> Self {
        self.checks.set_min(min);
        self
    }

    /// Maximum length in characters.
    pub fn max(mut self, max: usize) -> Self {
        self.checks.set_max(max);
        self
    }

    /// Restrict the token to an explicit set of allowed values.
    pub fn whitelist<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checks.set_whitelist(allowed);
        self
    }

    /// Require the token to match `pattern`.
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.checks.set_pattern(pattern);
        self
    }

    pub(crate) fn meta(&self) -> &ArgMeta {
        &self.meta
    }

    pub(crate) fn checks(&self) -> &StringChecks {
        &self.checks
    }

    pub fn validate(&self, remaining: &str) -> Result<(Value, String), ParseError> {
        let (token, rest) = split_token(remaining);
        let value = self.checks.apply(token)?;
        Ok((Value::Str(value), rest.to_string()))
    }
}
