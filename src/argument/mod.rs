//! Typed argument combinators.
//!
//! An [`Argument`] validates a prefix of the remaining input text and yields
//! a [`Value`] plus the unconsumed remainder. Consumption is strictly
//! left-to-right and greedy by token: each primitive splits the remaining
//! text on the first space, operates on that token alone, and hands back the
//! trimmed rest — except [`RestArgument`], which consumes everything, and
//! [`ClientArgument`], whose pattern captures the remainder itself.
//!
//! The variant set is closed: four primitives plus [`GroupArgument`], which
//! composes children under AND/OR semantics and itself satisfies the
//! argument contract, so grammars nest arbitrarily.

mod client;
mod group;
mod number;
mod rest;
mod string;

pub use client::ClientArgument;
pub use group::{GroupArgument, GroupKind};
pub use number::NumberArgument;
pub use rest::RestArgument;
pub use string::StringArgument;

use crate::error::ParseError;
use std::collections::HashMap;
use std::fmt;

/// A resolved argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
    /// Resolution of a grouped argument: child name to child value.
    Map(HashMap<String, Value>),
    /// An optional argument failed and carried no default.
    None,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::Num(n) => write!(f, "{n}"),
            Self::Map(_) => write!(f, "..."),
            Self::None => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Num(n as f64)
    }
}

/// Metadata shared by every argument variant.
///
/// `optional == false` implies `default.is_none()`; the builder surface makes
/// the violation impossible (defaults are only settable via `optional_with`).
#[derive(Debug, Clone)]
pub struct ArgMeta {
    name: String,
    display_name: Option<String>,
    optional: bool,
    default: Option<Value>,
}

impl ArgMeta {
    pub(crate) fn new(name: &str) -> Self {
        Self { name: name.to_string(), display_name: None, optional: false, default: None }
    }

    pub(crate) fn set_display_name(&mut self, display_name: &str) {
        self.display_name = Some(display_name.to_string());
    }

    pub(crate) fn set_optional(&mut self, default: Option<Value>) {
        self.optional = true;
        self.default = default;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Usage fragment: `<name>` for required, `[name]` or `[name=default]`
    /// for optional.
    pub fn manual(&self) -> String {
        if !self.optional {
            return format!("<{}>", self.display_name());
        }
        match &self.default {
            Some(default) => format!("[{}={}]", self.display_name(), default),
            None => format!("[{}]", self.display_name()),
        }
    }
}

/// The closed set of argument variants.
#[derive(Debug, Clone)]
pub enum Argument {
    String(StringArgument),
    Number(NumberArgument),
    Client(ClientArgument),
    Rest(RestArgument),
    Group(GroupArgument),
}

impl Argument {
    pub(crate) fn meta(&self) -> &ArgMeta {
        match self {
            Self::String(a) => a.meta(),
            Self::Number(a) => a.meta(),
            Self::Client(a) => a.meta(),
            Self::Rest(a) => a.meta(),
            Self::Group(a) => a.meta(),
        }
    }

    pub fn name(&self) -> &str {
        self.meta().name()
    }

    pub fn is_optional(&self) -> bool {
        self.meta().is_optional()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.meta().default_value()
    }

    pub fn manual(&self) -> String {
        self.meta().manual()
    }

    /// Validate a prefix of `remaining`, yielding the resolved value and the
    /// unconsumed remainder.
    pub fn validate(&self, remaining: &str) -> Result<(Value, String), ParseError> {
        match self {
            Self::String(a) => a.validate(remaining),
            Self::Number(a) => a.validate(remaining),
            Self::Client(a) => a.validate(remaining),
            Self::Rest(a) => a.validate(remaining),
            Self::Group(a) => a.validate(remaining),
        }
    }
}

impl From<StringArgument> for Argument {
    fn from(a: StringArgument) -> Self {
        Self::String(a)
    }
}

impl From<NumberArgument> for Argument {
    fn from(a: NumberArgument) -> Self {
        Self::Number(a)
    }
}

impl From<ClientArgument> for Argument {
    fn from(a: ClientArgument) -> Self {
        Self::Client(a)
    }
}

impl From<RestArgument> for Argument {
    fn from(a: RestArgument) -> Self {
        Self::Rest(a)
    }
}

impl From<GroupArgument> for Argument {
    fn from(a: GroupArgument) -> Self {
        Self::Group(a)
    }
}

/// Split the remaining text into the next token and the trimmed rest.
pub(crate) fn split_token(remaining: &str) -> (&str, &str) {
    match remaining.split_once(' ') {
        Some((token, rest)) => (token, rest.trim()),
        None => (remaining, ""),
    }
}

/// Argument names are identifiers: `[A-Za-z0-9_]+`.
pub(crate) fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// The per-dispatch record of resolved argument values, keyed by argument
/// name. Built fresh for every candidate and discarded after the invocation
/// returns or fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedArgs {
    values: HashMap<String, Value>,
}

impl ResolvedArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The value for `name` as a string slice, if present and a string.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// The value for `name` as a number, if present and numeric.
    pub fn num(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_num)
    }

    /// The value for `name` as a group resolution map, if present.
    pub fn map(&self, name: &str) -> Option<&HashMap<String, Value>> {
        self.get(name).and_then(Value::as_map)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_token_trims_rest() {
        assert_eq!(split_token("hello 5 rest"), ("hello", "5 rest"));
        assert_eq!(split_token("hello   5"), ("hello", "5"));
        assert_eq!(split_token("hello"), ("hello", ""));
        assert_eq!(split_token(""), ("", ""));
    }

    #[test]
    fn identifier_charset() {
        assert!(is_identifier("name_1"));
        assert!(is_identifier("X9"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("with space"));
        assert!(!is_identifier("dash-ed"));
    }

    #[test]
    fn manual_rendering() {
        let mut meta = ArgMeta::new("age");
        assert_eq!(meta.manual(), "<age>");

        meta.set_optional(None);
        assert_eq!(meta.manual(), "[age]");

        meta.set_optional(Some(Value::Num(0.0)));
        assert_eq!(meta.manual(), "[age=0]");

        meta.set_display_name("years");
        assert_eq!(meta.manual(), "[years=0]");
    }

    #[test]
    fn value_accessors() {
        assert_eq!(Value::Str("x".into()).as_str(), Some("x"));
        assert_eq!(Value::Num(4.0).as_num(), Some(4.0));
        assert_eq!(Value::None.as_str(), None);
    }
}
