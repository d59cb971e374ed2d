//! Grouped arguments: AND/OR composition over an ordered child list.
//!
//! A group satisfies the argument contract itself, so groups nest inside
//! groups and appear as top-level grammar entries. The child list must be
//! non-empty before use; the registry enforces this at add time. Ownership
//! makes the tree acyclic by construction.

use super::{ArgMeta, Argument, Value};
use crate::error::ParseError;
use std::collections::HashMap;

/// The combinator governing how a group's children are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// All children must match, in declared order.
    And,
    /// The first child to match wins; later children are not evaluated.
    Or,
}

/// A composite argument resolving to a [`Value::Map`] of its children.
#[derive(Debug, Clone)]
pub struct GroupArgument {
    meta: ArgMeta,
    kind: GroupKind,
    children: Vec<Argument>,
}

impl GroupArgument {
    pub fn new(kind: GroupKind, name: &str) -> Self {
        Self { meta: ArgMeta::new(name), kind, children: Vec::new() }
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

    /// Append a child argument.
    pub fn add(mut self, child: impl Into<Argument>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn children(&self) -> &[Argument] {
        &self.children
    }

    pub(crate) fn meta(&self) -> &ArgMeta {
        &self.meta
    }

    pub fn validate(&self, remaining: &str) -> Result<(Value, String), ParseError> {
        match self.kind {
            GroupKind::And => self.validate_and(remaining),
            GroupKind::Or => self.validate_or(remaining),
        }
    }

    /// Children in declared order against a running remainder. A required
    /// child's failure fails the whole group with that child's error; no
    /// partial map escapes. An optional child's failure records its default
    /// without advancing the remainder.
    fn validate_and(&self, remaining: &str) -> Result<(Value, String), ParseError> {
        let mut resolved = HashMap::new();
        let mut remaining = remaining.to_string();

        for child in &self.children {
            match child.validate(&remaining) {
                Ok((value, rest)) => {
                    resolved.insert(child.name().to_string(), value);
                    remaining = rest;
                }
                Err(_) if child.is_optional() => {
                    resolved.insert(
                        child.name().to_string(),
                        child.default_value().cloned().unwrap_or(Value::None),
                    );
                }
                Err(err) => return Err(err),
            }
        }

        Ok((Value::Map(resolved), remaining))
    }

    /// First child to validate wins: its name maps to its value as the
    /// group's only populated entry, and its remainder is adopted. When
    /// every child fails, the individual errors are discarded in favor of a
    /// generic no-match error.
    fn validate_or(&self, remaining: &str) -> Result<(Value, String), ParseError> {
        for child in &self.children {
            if let Ok((value, rest)) = child.validate(remaining) {
                let mut resolved = HashMap::new();
                resolved.insert(child.name().to_string(), value);
                return Ok((Value::Map(resolved), rest));
            }
        }
        Err(ParseError::NoMatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::{NumberArgument, StringArgument};

    fn and_group() -> GroupArgument {
        GroupArgument::new(GroupKind::And, "pair")
            .add(StringArgument::new("word"))
            .add(NumberArgument::new("count"))
    }

    #[test]
    fn and_resolves_in_order_and_leaves_remainder() {
        let (value, rest) = and_group().validate("hello 5 rest").expect("valid");
        let map = value.as_map().expect("map");
        assert_eq!(map.get("word"), Some(&Value::Str("hello".into())));
        assert_eq!(map.get("count"), Some(&Value::Num(5.0)));
        assert_eq!(rest, "rest");
    }

    #[test]
    fn and_fails_whole_group_on_required_child() {
        let err = and_group().validate("hello world").unwrap_err();
        assert_eq!(err, ParseError::NotANumber { value: "world".into() });
    }

    #[test]
    fn and_substitutes_default_for_optional_child() {
        let group = GroupArgument::new(GroupKind::And, "pair")
            .add(StringArgument::new("word"))
            .add(NumberArgument::new("count").optional_with(1.0));

        let (value, rest) = group.validate("hello").expect("valid");
        let map = value.as_map().expect("map");
        assert_eq!(map.get("count"), Some(&Value::Num(1.0)));
        assert_eq!(rest, "");
    }

    fn or_group() -> GroupArgument {
        GroupArgument::new(GroupKind::Or, "choice")
            .add(StringArgument::new("letter").whitelist(["a", "b"]))
            .add(NumberArgument::new("digit"))
    }

    #[test]
    fn or_first_matching_branch_wins() {
        let (value, _) = or_group().validate("b").expect("valid");
        let map = value.as_map().expect("map");
        assert_eq!(map.get("letter"), Some(&Value::Str("b".into())));
        assert!(!map.contains_key("digit"));

        let (value, _) = or_group().validate("3").expect("valid");
        let map = value.as_map().expect("map");
        assert_eq!(map.get("digit"), Some(&Value::Num(3.0)));
        assert!(!map.contains_key("letter"));
    }

    #[test]
    fn or_all_failures_collapse_to_no_match() {
        assert_eq!(or_group().validate("z").unwrap_err(), ParseError::NoMatch);
    }

    #[test]
    fn groups_nest() {
        let inner = GroupArgument::new(GroupKind::Or, "inner")
            .add(StringArgument::new("letter").whitelist(["x"]))
            .add(NumberArgument::new("digit").integer());
        let outer = GroupArgument::new(GroupKind::And, "outer")
            .add(StringArgument::new("head"))
            .add(inner);

        let (value, rest) = outer.validate("go 7 tail").expect("valid");
        let map = value.as_map().expect("map");
        let inner = map.get("inner").and_then(Value::as_map).expect("inner map");
        assert_eq!(inner.get("digit"), Some(&Value::Num(7.0)));
        assert_eq!(rest, "tail");
    }
}
