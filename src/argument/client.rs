//! Client-reference argument.
//!
//! Matches a structured caller-reference token: either a decorated
//! rich-text client link (`[URL=client://<id>/<uid>~<nick>]<nick>[/URL]`)
//! or a bare opaque client identifier (27 base64 characters plus `=`).
//! The shape of both forms is an external-format dependency of the hosting
//! chat runtime, kept private to this variant. Unlike the token primitives,
//! the pattern itself captures the trailing remainder, so no split-on-space
//! step runs here.

use super::{ArgMeta, Value};
use crate::error::ParseError;
use regex::Regex;
use std::sync::LazyLock;

static CLIENT_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\[URL=client://\d+/([A-Za-z0-9+/]{27}=)~[^\]]*\][^\[]*\[/URL\]|([A-Za-z0-9+/]{27}=))\s*(.*)$",
    )
    .expect("client reference pattern is valid")
});

/// An argument resolving to a client identifier.
#[derive(Debug, Clone)]
pub struct ClientArgument {
    meta: ArgMeta,
}

impl ClientArgument {
    pub fn new(name: &str) -> Self {
        Self { meta: ArgMeta::new(name) }
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

    pub(crate) fn meta(&self) -> &ArgMeta {
        &self.meta
    }

    pub fn validate(&self, remaining: &str) -> Result<(Value, String), ParseError> {
        let captures = CLIENT_REF.captures(remaining).ok_or(ParseError::ClientNotFound)?;
        let uid = captures
            .get(1)
            .or_else(|| captures.get(2))
            .ok_or(ParseError::ClientNotFound)?;
        let rest = captures.get(3).map_or("", |m| m.as_str());
        Ok((Value::Str(uid.as_str().to_string()), rest.to_string()))
    }
}
