//! Number argument: parses one token as a floating-point number, then
//! checks minimum, maximum, integer-only, and sign-forcing in that order.

use super::{ArgMeta, Value, split_token};
use crate::error::ParseError;

/// Positive/negative sign forcing. Mutually exclusive; last set wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignForce {
    Positive,
    Negative,
}

/// A single-token numeric argument.
#[derive(Debug, Clone)]
pub struct NumberArgument {
    meta: ArgMeta,
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
    sign: Option<SignForce>,
}

impl NumberArgument {
    pub fn new(name: &str) -> Self {
        Self { meta: ArgMeta::new(name), min: None, max: None, integer: false, sign: None }
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

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Reject values with a fractional part.
    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    /// Reject negative values.
    pub fn positive(mut self) -> Self {
        self.sign = Some(SignForce::Positive);
        self
    }

    /// Reject positive values.
    pub fn negative(mut self) -> Self {
        self.sign = Some(SignForce::Negative);
        self
    }

    pub(crate) fn meta(&self) -> &ArgMeta {
        &self.meta
    }

    pub fn validate(&self, remaining: &str) -> Result<(Value, String), ParseError> {
        let (token, rest) = split_token(remaining);

        let value: f64 = token
            .parse()
            .map_err(|_| ParseError::NotANumber { value: token.to_string() })?;
        if !value.is_finite() {
            return Err(ParseError::NotANumber { value: token.to_string() });
        }

        if let Some(min) = self.min
            && value < min
        {
            return Err(ParseError::TooSmall { value, min });
        }
        if let Some(max) = self.max
            && value > max
        {
            return Err(ParseError::TooLarge { value, max });
        }
        if self.integer && value.fract() != 0.0 {
            return Err(ParseError::NotAnInteger { value });
        }
        match self.sign {
            Some(SignForce::Positive) if value < 0.0 => {
                return Err(ParseError::NotPositive { value });
            }
            Some(SignForce::Negative) if value > 0.0 => {
                return Err(ParseError::NotNegative { value });
            }
            _ => {}
        }

        Ok((Value::Num(value), rest.to_string()))
    }
}
