//! Unified error handling for chatcmd.
//!
//! Three families: [`ParseError`] for argument constraint violations,
//! [`DefinitionError`] / [`RegistryError`] for misuse of the definition
//! surface, and [`DispatchError`] for per-candidate dispatch outcomes.
//! Parse errors never escape grammar evaluation; the dispatcher converts
//! them into hard or soft outcomes and renders each as a single reply line.

use thiserror::Error;

/// An argument failed one of its own constraints.
///
/// The message embeds the violated constraint and the offending value so it
/// can be surfaced to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("value \"{value}\" is below the minimum length of {min}")]
    TooShort { value: String, min: usize },

    #[error("value \"{value}\" exceeds the maximum length of {max}")]
    TooLong { value: String, max: usize },

    #[error("value \"{value}\" is not one of the allowed values")]
    NotWhitelisted { value: String },

    #[error("value \"{value}\" does not match the required pattern")]
    PatternMismatch { value: String },

    #[error("value \"{value}\" is not a number")]
    NotANumber { value: String },

    #[error("value {value} is below the minimum of {min}")]
    TooSmall { value: f64, min: f64 },

    #[error("value {value} exceeds the maximum of {max}")]
    TooLarge { value: f64, max: f64 },

    #[error("value {value} is not an integer")]
    NotAnInteger { value: f64 },

    #[error("value {value} is not positive")]
    NotPositive { value: f64 },

    #[error("value {value} is not negative")]
    NotNegative { value: f64 },

    #[error("Client not found!")]
    ClientNotFound,

    /// Every alternative of an OR group failed. Child errors are discarded
    /// deliberately; OR does not report which branch almost matched.
    #[error("no valid match found")]
    NoMatch,
}

/// Errors raised when creating a command with an unusable name.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error("command name must not be empty")]
    EmptyName,

    #[error("command name \"{0}\" must not contain whitespace")]
    NameContainsWhitespace(String),

    #[error("command name \"{0}\" is shorter than 2 characters")]
    NameTooShort(String),
}

/// Errors raised when adding a structurally invalid command to a registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("alias \"{alias}\" collides with an existing command name or alias")]
    AliasCollision { alias: String },

    #[error("argument name \"{name}\" is not a valid identifier")]
    InvalidArgumentName { name: String },

    #[error("argument name \"{name}\" is used more than once in the same grammar")]
    DuplicateArgumentName { name: String },

    #[error("grouped argument \"{name}\" has no children")]
    EmptyGroup { name: String },
}

/// Why a dispatch candidate did not complete successfully.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// No enabled command matched the typed name.
    #[error("no enabled command named \"{0}\"")]
    NotFound(String),

    /// Every candidate was denied by its permission predicate (a faulted
    /// predicate counts as denied).
    #[error("permission denied")]
    PermissionDenied,

    /// A grammar argument failed. `hard` marks a required-argument failure
    /// that blocked the candidate; soft failures are reported only when
    /// leftover text disqualifies the candidate anyway.
    #[error("invalid value for argument \"{argument}\": {source}")]
    Argument {
        argument: String,
        hard: bool,
        #[source]
        source: ParseError,
    },

    /// Leftover text after a fully satisfied grammar, with no tolerance.
    #[error("too many arguments: \"{0}\" left over")]
    TooManyArguments(String),

    /// The invoked handler raised; logged in full, surfaced generically.
    #[error("command handler failed: {0}")]
    HandlerFault(String),

    /// Safety net for candidates no explicit decision path concluded.
    #[error("invalid usage")]
    InvalidUsage,
}
