//! Command definitions.
//!
//! A [`Command`] holds an ordered argument grammar, an alias set, a
//! permission predicate, an async handler, and an enable/disable state.
//! Configuration is builder-style: every setter returns the command for
//! chaining. Grammar evaluation is driven by the dispatcher, not by the
//! command, because the error-priority policy spans the whole grammar; the
//! command only exposes its grammar, its usage string, and its handler.

use crate::argument::Argument;
use crate::dispatch::{Client, Context, Handler, HandlerFn, NoopHandler};
use crate::error::DefinitionError;
use std::fmt;

/// A permission predicate over the caller identity. A returned error is
/// logged by the dispatcher and treated as "denied", never propagated.
pub type PermissionPredicate = Box<dyn Fn(&Client) -> anyhow::Result<bool> + Send + Sync>;

/// A registered text command.
pub struct Command {
    name: String,
    aliases: Vec<String>,
    help: String,
    manual: Vec<String>,
    enabled: bool,
    permission: PermissionPredicate,
    grammar: Vec<Argument>,
    handler: Box<dyn Handler>,
    ignore_extra_args: bool,
}

impl Command {
    /// Create a command. Names are trimmed and lowercased; they must be
    /// non-empty, free of whitespace, and at least two characters long
    /// unless `allow_short` is set.
    pub(crate) fn create(name: &str, allow_short: bool) -> Result<Self, DefinitionError> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(DefinitionError::EmptyName);
        }
        if name.contains(char::is_whitespace) {
            return Err(DefinitionError::NameContainsWhitespace(name));
        }
        if !allow_short && name.chars().count() < 2 {
            return Err(DefinitionError::NameTooShort(name));
        }

        Ok(Self {
            name,
            aliases: Vec::new(),
            help: String::new(),
            manual: Vec::new(),
            enabled: true,
            permission: Box::new(|_| Ok(true)),
            grammar: Vec::new(),
            handler: Box::new(NoopHandler),
            ignore_extra_args: false,
        })
    }

    /// Short help text shown by the `help` built-in.
    pub fn help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    /// Append a manual line shown by the `man` built-in.
    pub fn manual(mut self, line: &str) -> Self {
        self.manual.push(line.to_string());
        self
    }

    /// Register an alias. Collisions with existing names and aliases are
    /// checked when the command is added to a registry.
    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.trim().to_lowercase());
        self
    }

    /// Install the permission predicate evaluated per dispatch.
    pub fn check_permissions<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Client) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.permission = Box::new(predicate);
        self
    }

    /// Append an argument to the grammar.
    pub fn add_argument(mut self, argument: impl Into<Argument>) -> Self {
        self.grammar.push(argument.into());
        self
    }

    /// Install a synchronous handler closure.
    pub fn exec<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handler = Box::new(HandlerFn(f));
        self
    }

    /// Install a handler object (use for handlers that need to suspend).
    pub fn handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handler = Box::new(handler);
        self
    }

    /// Tolerate leftover text after a fully satisfied grammar.
    pub fn ignore_extra_args(mut self) -> Self {
        self.ignore_extra_args = true;
        self
    }

    /// Re-admit this command to candidate selection.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Remove this command from candidate selection on the next dispatch.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn has_help(&self) -> bool {
        !self.help.is_empty()
    }

    pub fn manual_lines(&self) -> &[String] {
        &self.manual
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.grammar
    }

    pub fn ignores_extra_args(&self) -> bool {
        self.ignore_extra_args
    }

    /// Whether `token` (already lowercased) names this command.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }

    /// Evaluate the permission predicate against the caller. The raw
    /// fallible call is exposed; the dispatcher maps `Err` to "denied".
    pub fn is_allowed(&self, client: &Client) -> anyhow::Result<bool> {
        (self.permission)(client)
    }

    /// Render `<prefix><name> <arg1> <arg2> ...` in grammar order.
    pub fn usage(&self, prefix: &str) -> String {
        let mut usage = format!("{prefix}{}", self.name);
        for argument in &self.grammar {
            usage.push(' ');
            usage.push_str(&argument.manual());
        }
        usage
    }

    pub(crate) async fn invoke(&self, ctx: &Context<'_>) -> anyhow::Result<()> {
        self.handler.handle(ctx).await
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("enabled", &self.enabled)
            .field("arguments", &self.grammar.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::{NumberArgument, StringArgument};

    #[test]
    fn name_rules() {
        assert!(Command::create("ping", false).is_ok());
        assert!(matches!(Command::create("  ", false), Err(DefinitionError::EmptyName)));
        assert!(matches!(
            Command::create("two words", false),
            Err(DefinitionError::NameContainsWhitespace(_))
        ));
        assert!(matches!(Command::create("x", false), Err(DefinitionError::NameTooShort(_))));
        assert!(Command::create("x", true).is_ok());
    }

    #[test]
    fn names_fold_to_lowercase() {
        let cmd = Command::create("Ping", false).expect("valid").alias("PONG");
        assert_eq!(cmd.name(), "ping");
        assert!(cmd.matches("ping"));
        assert!(cmd.matches("pong"));
        assert!(!cmd.matches("Ping"));
    }

    #[test]
    fn usage_joins_argument_manuals_in_order() {
        let cmd = Command::create("greet", false)
            .expect("valid")
            .add_argument(StringArgument::new("name"))
            .add_argument(NumberArgument::new("age").optional_with(0.0));
        assert_eq!(cmd.usage("!"), "!greet <name> [age=0]");
    }

    #[test]
    fn default_permission_allows() {
        let cmd = Command::create("ping", false).expect("valid");
        let client = Client::new("uid", "nick");
        assert!(cmd.is_allowed(&client).expect("no fault"));
    }

    #[test]
    fn enable_disable_roundtrip() {
        let mut cmd = Command::create("ping", false).expect("valid");
        assert!(cmd.is_enabled());
        cmd.disable();
        assert!(!cmd.is_enabled());
        cmd.enable();
        assert!(cmd.is_enabled());
    }
}
