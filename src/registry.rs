//! The command registry.
//!
//! An insertion-ordered collection of commands, owned by the hosting
//! composition root and handed to the dispatcher by reference. Insertion
//! order is preserved and drives both candidate evaluation order and help
//! listing order. Duplicate command names are tolerated with a warning;
//! alias/name collisions and structurally invalid grammars are rejected at
//! add time.

use crate::argument::{Argument, is_identifier};
use crate::command::Command;
use crate::dispatch::Client;
use crate::error::RegistryError;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Ordered collection of registered commands.
#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<Command>,
    /// Per-command invocation counters, keyed by command name.
    invocations: HashMap<String, AtomicU64>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command.
    ///
    /// Rejects alias collisions (against the command's own name, within its
    /// alias set, and against every already-registered name and alias) and
    /// invalid grammars (non-identifier or duplicate argument names, empty
    /// groups). A duplicate command name is tolerated with a warning; both
    /// commands then run as independent candidates for the shared name.
    pub fn add(&mut self, command: Command) -> Result<(), RegistryError> {
        validate_grammar(command.arguments())?;

        let mut seen = HashSet::new();
        for alias in command.aliases() {
            if alias == command.name() || !seen.insert(alias.as_str()) {
                return Err(RegistryError::AliasCollision { alias: alias.clone() });
            }
            for existing in &self.commands {
                if existing.matches(alias) {
                    return Err(RegistryError::AliasCollision { alias: alias.clone() });
                }
            }
        }
        for existing in &self.commands {
            if existing.name() == command.name() {
                warn!(command = %command.name(), "duplicate command name registered");
            } else if existing.aliases().iter().any(|a| a == command.name()) {
                return Err(RegistryError::AliasCollision { alias: command.name().to_string() });
            }
        }

        self.invocations.entry(command.name().to_string()).or_default();
        self.commands.push(command);
        Ok(())
    }

    /// Remove the first command with `name` (exact name, not alias).
    /// Returns the removed command, which is no longer usable for dispatch.
    pub fn remove(&mut self, name: &str) -> Option<Command> {
        let name = name.to_lowercase();
        let index = self.commands.iter().position(|c| c.name() == name)?;
        let removed = self.commands.remove(index);
        if !self.commands.iter().any(|c| c.name() == name) {
            self.invocations.remove(&name);
        }
        Some(removed)
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// First command whose name or alias equals `name` (case-insensitive).
    pub fn command_by_name(&self, name: &str) -> Option<&Command> {
        let name = name.to_lowercase();
        self.commands.iter().find(|c| c.matches(&name))
    }

    /// Mutable variant of [`Self::command_by_name`], for enable/disable and
    /// other between-dispatch mutation.
    pub fn command_mut(&mut self, name: &str) -> Option<&mut Command> {
        let name = name.to_lowercase();
        self.commands.iter_mut().find(|c| c.matches(&name))
    }

    /// Commands visible to `client`: enabled and permitted, optionally
    /// narrowed to those matching `name` (a faulted predicate hides the
    /// command). Listing order is insertion order.
    pub fn available_commands(&self, client: &Client, name: Option<&str>) -> Vec<&Command> {
        let name = name.map(str::to_lowercase);
        self.commands
            .iter()
            .filter(|c| c.is_enabled())
            .filter(|c| name.as_deref().is_none_or(|n| c.matches(n)))
            .filter(|c| c.is_allowed(client).unwrap_or(false))
            .collect()
    }

    pub(crate) fn record_invocation(&self, name: &str) {
        if let Some(counter) = self.invocations.get(name) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Invocation counts per command name, most used first. Commands never
    /// invoked are omitted.
    pub fn command_stats(&self) -> Vec<(String, u64)> {
        let mut stats: Vec<_> = self
            .invocations
            .iter()
            .map(|(name, count)| (name.clone(), count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();
        stats.sort_by(|a, b| b.1.cmp(&a.1));
        stats
    }
}

/// Check argument names (identifier charset, unique among siblings) and
/// group shape (non-empty children), recursively through nested groups.
fn validate_grammar(arguments: &[Argument]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for argument in arguments {
        let name = argument.name();
        if !is_identifier(name) {
            return Err(RegistryError::InvalidArgumentName { name: name.to_string() });
        }
        if !seen.insert(name.to_string()) {
            return Err(RegistryError::DuplicateArgumentName { name: name.to_string() });
        }
        if let Argument::Group(group) = argument {
            if group.children().is_empty() {
                return Err(RegistryError::EmptyGroup { name: name.to_string() });
            }
            validate_grammar(group.children())?;
        }
    }
    Ok(())
}
