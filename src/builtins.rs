//! Built-in `help` and `man` commands.
//!
//! Reference consumers of the public surface, not part of the engine
//! contract: hosts register them with [`register_builtins`] or roll their
//! own.

use crate::argument::{RestArgument, StringArgument};
use crate::command::Command;
use crate::dispatch::Context;
use crate::error::RegistryError;
use crate::registry::Registry;
use regex::RegexBuilder;

/// Register the built-in `help` and `man` commands.
pub fn register_builtins(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.add(help_command())?;
    registry.add(man_command())?;
    Ok(())
}

/// `help [filter]`: lists every enabled, permitted, help-documented command,
/// optionally narrowed by a case-insensitive regex fragment matched against
/// name, aliases, and help text.
fn help_command() -> Command {
    Command::create("help", false)
        .expect("builtin command name is valid")
        .help("Lists the available commands")
        .manual("Lists every command you are allowed to use.")
        .manual("An optional filter narrows the list by name, alias, or description.")
        .add_argument(RestArgument::new("filter").optional())
        .exec(|ctx: &Context<'_>| {
            let filter = ctx.args.str("filter").unwrap_or("");
            let prefix = ctx.config.prefix();

            let mut commands: Vec<&Command> = ctx
                .registry
                .available_commands(ctx.client, None)
                .into_iter()
                .filter(|c| c.has_help())
                .collect();

            if !filter.is_empty() {
                // An unparsable fragment is matched literally instead.
                let pattern = RegexBuilder::new(filter)
                    .case_insensitive(true)
                    .build()
                    .or_else(|_| {
                        RegexBuilder::new(&regex::escape(filter)).case_insensitive(true).build()
                    })
                    .expect("escaped filter is a valid pattern");
                commands.retain(|c| {
                    pattern.is_match(c.name())
                        || c.aliases().iter().any(|a| pattern.is_match(a))
                        || pattern.is_match(c.help_text())
                });
            }

            if commands.is_empty() {
                ctx.reply.send("No matching commands found!");
                return Ok(());
            }

            ctx.reply.send(&format!("{} command(s) found:", commands.len()));
            for command in commands {
                ctx.reply.send(&format!("{} - {}", command.usage(prefix), command.help_text()));
            }
            Ok(())
        })
}

/// `man <command>`: full manual for a command, falling back to its short
/// help when no manual lines were declared.
fn man_command() -> Command {
    Command::create("man", false)
        .expect("builtin command name is valid")
        .help("Displays the manual page of a command")
        .manual("Shows the full manual of the named command.")
        .add_argument(StringArgument::new("command").min(1))
        .exec(|ctx: &Context<'_>| {
            let name = ctx.args.str("command").unwrap_or("");
            let prefix = ctx.config.prefix();

            let Some(command) = ctx
                .registry
                .available_commands(ctx.client, Some(name))
                .into_iter()
                .next()
            else {
                ctx.reply.send(&format!("No command with name \"{prefix}{name}\" found!"));
                return Ok(());
            };

            ctx.reply.send(&format!("Manual for {}:", command.usage(prefix)));
            if command.manual_lines().is_empty() {
                ctx.reply.send(command.help_text());
            } else {
                for line in command.manual_lines() {
                    ctx.reply.send(line);
                }
            }
            Ok(())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_register_cleanly() {
        let mut registry = Registry::new();
        register_builtins(&mut registry).expect("builtins register");
        assert!(registry.command_by_name("help").is_some());
        assert!(registry.command_by_name("man").is_some());
    }
}
