//! Dispatching raw text lines against the command registry.
//!
//! The dispatcher strips the configured prefix, splits off the command
//! token, selects enabled candidates by name or alias, filters them through
//! their permission predicates, and evaluates each surviving candidate's
//! grammar independently against a fresh copy of the remaining text.
//! Per-candidate decisions follow a fixed priority: a required-argument
//! failure blocks outright; leftover text is tolerated only when the
//! command opted in and no optional argument failed along the way (a soft
//! error outranks the leftover-text complaint); otherwise the handler runs,
//! awaited, with its faults caught and surfaced as a generic notice.
//!
//! Scheduling is single-threaded and event-driven: one dispatch pass per
//! incoming line, candidates handled sequentially within the pass. A
//! suspended handler delays only its own completion; it never blocks other
//! dispatches, and no fault in a predicate or handler can abort sibling
//! candidates or the dispatch loop itself.

use crate::argument::{ResolvedArgs, Value};
use crate::command::Command;
use crate::config::Config;
use crate::error::{DispatchError, ParseError};
use crate::registry::Registry;
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, error, warn};

/// The caller identity attached to every inbound text event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// Opaque unique identifier, as extracted by client-reference arguments.
    pub uid: String,
    /// Display name, used in log lines only.
    pub nick: String,
}

impl Client {
    pub fn new(uid: &str, nick: &str) -> Self {
        Self { uid: uid.to_string(), nick: nick.to_string() }
    }
}

/// An inbound text event from the hosting chat runtime.
#[derive(Debug, Clone)]
pub struct TextEvent {
    /// The raw line, prefix included.
    pub text: String,
    /// Who sent it.
    pub client: Client,
    /// Delivery mode: 1 private, 2 channel, 3 broadcast; anything else is
    /// unknown and gets a no-op reply sink.
    pub mode: u8,
    /// Events the host attributes to the engine itself are ignored.
    pub is_self: bool,
}

/// Where replies for a dispatch pass are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    Private,
    Channel,
    Broadcast,
    Unknown(u8),
}

impl TargetMode {
    pub fn from_raw(mode: u8) -> Self {
        match mode {
            1 => Self::Private,
            2 => Self::Channel,
            3 => Self::Broadcast,
            other => Self::Unknown(other),
        }
    }
}

/// Outbound side of the hosting chat runtime.
pub trait Transport: Send + Sync {
    /// Reply directly to the caller.
    fn send_private(&self, client: &Client, text: &str);
    /// Reply to the caller's current channel.
    fn send_channel(&self, client: &Client, text: &str);
    /// Broadcast server-wide.
    fn broadcast(&self, text: &str);
}

/// A mode-resolved reply sink handed to handlers.
pub struct Reply<'a> {
    transport: &'a dyn Transport,
    client: &'a Client,
    mode: TargetMode,
}

impl<'a> Reply<'a> {
    pub fn new(transport: &'a dyn Transport, client: &'a Client, mode: TargetMode) -> Self {
        Self { transport, client, mode }
    }

    pub fn mode(&self) -> TargetMode {
        self.mode
    }

    pub fn send(&self, text: &str) {
        match self.mode {
            TargetMode::Private => self.transport.send_private(self.client, text),
            TargetMode::Channel => self.transport.send_channel(self.client, text),
            TargetMode::Broadcast => self.transport.broadcast(text),
            TargetMode::Unknown(mode) => {
                warn!(mode, "unrecognized delivery mode, dropping reply");
            }
        }
    }
}

/// Invocation context passed to command handlers.
pub struct Context<'a> {
    /// Who invoked the command.
    pub client: &'a Client,
    /// The fully validated argument record.
    pub args: &'a ResolvedArgs,
    /// Mode-resolved reply sink.
    pub reply: &'a Reply<'a>,
    /// The raw inbound event.
    pub event: &'a TextEvent,
    /// The registry the command was dispatched from.
    pub registry: &'a Registry,
    /// Active engine configuration.
    pub config: &'a Config,
}

/// Trait implemented by command handlers.
///
/// Handlers may suspend; the dispatcher awaits them. Any error returned is
/// caught at the invocation boundary, logged in full, and surfaced to the
/// caller only as a generic failure notice.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &Context<'_>) -> anyhow::Result<()>;
}

/// Adapter wrapping a synchronous closure as a [`Handler`].
pub struct HandlerFn<F>(pub F);

#[async_trait]
impl<F> Handler for HandlerFn<F>
where
    F: Fn(&Context<'_>) -> anyhow::Result<()> + Send + Sync,
{
    async fn handle(&self, ctx: &Context<'_>) -> anyhow::Result<()> {
        (self.0)(ctx)
    }
}

/// The default handler: does nothing.
pub struct NoopHandler;

#[async_trait]
impl Handler for NoopHandler {
    async fn handle(&self, _ctx: &Context<'_>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Per-candidate dispatch result.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The candidate's grammar was satisfied and its handler ran to
    /// completion.
    Invoked { command: String },
    /// The candidate produced exactly one reply describing why it did not
    /// run (or why its handler failed).
    Rejected { command: String, error: DispatchError },
}

impl Outcome {
    pub fn is_invoked(&self) -> bool {
        matches!(self, Self::Invoked { .. })
    }

    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            Self::Invoked { .. } => None,
            Self::Rejected { error, .. } => Some(error),
        }
    }
}

/// Resolves raw text lines into command invocations.
pub struct Dispatcher {
    config: Config,
}

impl Dispatcher {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one dispatch pass for `event`, returning one outcome per
    /// candidate that survived name matching (or a single outcome for a
    /// not-found / all-denied line). Lines without the prefix, empty
    /// command tokens, and self events produce no outcomes and no replies.
    pub async fn dispatch(
        &self,
        registry: &Registry,
        transport: &dyn Transport,
        event: &TextEvent,
    ) -> Vec<Outcome> {
        if event.is_self {
            return Vec::new();
        }

        let prefix = self.config.prefix();
        let Some(stripped) = event.text.strip_prefix(prefix) else {
            return Vec::new();
        };
        let (token, rest) = match stripped.split_once(' ') {
            Some((token, rest)) => (token, rest),
            None => (stripped, ""),
        };
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return Vec::new();
        }

        let reply = Reply::new(transport, &event.client, TargetMode::from_raw(event.mode));

        let candidates: Vec<&Command> = registry
            .commands()
            .iter()
            .filter(|cmd| cmd.is_enabled() && cmd.matches(&token))
            .collect();
        if candidates.is_empty() {
            debug!(command = %token, "no enabled command matched");
            if self.config.not_found_message.is_enabled() {
                reply.send(&format!(
                    "There is no enabled command named \"{prefix}{token}\", \
                     check {prefix}help for a list of available commands!"
                ));
            }
            return vec![Outcome::Rejected {
                command: token.clone(),
                error: DispatchError::NotFound(token),
            }];
        }

        let mut permitted = Vec::with_capacity(candidates.len());
        for cmd in candidates {
            match cmd.is_allowed(&event.client) {
                Ok(true) => permitted.push(cmd),
                Ok(false) => {
                    debug!(command = %cmd.name(), client = %event.client.uid, "permission denied");
                }
                Err(err) => {
                    warn!(
                        command = %cmd.name(),
                        client = %event.client.uid,
                        error = %err,
                        "permission predicate faulted, treating as denied"
                    );
                }
            }
        }
        if permitted.is_empty() {
            reply.send("You do not have permission to use this command!");
            return vec![Outcome::Rejected {
                command: token,
                error: DispatchError::PermissionDenied,
            }];
        }

        // Candidates are independent: each gets its own outcome and its own
        // replies, in registry order.
        let mut outcomes = Vec::with_capacity(permitted.len());
        for cmd in permitted {
            outcomes.push(self.run_candidate(registry, cmd, rest, event, &reply).await);
        }
        outcomes
    }

    /// Walk one candidate's grammar against a fresh copy of the remaining
    /// text, then decide: hard error, soft-error/leftover complaint, or
    /// invocation.
    async fn run_candidate(
        &self,
        registry: &Registry,
        cmd: &Command,
        rest: &str,
        event: &TextEvent,
        reply: &Reply<'_>,
    ) -> Outcome {
        let prefix = self.config.prefix();
        let mut resolved = ResolvedArgs::new();
        let mut remaining = rest.trim().to_string();
        let mut soft: Vec<(String, ParseError)> = Vec::new();
        let mut hard: Option<(String, ParseError)> = None;

        for argument in cmd.arguments() {
            match argument.validate(&remaining) {
                Ok((value, new_remaining)) => {
                    resolved.insert(argument.name(), value);
                    remaining = new_remaining;
                }
                Err(err) if argument.is_optional() => {
                    // The failed argument consumed nothing; the remainder
                    // stays where it was.
                    resolved.insert(
                        argument.name(),
                        argument.default_value().cloned().unwrap_or(Value::None),
                    );
                    soft.push((argument.name().to_string(), err));
                }
                Err(err) => {
                    hard = Some((argument.name().to_string(), err));
                    break;
                }
            }
        }

        if let Some((argument, err)) = hard {
            reply.send(&format!("Invalid value for argument \"{argument}\": {err}"));
            return Outcome::Rejected {
                command: cmd.name().to_string(),
                error: DispatchError::Argument { argument, hard: true, source: err },
            };
        }

        if !remaining.is_empty() && (!cmd.ignores_extra_args() || !soft.is_empty()) {
            // A soft error outranks the leftover-text complaint.
            if let Some((argument, err)) = soft.into_iter().next() {
                reply.send(&format!("Invalid value for argument \"{argument}\": {err}"));
                return Outcome::Rejected {
                    command: cmd.name().to_string(),
                    error: DispatchError::Argument { argument, hard: false, source: err },
                };
            }
            reply.send(&format!("Too many arguments! Usage: {}", cmd.usage(prefix)));
            return Outcome::Rejected {
                command: cmd.name().to_string(),
                error: DispatchError::TooManyArguments(remaining),
            };
        }

        // Every grammar argument must have resolved to something by now;
        // anything else is a bug caught here instead of inside a handler.
        if !cmd.arguments().iter().all(|a| resolved.contains(a.name())) {
            reply.send(&format!(
                "Invalid command usage! See {prefix}man {} for details.",
                cmd.name()
            ));
            return Outcome::Rejected {
                command: cmd.name().to_string(),
                error: DispatchError::InvalidUsage,
            };
        }

        registry.record_invocation(cmd.name());
        let ctx = Context {
            client: &event.client,
            args: &resolved,
            reply,
            event,
            registry,
            config: &self.config,
        };
        let started = Instant::now();
        match cmd.invoke(&ctx).await {
            Ok(()) => {
                debug!(
                    command = %cmd.name(),
                    client = %event.client.uid,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "command completed"
                );
                Outcome::Invoked { command: cmd.name().to_string() }
            }
            Err(err) => {
                error!(
                    command = %cmd.name(),
                    client = %event.client.uid,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = ?err,
                    "command handler failed"
                );
                reply.send("An error occurred while processing your command!");
                Outcome::Rejected {
                    command: cmd.name().to_string(),
                    error: DispatchError::HandlerFault(err.to_string()),
                }
            }
        }
    }
}
