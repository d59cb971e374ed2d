//! chatcmd - a text-command grammar engine.
//!
//! Hosts declare commands with typed, possibly nested argument grammars;
//! the engine matches, validates, and dispatches incoming free-text lines
//! against those declarations. The host supplies raw lines plus a caller
//! identity through [`TextEvent`] and receives reply text through its
//! [`Transport`] implementation; no network protocol, persistence, or UI is
//! assumed.
//!
//! ```
//! use chatcmd::{
//!     Client, Config, Dispatcher, NumberArgument, Registry, StringArgument, TextEvent, Transport,
//! };
//!
//! struct Stdout;
//! impl Transport for Stdout {
//!     fn send_private(&self, _client: &Client, text: &str) {
//!         println!("{text}");
//!     }
//!     fn send_channel(&self, _client: &Client, text: &str) {
//!         println!("{text}");
//!     }
//!     fn broadcast(&self, text: &str) {
//!         println!("{text}");
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut registry = Registry::new();
//! registry
//!     .add(
//!         chatcmd::create_command("greet")
//!             .unwrap()
//!             .help("Greets someone")
//!             .add_argument(StringArgument::new("name"))
//!             .add_argument(NumberArgument::new("times").integer().positive().optional_with(1.0))
//!             .exec(|ctx| {
//!                 let name = ctx.args.str("name").unwrap_or("world");
//!                 ctx.reply.send(&format!("hello {name}"));
//!                 Ok(())
//!             }),
//!     )
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::new(Config::default());
//! let event = TextEvent {
//!     text: "!greet bob".into(),
//!     client: Client::new("uid", "bob"),
//!     mode: 1,
//!     is_self: false,
//! };
//! let outcomes = dispatcher.dispatch(&registry, &Stdout, &event).await;
//! assert!(outcomes[0].is_invoked());
//! # }
//! ```

pub mod argument;
pub mod builtins;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod registry;

pub use argument::{
    Argument, ClientArgument, GroupArgument, GroupKind, NumberArgument, ResolvedArgs,
    RestArgument, StringArgument, Value,
};
pub use builtins::register_builtins;
pub use command::Command;
pub use config::{Config, ConfigError, DebugLevel, NotFoundMessage};
pub use dispatch::{
    Client, Context, Dispatcher, Handler, HandlerFn, Outcome, Reply, TargetMode, TextEvent,
    Transport,
};
pub use error::{DefinitionError, DispatchError, ParseError, RegistryError};
pub use registry::Registry;

/// The primitive argument kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    String,
    Number,
    Client,
    Rest,
}

/// Create a command. The name must be at least two characters long.
pub fn create_command(name: &str) -> Result<Command, DefinitionError> {
    Command::create(name, false)
}

/// Create a command with the short-name restriction lifted (single-character
/// names allowed).
pub fn create_command_override(name: &str) -> Result<Command, DefinitionError> {
    Command::create(name, true)
}

/// Create a primitive argument of the given kind. Type-specific constraints
/// are configured on the concrete types ([`StringArgument`],
/// [`NumberArgument`], [`ClientArgument`], [`RestArgument`]).
pub fn create_argument(kind: ArgKind, name: &str) -> Argument {
    match kind {
        ArgKind::String => StringArgument::new(name).into(),
        ArgKind::Number => NumberArgument::new(name).into(),
        ArgKind::Client => ClientArgument::new(name).into(),
        ArgKind::Rest => RestArgument::new(name).into(),
    }
}

/// Create a grouped argument combining children under AND or OR semantics.
pub fn create_grouped_argument(kind: GroupKind, name: &str) -> GroupArgument {
    GroupArgument::new(kind, name)
}
