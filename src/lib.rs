//! Shipway - deployment helper for remote Apache/Passenger environments
//!
//! Shipway runs web-server management commands against named deployment
//! environments over SSH: daemon control, virtual-host lifecycle, and
//! Passenger configuration migration after Ruby/Passenger upgrades.

pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod executor;
pub mod probe;
pub mod report;
pub mod workspace;

// Re-exports for convenience
pub use commands::{dispatch, CommandContext, Verb};
pub use config::Config;
pub use environment::Environment;
pub use error::{ShipwayError, ShipwayResult};
pub use executor::{CopyDirection, RemoteExecutor, SshExecutor};
pub use report::{ConsolePrompter, ConsoleReporter, Prompter, Reporter};
pub use workspace::Workspace;
