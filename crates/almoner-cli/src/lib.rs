//! Almoner operator CLI
//!
//! Inspect the permission matrix, check access for a role set, and edit
//! the persisted overrides without going through the web application.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod router;

pub use config::{CliConfig, ConfigLoader};
pub use error::{CliError, CliResult};
pub use router::{Cli, Commands};
