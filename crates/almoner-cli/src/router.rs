//! Command-line definition and dispatch

use std::path::PathBuf;

use almoner_permissions::{Module, Permission, Role};
use clap::{Parser, Subcommand};

use crate::commands::{self, CommandContext, Outcome};
use crate::error::CliResult;

/// Almoner - role permission administration
#[derive(Parser, Debug)]
#[command(name = "almoner")]
#[command(about = "Inspect and edit role permissions for the Almoner admin application")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: <config dir>/almoner/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Settings document holding the overrides (overrides configuration)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Overwrite persisted overrides even if someone saved in the meantime
    #[arg(long, global = true)]
    pub force: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the permission matrix
    Matrix {
        /// Role columns to show (default: all roles)
        #[arg(long = "role", value_parser = parse_role)]
        roles: Vec<Role>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check whether a role set may perform an action
    Check {
        /// Roles held by the user
        #[arg(long = "role", value_parser = parse_role)]
        roles: Vec<Role>,

        #[arg(value_parser = parse_module)]
        module: Module,

        #[arg(value_parser = parse_permission, default_value = "view")]
        permission: Permission,
    },

    /// List the navigation entries a role set can see
    Nav {
        #[arg(long = "role", value_parser = parse_role)]
        roles: Vec<Role>,
    },

    /// Check where a role set lands when opening an application route
    Route {
        #[arg(long = "role", value_parser = parse_role)]
        roles: Vec<Role>,

        /// Application path, e.g. /finance/ledger
        path: String,
    },

    /// Flip one cell of the matrix and save
    Toggle {
        #[arg(value_parser = parse_role)]
        role: Role,

        #[arg(value_parser = parse_module)]
        module: Module,

        #[arg(value_parser = parse_permission)]
        permission: Permission,
    },

    /// Remove every override and save
    Reset,

    /// Print the persisted overrides
    Show,
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse().map_err(|e: almoner_permissions::Error| e.to_string())
}

fn parse_module(s: &str) -> Result<Module, String> {
    s.parse().map_err(|e: almoner_permissions::Error| e.to_string())
}

fn parse_permission(s: &str) -> Result<Permission, String> {
    s.parse().map_err(|e: almoner_permissions::Error| e.to_string())
}

impl Commands {
    /// Run the command against a prepared context
    pub async fn execute(&self, ctx: &CommandContext) -> CliResult<Outcome> {
        match self {
            Commands::Matrix { roles, json } => commands::matrix::run(ctx, roles, *json).await,
            Commands::Check {
                roles,
                module,
                permission,
            } => commands::access::check(ctx, roles, *module, *permission).await,
            Commands::Nav { roles } => commands::access::nav(ctx, roles).await,
            Commands::Route { roles, path } => commands::access::route(ctx, roles, path).await,
            Commands::Toggle {
                role,
                module,
                permission,
            } => commands::admin::toggle(ctx, *role, *module, *permission).await,
            Commands::Reset => commands::admin::reset(ctx).await,
            Commands::Show => commands::admin::show(ctx).await,
        }
    }
}
