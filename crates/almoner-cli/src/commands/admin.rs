//! Override editing commands

use almoner_permissions::{Module, Permission, Role};
use colored::Colorize;

use super::{CommandContext, Outcome};
use crate::error::CliResult;

/// Toggle one cell and save
pub async fn toggle(
    ctx: &CommandContext,
    role: Role,
    module: Module,
    permission: Permission,
) -> CliResult<Outcome> {
    let value = ctx.service.toggle(role, module, permission)?;
    let revision = ctx.save().await?;

    let state = if value { "granted".green() } else { "revoked".red() };
    let origin = if ctx.service.is_overridden(role, module, permission) {
        "override"
    } else {
        "default"
    };
    println!(
        "{}:{}:{} {} ({}, revision {})",
        role, module, permission, state, origin, revision
    );
    Ok(Outcome::Success)
}

/// Drop every override and save
pub async fn reset(ctx: &CommandContext) -> CliResult<Outcome> {
    let cleared = ctx.service.override_count();
    ctx.service.reset_all();
    let revision = ctx.save().await?;
    println!("Cleared {} override(s) (revision {})", cleared, revision);
    Ok(Outcome::Success)
}

/// Print the persisted overrides in wire form
pub async fn show(ctx: &CommandContext) -> CliResult<Outcome> {
    let wire = ctx.service.overrides().to_wire();
    let json = serde_json::to_string_pretty(&wire).map_err(almoner_permissions::Error::from)?;
    println!("{}", json);
    let origin = format!(
        "revision {} from {}",
        ctx.service.revision(),
        ctx.config.store_path.display()
    );
    println!("{}", origin.dimmed());
    Ok(Outcome::Success)
}
