//! Access checks for a role set

use almoner_permissions::{Module, Permission, Role, RouteDecision};
use colored::Colorize;

use super::{CommandContext, Outcome};
use crate::error::CliResult;

/// Print allow/deny for one action, with the per-role breakdown
pub async fn check(
    ctx: &CommandContext,
    roles: &[Role],
    module: Module,
    permission: Permission,
) -> CliResult<Outcome> {
    let allowed = ctx.service.can_access(roles, module, permission);

    for role in roles {
        let (value, source) = ctx.service.explain(*role, module, permission);
        let mark = if value { "yes".green() } else { "no".red() };
        println!("  {:<18} {:<4} ({})", role.as_str(), mark, source);
    }

    if allowed {
        println!("{} {}:{}", "ALLOW".green().bold(), module, permission);
        Ok(Outcome::Success)
    } else {
        println!("{} {}:{}", "DENY".red().bold(), module, permission);
        Ok(Outcome::Denied)
    }
}

/// List visible navigation entries
pub async fn nav(ctx: &CommandContext, roles: &[Role]) -> CliResult<Outcome> {
    let items = ctx.menu.visible_items(&ctx.service, roles);
    if items.is_empty() {
        println!("{}", "No navigation entries visible".dimmed());
    }
    for item in items {
        println!("{:<22} {:<14} {}", item.label, item.path, item.icon.dimmed());
    }
    Ok(Outcome::Success)
}

/// Decide whether a role set may open an application route
pub async fn route(ctx: &CommandContext, roles: &[Role], path: &str) -> CliResult<Outcome> {
    match ctx.guard.check(&ctx.service, roles, path) {
        RouteDecision::Allow => {
            println!("{} {}", "ALLOW".green().bold(), path);
            Ok(Outcome::Success)
        }
        RouteDecision::Redirect(target) => {
            println!("{} {} -> {}", "REDIRECT".yellow().bold(), path, target);
            Ok(Outcome::Denied)
        }
    }
}
