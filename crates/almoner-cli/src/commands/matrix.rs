//! Matrix rendering

use almoner_permissions::{Permission, PermissionMatrix, Role};
use colored::Colorize;

use super::{CommandContext, Outcome};
use crate::error::CliResult;

/// Print the matrix as a table or JSON
pub async fn run(ctx: &CommandContext, roles: &[Role], json: bool) -> CliResult<Outcome> {
    let matrix = ctx.service.matrix(roles);
    if json {
        let out = serde_json::to_string_pretty(&matrix).map_err(almoner_permissions::Error::from)?;
        println!("{}", out);
    } else {
        print!("{}", render(&matrix));
        println!("{} customized cell(s); * marks an override", matrix.overridden_count());
    }
    Ok(Outcome::Success)
}

/// Plain-text rendering, one line per module
///
/// Each role column shows `v c e d` with `-` for denied and a trailing
/// `*` when any of the four cells is overridden.
pub fn render(matrix: &PermissionMatrix) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<12}", "module"));
    for role in &matrix.roles {
        out.push_str(&format!(" {:<18}", role.as_str()));
    }
    out.push('\n');

    for row in &matrix.rows {
        out.push_str(&format!("{:<12}", row.module.as_str()));
        for role in &matrix.roles {
            let mut cell = String::new();
            let mut overridden = false;
            for permission in Permission::ALL {
                if let Some(c) = row.cell(*role, *permission) {
                    cell.push(if c.enabled { letter(*permission) } else { '-' });
                    overridden |= c.overridden;
                }
            }
            let cell = if overridden {
                format!("{}*", cell).yellow().to_string()
            } else {
                cell
            };
            out.push_str(&format!(" {:<18}", cell));
        }
        out.push('\n');
    }
    out
}

fn letter(permission: Permission) -> char {
    match permission {
        Permission::View => 'v',
        Permission::Create => 'c',
        Permission::Edit => 'e',
        Permission::Delete => 'd',
    }
}
