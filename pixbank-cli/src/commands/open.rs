//! Open command - resolve a client path through the router

use anyhow::Result;
use colored::Colorize;
use pixbank_core::router::RouteTarget;

use super::get_context;
use crate::output;

/// Show where `path` leads for the current session
pub fn run(path: &str, json: bool) -> Result<()> {
    let ctx = get_context("open")?;
    let route = ctx.navigate(path)?;

    if json {
        return output::json(&route);
    }

    println!("{} {}", "View:".bold(), route.view);
    if let Some(name) = route.name {
        println!("{} {}", "Route:".bold(), name);
    }
    println!("{} {}", "Path:".bold(), route.path);
    if let Some(from) = &route.redirected_from {
        let reason = if route.guarded {
            "sign-in required".yellow().to_string()
        } else {
            "redirect".to_string()
        };
        println!("{} {} ({})", "Redirected from:".bold(), from, reason);
    }
    Ok(())
}

/// Print the route table
pub fn run_routes(json: bool) -> Result<()> {
    let ctx = get_context("routes")?;
    let routes = ctx.router.routes();

    if json {
        let rows: Vec<_> = routes
            .iter()
            .map(|r| {
                let target = match &r.target {
                    RouteTarget::Redirect(to) => serde_json::json!({ "redirect": to }),
                    RouteTarget::View(view) => serde_json::json!({ "view": view }),
                };
                serde_json::json!({
                    "path": r.path,
                    "name": r.name,
                    "target": target,
                    "requires_auth": r.requires_auth,
                })
            })
            .collect();
        return output::json(&rows);
    }

    let mut table = output::create_table();
    table.set_header(vec!["Path", "Name", "Target", "Sign-in"]);
    for route in routes {
        let target = match &route.target {
            RouteTarget::Redirect(to) => format!("-> {}", to),
            RouteTarget::View(view) => view.to_string(),
        };
        table.add_row(vec![
            route.path.to_string(),
            route.name.unwrap_or("-").to_string(),
            target,
            if route.requires_auth { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{}", table);
    Ok(())
}
