//! Auth commands - signup, login, logout, whoami, session

use anyhow::Result;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dialoguer::Input;
use pixbank_core::View;

use super::{get_context, get_password_or_prompt};
use crate::output;

pub fn run_signup(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = get_context("signup")?;

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = get_password_or_prompt(password, "Password")?;

    let response = ctx.auth_service.sign_up(&name, &email, &password)?;
    output::success(&format!(
        "Account created for {} <{}>",
        response.user.name, response.user.email
    ));
    println!("Run 'pb login' to start a session.");
    Ok(())
}

pub fn run_login(email: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context("login")?;
    ctx.navigate("/login")?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = get_password_or_prompt(password, "Password")?;

    let response = ctx.auth_service.login(&email, &password)?;

    if json {
        return output::json(&response.user);
    }

    output::success(&format!(
        "Signed in as {} <{}>",
        response.user.name, response.user.email
    ));
    let route = ctx.navigate("/dashboard")?;
    if route.view == View::Dashboard {
        println!("Run 'pb dashboard' to see your accounts.");
    }
    Ok(())
}

pub fn run_logout() -> Result<()> {
    let ctx = get_context("logout")?;
    // An unreadable session still counts as something to clear
    let was_signed_in = !matches!(ctx.auth_service.is_authenticated(), Ok(false));
    ctx.auth_service.logout()?;

    if was_signed_in {
        output::success("Signed out");
    } else {
        output::warning("No active session");
    }
    Ok(())
}

pub fn run_whoami(json: bool) -> Result<()> {
    let ctx = get_context("whoami")?;
    let profile = ctx.auth_service.user_info()?;

    if json {
        return output::json(&profile);
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["ID", &profile.id.to_string()]);
    table.add_row(vec!["Name", &profile.name]);
    table.add_row(vec!["Email", &profile.email]);
    if let Some(created_at) = profile.created_at {
        table.add_row(vec!["Member since", &created_at.format("%Y-%m-%d").to_string()]);
    }
    println!("{}", table);
    Ok(())
}

/// Local session state only; no request is made
pub fn run_session(json: bool) -> Result<()> {
    let ctx = get_context("session")?;
    let authenticated = ctx.auth_service.is_authenticated()?;
    let user = ctx.auth_service.user()?;

    if json {
        return output::json(&serde_json::json!({
            "authenticated": authenticated,
            "user": user,
            "api_url": ctx.config.api_url,
        }));
    }

    println!("{}", "Session".bold());
    println!("  API: {}", ctx.config.api_url);
    match (authenticated, user) {
        (true, Some(user)) => {
            println!("  Status: {}", "signed in".green());
            println!("  User: {} <{}> (id {})", user.name, user.email, user.id);
        }
        (true, None) => println!("  Status: {}", "token present, no user record".yellow()),
        (false, _) => println!("  Status: {}", "signed out".yellow()),
    }
    Ok(())
}
