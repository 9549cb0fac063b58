//! CLI command implementations

pub mod accounts;
pub mod auth;
pub mod config;
pub mod extract;
pub mod logs;
pub mod open;
pub mod transfer;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::Password;
use pixbank_core::{EntryPoint, LoggingService, PixbankContext, View};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<Arc<LoggingService>> {
    let data_dir = get_data_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
        .ok()
        .map(Arc::new)
}

/// Open the logger and record that `command` ran. Logging failures are ignored.
pub fn start_command(command: &str) -> Option<Arc<LoggingService>> {
    let logger = get_logger();
    if let Some(l) = &logger {
        let _ = l.log_command(command);
    }
    logger
}

/// Record a command that ended in an error, with the full cause chain
pub fn log_failure(error: &anyhow::Error) {
    if let Some(l) = get_logger() {
        let _ = l.log_error("command_failed", &error.to_string(), Some(&format!("{:#}", error)));
    }
}

/// Data directory from `PIXBANK_DIR` or `~/.pixbank`
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("PIXBANK_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".pixbank"))
        .context("Could not find home directory; set PIXBANK_DIR")
}

/// Build the client context for a command
pub fn get_context(command: &str) -> Result<PixbankContext> {
    let data_dir = get_data_dir()?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    let logger = start_command(command);

    PixbankContext::new(&data_dir, logger).context("Failed to initialize PixBank context")
}

/// Navigate to a guarded path; fail unless the guard lets us through
pub fn enter_view(ctx: &PixbankContext, path: &str, expected: View) -> Result<()> {
    let route = ctx.navigate(path)?;
    if route.view != expected {
        anyhow::bail!(
            "{} requires a signed-in session (redirected to {}). Run 'pb login' first.",
            path,
            route.path
        );
    }
    Ok(())
}

/// Password from the flag, `PIXBANK_PASSWORD`, or an interactive prompt
pub fn get_password_or_prompt(password_flag: Option<String>, prompt: &str) -> Result<String> {
    if let Some(p) = password_flag {
        return Ok(p);
    }

    if let Ok(p) = std::env::var("PIXBANK_PASSWORD") {
        return Ok(p);
    }

    let p = Password::new().with_prompt(prompt).interact()?;
    Ok(p)
}
