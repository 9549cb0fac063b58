//! Config command - show or change the API base URL

use anyhow::{Context, Result};
use colored::Colorize;
use pixbank_core::config::{Config, API_URL_ENV, DEFAULT_API_URL};

use super::{get_data_dir, start_command};
use crate::output;

pub fn run(api_url: Option<String>, reset: bool, json: bool) -> Result<()> {
    let data_dir = get_data_dir()?;
    start_command("config");

    let mut config = Config::load(&data_dir).context("Failed to load settings")?;

    if reset {
        config.reset_api_url();
        config.save(&data_dir)?;
        if !json {
            output::success(&format!("API URL reset to {}", DEFAULT_API_URL));
        }
    } else if let Some(url) = api_url {
        config.set_api_url(&url)?;
        config.save(&data_dir)?;
        if !json {
            output::success(&format!("API URL set to {}", config.saved_api_url().unwrap_or(&url)));
        }
    }

    if json {
        return output::json(&serde_json::json!({
            "api_url": config.api_url,
            "saved_api_url": config.saved_api_url(),
            "api_url_from_env": config.api_url_from_env,
            "data_dir": data_dir.to_string_lossy(),
        }));
    }

    println!("{}", "Configuration".bold());
    println!("  Data directory: {}", data_dir.display());
    println!("  API URL: {}", config.api_url);
    if config.api_url_from_env {
        output::warning(&format!(
            "  {} overrides the saved setting ({})",
            API_URL_ENV,
            config.saved_api_url().unwrap_or("none")
        ));
    }
    Ok(())
}
