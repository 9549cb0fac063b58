//! Dashboard and account listing commands

use anyhow::Result;
use colored::Colorize;
use pixbank_core::View;
use rust_decimal::Decimal;

use super::{enter_view, get_context};
use crate::output;

/// `/dashboard`: the caller's accounts and their total balance
pub fn run_dashboard(json: bool) -> Result<()> {
    let ctx = get_context("dashboard")?;
    enter_view(&ctx, "/dashboard", View::Dashboard)?;

    let accounts = ctx.account_service.my_accounts()?;
    let total: Decimal = accounts.iter().map(|a| a.balance).sum();

    if json {
        return output::json(&serde_json::json!({
            "user": ctx.auth_service.user()?,
            "accounts": accounts,
            "total_balance": total,
        }));
    }

    if let Some(user) = ctx.auth_service.user()? {
        println!("{} {}", "Welcome,".bold(), user.name.bold());
        println!();
    }

    if accounts.is_empty() {
        output::warning("You have no bank accounts yet.");
        return Ok(());
    }

    println!("{}", output::accounts_table(&accounts));
    println!();
    println!("{} {}", "Total balance:".bold(), output::format_money(total));
    Ok(())
}

/// Account listings used when preparing a transfer
pub fn run(available: bool, json: bool) -> Result<()> {
    let ctx = get_context("accounts")?;
    enter_view(&ctx, "/transfer", View::Transfer)?;

    let accounts = if available {
        ctx.account_service.available_accounts()?
    } else {
        ctx.account_service.my_accounts()?
    };

    if json {
        return output::json(&accounts);
    }

    let title = if available {
        "Accounts available as transfer destination"
    } else {
        "Your accounts"
    };
    println!("{}", title.bold());

    if accounts.is_empty() {
        output::warning("No accounts found.");
        return Ok(());
    }
    println!("{}", output::accounts_table(&accounts));
    Ok(())
}
