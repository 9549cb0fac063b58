//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use pixbank_core::{BankAccount, Transfer};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn success(msg: &str) {
    println!("{}", msg.green());
}

pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Pretty-print any payload as JSON
pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format a monetary amount as "R$ 1.234,56"
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}R$ {},{}", if negative { "-" } else { "" }, grouped, frac_part)
}

/// Table of bank accounts
pub fn accounts_table(accounts: &[BankAccount]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "Holder", "Bank", "Agency", "Account", "Type", "Balance"]);
    for account in accounts {
        let agency = match (&account.agency_number, &account.agency_digit) {
            (Some(n), Some(d)) if !d.is_empty() => format!("{}-{}", n, d),
            (Some(n), _) => n.clone(),
            _ => "-".to_string(),
        };
        table.add_row(vec![
            account.id.to_string(),
            account.holder_name.clone(),
            account
                .bank_name
                .clone()
                .or_else(|| account.bank_code.clone())
                .unwrap_or_else(|| "-".to_string()),
            agency,
            format!("{}-{}", account.account_number, account.account_digit),
            account.account_type.clone().unwrap_or_else(|| "-".to_string()),
            format_money(account.balance),
        ]);
    }
    table
}

/// Table of transfers
pub fn transfers_table(transfers: &[Transfer]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "Date", "Type", "Amount", "From", "To"]);
    for transfer in transfers {
        let holder = |account: &Option<BankAccount>| {
            account
                .as_ref()
                .map(|a| a.holder_name.clone())
                .unwrap_or_else(|| "-".to_string())
        };
        table.add_row(vec![
            transfer.id.to_string(),
            transfer.created_at.format("%Y-%m-%d %H:%M").to_string(),
            transfer.transfer_type.to_string(),
            format_money(transfer.amount_to_transfer),
            holder(&transfer.source_account),
            holder(&transfer.destination_account),
        ]);
    }
    table
}
