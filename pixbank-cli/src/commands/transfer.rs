//! Transfer command - submit a PIX or TED transfer

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use pixbank_core::{TransferRequest, TransferType, View};
use rust_decimal::Decimal;

use super::{enter_view, get_context};
use crate::output;

pub struct TransferArgs {
    pub from: i64,
    pub to: i64,
    pub transfer_type: TransferType,
    pub amount: Decimal,
    pub make_success: Option<bool>,
    pub yes: bool,
    pub json: bool,
}

pub fn run(args: TransferArgs) -> Result<()> {
    let ctx = get_context("transfer")?;
    enter_view(&ctx, "/transfer", View::Transfer)?;

    let mut request = TransferRequest::new(args.from, args.to, args.transfer_type, args.amount);
    if let Some(make_success) = args.make_success {
        request = request.with_make_success(make_success);
    }

    if !args.yes && !args.json {
        println!(
            "{} {} from account {} to account {}",
            args.transfer_type.to_string().bold(),
            output::format_money(args.amount).bold(),
            args.from,
            args.to
        );
        if !Confirm::new()
            .with_prompt("Submit this transfer?")
            .default(false)
            .interact()?
        {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let transfer = ctx.account_service.transfer(&request)?;

    if args.json {
        return output::json(&transfer);
    }

    output::success(&format!("Transfer #{} submitted", transfer.id));
    println!("{}", output::transfers_table(std::slice::from_ref(&transfer)));
    Ok(())
}
