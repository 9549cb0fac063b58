//! Extract command - paginated transfer statement

use anyhow::Result;
use colored::Colorize;
use pixbank_core::{Statement, TransferFilters, View};

use super::{enter_view, get_context};
use crate::output;

pub fn run(filters: TransferFilters, json: bool) -> Result<()> {
    let ctx = get_context("extract")?;
    enter_view(&ctx, "/extract", View::Extract)?;

    let filters = (!filters.is_empty()).then_some(filters);
    let statement = ctx.account_service.transactions(filters.as_ref())?;

    if json {
        return output::json(&statement);
    }

    if statement.bank_account_transfers.is_empty() {
        output::warning("No transfers match these filters.");
    } else {
        println!("{}", output::transfers_table(&statement.bank_account_transfers));
    }
    print_page_info(&statement);
    Ok(())
}

fn print_page_info(statement: &Statement) {
    println!(
        "{}",
        format!(
            "Page {} of {} ({} transfers)",
            statement.current_page, statement.total_pages, statement.total_records
        )
        .dimmed()
    );
    if statement.current_page < statement.total_pages {
        output::info(&format!(
            "Next page: pb extract --page {}",
            statement.current_page + 1
        ));
    }
}
