//! PixBank CLI - the PixBank client in your terminal

use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pixbank_core::{Direction, TransferFilters, TransferType};
use rust_decimal::Decimal;

mod commands;
mod output;

use commands::{accounts, auth, config, extract, logs, open, transfer};

/// PixBank - PIX and TED transfers from the command line
#[derive(Parser)]
#[command(name = "pb", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new user
    Signup {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Password (falls back to PIXBANK_PASSWORD, then a prompt)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Password (falls back to PIXBANK_PASSWORD, then a prompt)
        #[arg(short, long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clear the stored session
    Logout,

    /// Fetch the signed-in user's profile
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the local session state
    Session {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show your accounts and total balance
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List accounts for a transfer
    Accounts {
        /// List destination accounts instead of your own
        #[arg(long)]
        available: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit a transfer between accounts
    Transfer {
        /// Source account ID (one of yours)
        #[arg(long)]
        from: i64,
        /// Destination account ID
        #[arg(long)]
        to: i64,
        /// Transfer type: pix or ted
        #[arg(long = "type", default_value = "pix")]
        transfer_type: TransferType,
        /// Amount, e.g. 150.00
        #[arg(long)]
        amount: Decimal,
        /// Forwarded to the backend as make_success
        #[arg(long)]
        make_success: Option<bool>,
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the transfer statement
    Extract {
        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<NaiveDate>,
        #[arg(long)]
        min_value: Option<Decimal>,
        #[arg(long)]
        max_value: Option<Decimal>,
        /// sent or received
        #[arg(long)]
        direction: Option<Direction>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a client path for the current session
    Open {
        /// Path such as /dashboard
        path: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the route table
    Routes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change configuration
    Config {
        /// Save a new API base URL
        #[arg(long, conflicts_with = "reset")]
        api_url: Option<String>,
        /// Forget the saved API base URL
        #[arg(long)]
        reset: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect the local event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            commands::log_failure(&e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Signup { name, email, password } => auth::run_signup(name, email, password),
        Commands::Login { email, password, json } => auth::run_login(email, password, json),
        Commands::Logout => auth::run_logout(),
        Commands::Whoami { json } => auth::run_whoami(json),
        Commands::Session { json } => auth::run_session(json),
        Commands::Dashboard { json } => accounts::run_dashboard(json),
        Commands::Accounts { available, json } => accounts::run(available, json),
        Commands::Transfer {
            from,
            to,
            transfer_type,
            amount,
            make_success,
            yes,
            json,
        } => transfer::run(transfer::TransferArgs {
            from,
            to,
            transfer_type,
            amount,
            make_success,
            yes,
            json,
        }),
        Commands::Extract {
            start_date,
            end_date,
            min_value,
            max_value,
            direction,
            page,
            per_page,
            json,
        } => {
            let filters = TransferFilters {
                start_date,
                end_date,
                min_value,
                max_value,
                direction,
                page,
                per_page,
            };
            extract::run(filters, json)
        }
        Commands::Open { path, json } => open::run(&path, json),
        Commands::Routes { json } => open::run_routes(json),
        Commands::Config { api_url, reset, json } => config::run(api_url, reset, json),
        Commands::Logs { command } => logs::run(command),
    }
}
