//! Minibank CLI - debit, credit and transfer from the command line
//!
//! Every invocation works on fresh in-memory accounts built from the
//! arguments; nothing is persisted.
//!
//! Usage:
//! ```bash
//! minibank debit --owner Andres --balance 1000.12345 --amount 100
//! minibank credit --owner Andres --balance 1000.12345 --amount 100
//! minibank transfer --from-owner Andres --from-balance 1500.8989 \
//!     --to-owner "John Doe" --to-balance 2500 --amount 500
//! minibank --format json --bank-name "Banco del estado" transfer ...
//! ```

use anyhow::Result;
use bigdecimal::BigDecimal;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

/// Minibank - accounts with exact decimal balances
#[derive(Parser)]
#[command(name = "minibank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Name of the bank used by `transfer`
    #[arg(long, default_value = "Banco del estado", global = true)]
    pub bank_name: String,

    /// Output format
    #[arg(long, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Debit an amount from an account
    Debit {
        /// Account owner
        #[arg(long)]
        owner: String,
        /// Starting balance
        #[arg(long)]
        balance: BigDecimal,
        /// Amount to debit
        #[arg(long)]
        amount: BigDecimal,
    },

    /// Credit an amount to an account
    Credit {
        /// Account owner
        #[arg(long)]
        owner: String,
        /// Starting balance
        #[arg(long)]
        balance: BigDecimal,
        /// Amount to credit
        #[arg(long)]
        amount: BigDecimal,
    },

    /// Transfer between two accounts of the same bank
    Transfer {
        /// Origin account owner
        #[arg(long)]
        from_owner: String,
        /// Origin starting balance
        #[arg(long)]
        from_balance: BigDecimal,
        /// Destination account owner
        #[arg(long)]
        to_owner: String,
        /// Destination starting balance
        #[arg(long)]
        to_balance: BigDecimal,
        /// Amount to transfer
        #[arg(long)]
        amount: BigDecimal,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Debit {
            owner,
            balance,
            amount,
        } => commands::debit(&owner, balance, amount),

        Commands::Credit {
            owner,
            balance,
            amount,
        } => commands::credit(&owner, balance, amount),

        Commands::Transfer {
            from_owner,
            from_balance,
            to_owner,
            to_balance,
            amount,
        } => commands::transfer(
            &cli.bank_name,
            (&from_owner, from_balance),
            (&to_owner, to_balance),
            amount,
        ),
    };

    print!("{}", commands::render(&outcome.report, cli.format)?);
    outcome.into_result()
}
