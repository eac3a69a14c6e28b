mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::amortization::LoanTermArgs;
use commands::solvers::{MaxLoanArgs, MonthlyPaymentArgs};

/// Loan amortization calculations
#[derive(Parser)]
#[command(
    name = "loan",
    version,
    about = "Loan term, monthly payment and maximum loan amount calculations",
    long_about = "A CLI for month-by-month loan amortization with decimal precision. \
                  Finds the payoff term for a given payment, the payment for a given \
                  term, or the largest loan a payment can carry."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log solver progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// How long a loan takes to pay off with a fixed monthly payment
    LoanTerm(LoanTermArgs),
    /// Monthly payment needed to pay off a loan within a fixed term
    MonthlyPayment(MonthlyPaymentArgs),
    /// Largest loan a fixed monthly payment can pay off within a fixed term
    MaxLoan(MaxLoanArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::LoanTerm(args) => commands::amortization::run_loan_term(args),
        Commands::MonthlyPayment(args) => commands::solvers::run_monthly_payment(args),
        Commands::MaxLoan(args) => commands::solvers::run_max_loan(args),
        Commands::Version => {
            println!("loan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            debug!(format = ?cli.output, "writing result");
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
