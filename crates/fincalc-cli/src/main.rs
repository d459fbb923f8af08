mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::rounding::RoundArgs;
use commands::time_value::{IrrArgs, NpvArgs, PmtArgs};

/// Validated time-value-of-money calculations
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Validated NPV, IRR and PMT calculations",
    long_about = "Net present value, internal rate of return and loan payment \
                  calculations with input validation and half-away-from-zero \
                  rounding. Inputs come from flags, a JSON/YAML file or stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable debug logging on stderr (FINCALC_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Round a number to a fixed number of decimal places
    Round(RoundArgs),
    /// Net Present Value of a cash flow series
    Npv(NpvArgs),
    /// Internal Rate of Return of a cash flow series
    Irr(IrrArgs),
    /// Periodic payment of a loan or annuity
    Pmt(PmtArgs),
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

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Round(args) => commands::rounding::run_round(args),
        Commands::Npv(args) => commands::time_value::run_npv(args),
        Commands::Irr(args) => commands::time_value::run_irr(args),
        Commands::Pmt(args) => commands::time_value::run_pmt(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
