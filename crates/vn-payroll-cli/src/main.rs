mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::rules::RulesArgs;
use commands::salary::{CompareArgs, SalaryArgs};

/// Vietnamese gross/net salary calculator
#[derive(Parser)]
#[command(
    name = "luong",
    version,
    about = "Vietnamese gross/net salary, income tax and insurance calculations",
    long_about = "Converts between gross and net salary under Vietnamese payroll rules: \
                  employee-side BHXH/BHYT/BHTN insurance with statutory caps, progressive \
                  personal income tax (legacy and 2026 bracket tables), and family \
                  deductions. All arithmetic uses decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a gross salary to net with an itemised breakdown
    GrossToNet(SalaryArgs),
    /// Find the gross salary that produces a target net
    NetToGross(SalaryArgs),
    /// Compare several gross offers by net pay
    Compare(CompareArgs),
    /// Show the tax and insurance rule table resolved for a year
    Rules(RulesArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::GrossToNet(args) => commands::salary::run_gross_to_net(args),
        Commands::NetToGross(args) => commands::salary::run_net_to_gross(args),
        Commands::Compare(args) => commands::salary::run_compare(args),
        Commands::Rules(args) => commands::rules::run_rules(args),
        Commands::Version => {
            println!("luong {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
