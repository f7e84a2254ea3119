use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use vn_payroll_core::comparison::compare_salaries;
use vn_payroll_core::salary::{compute_gross_to_net, compute_net_to_gross};
use vn_payroll_core::{Region, SalaryInput};

use crate::input;

/// Arguments shared by gross-to-net and net-to-gross; `--amount` is the
/// gross or the target net depending on the subcommand.
#[derive(Args)]
pub struct SalaryArgs {
    /// Monthly salary amount in VND
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Minimum-wage region (I, II, III or IV)
    #[arg(long, default_value = "I")]
    pub region: Region,

    /// Number of registered dependents
    #[arg(long, default_value = "0")]
    pub dependents: u32,

    /// Tax year (clamps to the nearest known rule set)
    #[arg(long, default_value = "2026")]
    pub year: i32,

    /// Additional tax-exempt income in VND
    #[arg(long, default_value = "0")]
    pub exemptions: Decimal,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for comparing several gross offers
#[derive(Args)]
pub struct CompareArgs {
    /// Gross amount in VND; repeat the flag for each offer
    #[arg(long = "amount")]
    pub amounts: Vec<Decimal>,

    /// Minimum-wage region applied to every offer
    #[arg(long, default_value = "I")]
    pub region: Region,

    /// Number of registered dependents
    #[arg(long, default_value = "0")]
    pub dependents: u32,

    /// Tax year
    #[arg(long, default_value = "2026")]
    pub year: i32,

    /// Path to a JSON or YAML file with an array of salary inputs
    /// (candidates may then differ in region, year and dependents)
    #[arg(long)]
    pub input: Option<String>,
}

fn resolve_salary_input(args: &SalaryArgs) -> Result<SalaryInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_input(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(SalaryInput {
        amount: args.amount.ok_or("--amount is required (or provide --input)")?,
        region: args.region,
        dependents: args.dependents,
        year: args.year,
        exemptions: args.exemptions,
    })
}

pub fn run_gross_to_net(args: SalaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let salary_input = resolve_salary_input(&args)?;
    let output = compute_gross_to_net(&salary_input)?;
    Ok(serde_json::to_value(&output)?)
}

pub fn run_net_to_gross(args: SalaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let salary_input = resolve_salary_input(&args)?;
    let output = compute_net_to_gross(&salary_input)?;
    Ok(serde_json::to_value(&output)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let candidates: Vec<SalaryInput> = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        if args.amounts.is_empty() {
            return Err("--amount is required at least once (or provide --input)".into());
        }
        args.amounts
            .iter()
            .map(|&amount| SalaryInput {
                amount,
                region: args.region,
                dependents: args.dependents,
                year: args.year,
                exemptions: Decimal::ZERO,
            })
            .collect()
    };

    let output = compare_salaries(&candidates)?;
    Ok(serde_json::to_value(&output)?)
}
