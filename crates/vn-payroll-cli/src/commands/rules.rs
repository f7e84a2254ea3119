use clap::Args;
use serde_json::{json, Value};

use vn_payroll_core::rules::resolve_rules;
use vn_payroll_core::Region;

/// Arguments for printing a resolved rule table
#[derive(Args)]
pub struct RulesArgs {
    /// Tax year to resolve (clamps to the nearest known rule set)
    #[arg(long, default_value = "2026")]
    pub year: i32,

    /// Restrict regional figures to one region
    #[arg(long)]
    pub region: Option<Region>,
}

pub fn run_rules(args: RulesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rules = resolve_rules(args.year);

    let regions: Vec<Region> = match args.region {
        Some(region) => vec![region],
        None => Region::ALL.to_vec(),
    };

    let regional: Vec<Value> = regions
        .iter()
        .map(|&region| {
            json!({
                "region": region.to_string(),
                "minimum_wage": rules.minimum_wage(region),
                "cap_bhtn": rules.cap_bhtn(region),
            })
        })
        .collect();

    Ok(json!({
        "requested_year": args.year,
        "applied_rule_year": rules.effective_from,
        "brackets": rules.brackets,
        "deductions": rules.deductions,
        "insurance_rates": rules.insurance_rates,
        "base_wage": rules.base_wage,
        "cap_bhxh_bhyt": rules.cap_bhxh_bhyt(),
        "regional": regional,
    }))
}
