//! Engine entry points: gross-to-net, net-to-gross, and result assembly.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PayrollError;
use crate::insurance::{calculate_insurance, InsuranceBreakdown};
use crate::rules::{resolve_rules, RuleSet};
use crate::tax::progressive_tax;
use crate::types::{with_metadata, CalculationMode, ComputationOutput, Money, Rate, SalaryInput};
use crate::PayrollResult;

const MAX_DEPENDENTS: u32 = 20;
const MONTHS_PER_YEAR: Money = dec!(12);

/// Bisection stops once the bracketing interval is this narrow (VND).
/// Combined with rounding to whole VND, recovered gross figures land
/// within 1 VND of the true inverse.
const SOLVER_TOLERANCE: Money = dec!(0.5);
const MAX_SOLVER_ITERATIONS: u32 = 100;
const MAX_BRACKET_EXPANSIONS: u32 = 32;

/// Hard ceiling on a net-to-gross target. Anything above this is treated
/// as unreachable rather than risking Decimal range issues in the search.
const MAX_NET_TARGET: Money = dec!(10_000_000_000_000);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    pub personal: Money,
    pub dependents: Money,
    pub exemptions: Money,
    pub total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub taxable_income: Money,
    /// 1-based tier the taxable income fell into.
    pub bracket: usize,
    pub tax: Money,
    pub effective_rate: Rate,
    pub marginal_rate: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyProjection {
    pub gross_yearly: Money,
    pub net_yearly: Money,
    pub total_tax: Money,
    pub total_insurance: Money,
}

/// One labelled line of the monthly payslip view, in payslip order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub label: String,
    pub amount: Money,
}

/// Fully itemised outcome of one calculation. Immutable once assembled;
/// `net = gross - insurance.total - tax.tax` holds in every result
/// regardless of which direction produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryResult {
    pub gross: Money,
    pub net: Money,
    pub insurance: InsuranceBreakdown,
    pub deductions: DeductionBreakdown,
    pub tax: TaxBreakdown,
    pub yearly_projection: YearlyProjection,
    pub monthly_breakdown: Vec<BreakdownLine>,
    /// `effective_from` year of the rule set that was actually applied,
    /// for audit when the requested year was clamped.
    pub applied_rule_year: i32,
}

fn validate(input: &SalaryInput) -> PayrollResult<()> {
    if input.amount <= Money::ZERO {
        return Err(PayrollError::InvalidInput {
            field: "amount".into(),
            reason: "Salary amount must be positive".into(),
        });
    }
    if input.dependents > MAX_DEPENDENTS {
        return Err(PayrollError::InvalidInput {
            field: "dependents".into(),
            reason: format!("Dependent count must not exceed {}", MAX_DEPENDENTS),
        });
    }
    if input.exemptions < Money::ZERO {
        return Err(PayrollError::InvalidInput {
            field: "exemptions".into(),
            reason: "Exemptions must not be negative".into(),
        });
    }
    Ok(())
}

fn deduction_breakdown(input: &SalaryInput, rules: &RuleSet) -> DeductionBreakdown {
    let personal = rules.deductions.personal;
    let dependents = rules.deductions.per_dependent * Money::from(input.dependents);
    DeductionBreakdown {
        personal,
        dependents,
        exemptions: input.exemptions,
        total: personal + dependents + input.exemptions,
    }
}

/// Forward calculation: everything derived from a known gross figure.
pub(crate) fn forward(
    gross: Money,
    input: &SalaryInput,
    rules: &'static RuleSet,
) -> PayrollResult<SalaryResult> {
    let insurance = calculate_insurance(gross, input.region, rules)?;
    let deductions = deduction_breakdown(input, rules);

    let taxable_income = (gross - insurance.total - deductions.total).max(Money::ZERO);
    let assessment = progressive_tax(taxable_income, rules.brackets);

    let net = gross - insurance.total - assessment.tax;
    let effective_rate = if gross > Money::ZERO {
        assessment.tax / gross
    } else {
        Money::ZERO
    };

    let tax = TaxBreakdown {
        taxable_income: assessment.taxable_income,
        bracket: assessment.bracket,
        tax: assessment.tax,
        effective_rate,
        marginal_rate: assessment.marginal_rate,
    };

    let yearly_projection = YearlyProjection {
        gross_yearly: gross * MONTHS_PER_YEAR,
        net_yearly: net * MONTHS_PER_YEAR,
        total_tax: tax.tax * MONTHS_PER_YEAR,
        total_insurance: insurance.total * MONTHS_PER_YEAR,
    };

    let monthly_breakdown = vec![
        BreakdownLine { label: "Gross salary".into(), amount: gross },
        BreakdownLine { label: "Social insurance (BHXH)".into(), amount: insurance.bhxh },
        BreakdownLine { label: "Health insurance (BHYT)".into(), amount: insurance.bhyt },
        BreakdownLine { label: "Unemployment insurance (BHTN)".into(), amount: insurance.bhtn },
        BreakdownLine { label: "Personal income tax".into(), amount: tax.tax },
        BreakdownLine { label: "Net salary".into(), amount: net },
    ];

    Ok(SalaryResult {
        gross,
        net,
        insurance,
        deductions,
        tax,
        yearly_projection,
        monthly_breakdown,
        applied_rule_year: rules.effective_from,
    })
}

/// Cheap forward oracle for the solver: net only, no result assembly.
fn net_for_gross(gross: Money, input: &SalaryInput, rules: &RuleSet) -> PayrollResult<Money> {
    let insurance = calculate_insurance(gross, input.region, rules)?;
    let deductions = deduction_breakdown(input, rules);
    let taxable_income = (gross - insurance.total - deductions.total).max(Money::ZERO);
    let assessment = progressive_tax(taxable_income, rules.brackets);
    Ok(gross - insurance.total - assessment.tax)
}

/// Finds the gross salary whose forward calculation yields `target_net`.
///
/// net(gross) is strictly increasing (the combined marginal take of
/// insurance and tax never reaches 100%), so the inverse is unique and
/// plain bisection suffices. The initial bracket [0, 3x net] always
/// contains the root in practice; it is still re-expanded defensively
/// before bisecting.
fn solve_gross(
    target_net: Money,
    input: &SalaryInput,
    rules: &'static RuleSet,
) -> PayrollResult<Money> {
    if target_net > MAX_NET_TARGET {
        return Err(PayrollError::UnreachableTarget(format!(
            "Requested net {} exceeds the supported search range",
            target_net
        )));
    }

    let mut lo = Money::ZERO;
    let mut hi = target_net * dec!(3);
    let mut expansions = 0;
    while net_for_gross(hi, input, rules)? < target_net {
        hi *= dec!(2);
        expansions += 1;
        if expansions > MAX_BRACKET_EXPANSIONS {
            return Err(PayrollError::UnreachableTarget(format!(
                "No gross salary up to {} produces a net of {}",
                hi, target_net
            )));
        }
    }

    for _ in 0..MAX_SOLVER_ITERATIONS {
        let mid = (lo + hi) / dec!(2);
        if hi - lo <= SOLVER_TOLERANCE {
            return Ok(mid.round());
        }
        if net_for_gross(mid, input, rules)? < target_net {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Err(PayrollError::ConvergenceFailure {
        function: "net_to_gross".into(),
        iterations: MAX_SOLVER_ITERATIONS,
        last_delta: hi - lo,
    })
}

fn clamp_warnings(requested_year: i32, rules: &RuleSet) -> Vec<String> {
    let mut warnings = Vec::new();
    if requested_year < rules.effective_from {
        warnings.push(format!(
            "Tax year {} predates the earliest known rule set; {} rules applied",
            requested_year, rules.effective_from
        ));
    }
    warnings
}

fn assumptions(input: &SalaryInput, rules: &RuleSet) -> serde_json::Value {
    serde_json::json!({
        "requested_year": input.year,
        "applied_rule_year": rules.effective_from,
        "region": input.region.to_string(),
        "dependents": input.dependents,
    })
}

/// Gross-to-net: direct forward calculation.
///
/// Fails on non-positive amount, more than 20 dependents, or negative
/// exemptions. Unknown tax years clamp to the nearest rule set and are
/// reported via `applied_rule_year` and a warning, never an error.
pub fn compute_gross_to_net(input: &SalaryInput) -> PayrollResult<ComputationOutput<SalaryResult>> {
    let start = Instant::now();
    validate(input)?;

    let rules = resolve_rules(input.year);
    let result = forward(input.amount, input, rules)?;
    let warnings = clamp_warnings(input.year, rules);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Vietnamese monthly PIT with capped employee insurance, gross to net",
        &assumptions(input, rules),
        warnings,
        elapsed,
        result,
    ))
}

/// Net-to-gross: monotonic bisection against the forward calculation.
///
/// Same validation as gross-to-net, plus a distinct failure when no gross
/// reproduces the requested net within tolerance.
pub fn compute_net_to_gross(input: &SalaryInput) -> PayrollResult<ComputationOutput<SalaryResult>> {
    let start = Instant::now();
    validate(input)?;

    let rules = resolve_rules(input.year);
    let gross = solve_gross(input.amount, input, rules)?;
    let result = forward(gross, input, rules)?;
    let warnings = clamp_warnings(input.year, rules);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Vietnamese monthly PIT with capped employee insurance, net to gross via bisection",
        &assumptions(input, rules),
        warnings,
        elapsed,
        result,
    ))
}

/// Mode-dispatching convenience wrapper.
pub fn compute(
    input: &SalaryInput,
    mode: CalculationMode,
) -> PayrollResult<ComputationOutput<SalaryResult>> {
    match mode {
        CalculationMode::GrossToNet => compute_gross_to_net(input),
        CalculationMode::NetToGross => compute_net_to_gross(input),
    }
}
