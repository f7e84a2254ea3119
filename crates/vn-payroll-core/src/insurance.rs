//! Employee-side insurance contributions (BHXH, BHYT, BHTN).

use serde::{Deserialize, Serialize};

use crate::error::PayrollError;
use crate::rules::RuleSet;
use crate::types::{Money, Region};
use crate::PayrollResult;

/// Itemised insurance contributions for one month. `capped_salary` is the
/// BHXH/BHYT base actually used, which diverges from gross once the salary
/// exceeds the statutory ceiling; the UI surfaces it for transparency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceBreakdown {
    pub bhxh: Money,
    pub bhyt: Money,
    pub bhtn: Money,
    pub total: Money,
    pub capped_salary: Money,
    pub bhtn_base: Money,
}

/// Computes contributions from a gross salary. Bases are capped before the
/// rates apply: contributions never grow with income above the ceilings.
pub fn calculate_insurance(
    gross: Money,
    region: Region,
    rules: &RuleSet,
) -> PayrollResult<InsuranceBreakdown> {
    if gross <= Money::ZERO {
        return Err(PayrollError::InvalidInput {
            field: "amount".into(),
            reason: "Gross salary must be positive".into(),
        });
    }

    let bhxh_bhyt_base = gross.min(rules.cap_bhxh_bhyt());
    let bhtn_base = gross.min(rules.cap_bhtn(region));

    let bhxh = bhxh_bhyt_base * rules.insurance_rates.bhxh;
    let bhyt = bhxh_bhyt_base * rules.insurance_rates.bhyt;
    let bhtn = bhtn_base * rules.insurance_rates.bhtn;

    Ok(InsuranceBreakdown {
        bhxh,
        bhyt,
        bhtn,
        total: bhxh + bhyt + bhtn,
        capped_salary: bhxh_bhyt_base,
        bhtn_base,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::resolve_rules;
    use rust_decimal_macros::dec;

    #[test]
    fn test_contributions_under_all_caps() {
        let rules = resolve_rules(2025);
        let result = calculate_insurance(dec!(20_000_000), Region::I, rules).unwrap();

        assert_eq!(result.bhxh, dec!(1_600_000));
        assert_eq!(result.bhyt, dec!(300_000));
        assert_eq!(result.bhtn, dec!(200_000));
        assert_eq!(result.total, dec!(2_100_000));
        assert_eq!(result.capped_salary, dec!(20_000_000));
    }

    #[test]
    fn test_bhxh_bhyt_base_capped_at_20x_base_wage() {
        let rules = resolve_rules(2025);
        let result = calculate_insurance(dec!(100_000_000), Region::I, rules).unwrap();

        assert_eq!(result.capped_salary, dec!(46_800_000));
        assert_eq!(result.bhxh, dec!(3_744_000));
        assert_eq!(result.bhyt, dec!(702_000));
        // 100M sits just above region I's 99.2M BHTN ceiling
        assert_eq!(result.bhtn_base, dec!(99_200_000));
        assert_eq!(result.bhtn, dec!(992_000));
    }

    #[test]
    fn test_bhtn_cap_is_region_dependent() {
        let rules = resolve_rules(2025);
        let region_i = calculate_insurance(dec!(90_000_000), Region::I, rules).unwrap();
        let region_iv = calculate_insurance(dec!(90_000_000), Region::IV, rules).unwrap();

        // Under region I's 99.2M cap, over region IV's 69M cap
        assert_eq!(region_i.bhtn_base, dec!(90_000_000));
        assert_eq!(region_iv.bhtn_base, dec!(69_000_000));
        assert_eq!(region_iv.bhtn, dec!(690_000));
    }

    #[test]
    fn test_total_stops_growing_above_caps() {
        let rules = resolve_rules(2025);
        let at_100m = calculate_insurance(dec!(100_000_000), Region::I, rules).unwrap();
        let at_150m = calculate_insurance(dec!(150_000_000), Region::I, rules).unwrap();

        assert_eq!(at_100m.total, at_150m.total);
    }

    #[test]
    fn test_rejects_non_positive_gross() {
        let rules = resolve_rules(2025);
        let result = calculate_insurance(dec!(0), Region::I, rules);

        match result.unwrap_err() {
            PayrollError::InvalidInput { field, .. } => assert_eq!(field, "amount"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
