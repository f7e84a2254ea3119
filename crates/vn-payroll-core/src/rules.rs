//! Versioned rule tables for Vietnamese personal income tax and social
//! insurance, plus the year resolver.
//!
//! Two rule sets exist: the legacy regime (7 tax brackets, 11M/4.4M
//! deductions) for years before 2026, and the reformed regime (5 brackets,
//! 15.5M/6.2M deductions) from 2026 onward. Adding a future rule set only
//! requires appending to `RULE_SETS`; the engine never special-cases years.

use rust_decimal_macros::dec;
use serde::Serialize;

use crate::types::{Money, Rate, Region};

/// One tier of the progressive tax ladder. `deduction_constant` is
/// precomputed so that tax(x) = x * rate - deduction_constant for any
/// taxable income x falling in this tier, which is equivalent to summing
/// tax over all lower tiers.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TaxBracket {
    /// Upper bound of monthly taxable income for this tier; `None` for the
    /// top (unbounded) tier.
    pub upper_bound: Option<Money>,
    pub rate: Rate,
    pub deduction_constant: Money,
}

/// Employee-side insurance contribution rates.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InsuranceRates {
    pub bhxh: Rate,
    pub bhyt: Rate,
    pub bhtn: Rate,
}

/// Statutory family deductions, per month.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Deductions {
    pub personal: Money,
    pub per_dependent: Money,
}

/// Everything the engine needs for one tax regime.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RuleSet {
    /// First calendar year this rule set applies to.
    pub effective_from: i32,
    pub brackets: &'static [TaxBracket],
    pub deductions: Deductions,
    pub insurance_rates: InsuranceRates,
    /// Statutory base wage (luong co so); the BHXH/BHYT contribution base
    /// is capped at 20x this figure.
    pub base_wage: Money,
    /// Regional minimum wages indexed by `Region::index()`; the BHTN
    /// contribution base is capped at 20x the regional figure.
    pub minimum_wages: [Money; 4],
}

const INSURANCE_CAP_MULTIPLE: Money = dec!(20);

impl RuleSet {
    /// Contribution-base ceiling for social and health insurance.
    pub fn cap_bhxh_bhyt(&self) -> Money {
        self.base_wage * INSURANCE_CAP_MULTIPLE
    }

    /// Contribution-base ceiling for unemployment insurance, which tracks
    /// the regional minimum wage rather than the base wage.
    pub fn cap_bhtn(&self, region: Region) -> Money {
        self.minimum_wage(region) * INSURANCE_CAP_MULTIPLE
    }

    pub fn minimum_wage(&self, region: Region) -> Money {
        self.minimum_wages[region.index()]
    }
}

/// Legacy 7-tier ladder (monthly taxable income, VND).
const BRACKETS_LEGACY: [TaxBracket; 7] = [
    TaxBracket { upper_bound: Some(dec!(5_000_000)), rate: dec!(0.05), deduction_constant: dec!(0) },
    TaxBracket { upper_bound: Some(dec!(10_000_000)), rate: dec!(0.10), deduction_constant: dec!(250_000) },
    TaxBracket { upper_bound: Some(dec!(18_000_000)), rate: dec!(0.15), deduction_constant: dec!(750_000) },
    TaxBracket { upper_bound: Some(dec!(32_000_000)), rate: dec!(0.20), deduction_constant: dec!(1_650_000) },
    TaxBracket { upper_bound: Some(dec!(52_000_000)), rate: dec!(0.25), deduction_constant: dec!(3_250_000) },
    TaxBracket { upper_bound: Some(dec!(80_000_000)), rate: dec!(0.30), deduction_constant: dec!(5_850_000) },
    TaxBracket { upper_bound: None, rate: dec!(0.35), deduction_constant: dec!(9_850_000) },
];

/// Reformed 5-tier ladder effective 2026 (monthly taxable income, VND).
const BRACKETS_2026: [TaxBracket; 5] = [
    TaxBracket { upper_bound: Some(dec!(10_000_000)), rate: dec!(0.05), deduction_constant: dec!(0) },
    TaxBracket { upper_bound: Some(dec!(30_000_000)), rate: dec!(0.15), deduction_constant: dec!(1_000_000) },
    TaxBracket { upper_bound: Some(dec!(60_000_000)), rate: dec!(0.25), deduction_constant: dec!(4_000_000) },
    TaxBracket { upper_bound: Some(dec!(100_000_000)), rate: dec!(0.30), deduction_constant: dec!(7_000_000) },
    TaxBracket { upper_bound: None, rate: dec!(0.35), deduction_constant: dec!(12_000_000) },
];

/// Known rule sets, ascending by `effective_from`.
pub static RULE_SETS: [RuleSet; 2] = [
    RuleSet {
        effective_from: 2025,
        brackets: &BRACKETS_LEGACY,
        deductions: Deductions {
            personal: dec!(11_000_000),
            per_dependent: dec!(4_400_000),
        },
        insurance_rates: InsuranceRates {
            bhxh: dec!(0.08),
            bhyt: dec!(0.015),
            bhtn: dec!(0.01),
        },
        base_wage: dec!(2_340_000),
        minimum_wages: [
            dec!(4_960_000),
            dec!(4_410_000),
            dec!(3_860_000),
            dec!(3_450_000),
        ],
    },
    RuleSet {
        effective_from: 2026,
        brackets: &BRACKETS_2026,
        deductions: Deductions {
            personal: dec!(15_500_000),
            per_dependent: dec!(6_200_000),
        },
        insurance_rates: InsuranceRates {
            bhxh: dec!(0.08),
            bhyt: dec!(0.015),
            bhtn: dec!(0.01),
        },
        base_wage: dec!(2_340_000),
        minimum_wages: [
            dec!(5_310_000),
            dec!(4_730_000),
            dec!(4_140_000),
            dec!(3_700_000),
        ],
    },
];

/// Returns the rule set applicable to `year`.
///
/// Years outside the known range clamp to the nearest defined rule set
/// rather than failing: stale clients asking for an old year get the
/// earliest regime, future years get the latest. Callers can read
/// `effective_from` off the returned set to see which table applied.
pub fn resolve_rules(year: i32) -> &'static RuleSet {
    let mut selected = &RULE_SETS[0];
    for rule_set in RULE_SETS.iter() {
        if year >= rule_set.effective_from {
            selected = rule_set;
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_resolver_selects_legacy_before_2026() {
        assert_eq!(resolve_rules(2025).effective_from, 2025);
        assert_eq!(resolve_rules(2025).brackets.len(), 7);
    }

    #[test]
    fn test_resolver_selects_reform_from_2026() {
        assert_eq!(resolve_rules(2026).effective_from, 2026);
        assert_eq!(resolve_rules(2026).brackets.len(), 5);
    }

    #[test]
    fn test_resolver_clamps_out_of_range_years() {
        // Stale client data must not hard-fail
        assert_eq!(resolve_rules(2019).effective_from, 2025);
        assert_eq!(resolve_rules(2040).effective_from, 2026);
    }

    #[test]
    fn test_brackets_sorted_with_unbounded_top() {
        for rule_set in RULE_SETS.iter() {
            let brackets = rule_set.brackets;
            assert!(brackets.last().unwrap().upper_bound.is_none());
            for pair in brackets.windows(2) {
                assert!(pair[1].rate >= pair[0].rate, "rates must be non-decreasing");
                if let (Some(a), Some(b)) = (pair[0].upper_bound, pair[1].upper_bound) {
                    assert!(b > a, "upper bounds must be strictly ascending");
                }
            }
        }
    }

    #[test]
    fn test_deduction_constants_make_ladder_continuous() {
        // tax(x) computed with tier n and tier n+1 must agree exactly at
        // the boundary between them
        for rule_set in RULE_SETS.iter() {
            for pair in rule_set.brackets.windows(2) {
                let bound = pair[0].upper_bound.unwrap();
                let below = bound * pair[0].rate - pair[0].deduction_constant;
                let above = bound * pair[1].rate - pair[1].deduction_constant;
                assert_eq!(below, above, "discontinuity at {}", bound);
            }
        }
    }

    #[test]
    fn test_insurance_caps_region_i() {
        let rules = resolve_rules(2025);
        assert_eq!(rules.cap_bhxh_bhyt(), dec!(46_800_000));
        assert_eq!(rules.cap_bhtn(Region::I), dec!(99_200_000));
        assert_eq!(rules.cap_bhtn(Region::IV), dec!(69_000_000));
    }

    #[test]
    fn test_2026_deductions() {
        let rules = resolve_rules(2026);
        assert_eq!(rules.deductions.personal, dec!(15_500_000));
        assert_eq!(rules.deductions.per_dependent, dec!(6_200_000));
    }
}
