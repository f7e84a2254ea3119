//! Forward progressive income tax over a bracket ladder.

use serde::{Deserialize, Serialize};

use crate::rules::TaxBracket;
use crate::types::{Money, Rate};

/// Result of applying the progressive ladder to one month of taxable
/// income. `bracket` is the 1-based tier number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxAssessment {
    pub taxable_income: Money,
    pub bracket: usize,
    pub tax: Money,
    pub marginal_rate: Rate,
}

/// Applies the bracket ladder to `taxable_income`.
///
/// The ladder's precomputed deduction constants reduce the usual
/// tier-by-tier summation to a single multiply-subtract against the tier
/// the income falls into. Non-positive taxable income yields zero tax and
/// reports the first tier by convention (its rate is not actually applied).
pub fn progressive_tax(taxable_income: Money, brackets: &[TaxBracket]) -> TaxAssessment {
    if taxable_income <= Money::ZERO {
        return TaxAssessment {
            taxable_income,
            bracket: 1,
            tax: Money::ZERO,
            marginal_rate: brackets[0].rate,
        };
    }

    let (index, tier) = locate_bracket(taxable_income, brackets);
    let tax = (taxable_income * tier.rate - tier.deduction_constant).max(Money::ZERO);

    TaxAssessment {
        taxable_income,
        bracket: index + 1,
        tax,
        marginal_rate: tier.rate,
    }
}

/// First tier whose upper bound is >= the taxable income; the unbounded
/// top tier catches everything else.
fn locate_bracket(taxable_income: Money, brackets: &[TaxBracket]) -> (usize, &TaxBracket) {
    for (index, tier) in brackets.iter().enumerate() {
        match tier.upper_bound {
            Some(bound) if taxable_income <= bound => return (index, tier),
            Some(_) => continue,
            None => return (index, tier),
        }
    }
    // Tables always end with an unbounded tier; reaching here would mean a
    // malformed ladder, so fall back to the last entry.
    let last = brackets.len() - 1;
    (last, &brackets[last])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::resolve_rules;
    use rust_decimal_macros::dec;

    #[test]
    fn test_second_tier_legacy() {
        let brackets = resolve_rules(2025).brackets;
        let assessment = progressive_tax(dec!(6_900_000), brackets);

        assert_eq!(assessment.bracket, 2);
        assert_eq!(assessment.tax, dec!(440_000));
        assert_eq!(assessment.marginal_rate, dec!(0.10));
    }

    #[test]
    fn test_top_tier_legacy() {
        let brackets = resolve_rules(2025).brackets;
        let assessment = progressive_tax(dec!(100_000_000), brackets);

        assert_eq!(assessment.bracket, 7);
        // 100M * 35% - 9.85M
        assert_eq!(assessment.tax, dec!(25_150_000));
    }

    #[test]
    fn test_reform_ladder_2026() {
        let brackets = resolve_rules(2026).brackets;

        assert_eq!(progressive_tax(dec!(10_000_000), brackets).tax, dec!(500_000));
        assert_eq!(progressive_tax(dec!(30_000_000), brackets).tax, dec!(3_500_000));
        assert_eq!(progressive_tax(dec!(120_000_000), brackets).tax, dec!(30_000_000));
    }

    #[test]
    fn test_non_positive_income_pays_nothing() {
        let brackets = resolve_rules(2025).brackets;

        let zero = progressive_tax(dec!(0), brackets);
        assert_eq!(zero.tax, dec!(0));
        assert_eq!(zero.bracket, 1);
        assert_eq!(zero.marginal_rate, dec!(0.05));

        let negative = progressive_tax(dec!(-3_000_000), brackets);
        assert_eq!(negative.tax, dec!(0));
    }

    #[test]
    fn test_monotonic_in_taxable_income() {
        let brackets = resolve_rules(2025).brackets;
        let mut previous = Money::ZERO;
        let mut income = dec!(0);
        while income <= dec!(120_000_000) {
            let tax = progressive_tax(income, brackets).tax;
            assert!(tax >= previous, "tax regressed at {}", income);
            previous = tax;
            income += dec!(500_000);
        }
    }

    #[test]
    fn test_continuity_at_every_boundary() {
        let epsilon = dec!(0.01);
        for rules in [resolve_rules(2025), resolve_rules(2026)] {
            for tier in rules.brackets.iter() {
                let Some(bound) = tier.upper_bound else { continue };
                let below = progressive_tax(bound - epsilon, rules.brackets).tax;
                let above = progressive_tax(bound + epsilon, rules.brackets).tax;
                // The jump across the boundary is bounded by the marginal
                // slope on either side; no step discontinuity
                assert!(above >= below);
                assert!(above - below <= dec!(0.35) * epsilon * dec!(2));
            }
        }
    }
}
