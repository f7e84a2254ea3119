//! Side-by-side comparison of several salary offers.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PayrollError;
use crate::salary::{compute_gross_to_net, SalaryResult};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, SalaryInput};
use crate::PayrollResult;

/// One compared offer. `net_delta_vs_best` is zero for the winner and
/// negative for everyone else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub gross: Money,
    pub net: Money,
    pub tax: Money,
    pub insurance_total: Money,
    pub effective_rate: Rate,
    pub net_delta_vs_best: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    /// Entries ranked by net pay, best first.
    pub ranked: Vec<ComparisonEntry>,
    pub best_net: Money,
}

/// Forward-computes every candidate (each amount is a gross salary) and
/// ranks the outcomes by net pay. Candidates may differ in region, year
/// and dependents, so relocation offers compare on equal footing.
pub fn compare_salaries(
    candidates: &[SalaryInput],
) -> PayrollResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();

    if candidates.is_empty() {
        return Err(PayrollError::InsufficientData(
            "Comparison requires at least one salary input".to_string(),
        ));
    }

    let mut results: Vec<SalaryResult> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let output = compute_gross_to_net(candidate)?;
        results.push(output.result);
    }

    results.sort_by(|a, b| b.net.cmp(&a.net));
    let best_net = results[0].net;

    let ranked = results
        .into_iter()
        .map(|r| ComparisonEntry {
            gross: r.gross,
            net: r.net,
            tax: r.tax.tax,
            insurance_total: r.insurance.total,
            effective_rate: r.tax.effective_rate,
            net_delta_vs_best: r.net - best_net,
        })
        .collect();

    let result = ComparisonOutput { ranked, best_net };

    let assumptions = serde_json::json!({
        "num_candidates": candidates.len(),
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Per-candidate gross-to-net calculation ranked by net pay",
        &assumptions,
        Vec::new(),
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Region;
    use rust_decimal_macros::dec;

    fn candidate(amount: Money, region: Region) -> SalaryInput {
        SalaryInput {
            amount,
            region,
            dependents: 0,
            year: 2025,
            exemptions: Money::ZERO,
        }
    }

    #[test]
    fn test_ranked_by_net_descending() {
        let output = compare_salaries(&[
            candidate(dec!(20_000_000), Region::I),
            candidate(dec!(35_000_000), Region::I),
            candidate(dec!(25_000_000), Region::I),
        ])
        .unwrap();
        let r = &output.result;

        assert_eq!(r.ranked.len(), 3);
        assert_eq!(r.ranked[0].gross, dec!(35_000_000));
        assert_eq!(r.ranked[0].net_delta_vs_best, dec!(0));
        assert!(r.ranked[1].net >= r.ranked[2].net);
        assert!(r.ranked[2].net_delta_vs_best < dec!(0));
    }

    #[test]
    fn test_best_net_matches_winner() {
        let output = compare_salaries(&[
            candidate(dec!(20_000_000), Region::I),
            candidate(dec!(20_000_000), Region::IV),
        ])
        .unwrap();
        let r = &output.result;

        assert_eq!(r.best_net, r.ranked[0].net);
        // Identical gross below every cap nets the same in both regions
        assert_eq!(r.ranked[0].net, r.ranked[1].net);
    }

    #[test]
    fn test_empty_comparison_rejected() {
        let result = compare_salaries(&[]);
        match result.unwrap_err() {
            PayrollError::InsufficientData(_) => {}
            other => panic!("Expected InsufficientData, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_candidate_propagates() {
        let result = compare_salaries(&[candidate(dec!(-5), Region::I)]);
        assert!(matches!(
            result.unwrap_err(),
            PayrollError::InvalidInput { .. }
        ));
    }
}
