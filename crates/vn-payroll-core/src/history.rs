//! Bounded in-memory calculation history.
//!
//! Downstream persistence (browser storage in the web front-end) stores the
//! same shape; this structure defines the interface contract: entries keyed
//! by a generated identifier, capped size, oldest evicted first.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

use crate::salary::SalaryResult;
use crate::types::{CalculationMode, SalaryInput};

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub mode: CalculationMode,
    pub input: SalaryInput,
    pub result: SalaryResult,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct CalculationHistory {
    capacity: usize,
    next_id: u64,
    entries: VecDeque<HistoryEntry>,
}

impl CalculationHistory {
    pub fn new(capacity: usize) -> Self {
        CalculationHistory {
            capacity: capacity.max(1),
            next_id: 1,
            entries: VecDeque::new(),
        }
    }

    /// Records a finished calculation and returns its generated id.
    /// The oldest entry is evicted once the store is full.
    pub fn record(
        &mut self,
        input: SalaryInput,
        mode: CalculationMode,
        result: SalaryResult,
    ) -> String {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }

        let id = format!("calc-{:06}", self.next_id);
        self.next_id += 1;

        self.entries.push_back(HistoryEntry {
            id: id.clone(),
            mode,
            input,
            result,
            recorded_at: Utc::now(),
        });

        id
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Entries newest first, the order the UI lists them.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for CalculationHistory {
    fn default() -> Self {
        CalculationHistory::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::salary::compute_gross_to_net;
    use crate::types::{Money, Region};
    use rust_decimal_macros::dec;

    fn sample(amount: Money) -> (SalaryInput, SalaryResult) {
        let input = SalaryInput {
            amount,
            region: Region::I,
            dependents: 0,
            year: 2025,
            exemptions: Money::ZERO,
        };
        let result = compute_gross_to_net(&input).unwrap().result;
        (input, result)
    }

    #[test]
    fn test_record_assigns_sequential_ids() {
        let mut history = CalculationHistory::default();
        let (input, result) = sample(dec!(20_000_000));

        let first = history.record(input.clone(), CalculationMode::GrossToNet, result.clone());
        let second = history.record(input, CalculationMode::GrossToNet, result);

        assert_eq!(first, "calc-000001");
        assert_eq!(second, "calc-000002");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_lookup_by_id() {
        let mut history = CalculationHistory::default();
        let (input, result) = sample(dec!(20_000_000));
        let id = history.record(input, CalculationMode::GrossToNet, result);

        let entry = history.get(&id).unwrap();
        assert_eq!(entry.result.net, dec!(17_460_000));
        assert!(history.get("calc-999999").is_none());
    }

    #[test]
    fn test_capacity_evicts_oldest_first() {
        let mut history = CalculationHistory::new(3);
        let (input, result) = sample(dec!(20_000_000));

        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(history.record(
                input.clone(),
                CalculationMode::GrossToNet,
                result.clone(),
            ));
        }

        assert_eq!(history.len(), 3);
        assert!(history.get(&ids[0]).is_none());
        assert!(history.get(&ids[1]).is_none());
        assert!(history.get(&ids[4]).is_some());
    }

    #[test]
    fn test_iteration_is_newest_first() {
        let mut history = CalculationHistory::new(10);
        let (input, result) = sample(dec!(20_000_000));
        for _ in 0..3 {
            history.record(input.clone(), CalculationMode::GrossToNet, result.clone());
        }

        let ids: Vec<&str> = history.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["calc-000003", "calc-000002", "calc-000001"]);
    }

    #[test]
    fn test_clear() {
        let mut history = CalculationHistory::new(10);
        let (input, result) = sample(dec!(20_000_000));
        history.record(input, CalculationMode::NetToGross, result);

        history.clear();
        assert!(history.is_empty());
    }
}
