use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// All monetary values, in whole VND. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Vietnamese minimum-wage zone classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    I,
    II,
    III,
    IV,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::I, Region::II, Region::III, Region::IV];

    /// Zero-based index into per-region rule tables.
    pub fn index(self) -> usize {
        match self {
            Region::I => 0,
            Region::II => 1,
            Region::III => 2,
            Region::IV => 3,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Region::I => "I",
            Region::II => "II",
            Region::III => "III",
            Region::IV => "IV",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "I" | "1" => Ok(Region::I),
            "II" | "2" => Ok(Region::II),
            "III" | "3" => Ok(Region::III),
            "IV" | "4" => Ok(Region::IV),
            other => Err(format!("Unknown region '{}' (expected I, II, III or IV)", other)),
        }
    }
}

/// Which direction the engine was asked to solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    GrossToNet,
    NetToGross,
}

/// A single salary calculation request. `amount` is gross or net depending
/// on which entry point consumes the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryInput {
    pub amount: Money,
    pub region: Region,
    #[serde(default)]
    pub dependents: u32,
    pub year: i32,
    /// Additional tax-exempt income (allowances, etc.) on top of the
    /// statutory personal and dependent deductions.
    #[serde(default)]
    pub exemptions: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
