pub mod comparison;
pub mod error;
pub mod history;
pub mod insurance;
pub mod rules;
pub mod salary;
pub mod tax;
pub mod types;

pub use error::PayrollError;
pub use types::*;

/// Standard result type for all payroll operations
pub type PayrollResult<T> = Result<T, PayrollError>;
