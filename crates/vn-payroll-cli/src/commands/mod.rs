pub mod rules;
pub mod salary;
