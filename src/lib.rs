pub mod display;
pub mod error;
pub mod input;
pub mod loan;

pub use error::LoanError;
pub use loan::{compute_amortization, AmortizationPoint, AmortizationResult, LoanInputs};
