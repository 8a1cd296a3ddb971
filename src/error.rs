use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoanError {
    #[error("invalid input: {field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("payment ${payment:.2} does not cover monthly interest ${interest:.2}")]
    NonAmortizingLoan { payment: f64, interest: f64 },

    #[error("balance still outstanding after {months} months")]
    LoanNeverPaysOff { months: u32 },
}

impl LoanError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LoanError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
