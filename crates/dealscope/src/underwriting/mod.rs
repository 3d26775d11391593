mod calculator;
mod domain;
mod router;

pub use calculator::{monthly_payment, underwrite};
pub use domain::{ManagementFee, RiskLevel, UnderwritingInput, UnderwritingOutput};
pub use router::underwrite_router;

/// Inputs that leave the underwriting formulas undefined. Missing optional
/// cost fields are not errors; they default to zero.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnderwritingError {
    #[error("purchase_price must be positive, got {value}")]
    NonPositivePurchasePrice { value: f64 },
    #[error("loan_term_years must be positive")]
    NonPositiveLoanTerm,
    #[error("{field} must be a percentage between 0 and 100, got {value}")]
    PercentageOutOfRange { field: &'static str, value: f64 },
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },
}
