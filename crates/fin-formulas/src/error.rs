use thiserror::Error;

/// Failure conditions raised by the financial routines.
///
/// The `Display` text of each variant is stable: the dispatcher forwards it verbatim as the
/// envelope error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FinanceError {
    #[error("values and dates must be the same length")]
    ShapeMismatch,
    #[error("dates must be in chronological order")]
    UnorderedDates,
    #[error("failed to converge after {iterations} iterations")]
    NoConvergence { iterations: usize },
    #[error("no solution exists for the given arguments")]
    NoSolution,
    #[error("division by zero")]
    DivisionByZero,
    #[error("periods per year must be positive")]
    NonPositivePeriods,
    #[error("period must be between 1 and the number of periods")]
    PeriodOutOfRange,
    #[error("result is not a finite number")]
    NonFinite,
}

pub type FinanceResult<T> = Result<T, FinanceError>;

/// Rejects NaN and infinities produced by otherwise well-defined arithmetic.
pub(crate) fn finite(value: f64) -> FinanceResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FinanceError::NonFinite)
    }
}
