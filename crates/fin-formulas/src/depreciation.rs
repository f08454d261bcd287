use crate::error::{finite, FinanceError, FinanceResult};

/// Straight-line depreciation for one period.
pub fn sln(cost: f64, salvage: f64, life: f64) -> FinanceResult<f64> {
    if life == 0.0 {
        return Err(FinanceError::DivisionByZero);
    }
    finite((cost - salvage) / life)
}
