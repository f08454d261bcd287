use crate::error::{finite, FinanceError, FinanceResult};

/// Effective annual rate for a nominal rate compounded `npery` times a year.
pub fn effect(nominal_rate: f64, npery: i32) -> FinanceResult<f64> {
    if npery <= 0 {
        return Err(FinanceError::NonPositivePeriods);
    }
    let n = f64::from(npery);
    finite((1.0 + nominal_rate / n).powf(n) - 1.0)
}

/// Nominal annual rate producing `effect_rate` when compounded `npery` times a year.
pub fn nominal(effect_rate: f64, npery: i32) -> FinanceResult<f64> {
    if npery <= 0 {
        return Err(FinanceError::NonPositivePeriods);
    }
    let n = f64::from(npery);
    finite(((effect_rate + 1.0).powf(1.0 / n) - 1.0) * n)
}
