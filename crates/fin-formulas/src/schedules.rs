use crate::error::{finite, FinanceResult};

/// Compounds `principal` through each rate of `schedule`, left to right.
///
/// An empty schedule leaves the principal unchanged.
pub fn fvschedule(principal: f64, schedule: &[f64]) -> FinanceResult<f64> {
    finite(schedule.iter().fold(principal, |acc, r| acc + acc * r))
}
