use chrono::NaiveDate;

use crate::error::{finite, FinanceError, FinanceResult};
use crate::iterative::{newton_raphson, secant};
use crate::polynomial::positive_roots;

const MAX_POLISH_STEPS: usize = 8;
/// Largest relative move a Newton polish may make before it is discarded.
const POLISH_WINDOW: f64 = 1.0e-9;
const MAX_ITER_XIRR: usize = 50;
const DAYS_PER_YEAR: f64 = 365.0;

pub const DEFAULT_XIRR_GUESS: f64 = 0.1;

/// Net present value of equally spaced cash flows.
///
/// `values[0]` is taken at period 0 and left undiscounted; `values[i]` is discounted by
/// `(1 + rate)^i`.
pub fn npv(rate: f64, values: &[f64]) -> FinanceResult<f64> {
    finite(discount_periodic(rate, values))
}

fn discount_periodic(rate: f64, values: &[f64]) -> f64 {
    let growth = 1.0 + rate;
    values
        .iter()
        .enumerate()
        .fold(0.0, |acc, (i, v)| acc + v / growth.powf(i as f64))
}

fn discount_periodic_derivative(rate: f64, values: &[f64]) -> f64 {
    let growth = 1.0 + rate;
    values
        .iter()
        .enumerate()
        .skip(1)
        .fold(0.0, |acc, (i, v)| acc - (i as f64) * v / growth.powf(i as f64 + 1.0))
}

fn has_sign_change(values: &[f64]) -> bool {
    values.iter().any(|v| *v > 0.0) && values.iter().any(|v| *v < 0.0)
}

/// Internal rate of return of equally spaced cash flows.
///
/// NPV is a polynomial in `x = 1 / (1 + r)`. Every positive real root of it is a candidate rate;
/// the candidate closest to zero wins. Each candidate is polished with a short Newton run on the
/// periodic NPV, kept only if it stays next to the bracketed root.
pub fn irr(values: &[f64]) -> FinanceResult<f64> {
    if !has_sign_change(values) {
        return Err(FinanceError::NoSolution);
    }

    positive_roots(values)
        .into_iter()
        .map(|x| polish_irr(1.0 / x - 1.0, values))
        .filter(|r| r.is_finite())
        .min_by(|a, b| a.abs().total_cmp(&b.abs()))
        .ok_or(FinanceError::NoSolution)
}

fn polish_irr(rate: f64, values: &[f64]) -> f64 {
    let f = |r: f64| {
        if r <= -1.0 {
            return None;
        }
        let v = discount_periodic(r, values);
        v.is_finite().then_some(v)
    };
    let df = |r: f64| {
        if r <= -1.0 {
            return None;
        }
        let d = discount_periodic_derivative(r, values);
        d.is_finite().then_some(d)
    };

    match newton_raphson(rate, MAX_POLISH_STEPS, f, df) {
        Some(polished) if (polished - rate).abs() <= POLISH_WINDOW * rate.abs().max(1.0) => polished,
        _ => rate,
    }
}

/// Modified internal rate of return.
///
/// Negative flows are financed at `finance_rate`; positive flows are reinvested at
/// `reinvest_rate`.
pub fn mirr(values: &[f64], finance_rate: f64, reinvest_rate: f64) -> FinanceResult<f64> {
    let n = values.len();
    if n < 2 {
        return Err(FinanceError::NoSolution);
    }

    let positives: Vec<f64> = values.iter().map(|&v| if v > 0.0 { v } else { 0.0 }).collect();
    let negatives: Vec<f64> = values.iter().map(|&v| if v < 0.0 { v } else { 0.0 }).collect();

    let numer = npv(reinvest_rate, &positives)?.abs();
    let denom = npv(finance_rate, &negatives)?.abs();
    if denom == 0.0 {
        return Err(FinanceError::DivisionByZero);
    }

    finite((numer / denom).powf(1.0 / (n - 1) as f64) * (1.0 + reinvest_rate) - 1.0)
}

/// Converts dates into year fractions measured from `dates[0]`.
fn year_fractions(values: &[f64], dates: &[NaiveDate]) -> FinanceResult<Vec<f64>> {
    if values.len() != dates.len() {
        return Err(FinanceError::ShapeMismatch);
    }
    // Equal neighbours are allowed; only a strictly earlier successor is out of order.
    if dates.windows(2).any(|w| w[1] < w[0]) {
        return Err(FinanceError::UnorderedDates);
    }

    let Some(&origin) = dates.first() else {
        return Ok(Vec::new());
    };
    Ok(dates
        .iter()
        .map(|d| (*d - origin).num_days() as f64 / DAYS_PER_YEAR)
        .collect())
}

fn discount_dated(rate: f64, values: &[f64], years: &[f64]) -> f64 {
    let growth = 1.0 + rate;
    values
        .iter()
        .zip(years)
        .fold(0.0, |acc, (v, t)| acc + v / growth.powf(*t))
}

/// Net present value of cash flows on arbitrary dates, discounted on an actual/365 basis.
pub fn xnpv(rate: f64, values: &[f64], dates: &[NaiveDate]) -> FinanceResult<f64> {
    let years = year_fractions(values, dates)?;
    finite(discount_dated(rate, values, &years))
}

/// Internal rate of return of cash flows on arbitrary dates.
///
/// Solves `xnpv(r) == 0` with a secant search seeded at `guess`.
pub fn xirr(values: &[f64], dates: &[NaiveDate], guess: Option<f64>) -> FinanceResult<f64> {
    let years = year_fractions(values, dates)?;
    let guess = guess.unwrap_or(DEFAULT_XIRR_GUESS);

    let f = |r: f64| {
        let v = discount_dated(r, values, &years);
        v.is_finite().then_some(v)
    };

    secant(guess, MAX_ITER_XIRR, f).ok_or(FinanceError::NoConvergence {
        iterations: MAX_ITER_XIRR,
    })
}
