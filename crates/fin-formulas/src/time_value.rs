use crate::error::{finite, FinanceError, FinanceResult};
use crate::iterative::newton_raphson;

const MAX_ITER_RATE: usize = 100;
pub const DEFAULT_RATE_GUESS: f64 = 0.1;

fn normalize_type(typ: f64) -> f64 {
    if typ != 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Returns `((1+rate)^nper, (1 + rate*typ) * ((1+rate)^nper - 1) / rate)`.
///
/// The second term is the annuity factor applied to the periodic payment. Callers handle
/// `rate == 0` themselves, where the factor degenerates to `nper`.
fn growth(rate: f64, nper: f64, typ: f64) -> (f64, f64) {
    let temp = (1.0 + rate).powf(nper);
    let fact = (1.0 + rate * typ) * (temp - 1.0) / rate;
    (temp, fact)
}

/// Future value: `-(pv*(1+r)^n + pmt*(1+r*type)*((1+r)^n - 1)/r)`.
pub fn fv(rate: f64, nper: f64, pmt: f64, pv: f64, typ: f64) -> FinanceResult<f64> {
    let typ = normalize_type(typ);

    if rate == 0.0 {
        return finite(-(pv + pmt * nper));
    }

    let (temp, fact) = growth(rate, nper, typ);
    finite(-(pv * temp + pmt * fact))
}

/// Present value.
pub fn pv(rate: f64, nper: f64, pmt: f64, fv: f64, typ: f64) -> FinanceResult<f64> {
    let typ = normalize_type(typ);

    if rate == 0.0 {
        return finite(-(fv + pmt * nper));
    }

    let (temp, fact) = growth(rate, nper, typ);
    if temp == 0.0 {
        return Err(FinanceError::DivisionByZero);
    }

    finite(-(fv + pmt * fact) / temp)
}

/// Periodic payment.
pub fn pmt(rate: f64, nper: f64, pv: f64, fv: f64, typ: f64) -> FinanceResult<f64> {
    let typ = normalize_type(typ);

    if rate == 0.0 {
        if nper == 0.0 {
            return Err(FinanceError::DivisionByZero);
        }
        return finite(-(fv + pv) / nper);
    }

    let (temp, fact) = growth(rate, nper, typ);
    if fact == 0.0 {
        return Err(FinanceError::DivisionByZero);
    }

    finite(-(fv + pv * temp) / fact)
}

/// Number of payment periods.
pub fn nper(rate: f64, pmt: f64, pv: f64, fv: f64, typ: f64) -> FinanceResult<f64> {
    let typ = normalize_type(typ);

    if rate == 0.0 {
        if pmt == 0.0 {
            return if pv + fv == 0.0 {
                Ok(0.0)
            } else {
                Err(FinanceError::NoSolution)
            };
        }
        return finite(-(pv + fv) / pmt);
    }

    let ln1p = rate.ln_1p();
    if !ln1p.is_finite() || ln1p == 0.0 {
        return Err(FinanceError::NoSolution);
    }

    let z = pmt * (1.0 + rate * typ) / rate;
    if pv + z == 0.0 {
        return Err(FinanceError::DivisionByZero);
    }

    let g = (z - fv) / (pv + z);
    if g <= 0.0 {
        return Err(FinanceError::NoSolution);
    }

    finite(g.ln() / ln1p)
}

/// Interest rate per period, solved with Newton-Raphson from `guess`.
pub fn rate(nper: f64, pmt: f64, pv: f64, fv: f64, typ: f64, guess: f64) -> FinanceResult<f64> {
    let typ = normalize_type(typ);

    if nper <= 0.0 || guess <= -1.0 {
        return Err(FinanceError::NoSolution);
    }

    let f = |r: f64| rate_equation(r, nper, pmt, pv, fv, typ);
    let df = |r: f64| rate_equation_derivative(r, nper, pmt, pv, typ);

    newton_raphson(guess, MAX_ITER_RATE, f, df).ok_or(FinanceError::NoConvergence {
        iterations: MAX_ITER_RATE,
    })
}

fn rate_equation(rate: f64, nper: f64, pmt: f64, pv: f64, fv: f64, typ: f64) -> Option<f64> {
    if rate <= -1.0 {
        return None;
    }

    if rate == 0.0 {
        return Some(pv + pmt * nper + fv);
    }

    let (temp, fact) = growth(rate, nper, typ);
    let value = pv * temp + pmt * fact + fv;
    value.is_finite().then_some(value)
}

fn rate_equation_derivative(rate: f64, nper: f64, pmt: f64, pv: f64, typ: f64) -> Option<f64> {
    if rate <= -1.0 {
        return None;
    }

    // The `(g - 1) / rate` term cancels catastrophically near zero; use the limit instead.
    if rate == 0.0 {
        let df = nper * pv + pmt * (nper * (nper - 1.0) / 2.0 + typ * nper);
        return (df.is_finite() && df != 0.0).then_some(df);
    }

    let temp = (1.0 + rate).powf(nper);
    let temp_minus_1 = temp - 1.0;

    // d/dr (1+r)^n = n*(1+r)^(n-1)
    let dtemp = nper * temp / (1.0 + rate);

    let annuity = temp_minus_1 / rate;
    // d/dr ((g - 1) / r) = (dg*r - (g - 1)) / r^2
    let dannuity = (dtemp * rate - temp_minus_1) / (rate * rate);
    let dfact = typ * annuity + (1.0 + rate * typ) * dannuity;

    let df = pv * dtemp + pmt * dfact;
    (df.is_finite() && df != 0.0).then_some(df)
}

/// Interest portion of the payment due in period `per` (1-based).
pub fn ipmt(rate: f64, per: f64, nper: f64, pv: f64, fv_value: f64, typ: f64) -> FinanceResult<f64> {
    let typ = normalize_type(typ);

    if per < 1.0 || per > nper {
        return Err(FinanceError::PeriodOutOfRange);
    }

    if rate == 0.0 {
        return Ok(0.0);
    }

    let payment = pmt(rate, nper, pv, fv_value, typ)?;

    // Annuity-due: nothing has accrued yet when the first payment is made.
    if typ == 1.0 && per == 1.0 {
        return Ok(0.0);
    }

    let balance = fv(rate, per - 1.0, payment, pv, typ)?;
    if typ == 1.0 {
        let denom = 1.0 + rate;
        if denom == 0.0 {
            return Err(FinanceError::DivisionByZero);
        }
        finite(balance * rate / denom)
    } else {
        finite(balance * rate)
    }
}

/// Principal portion of the payment due in period `per` (1-based).
pub fn ppmt(rate: f64, per: f64, nper: f64, pv: f64, fv_value: f64, typ: f64) -> FinanceResult<f64> {
    let payment = pmt(rate, nper, pv, fv_value, typ)?;
    let interest_payment = ipmt(rate, per, nper, pv, fv_value, typ)?;
    finite(payment - interest_payment)
}
