pub(crate) const NEWTON_TOLERANCE: f64 = 1.0e-7;
pub(crate) const SECANT_TOLERANCE: f64 = 1.48e-8;

/// Relative (and absolute, for a zero seed) offset of the secant method's second seed.
const SECANT_SEED_STEP: f64 = 1.0e-4;

pub(crate) fn newton_raphson<F, DF>(guess: f64, max_iterations: usize, f: F, df: DF) -> Option<f64>
where
    F: Fn(f64) -> Option<f64>,
    DF: Fn(f64) -> Option<f64>,
{
    let mut x = guess;
    for _ in 0..max_iterations {
        let fx = f(x)?;
        let dfx = df(x)?;
        if dfx == 0.0 {
            return None;
        }

        let next = x - fx / dfx;
        if !next.is_finite() {
            return None;
        }

        if (next - x).abs() <= NEWTON_TOLERANCE {
            return Some(next);
        }
        x = next;
    }

    None
}

/// Derivative-free secant iteration.
///
/// The second seed sits just beside `guess`; iteration stops once two successive estimates are
/// within [`SECANT_TOLERANCE`] of each other.
pub(crate) fn secant<F>(guess: f64, max_iterations: usize, f: F) -> Option<f64>
where
    F: Fn(f64) -> Option<f64>,
{
    let mut p0 = guess;
    let mut p1 = guess * (1.0 + SECANT_SEED_STEP);
    p1 += if p1 >= 0.0 {
        SECANT_SEED_STEP
    } else {
        -SECANT_SEED_STEP
    };

    let mut q0 = f(p0)?;
    let mut q1 = f(p1)?;
    if q1.abs() < q0.abs() {
        std::mem::swap(&mut p0, &mut p1);
        std::mem::swap(&mut q0, &mut q1);
    }

    for _ in 0..max_iterations {
        if q1 == q0 {
            // A flat secant only counts as converged when both estimates coincide.
            return (p1 == p0).then_some(p1);
        }

        let next = if q1.abs() > q0.abs() {
            (-q0 / q1 * p1 + p0) / (1.0 - q0 / q1)
        } else {
            (-q1 / q0 * p0 + p1) / (1.0 - q1 / q0)
        };
        if !next.is_finite() {
            return None;
        }

        if (next - p1).abs() <= SECANT_TOLERANCE {
            return Some(next);
        }

        p0 = p1;
        q0 = q1;
        p1 = next;
        q1 = f(p1)?;
    }

    None
}

/// Upper bound on halvings; the bracket collapses to adjacent floats well before this.
const MAX_BISECTIONS: usize = 2_000;

/// Bisection on a bracket `[lo, hi]` where `f(lo)` and `f(hi)` differ in sign.
///
/// Runs until the midpoint is no longer distinct from an endpoint, so the result is as tight as
/// `f64` allows.
pub(crate) fn bisect<F>(mut lo: f64, mut hi: f64, f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    let lo_negative = f(lo) < 0.0;
    for _ in 0..MAX_BISECTIONS {
        let mid = lo + (hi - lo) / 2.0;
        if mid <= lo || mid >= hi {
            break;
        }
        let f_mid = f(mid);
        if f_mid == 0.0 {
            return mid;
        }
        if (f_mid < 0.0) == lo_negative {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo + (hi - lo) / 2.0
}
