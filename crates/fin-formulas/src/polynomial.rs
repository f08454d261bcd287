use crate::iterative::bisect;

/// Evaluates `Σ coeffs[i] * x^i` with Horner's rule.
pub(crate) fn evaluate(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

fn derivative(coeffs: &[f64]) -> Vec<f64> {
    coeffs
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, c)| i as f64 * c)
        .collect()
}

/// Strictly positive real roots of `Σ coeffs[i] * x^i`, ascending.
///
/// Zero coefficients at either end are dropped first: high-order zeros lower the degree, and
/// low-order zeros only contribute roots at `x = 0`. Roots are isolated between consecutive
/// critical points (found recursively on the derivative) and closed by bisection. A root of even
/// multiplicity that touches zero without crossing it is reported only when the polynomial
/// evaluates to exactly zero there.
pub(crate) fn positive_roots(coeffs: &[f64]) -> Vec<f64> {
    let Some(first) = coeffs.iter().position(|c| *c != 0.0) else {
        return Vec::new();
    };
    let Some(last) = coeffs.iter().rposition(|c| *c != 0.0) else {
        return Vec::new();
    };
    let coeffs = &coeffs[first..=last];
    let Some((&leading, rest)) = coeffs.split_last() else {
        return Vec::new();
    };

    // Cauchy bound: every root satisfies |x| <= 1 + max |c_i / c_n|.
    let bound = 1.0 + rest.iter().fold(0.0_f64, |m, c| m.max((c / leading).abs()));
    if !bound.is_finite() {
        return Vec::new();
    }

    roots_in(coeffs, 0.0, bound)
}

/// Real roots in `(lo, hi]`. The leading coefficient must be non-zero.
fn roots_in(coeffs: &[f64], lo: f64, hi: f64) -> Vec<f64> {
    match coeffs.len() {
        0 | 1 => return Vec::new(),
        2 => {
            let x = -coeffs[0] / coeffs[1];
            return if x > lo && x <= hi { vec![x] } else { Vec::new() };
        }
        _ => {}
    }

    let mut knots = vec![lo];
    knots.extend(roots_in(&derivative(coeffs), lo, hi));
    knots.push(hi);

    let mut roots: Vec<f64> = Vec::new();
    for pair in knots.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (fa, fb) = (evaluate(coeffs, a), evaluate(coeffs, b));
        if fb == 0.0 {
            if b > lo {
                roots.push(b);
            }
        } else if fa != 0.0 && (fa < 0.0) != (fb < 0.0) {
            roots.push(bisect(a, b, |x| evaluate(coeffs, x)));
        }
    }
    roots.dedup();
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roots(actual: Vec<f64>, expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "roots: {actual:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() <= 1e-12, "expected {e}, got {a}");
        }
    }

    #[test]
    fn horner_evaluation() {
        // 1 + 2x + 3x^2 at x = 2
        assert_eq!(evaluate(&[1.0, 2.0, 3.0], 2.0), 17.0);
        assert_eq!(evaluate(&[], 2.0), 0.0);
    }

    #[test]
    fn finds_both_roots_of_a_quadratic() {
        // (x - 1)(x - 3) = 3 - 4x + x^2
        assert_roots(positive_roots(&[3.0, -4.0, 1.0]), &[1.0, 3.0]);
    }

    #[test]
    fn skips_negative_and_zero_roots() {
        // x (x + 2)(x - 5) = -10x - 3x^2 + x^3
        assert_roots(positive_roots(&[0.0, -10.0, -3.0, 1.0]), &[5.0]);
    }

    #[test]
    fn trailing_zero_coefficients_lower_the_degree() {
        assert_roots(positive_roots(&[-2.0, 1.0, 0.0, 0.0]), &[2.0]);
    }

    #[test]
    fn exact_double_root_is_reported_once() {
        // (x - 1)^2 = 1 - 2x + x^2
        assert_roots(positive_roots(&[1.0, -2.0, 1.0]), &[1.0]);
    }

    #[test]
    fn no_roots_without_a_sign_change() {
        assert!(positive_roots(&[1.0, 2.0, 3.0]).is_empty());
        assert!(positive_roots(&[0.0, 0.0]).is_empty());
        assert!(positive_roots(&[5.0]).is_empty());
    }

    #[test]
    fn cubic_with_three_positive_roots() {
        // (x - 1)(x - 2)(x - 4) = -8 + 14x - 7x^2 + x^3
        assert_roots(positive_roots(&[-8.0, 14.0, -7.0, 1.0]), &[1.0, 2.0, 4.0]);
    }
}
