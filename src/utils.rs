//! Utility functions and types used accross the library
use crate::{EPSILON, Scalar};

/// Solve quadratic equation `a * t ^ 2 + b * t + c = 0` for `t`
pub(crate) fn quadratic_solve(a: Scalar, b: Scalar, c: Scalar) -> impl Iterator<Item = Scalar> {
    let mut result = [None; 2];
    if a.abs() < EPSILON {
        if b.abs() > EPSILON {
            result[0] = Some(-c / b);
        }
        return result.into_iter().flatten();
    }
    let disc = b * b - 4.0 * a * c;
    if disc.abs() < EPSILON {
        result[0] = Some(-b / (2.0 * a));
    } else if disc > 0.0 {
        let sq = disc.sqrt();
        // More stable solution than generic formula:
        // https://people.csail.mit.edu/bkph/articles/Quadratics.pdf
        if b >= 0.0 {
            let mul = -b - sq;
            result = [Some(mul / (2.0 * a)), Some(2.0 * c / mul)];
        } else {
            let mul = -b + sq;
            result = [Some(2.0 * c / mul), Some(mul / (2.0 * a))];
        }
    }
    result.into_iter().flatten()
}
