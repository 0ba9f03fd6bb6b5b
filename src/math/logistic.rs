//! Numerically stable logistic function.
//!
//! `sigmoid(x) = 1 / (1 + exp(-x))`
//!
//! Numerical notes:
//! - For large negative `x`, `exp(-x)` overflows to `inf`. We never evaluate
//!   `exp` on a large positive argument: for `x < 0` we use the equivalent form
//!   `exp(x) / (1 + exp(x))`.
//! - Both branches agree at `x = 0`, giving exactly `0.5`.

/// Map a real-valued score to a probability in `(0, 1)`.
///
/// The result is monotonically increasing in `x`. It only reaches exactly
/// `0.0` or `1.0` when `|x|` is large enough to exhaust `f64` precision.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let ex = x.exp();
        ex / (1.0 + ex)
    }
}
