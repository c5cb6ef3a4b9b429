//! Minimum duration search for a single joint
//!
//! For a joint moving `ds` between boundary velocities `v0` and `v1`, the
//! cubic fit over duration `t` has a quadratic velocity law whose stationary
//! value is `v0 - a²/(3b)` with
//!
//! ```text
//! a = 3·ds - (2·v0 + v1)·t
//! b = -2·ds·t + (v0 + v1)·t²
//! ```
//!
//! `t` enters both linearly and quadratically, so the duration at which that
//! value reaches the limit has no closed form and is found by bisection.

use crate::config::SearchWindow;
use crate::observer::PrimitiveObserver;

/// Signed excess of the stationary velocity magnitude over `velocity_limit`
///
/// Negative when a cubic fit over `duration` stays inside the limit at its
/// stationary point, positive when it overshoots.
///
/// # Example
/// ```rust
/// use motion_primitive::peak_velocity_excess;
///
/// // Rest-to-rest over one unit peaks at 1.5 / t
/// let excess = peak_velocity_excess(1.0, 0.0, 0.0, 2.5, 0.6);
/// assert!(excess.abs() < 1e-12);
/// ```
pub fn peak_velocity_excess(
    displacement: f64,
    start_velocity: f64,
    end_velocity: f64,
    velocity_limit: f64,
    duration: f64,
) -> f64 {
    let t = duration;
    let a = 3.0 * displacement - (2.0 * start_velocity + end_velocity) * t;
    let b = -2.0 * displacement * t + (start_velocity + end_velocity) * t * t;
    let stationary = start_velocity - (a * a) / (3.0 * b);
    stationary.abs() - velocity_limit
}

/// Result of a bisection search
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bisection {
    /// Upper end of the final bracket
    pub duration: f64,

    /// Number of bisection steps taken
    pub iterations: usize,

    /// `false` when the iteration cap stopped the search before the bracket
    /// shrank below the tolerance
    pub converged: bool,
}

/// The search window does not bracket a sign change
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[error("no feasible duration in window (excess {lower_excess} at lower bound, {upper_excess} at upper bound)")]
pub struct BracketLost {
    pub lower_excess: f64,
    pub upper_excess: f64,
}

/// Find the shortest duration at which the joint stays inside its limit
///
/// The bracket is checked on every step; if the endpoints ever share a sign
/// the search fails with [`BracketLost`]. The window is never widened.
///
/// Running out of iterations is not a failure: the current upper end of the
/// bracket is returned with `converged == false`, trading accuracy for an
/// answer. On the upper side of the root the excess is non-positive, so that
/// duration still respects the limit when the excess decreases with time.
pub fn bisection_search<O: PrimitiveObserver + ?Sized>(
    displacement: f64,
    start_velocity: f64,
    end_velocity: f64,
    velocity_limit: f64,
    window: &SearchWindow,
    observer: &mut O,
) -> Result<Bisection, BracketLost> {
    let g = |t: f64| {
        peak_velocity_excess(displacement, start_velocity, end_velocity, velocity_limit, t)
    };

    let mut lower = window.lower;
    let mut upper = window.upper;

    for iteration in 0..window.max_iterations {
        let mid = 0.5 * (lower + upper);
        observer.on_bisection_step(iteration, lower, mid, upper);

        let y_lower = g(lower);
        let y_mid = g(mid);
        let y_upper = g(upper);

        if y_lower * y_upper > 0.0 || y_lower.is_nan() || y_upper.is_nan() {
            observer.on_bracket_lost(y_lower, y_upper);
            return Err(BracketLost {
                lower_excess: y_lower,
                upper_excess: y_upper,
            });
        }

        if y_lower * y_mid >= 0.0 {
            lower = mid;
        }
        if y_mid * y_upper >= 0.0 {
            upper = mid;
        }

        if (upper - lower).abs() < window.tolerance {
            observer.on_converged(upper, iteration + 1);
            return Ok(Bisection {
                duration: upper,
                iterations: iteration + 1,
                converged: true,
            });
        }
    }

    observer.on_iteration_limit(upper, upper - lower);
    Ok(Bisection {
        duration: upper,
        iterations: window.max_iterations,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;

    fn search(ds: f64, v0: f64, v1: f64, vmax: f64) -> Result<Bisection, BracketLost> {
        bisection_search(ds, v0, v1, vmax, &SearchWindow::default(), &mut NoopObserver)
    }

    #[test]
    fn test_excess_rest_to_rest() {
        // Stationary velocity is 1.5·ds/t for a rest-to-rest cubic
        let excess = peak_velocity_excess(2.0, 0.0, 0.0, 1.0, 1.0);
        assert!((excess - 2.0).abs() < 1e-12);

        let excess = peak_velocity_excess(-2.0, 0.0, 0.0, 1.0, 1.0);
        assert!((excess - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rest_to_rest_root() {
        let result = search(1.0, 0.0, 0.0, 2.5).unwrap();

        assert!(result.converged);
        assert!(result.duration >= 0.6);
        assert!(result.duration - 0.6 < 1e-3);
        assert!(result.duration >= 0.1 && result.duration <= 10.0);

        // The returned end sits on the feasible side of the root
        assert!(peak_velocity_excess(1.0, 0.0, 0.0, 2.5, result.duration) <= 0.0);
    }

    #[test]
    fn test_moving_boundaries_root() {
        // ds = 1, v0 = v1 = 1 gives a stationary value of 1.5/t - 0.5
        let result = search(1.0, 1.0, 1.0, 2.5).unwrap();
        assert!((result.duration - 0.5).abs() < 1e-3);

        let excess = peak_velocity_excess(1.0, 1.0, 1.0, 2.5, result.duration);
        // Slope of the excess near the root is -1.5/t² = -6
        assert!(excess.abs() < 6.0 * 1e-3);
    }

    #[test]
    fn test_long_move_inside_window() {
        // Stationary velocity 15/t reaches 2.5 at t = 6
        let result = search(10.0, 0.0, 0.0, 2.5).unwrap();
        assert!((result.duration - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_root_beyond_window_is_bracket_lost() {
        // Root at t = 60, outside [0.1, 10]
        let error = search(100.0, 0.0, 0.0, 2.5).unwrap_err();
        assert!(error.lower_excess > 0.0);
        assert!(error.upper_excess > 0.0);
    }

    #[test]
    fn test_root_below_window_is_bracket_lost() {
        // Root at t = 0.006, below the window
        let error = search(0.01, 0.0, 0.0, 2.5).unwrap_err();
        assert!(error.lower_excess < 0.0);
        assert!(error.upper_excess < 0.0);
    }

    #[test]
    fn test_iteration_cap_returns_best_effort() {
        let window = SearchWindow {
            max_iterations: 3,
            ..SearchWindow::default()
        };
        let result = bisection_search(1.0, 0.0, 0.0, 2.5, &window, &mut NoopObserver).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
        // Bracket after three halvings of [0.1, 10] still contains the root
        assert!(result.duration >= 0.6);
        assert!(result.duration <= 10.0);
    }

    #[test]
    fn test_search_is_deterministic() {
        let first = search(0.7, -1.0, 1.0, 2.5);
        let second = search(0.7, -1.0, 1.0, 2.5);
        assert_eq!(first, second);
    }
}
