//! Hooks into the numeric routines
//!
//! The root finder and the builder report their progress through a
//! [`PrimitiveObserver`] instead of printing. Every method has an empty
//! default body, so an observer only implements the events it cares about.

use tracing::{debug, trace};

use crate::builder::DeclineReason;
use crate::primitive::MotionPrimitive;

/// Receives progress events from the root finder and the builder
pub trait PrimitiveObserver {
    /// One bisection step, with the bracket before narrowing
    fn on_bisection_step(&mut self, _iteration: usize, _lower: f64, _mid: f64, _upper: f64) {}

    /// The search window does not bracket a root
    fn on_bracket_lost(&mut self, _lower_excess: f64, _upper_excess: f64) {}

    /// The bracket narrowed below the tolerance
    fn on_converged(&mut self, _duration: f64, _iterations: usize) {}

    /// The iteration cap was hit; `duration` is the best-effort upper bracket
    fn on_iteration_limit(&mut self, _duration: f64, _bracket_width: f64) {}

    /// Joint `dof` has no displacement to cover
    fn on_zero_displacement(&mut self, _dof: usize) {}

    /// Joint `dof` needs at least `duration` to stay inside its limit
    fn on_joint_duration(&mut self, _dof: usize, _duration: f64) {}

    /// The candidate was declined
    fn on_declined(&mut self, _reason: &DeclineReason) {}

    /// The candidate was accepted
    fn on_accepted(&mut self, _primitive: &MotionPrimitive) {}
}

/// Observer that ignores every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl PrimitiveObserver for NoopObserver {}

/// Observer that forwards events to `tracing`
///
/// Bisection steps are emitted at `TRACE`, everything else at `DEBUG`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl PrimitiveObserver for TracingObserver {
    fn on_bisection_step(&mut self, iteration: usize, lower: f64, mid: f64, upper: f64) {
        trace!(iteration, lower, mid, upper, "bisection step");
    }

    fn on_bracket_lost(&mut self, lower_excess: f64, upper_excess: f64) {
        debug!(
            lower_excess,
            upper_excess, "solution bracket lost, no feasible duration in window"
        );
    }

    fn on_converged(&mut self, duration: f64, iterations: usize) {
        debug!(duration, iterations, "bisection converged");
    }

    fn on_iteration_limit(&mut self, duration: f64, bracket_width: f64) {
        debug!(
            duration,
            bracket_width, "iteration limit reached before convergence"
        );
    }

    fn on_zero_displacement(&mut self, dof: usize) {
        debug!(dof, "displacement required for joint is zero");
    }

    fn on_joint_duration(&mut self, dof: usize, duration: f64) {
        trace!(dof, duration, "joint duration");
    }

    fn on_declined(&mut self, reason: &DeclineReason) {
        debug!(%reason, "primitive declined");
    }

    fn on_accepted(&mut self, primitive: &MotionPrimitive) {
        debug!(
            duration = primitive.duration(),
            dof = primitive.dof(),
            "primitive accepted"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrimitiveBuilder, PrimitiveConfig, PrimitiveRequest};
    use test_log::test;

    #[derive(Default)]
    struct Recorder {
        steps: usize,
        converged: usize,
        zero: Vec<usize>,
        accepted: usize,
        declined: usize,
    }

    impl PrimitiveObserver for Recorder {
        fn on_bisection_step(&mut self, _: usize, _: f64, _: f64, _: f64) {
            self.steps += 1;
        }

        fn on_converged(&mut self, _: f64, _: usize) {
            self.converged += 1;
        }

        fn on_zero_displacement(&mut self, dof: usize) {
            self.zero.push(dof);
        }

        fn on_declined(&mut self, _: &DeclineReason) {
            self.declined += 1;
        }

        fn on_accepted(&mut self, _: &MotionPrimitive) {
            self.accepted += 1;
        }
    }

    #[test]
    fn test_recorder_sees_events() {
        let builder = PrimitiveBuilder::new(PrimitiveConfig::default());
        let request =
            PrimitiveRequest::new(&[0.0, 1.0], &[0.0, 0.0], &[0.0, 0.0], &[2.5, 2.5]).unwrap();

        let mut recorder = Recorder::default();
        let outcome = builder.build_observed(&request, &mut recorder);

        assert!(outcome.is_accepted());
        assert_eq!(recorder.zero, vec![0]);
        assert_eq!(recorder.converged, 1);
        assert!(recorder.steps > 0);
        assert_eq!(recorder.accepted, 1);
        assert_eq!(recorder.declined, 0);
    }

    #[test]
    fn test_tracing_observer_does_not_change_result() {
        let builder = PrimitiveBuilder::new(PrimitiveConfig::default());
        let request =
            PrimitiveRequest::new(&[1.0, -1.0], &[1.0, 0.0], &[0.0, -1.0], &[2.5, 2.5]).unwrap();

        let quiet = builder.build(&request);
        let traced = builder.build_observed(&request, &mut TracingObserver);
        assert_eq!(quiet, traced);
    }
}
