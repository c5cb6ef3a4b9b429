//! Primitive construction
//!
//! Each joint contributes the shortest duration that keeps it inside its
//! velocity limit. The slowest joint sets the shared duration, and every
//! joint's cubic is then fitted over that duration. Infeasible candidates are
//! declined as a whole; nothing partial is ever returned.

use crate::config::PrimitiveConfig;
use crate::observer::{NoopObserver, PrimitiveObserver};
use crate::primitive::MotionPrimitive;
use crate::request::PrimitiveRequest;
use crate::root_finder::bisection_search;
use crate::Result;

/// Why a candidate produced no primitive
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "reason", rename_all = "snake_case"))]
pub enum DeclineReason {
    /// The search window does not bracket a feasible duration for joint `dof`
    BracketLost { dof: usize },

    /// Joint `dof` has no displacement but different boundary velocities,
    /// which would need an unbounded acceleration
    InfiniteAcceleration { dof: usize },

    /// The synchronised duration is below the configured minimum
    DurationTooShort { duration: f64 },
}

impl std::fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclineReason::BracketLost { dof } => {
                write!(f, "no feasible duration in search window for joint {}", dof)
            }
            DeclineReason::InfiniteAcceleration { dof } => write!(
                f,
                "joint {} needs a velocity change without displacement (infinite acceleration)",
                dof
            ),
            DeclineReason::DurationTooShort { duration } => {
                write!(f, "duration {:.3} is below the minimum", duration)
            }
        }
    }
}

/// Result of building one candidate
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Accepted(MotionPrimitive),
    Declined(DeclineReason),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    /// Get the primitive, if accepted
    pub fn primitive(&self) -> Option<&MotionPrimitive> {
        match self {
            Outcome::Accepted(primitive) => Some(primitive),
            Outcome::Declined(_) => None,
        }
    }

    /// Convert into the primitive, discarding the decline reason
    pub fn accepted(self) -> Option<MotionPrimitive> {
        match self {
            Outcome::Accepted(primitive) => Some(primitive),
            Outcome::Declined(_) => None,
        }
    }

    /// Get the decline reason, if declined
    pub fn decline_reason(&self) -> Option<DeclineReason> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Declined(reason) => Some(*reason),
        }
    }
}

/// Builds synchronised motion primitives
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimitiveBuilder {
    config: PrimitiveConfig,
}

impl PrimitiveBuilder {
    /// Create a builder with the given configuration
    pub fn new(config: PrimitiveConfig) -> Self {
        Self { config }
    }

    /// Create a builder after validating the configuration
    pub fn try_new(config: PrimitiveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Get the configuration
    pub fn config(&self) -> &PrimitiveConfig {
        &self.config
    }

    /// Build a primitive for `request`
    pub fn build(&self, request: &PrimitiveRequest) -> Outcome {
        self.build_observed(request, &mut NoopObserver)
    }

    /// Build a primitive for `request`, reporting progress to `observer`
    pub fn build_observed<O: PrimitiveObserver + ?Sized>(
        &self,
        request: &PrimitiveRequest,
        observer: &mut O,
    ) -> Outcome {
        let outcome = match self.governing_duration(request, &mut *observer) {
            Ok(duration) if duration < self.config.min_duration => {
                Outcome::Declined(DeclineReason::DurationTooShort { duration })
            }
            Ok(duration) => Outcome::Accepted(MotionPrimitive::fit(
                request.displacement().clone(),
                request.boundary_velocity().to_vec(),
                duration,
            )),
            Err(reason) => Outcome::Declined(reason),
        };

        match &outcome {
            Outcome::Accepted(primitive) => observer.on_accepted(primitive),
            Outcome::Declined(reason) => observer.on_declined(reason),
        }
        outcome
    }

    /// Shortest duration that keeps every joint inside its limit
    fn governing_duration<O: PrimitiveObserver + ?Sized>(
        &self,
        request: &PrimitiveRequest,
        observer: &mut O,
    ) -> std::result::Result<f64, DeclineReason> {
        let mut duration: f64 = 0.0;

        for dof in 0..request.dof() {
            let displacement = request.displacement()[dof];
            let boundary = request.boundary_velocity()[dof];

            // TODO: model the velocity jump of a stationary joint instead of
            // rejecting it
            if displacement.abs() < self.config.zero_displacement_tolerance {
                observer.on_zero_displacement(dof);
                if boundary.start != boundary.end {
                    return Err(DeclineReason::InfiniteAcceleration { dof });
                }
                observer.on_joint_duration(dof, 0.0);
                continue;
            }

            let bisection = bisection_search(
                displacement,
                boundary.start,
                boundary.end,
                request.velocity_limit()[dof],
                &self.config.search,
                &mut *observer,
            )
            .map_err(|_| DeclineReason::BracketLost { dof })?;

            observer.on_joint_duration(dof, bisection.duration);
            duration = duration.max(bisection.duration);
        }

        Ok(duration)
    }
}

/// Build one primitive with the default configuration
///
/// Returns `Err` only when the inputs violate a precondition (length
/// mismatch, boundary velocity over its limit, ...). An infeasible but valid
/// request returns `Ok(None)`.
pub fn generate_primitive(
    displacement: &[f64],
    start_velocity: &[f64],
    end_velocity: &[f64],
    velocity_limit: &[f64],
) -> Result<Option<MotionPrimitive>> {
    let request =
        PrimitiveRequest::new(displacement, start_velocity, end_velocity, velocity_limit)?;
    Ok(PrimitiveBuilder::default().build(&request).accepted())
}
