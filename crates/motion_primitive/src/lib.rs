//! # Motion Primitive Library
//!
//! Generates short, velocity-bounded motion segments ("motion primitives")
//! for multi-joint robot arms. Each primitive connects a pair of boundary
//! joint velocities over a displacement with a cubic position law per
//! degree of freedom, using the shortest duration that keeps every joint
//! inside its velocity limit.
//!
//! ## Features
//!
//! - Bisection search for the minimum feasible duration of a single joint
//! - Multi-joint synchronisation to the slowest joint
//! - Closed-form quadratic velocity profiles `v(t) = p0 + p1·t + p2·t²`
//! - A capacity-bounded store for accepted primitives
//! - Velocity command schedules for actuator or simulator drivers
//!
//! ## Example
//!
//! ```rust
//! use motion_primitive::generate_primitive;
//!
//! let primitive = generate_primitive(&[1.0, 1.0], &[0.0, 0.0], &[0.0, 0.0], &[2.5, 2.5])
//!     .unwrap()
//!     .expect("rest-to-rest move is feasible");
//! assert!(primitive.duration() > 0.1);
//! ```

pub mod actuation;
pub mod builder;
pub mod config;
pub mod observer;
pub mod primitive;
pub mod profile;
pub mod request;
pub mod root_finder;
pub mod store;

pub use actuation::{CommandSchedule, JointVelocityCommander, dispatch};
pub use builder::{DeclineReason, Outcome, PrimitiveBuilder, generate_primitive};
pub use config::{PrimitiveConfig, SearchWindow};
pub use observer::{NoopObserver, PrimitiveObserver, TracingObserver};
pub use primitive::{BoundaryVelocity, MotionPrimitive};
pub use profile::VelocityProfile;
pub use request::PrimitiveRequest;
pub use root_finder::{Bisection, BracketLost, bisection_search, peak_velocity_excess};
pub use store::PrimitiveStore;

pub use nalgebra::{DVector, Vector3};

/// Common result type for this library
pub type Result<T> = std::result::Result<T, Error>;

/// Which end of a segment a boundary velocity belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Boundary {
    Start,
    End,
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Boundary::Start => write!(f, "start"),
            Boundary::End => write!(f, "end"),
        }
    }
}

/// Error types for motion primitive operations
///
/// These are precondition and usage errors. An infeasible request is not an
/// error; it is reported as [`Outcome::Declined`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A request must describe at least one degree of freedom
    #[error("Request has no degrees of freedom")]
    EmptyRequest,

    /// Per-joint inputs disagree on the number of degrees of freedom
    #[error("Expected {expected} {field} values, got {actual}")]
    DofMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// NaN or infinite input value
    #[error("Non-finite {field} for joint {dof}")]
    NonFiniteValue { field: &'static str, dof: usize },

    /// Velocity limits must be strictly positive
    #[error("Velocity limit for joint {dof} must be positive, got {limit}")]
    InvalidVelocityLimit { dof: usize, limit: f64 },

    /// Boundary velocity outside the joint's velocity limit
    #[error("Joint {dof} {boundary} velocity {velocity} exceeds limit {limit}")]
    VelocityLimitExceeded {
        dof: usize,
        boundary: Boundary,
        velocity: f64,
        limit: f64,
    },

    /// The store was sized too small for the run
    #[error("Primitive store is full (capacity {capacity})")]
    StoreFull { capacity: usize },

    /// Invalid tuning parameters
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}
