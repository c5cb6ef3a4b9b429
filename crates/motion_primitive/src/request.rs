use nalgebra::DVector;

use crate::primitive::BoundaryVelocity;
use crate::{Boundary, Error, Result};

/// Validated input for one primitive
///
/// Construction checks every precondition of the builder, so a
/// `PrimitiveRequest` always has matching lengths, at least one joint,
/// finite values, positive limits and boundary velocities inside those
/// limits.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveRequest {
    displacement: DVector<f64>,
    boundary_velocity: Vec<BoundaryVelocity>,
    velocity_limit: DVector<f64>,
}

impl PrimitiveRequest {
    /// Create a request from per-joint slices
    ///
    /// # Example
    /// ```rust
    /// use motion_primitive::PrimitiveRequest;
    ///
    /// let request = PrimitiveRequest::new(&[1.0, 0.0], &[0.0, 1.0], &[0.0, 1.0], &[2.5, 2.5]);
    /// assert!(request.is_ok());
    ///
    /// let too_fast = PrimitiveRequest::new(&[1.0], &[3.0], &[0.0], &[2.5]);
    /// assert!(too_fast.is_err());
    /// ```
    pub fn new(
        displacement: &[f64],
        start_velocity: &[f64],
        end_velocity: &[f64],
        velocity_limit: &[f64],
    ) -> Result<Self> {
        let dof = displacement.len();
        if dof == 0 {
            return Err(Error::EmptyRequest);
        }

        for (field, values) in [
            ("start_velocity", start_velocity),
            ("end_velocity", end_velocity),
            ("velocity_limit", velocity_limit),
        ] {
            if values.len() != dof {
                return Err(Error::DofMismatch {
                    field,
                    expected: dof,
                    actual: values.len(),
                });
            }
        }

        for (field, values) in [
            ("displacement", displacement),
            ("start_velocity", start_velocity),
            ("end_velocity", end_velocity),
            ("velocity_limit", velocity_limit),
        ] {
            if let Some(joint) = values.iter().position(|v| !v.is_finite()) {
                return Err(Error::NonFiniteValue { field, dof: joint });
            }
        }

        for (joint, &limit) in velocity_limit.iter().enumerate() {
            if limit <= 0.0 {
                return Err(Error::InvalidVelocityLimit { dof: joint, limit });
            }
            for (boundary, velocity) in [
                (Boundary::Start, start_velocity[joint]),
                (Boundary::End, end_velocity[joint]),
            ] {
                if velocity.abs() > limit {
                    return Err(Error::VelocityLimitExceeded {
                        dof: joint,
                        boundary,
                        velocity,
                        limit,
                    });
                }
            }
        }

        Ok(Self {
            displacement: DVector::from_column_slice(displacement),
            boundary_velocity: start_velocity
                .iter()
                .zip(end_velocity)
                .map(|(&start, &end)| BoundaryVelocity::new(start, end))
                .collect(),
            velocity_limit: DVector::from_column_slice(velocity_limit),
        })
    }

    /// Number of joints in the request
    pub fn dof(&self) -> usize {
        self.displacement.len()
    }

    pub fn displacement(&self) -> &DVector<f64> {
        &self.displacement
    }

    pub fn boundary_velocity(&self) -> &[BoundaryVelocity] {
        &self.boundary_velocity
    }

    pub fn velocity_limit(&self) -> &DVector<f64> {
        &self.velocity_limit
    }
}
