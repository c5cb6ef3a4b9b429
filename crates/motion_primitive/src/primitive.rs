use nalgebra::DVector;

use crate::profile::VelocityProfile;

/// Velocities of one joint at both ends of a primitive
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryVelocity {
    pub start: f64,
    pub end: f64,
}

impl BoundaryVelocity {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// A synchronised motion segment covering every joint of the arm
///
/// Primitives are only created by the [`PrimitiveBuilder`](crate::PrimitiveBuilder)
/// and cannot be modified afterwards. All joints share one duration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionPrimitive {
    /// Net change of each joint over the segment
    displacement: DVector<f64>,

    /// Start and end velocity of each joint
    boundary_velocity: Vec<BoundaryVelocity>,

    /// Segment duration shared by all joints
    duration: f64,

    /// Velocity law of each joint
    profiles: Vec<VelocityProfile>,
}

impl MotionPrimitive {
    /// Fit every joint's profile over a common `duration`
    pub(crate) fn fit(
        displacement: DVector<f64>,
        boundary_velocity: Vec<BoundaryVelocity>,
        duration: f64,
    ) -> Self {
        let profiles = displacement
            .iter()
            .zip(&boundary_velocity)
            .map(|(&ds, bv)| VelocityProfile::fit(ds, bv.start, bv.end, duration))
            .collect();

        Self {
            displacement,
            boundary_velocity,
            duration,
            profiles,
        }
    }

    /// Number of joints covered
    pub fn dof(&self) -> usize {
        self.displacement.len()
    }

    /// Get the per-joint displacement
    pub fn displacement(&self) -> &DVector<f64> {
        &self.displacement
    }

    /// Get the per-joint boundary velocities
    pub fn boundary_velocity(&self) -> &[BoundaryVelocity] {
        &self.boundary_velocity
    }

    /// Get the segment duration
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Get the per-joint velocity profiles
    pub fn profiles(&self) -> &[VelocityProfile] {
        &self.profiles
    }

    /// Joint velocities at time `t`, clamped to `[0, duration]`
    ///
    /// # Example
    /// ```rust
    /// use motion_primitive::generate_primitive;
    ///
    /// let primitive = generate_primitive(&[1.0], &[0.0], &[0.5], &[2.5])
    ///     .unwrap()
    ///     .unwrap();
    /// let end = primitive.velocity_at(primitive.duration() + 1.0);
    /// assert!((end[0] - 0.5).abs() < 1e-9);
    /// ```
    pub fn velocity_at(&self, t: f64) -> DVector<f64> {
        let t = self.clamp_time(t);
        DVector::from_iterator(self.dof(), self.profiles.iter().map(|p| p.velocity_at(t)))
    }

    /// Joint positions relative to the segment start at time `t`, clamped
    /// to `[0, duration]`
    pub fn position_at(&self, t: f64) -> DVector<f64> {
        let t = self.clamp_time(t);
        DVector::from_iterator(self.dof(), self.profiles.iter().map(|p| p.position_at(t)))
    }

    /// Largest speed each joint reaches over the segment
    pub fn peak_speeds(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.dof(),
            self.profiles.iter().map(|p| p.peak_speed(self.duration)),
        )
    }

    fn clamp_time(&self, t: f64) -> f64 {
        t.clamp(0.0, self.duration)
    }
}

impl std::fmt::Display for MotionPrimitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row = |values: &mut dyn Iterator<Item = f64>| {
            values
                .map(|v| format!("{:8.3}", v))
                .collect::<Vec<_>>()
                .join("  ")
        };

        writeln!(f, "Motion Primitive:")?;
        writeln!(f, "Duration: {:8.3}", self.duration)?;
        writeln!(
            f,
            "Displacement: [{}]",
            row(&mut self.displacement.iter().copied())
        )?;
        writeln!(
            f,
            "Start/End velocities: [{}]  [{}]",
            row(&mut self.boundary_velocity.iter().map(|bv| bv.start)),
            row(&mut self.boundary_velocity.iter().map(|bv| bv.end))
        )?;
        writeln!(f, "Velocity command:")?;
        for profile in &self.profiles {
            writeln!(f, "  {}", profile)?;
        }
        Ok(())
    }
}
