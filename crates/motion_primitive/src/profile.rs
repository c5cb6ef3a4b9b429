use nalgebra::Vector3;

/// Quadratic velocity law of one joint over a primitive
///
/// Velocity is `p0 + p1·t + p2·t²` with `t` measured from the start of the
/// segment, which makes position a cubic in `t`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VelocityProfile {
    coefficients: Vector3<f64>,
}

impl VelocityProfile {
    /// Create a profile from raw coefficients `(p0, p1, p2)`
    pub fn new(p0: f64, p1: f64, p2: f64) -> Self {
        Self {
            coefficients: Vector3::new(p0, p1, p2),
        }
    }

    /// Fit the cubic that covers `displacement` in `duration` while matching
    /// both boundary velocities
    ///
    /// # Example
    /// ```rust
    /// use motion_primitive::VelocityProfile;
    ///
    /// let profile = VelocityProfile::fit(1.0, 0.0, 0.0, 2.0);
    /// assert!((profile.position_at(2.0) - 1.0).abs() < 1e-12);
    /// assert!(profile.velocity_at(2.0).abs() < 1e-12);
    /// ```
    pub fn fit(displacement: f64, start_velocity: f64, end_velocity: f64, duration: f64) -> Self {
        let t = duration;
        let p0 = start_velocity;
        let p1 = 2.0 * (3.0 * displacement / (t * t) - (2.0 * start_velocity + end_velocity) / t);
        let p2 = 3.0 * (-2.0 * displacement / (t * t * t) + (start_velocity + end_velocity) / (t * t));
        Self::new(p0, p1, p2)
    }

    /// Get the coefficients as `(p0, p1, p2)`
    pub fn coefficients(&self) -> &Vector3<f64> {
        &self.coefficients
    }

    pub fn p0(&self) -> f64 {
        self.coefficients.x
    }

    pub fn p1(&self) -> f64 {
        self.coefficients.y
    }

    pub fn p2(&self) -> f64 {
        self.coefficients.z
    }

    /// Velocity at time `t`
    pub fn velocity_at(&self, t: f64) -> f64 {
        self.coefficients.dot(&Vector3::new(1.0, t, t * t))
    }

    /// Acceleration at time `t`
    pub fn acceleration_at(&self, t: f64) -> f64 {
        self.p1() + 2.0 * self.p2() * t
    }

    /// Position at time `t`, relative to the position at `t = 0`
    pub fn position_at(&self, t: f64) -> f64 {
        self.coefficients
            .dot(&Vector3::new(t, t * t / 2.0, t * t * t / 3.0))
    }

    /// Time at which the velocity law is stationary, if it is curved
    pub fn stationary_time(&self) -> Option<f64> {
        if self.p2() == 0.0 {
            None
        } else {
            Some(-self.p1() / (2.0 * self.p2()))
        }
    }

    /// Largest speed reached on `[0, duration]`
    pub fn peak_speed(&self, duration: f64) -> f64 {
        let mut peak = self
            .velocity_at(0.0)
            .abs()
            .max(self.velocity_at(duration).abs());
        if let Some(t) = self.stationary_time() {
            if t > 0.0 && t < duration {
                peak = peak.max(self.velocity_at(t).abs());
            }
        }
        peak
    }
}

impl std::fmt::Display for VelocityProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:8.3}  {:8.3}  {:8.3}",
            self.p0(),
            self.p1(),
            self.p2()
        )
    }
}
