//! Velocity commands for joint actuators
//!
//! A primitive is consumed by sampling its velocity law on a fixed time step
//! and handing each sample to an actuator or simulator driver. Timing of the
//! hand-off is the driver's concern.

use nalgebra::DVector;

use crate::primitive::MotionPrimitive;
use crate::{Error, Result};

/// Something that accepts joint velocity targets, such as a simulator client
pub trait JointVelocityCommander {
    /// Set the target velocity of a single joint
    fn set_joint_velocity(&mut self, joint: usize, velocity: f64) -> Result<()>;

    /// Set the target velocity of every joint, in joint order
    fn set_joint_velocities(&mut self, velocities: &[f64]) -> Result<()> {
        for (joint, &velocity) in velocities.iter().enumerate() {
            self.set_joint_velocity(joint, velocity)?;
        }
        Ok(())
    }
}

/// Samples of a primitive's velocity law every `dt`
///
/// Yields `(t, velocities)` for `t = 0, dt, 2·dt, ...` and always ends with
/// a sample at exactly `t = duration`.
#[derive(Clone, Debug)]
pub struct CommandSchedule<'a> {
    primitive: &'a MotionPrimitive,
    dt: f64,
    step: usize,
    finished: bool,
}

impl<'a> CommandSchedule<'a> {
    /// Create a schedule with time step `dt`
    pub fn new(primitive: &'a MotionPrimitive, dt: f64) -> Result<Self> {
        if dt.is_nan() || dt <= 0.0 || dt.is_infinite() {
            return Err(Error::InvalidConfiguration {
                message: format!("command time step must be positive, got {}", dt),
            });
        }
        Ok(Self {
            primitive,
            dt,
            step: 0,
            finished: false,
        })
    }
}

impl Iterator for CommandSchedule<'_> {
    type Item = (f64, DVector<f64>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let duration = self.primitive.duration();
        let mut t = self.step as f64 * self.dt;
        // Snap to the end when within half a step of it
        if self.step > 0 && t >= duration - 0.5 * self.dt {
            t = duration;
            self.finished = true;
        }
        self.step += 1;

        Some((t, self.primitive.velocity_at(t)))
    }
}

/// Send every sample of `primitive` to `commander`
///
/// Returns the number of commands sent. The final command is the end
/// boundary velocity, which the commander keeps after this returns.
pub fn dispatch<C: JointVelocityCommander + ?Sized>(
    primitive: &MotionPrimitive,
    dt: f64,
    commander: &mut C,
) -> Result<usize> {
    let mut sent = 0;
    for (_, velocities) in CommandSchedule::new(primitive, dt)? {
        commander.set_joint_velocities(velocities.as_slice())?;
        sent += 1;
    }
    Ok(sent)
}
