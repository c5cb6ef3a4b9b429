//! Discretized candidate grid
//!
//! A joint state is one level per joint. The grid enumerates every start
//! state, every end state and every displacement state, with the first joint
//! varying slowest.

use serde::{Deserialize, Serialize};

use crate::{Result, SweepError};

/// Levels to combine and the per-joint velocity limits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SweepGrid {
    /// Velocity levels each joint may take at either boundary
    pub velocity_levels: Vec<f64>,
    /// Displacement levels each joint may take
    pub displacement_levels: Vec<f64>,
    /// Velocity limit of each joint; its length sets the number of joints
    pub velocity_limit: Vec<f64>,
}

impl Default for SweepGrid {
    /// Two joints, levels {-1, 0, 1}, limit 2.5
    fn default() -> Self {
        Self {
            velocity_levels: vec![-1.0, 0.0, 1.0],
            displacement_levels: vec![-1.0, 0.0, 1.0],
            velocity_limit: vec![2.5, 2.5],
        }
    }
}

/// One input tuple of the sweep
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub start_velocity: Vec<f64>,
    pub end_velocity: Vec<f64>,
    pub displacement: Vec<f64>,
}

impl SweepGrid {
    /// Number of joints
    pub fn dof(&self) -> usize {
        self.velocity_limit.len()
    }

    /// Check the grid describes at least one candidate
    pub fn validate(&self) -> Result<()> {
        if self.velocity_limit.is_empty() {
            return Err(SweepError::InvalidGrid(
                "at least one joint velocity limit is required".to_string(),
            ));
        }
        if self.velocity_levels.is_empty() {
            return Err(SweepError::InvalidGrid(
                "velocity levels cannot be empty".to_string(),
            ));
        }
        if self.displacement_levels.is_empty() {
            return Err(SweepError::InvalidGrid(
                "displacement levels cannot be empty".to_string(),
            ));
        }
        for (joint, limit) in self.velocity_limit.iter().enumerate() {
            if let Some(level) = self.velocity_levels.iter().find(|v| v.abs() > *limit) {
                return Err(SweepError::InvalidGrid(format!(
                    "velocity level {} exceeds the limit {} of joint {}",
                    level, limit, joint
                )));
            }
        }
        Ok(())
    }

    /// Every combination of velocity levels across joints
    pub fn velocity_states(&self) -> Vec<Vec<f64>> {
        joint_states(&self.velocity_levels, self.dof())
    }

    /// Every combination of displacement levels across joints
    pub fn displacement_states(&self) -> Vec<Vec<f64>> {
        joint_states(&self.displacement_levels, self.dof())
    }

    /// Total number of candidates
    pub fn candidate_count(&self) -> usize {
        let velocities = self.velocity_levels.len().pow(self.dof() as u32);
        let displacements = self.displacement_levels.len().pow(self.dof() as u32);
        velocities * velocities * displacements
    }

    /// Candidates sharing the start states `starts`, in sweep order
    pub fn candidates_from(&self, starts: &[Vec<f64>]) -> Vec<Candidate> {
        let ends = self.velocity_states();
        let displacements = self.displacement_states();

        let mut candidates = Vec::with_capacity(starts.len() * ends.len() * displacements.len());
        for start in starts {
            for end in &ends {
                for displacement in &displacements {
                    candidates.push(Candidate {
                        start_velocity: start.clone(),
                        end_velocity: end.clone(),
                        displacement: displacement.clone(),
                    });
                }
            }
        }
        candidates
    }

    /// All candidates in sweep order
    pub fn candidates(&self) -> Vec<Candidate> {
        self.candidates_from(&self.velocity_states())
    }
}

/// Cartesian power of `levels`, first joint most significant
fn joint_states(levels: &[f64], dof: usize) -> Vec<Vec<f64>> {
    let mut states: Vec<Vec<f64>> = vec![Vec::with_capacity(dof)];
    for _ in 0..dof {
        states = states
            .into_iter()
            .flat_map(|prefix| {
                levels.iter().map(move |&level| {
                    let mut state = prefix.clone();
                    state.push(level);
                    state
                })
            })
            .collect();
    }
    states
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_counts() {
        let grid = SweepGrid::default();
        assert_eq!(grid.dof(), 2);
        assert_eq!(grid.velocity_states().len(), 9);
        assert_eq!(grid.candidate_count(), 729);
        assert_eq!(grid.candidates().len(), 729);
    }

    #[test]
    fn test_first_joint_varies_slowest() {
        let states = joint_states(&[-1.0, 0.0, 1.0], 2);
        assert_eq!(states[0], vec![-1.0, -1.0]);
        assert_eq!(states[1], vec![-1.0, 0.0]);
        assert_eq!(states[3], vec![0.0, -1.0]);
        assert_eq!(states[8], vec![1.0, 1.0]);
    }

    #[test]
    fn test_candidate_order() {
        let grid = SweepGrid::default();
        let candidates = grid.candidates();

        // Displacement varies fastest, then end velocity, then start velocity
        assert_eq!(candidates[0].displacement, vec![-1.0, -1.0]);
        assert_eq!(candidates[1].displacement, vec![-1.0, 0.0]);
        assert_eq!(candidates[9].end_velocity, vec![-1.0, 0.0]);
        assert_eq!(candidates[81].start_velocity, vec![-1.0, 0.0]);
    }

    #[test]
    fn test_single_joint_grid() {
        let grid = SweepGrid {
            velocity_levels: vec![0.0, 1.0],
            displacement_levels: vec![0.5],
            velocity_limit: vec![1.0],
        };
        assert_eq!(grid.candidate_count(), 4);
        assert_eq!(grid.candidates().len(), 4);
    }

    #[test]
    fn test_invalid_grids() {
        let grid = SweepGrid {
            velocity_limit: vec![],
            ..SweepGrid::default()
        };
        assert!(matches!(grid.validate(), Err(SweepError::InvalidGrid(_))));

        let grid = SweepGrid {
            displacement_levels: vec![],
            ..SweepGrid::default()
        };
        assert!(grid.validate().is_err());

        let grid = SweepGrid {
            velocity_levels: vec![-3.0, 0.0, 3.0],
            ..SweepGrid::default()
        };
        assert!(grid.validate().is_err());
    }
}
