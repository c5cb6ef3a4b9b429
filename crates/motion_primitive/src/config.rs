//! Tuning parameters for primitive generation

use crate::{Error, Result};

/// Bisection search window and stopping rules for the root finder
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchWindow {
    /// Shortest duration considered
    pub lower: f64,

    /// Longest duration considered
    pub upper: f64,

    /// Bracket width at which the search stops
    pub tolerance: f64,

    /// Hard cap on bisection steps
    pub max_iterations: usize,
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self {
            lower: 0.1,
            upper: 10.0,
            tolerance: 1e-3,
            max_iterations: 50,
        }
    }
}

impl SearchWindow {
    /// Check that the window is a usable bracket
    pub fn validate(&self) -> Result<()> {
        if !(self.lower.is_finite() && self.upper.is_finite()) {
            return Err(Error::InvalidConfiguration {
                message: "search window bounds must be finite".to_string(),
            });
        }
        if self.lower <= 0.0 || self.lower >= self.upper {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "search window must satisfy 0 < lower < upper, got [{}, {}]",
                    self.lower, self.upper
                ),
            });
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(Error::InvalidConfiguration {
                message: format!("search tolerance must be positive, got {}", self.tolerance),
            });
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfiguration {
                message: "search needs at least one iteration".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration for [`PrimitiveBuilder`](crate::PrimitiveBuilder)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrimitiveConfig {
    /// Displacements smaller than this in magnitude count as zero
    pub zero_displacement_tolerance: f64,

    /// Primitives shorter than this are declined
    pub min_duration: f64,

    /// Root finder parameters
    pub search: SearchWindow,
}

impl Default for PrimitiveConfig {
    fn default() -> Self {
        Self {
            zero_displacement_tolerance: 1e-3,
            min_duration: 0.1,
            search: SearchWindow::default(),
        }
    }
}

impl PrimitiveConfig {
    /// Validate all parameters
    pub fn validate(&self) -> Result<()> {
        if self.zero_displacement_tolerance.is_nan() || self.zero_displacement_tolerance < 0.0 {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "zero displacement tolerance must be non-negative, got {}",
                    self.zero_displacement_tolerance
                ),
            });
        }
        if self.min_duration.is_nan() || self.min_duration <= 0.0 {
            return Err(Error::InvalidConfiguration {
                message: format!("minimum duration must be positive, got {}", self.min_duration),
            });
        }
        self.search.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PrimitiveConfig::default();
        assert_eq!(config.zero_displacement_tolerance, 1e-3);
        assert_eq!(config.min_duration, 0.1);
        assert_eq!(config.search.lower, 0.1);
        assert_eq!(config.search.upper, 10.0);
        assert_eq!(config.search.tolerance, 1e-3);
        assert_eq!(config.search.max_iterations, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let config = PrimitiveConfig {
            search: SearchWindow {
                lower: 5.0,
                upper: 1.0,
                ..SearchWindow::default()
            },
            ..PrimitiveConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let window = SearchWindow {
            max_iterations: 0,
            ..SearchWindow::default()
        };
        assert!(window.validate().is_err());
    }

    #[test]
    fn test_nan_min_duration_rejected() {
        let config = PrimitiveConfig {
            min_duration: f64::NAN,
            ..PrimitiveConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
