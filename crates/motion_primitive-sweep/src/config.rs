//! Sweep configuration files
//!
//! A config file holds the grid to enumerate and the builder parameters.
//! Both sections are optional and fall back to their defaults.

use motion_primitive::PrimitiveConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::grid::SweepGrid;
use crate::{Result, SweepError};

/// Everything a sweep run needs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SweepConfig {
    /// Candidate grid
    pub grid: SweepGrid,
    /// Builder parameters
    pub primitive: PrimitiveConfig,
}

impl SweepConfig {
    /// Load a config from a `.json`, `.yaml` or `.yml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| SweepError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();

        let config: SweepConfig = match extension.as_str() {
            "json" => serde_json::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => {
                return Err(SweepError::UnsupportedConfigFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the grid and the builder parameters
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.primitive.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_log::test;

    #[test]
    fn test_load_yaml() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("sweep.yaml");
        std::fs::write(
            &path,
            r#"
grid:
  velocity_levels: [0.0, 1.0]
  displacement_levels: [0.5, 1.0]
  velocity_limit: [2.0, 2.0, 2.0]
primitive:
  min_duration: 0.2
  search:
    upper: 20.0
"#,
        )?;

        let config = SweepConfig::load_from_file(&path)?;

        assert_eq!(config.grid.dof(), 3);
        assert_eq!(config.primitive.min_duration, 0.2);
        assert_eq!(config.primitive.search.upper, 20.0);
        // Unset fields keep their defaults
        assert_eq!(config.primitive.search.lower, 0.1);
        assert_eq!(config.primitive.zero_displacement_tolerance, 1e-3);

        Ok(())
    }

    #[test]
    fn test_load_json_with_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("sweep.json");
        std::fs::write(&path, "{}")?;

        let config = SweepConfig::load_from_file(&path)?;
        assert_eq!(config, SweepConfig::default());

        Ok(())
    }

    #[test]
    fn test_unsupported_extension() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("sweep.toml");
        std::fs::write(&path, "")?;

        let result = SweepConfig::load_from_file(&path);
        assert!(matches!(
            result,
            Err(SweepError::UnsupportedConfigFormat { .. })
        ));

        Ok(())
    }

    #[test]
    fn test_invalid_primitive_config_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("sweep.yml");
        std::fs::write(&path, "primitive:\n  min_duration: -1.0\n")?;

        let result = SweepConfig::load_from_file(&path);
        assert!(matches!(result, Err(SweepError::Primitive(_))));

        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = SweepConfig::load_from_file("/nonexistent/sweep.yaml");
        assert!(matches!(result, Err(SweepError::ConfigRead { .. })));
    }
}
