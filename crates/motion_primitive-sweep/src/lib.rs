//! Primitive Sweep - Motion Primitive Enumerator
//!
//! Runs the motion primitive builder over every combination of discretized
//! start velocities, end velocities and displacements, and reports the
//! primitives that were accepted.

pub mod config;
pub mod grid;
pub mod report;
pub mod sweep;

pub use config::SweepConfig;
pub use grid::{Candidate, SweepGrid};
pub use report::{ReportFormat, SweepReport};
pub use sweep::{SweepResult, SweepSummary, run_sweep, run_sweep_parallel};

/// Main error type using thiserror for error handling
#[derive(thiserror::Error, Debug)]
pub enum SweepError {
    #[error("Invalid sweep grid: {0}")]
    InvalidGrid(String),

    #[error("Failed to read sweep config from {}: {source}", .path.display())]
    ConfigRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported config file {}; expected .json, .yaml or .yml", .path.display())]
    UnsupportedConfigFormat { path: std::path::PathBuf },

    #[error("Sweep worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Primitive(#[from] motion_primitive::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Main result type using thiserror for error handling
pub type Result<T> = std::result::Result<T, SweepError>;
