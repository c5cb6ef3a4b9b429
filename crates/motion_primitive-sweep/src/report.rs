//! Report generation module
//!
//! Renders the accepted primitives of a sweep as JSON, YAML or the plain
//! console layout.

use motion_primitive::MotionPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

use crate::config::SweepConfig;
use crate::sweep::{SweepResult, SweepSummary};
use crate::Result;

/// Report for a single sweep run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepReport {
    /// Number of joints
    pub dof: usize,
    /// Configuration the sweep ran with
    pub config: SweepConfig,
    /// Candidate counts
    pub summary: SweepSummary,
    /// Accepted primitives in sweep order
    pub primitives: Vec<MotionPrimitive>,
}

impl SweepReport {
    /// Create a report from a finished sweep
    pub fn new(config: SweepConfig, result: SweepResult) -> Self {
        Self {
            dof: config.grid.dof(),
            config,
            summary: result.summary,
            primitives: result.store.into_vec(),
        }
    }

    /// Export to JSON format
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Export to YAML format
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Export as one console block per primitive
    pub fn to_text(&self) -> String {
        render_primitives(&self.primitives)
    }

    /// Render in the given format
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => self.to_json(),
            ReportFormat::Yaml => self.to_yaml(),
            ReportFormat::Text => Ok(self.to_text()),
        }
    }

    /// Save to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P, format: ReportFormat) -> Result<()> {
        let path = path.as_ref();
        let content = self.render(format)?;

        std::fs::write(path, content)?;

        Ok(())
    }
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Console text, one block per primitive
    Text,
}

impl ReportFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Yaml => "yaml",
            ReportFormat::Text => "txt",
        }
    }

    /// Parse format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "yaml" | "yml" => Some(ReportFormat::Yaml),
            "text" | "txt" => Some(ReportFormat::Text),
            _ => None,
        }
    }
}

/// Console layout for a list of primitives, each block followed by a blank
/// line
pub fn render_primitives(primitives: &[MotionPrimitive]) -> String {
    let mut output = String::new();
    for primitive in primitives {
        // Writing to a String cannot fail
        let _ = writeln!(output, "{}", primitive);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SweepGrid;
    use crate::sweep::run_sweep;
    use motion_primitive::NoopObserver;
    use tempfile::TempDir;
    use test_log::test;

    fn small_report() -> Result<SweepReport> {
        let config = SweepConfig {
            grid: SweepGrid {
                velocity_levels: vec![0.0],
                displacement_levels: vec![0.0, 1.0],
                velocity_limit: vec![2.5],
            },
            ..SweepConfig::default()
        };
        let result = run_sweep(&config.grid, &config.primitive, &mut NoopObserver)?;
        Ok(SweepReport::new(config, result))
    }

    #[test]
    fn test_report_contents() -> Result<()> {
        let report = small_report()?;

        assert_eq!(report.dof, 1);
        assert_eq!(report.summary.candidates, 2);
        assert_eq!(report.summary.accepted, 1);
        assert_eq!(report.primitives.len(), 1);

        Ok(())
    }

    #[test]
    fn test_text_layout() -> Result<()> {
        let text = small_report()?.to_text();

        assert!(text.starts_with("Motion Primitive:\nDuration:    0.60"));
        assert!(text.contains("Displacement: [   1.000]"));
        assert!(text.contains("Start/End velocities: [   0.000]  [   0.000]"));
        assert!(text.contains("Velocity command:\n     0.000"));
        assert!(text.ends_with("\n\n"));

        Ok(())
    }

    #[test]
    fn test_json_round_trip() -> Result<()> {
        let report = small_report()?;
        let json = report.to_json()?;

        assert!(json.contains("\"summary\""));
        assert!(json.contains("\"duration\""));

        let parsed: SweepReport = serde_json::from_str(&json)?;
        assert_eq!(parsed.summary, report.summary);
        assert_eq!(parsed.primitives.len(), 1);

        Ok(())
    }

    #[test]
    fn test_save_yaml() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("report.yaml");

        small_report()?.save_to_file(&path, ReportFormat::Yaml)?;

        let content = std::fs::read_to_string(&path)?;
        assert!(content.contains("dof: 1"));
        assert!(content.contains("accepted: 1"));

        Ok(())
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(ReportFormat::from_extension("JSON"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::from_extension("yml"), Some(ReportFormat::Yaml));
        assert_eq!(ReportFormat::from_extension("text"), Some(ReportFormat::Text));
        assert_eq!(ReportFormat::from_extension("xml"), None);
        assert_eq!(ReportFormat::Text.extension(), "txt");
    }
}
