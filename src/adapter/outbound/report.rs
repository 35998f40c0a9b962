//! JSON cycle report file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::CycleReport;
use crate::error::Result;

/// Writes each cycle report as pretty JSON, replacing the previous one.
#[derive(Debug, Clone)]
pub struct JsonReportFile {
    path: PathBuf,
}

impl JsonReportFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the report atomically: temp file in the same directory, then
    /// rename over the target. Readers never see a partial file.
    pub fn write(&self, report: &CycleReport) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(report)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;

        debug!(
            path = %self.path.display(),
            candidates = report.candidates.len(),
            "Report written"
        );
        Ok(())
    }
}
