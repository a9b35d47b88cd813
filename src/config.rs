use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
/// Application settings, loaded from a JSON file next to the executable.
/// A missing file means defaults; a file that fails to parse is an error
/// rather than a silent fallback.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub port: String,
    pub baud_rate: u32,
    pub timeout_ms: u64,
    /// Channel count the glove settles on once calibrated (6x6 sensor grid).
    pub channels: usize,
    pub grid_cols: usize,
    pub default_calibration_samples: usize,
    /// Where interactive modes drop the latest rendered frame.
    pub snapshot_path: PathBuf,
    /// Gesture letter -> recorded training matrix for that hand shape.
    pub training_files: BTreeMap<String, PathBuf>,
}
impl Default for AppConfig {
    fn default() -> Self {
        let training_files = [("C", "Cdata.csv"), ("T", "Tdata.csv"), ("V", "Vdata.csv")]
            .into_iter()
            .map(|(letter, file)| (letter.to_string(), PathBuf::from(file)))
            .collect();
        Self {
            port: "COM3".to_string(),
            baud_rate: 9600,
            timeout_ms: 5000,
            channels: 36,
            grid_cols: 6,
            default_calibration_samples: 20,
            snapshot_path: PathBuf::from("glove_frame.png"),
            training_files,
        }
    }
}
impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("no config at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))
    }
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
