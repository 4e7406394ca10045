//! Run settings
//!
//! Persisted as a JSON file. Missing fields fall back to their defaults, so a
//! settings file only needs to name what it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PuzzleResult;
use crate::puzzle::{GridTileMapping, PackerConfig, ResolverConfig, RowColumnConfig};

/// Everything a run needs besides the tiles themselves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for layout generation and packing
    pub seed: u64,

    // === Resolution ===
    pub resolver: ResolverConfig,

    // === Layout generators ===
    pub row_column: RowColumnConfig,
    pub packer: PackerConfig,
    pub mapping: GridTileMapping,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            resolver: ResolverConfig::default(),
            row_column: RowColumnConfig::default(),
            packer: PackerConfig::default(),
            mapping: GridTileMapping::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> PuzzleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> PuzzleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> PuzzleResult<Self> {
        let path = path.as_ref();
        let settings = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> PuzzleResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;
    use crate::puzzle::{DensityTerm, ExitTest, PassMode};

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(
            r#"{ "seed": 42, "resolver": { "pass_cap": 20, "exit_test": "Center" } }"#,
        )
        .unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.resolver.pass_cap, 20);
        assert_eq!(settings.resolver.exit_test, ExitTest::Center);
        assert_eq!(settings.resolver.pass_mode, PassMode::Sweep);
        assert_eq!(settings.row_column, RowColumnConfig::default());
        assert_eq!(settings.packer, PackerConfig::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.packer.density = DensityTerm::FreeNeighbours;
        settings.mapping.cell_gap = 2.0;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ seed: "),
            Err(PuzzleError::Json(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("tile-exit-settings-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.seed = 7;
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Settings::load("/nonexistent/tile-exit/settings.json");
        assert!(matches!(result, Err(PuzzleError::Io(_))));
    }
}
