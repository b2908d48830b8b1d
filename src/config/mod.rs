use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::geometry::{PlausibilityWindow, ProjectionParameters};
use crate::parse::GRID_SCALE_THRESHOLD;

/// Everything the coordinate pipeline needs, passed in explicitly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub projection: ProjectionParameters,
    pub window: PlausibilityWindow,
    /// Magnitude above which a field counts as a grid coordinate
    pub grid_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionParameters::FIJI_MAP_GRID_1986,
            window: PlausibilityWindow::default(),
            grid_threshold: GRID_SCALE_THRESHOLD,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn default_grid_threshold() -> f64 {
    GRID_SCALE_THRESHOLD
}
fn default_verbose() -> bool {
    false
}
fn default_pretty() -> bool {
    false
}

/// On-disk settings (`parcelgrid.toml`)
///
/// ```toml
/// verbose = true
/// grid_threshold = 100000.0
///
/// [window]
/// min_latitude = -25.0
/// max_latitude = -12.0
/// ```
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub projection: Option<ProjectionParameters>,
    #[serde(default)]
    pub window: Option<PlausibilityWindow>,
    #[serde(default = "default_grid_threshold")]
    pub grid_threshold: f64,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            projection: None,
            window: None,
            grid_threshold: default_grid_threshold(),
            pretty: default_pretty(),
            verbose: default_verbose(),
        }
    }
}

impl FileConfig {
    /// First parseable config from the standard search paths
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists() {
                match Self::from_path(&path) {
                    Ok(config) => return Some(config),
                    Err(e) => tracing::warn!("Skipping config file: {e}"),
                }
            }
        }
        None
    }

    /// Load an explicitly requested config file; missing or invalid is an error
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn pipeline(&self) -> PipelineConfig {
        let defaults = PipelineConfig::default();
        PipelineConfig {
            projection: self.projection.unwrap_or(defaults.projection),
            window: self.window.unwrap_or(defaults.window),
            grid_threshold: self.grid_threshold,
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("parcelgrid.toml"));
    paths.push(PathBuf::from(".parcelgrid.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("parcelgrid").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".parcelgrid.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.pipeline(), PipelineConfig::default());
        assert!(!config.verbose);
        assert!(!config.pretty);
    }

    #[test]
    fn test_default_matches_empty_file() {
        assert_eq!(FileConfig::default().pipeline(), PipelineConfig::default());
    }

    #[test]
    fn test_partial_window_override() {
        let config: FileConfig = toml::from_str(
            r#"
            verbose = true

            [window]
            min_latitude = -30.0
            "#,
        )
        .unwrap();

        let pipeline = config.pipeline();
        assert!(config.verbose);
        assert_eq!(pipeline.window.min_latitude, -30.0);
        assert_eq!(pipeline.window.max_latitude, -12.0);
        assert_eq!(pipeline.projection, ProjectionParameters::FIJI_MAP_GRID_1986);
    }

    #[test]
    fn test_projection_override() {
        let config: FileConfig = toml::from_str(
            r#"
            [projection]
            latitude_of_origin = 0.0
            central_meridian = 3.0
            scale_factor = 0.9996
            false_easting = 500000.0
            false_northing = 0.0

            [projection.ellipsoid]
            semi_major_axis = 6378137.0
            inverse_flattening = 298.257223563
            "#,
        )
        .unwrap();

        let projection = config.pipeline().projection;
        assert_eq!(projection.central_meridian, 3.0);
        assert_eq!(projection.to_wgs84, Default::default());
    }

    #[test]
    fn test_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("parcelgrid.toml");
        fs::write(&path, "grid_threshold = 50000.0\npretty = true\n").unwrap();

        let config = FileConfig::from_path(&path).unwrap();
        assert_eq!(config.pipeline().grid_threshold, 50000.0);
        assert!(config.pretty);
    }

    #[test]
    fn test_from_path_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            FileConfig::from_path(&missing),
            Err(ConfigError::NotFound(_))
        ));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "grid_threshold = \"lots\"").unwrap();
        assert!(matches!(
            FileConfig::from_path(&bad),
            Err(ConfigError::Parse { .. })
        ));
    }
}
