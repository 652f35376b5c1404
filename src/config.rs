// src/config.rs - Runtime configuration for diagnosis runs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{AgroLeafError, Result};

/// Configuration for AgroLeaf
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub input_path: String,
    pub output_base_dir: String,

    /// Canonical raster size the feature extractor works on
    #[serde(default = "default_analysis_dimensions")]
    pub analysis_dimensions: [u32; 2],

    /// External model predictions below this confidence (percent) fall back to the heuristic
    #[serde(default = "default_min_external_confidence")]
    pub min_external_confidence: f64,

    #[serde(default = "default_parallel")]
    pub use_parallel: bool,

    /// Lowercase file extensions picked up when scanning a directory
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    #[serde(default = "default_write_json_reports")]
    pub write_json_reports: bool,
}

fn default_analysis_dimensions() -> [u32; 2] {
    [224, 224]
}

fn default_min_external_confidence() -> f64 {
    50.0
}

fn default_parallel() -> bool {
    true
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()]
}

fn default_write_json_reports() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: "./input".to_string(),
            output_base_dir: "./output".to_string(),
            analysis_dimensions: default_analysis_dimensions(),
            min_external_confidence: default_min_external_confidence(),
            use_parallel: default_parallel(),
            allowed_extensions: default_allowed_extensions(),
            write_json_reports: default_write_json_reports(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AgroLeafError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            AgroLeafError::ConfigLoad { source, .. } => AgroLeafError::ConfigLoad {
                source,
                path: path.to_path_buf(),
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| AgroLeafError::ConfigLoad {
            source,
            path: PathBuf::from("<inline>"),
        })
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            Self::from_file(path)
        } else {
            log::warn!("Config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values that do not depend on the filesystem
    pub fn validate(&self) -> Result<()> {
        if self.analysis_dimensions[0] == 0 || self.analysis_dimensions[1] == 0 {
            return Err(AgroLeafError::Config(
                "analysis_dimensions must both be > 0".to_string(),
            ));
        }

        if !(0.0..=100.0).contains(&self.min_external_confidence) {
            return Err(AgroLeafError::Config(
                "min_external_confidence must be between 0.0 and 100.0".to_string(),
            ));
        }

        if self.allowed_extensions.is_empty() {
            return Err(AgroLeafError::Config(
                "allowed_extensions must list at least one extension".to_string(),
            ));
        }

        if self.allowed_extensions.iter().any(|ext| ext.is_empty() || ext.starts_with('.')) {
            return Err(AgroLeafError::Config(
                "allowed_extensions entries must be bare extensions such as \"png\"".to_string(),
            ));
        }

        // Paths are lowercased before matching, so uppercase entries never match
        if self.allowed_extensions.iter().any(|ext| ext.chars().any(|c| c.is_ascii_uppercase())) {
            return Err(AgroLeafError::Config(
                "allowed_extensions entries must be lowercase".to_string(),
            ));
        }

        Ok(())
    }

    /// Check the input path exists and create the output directory
    pub fn prepare_paths(&self) -> Result<()> {
        let input_path = PathBuf::from(&self.input_path);
        if !input_path.exists() {
            return Err(AgroLeafError::InvalidPath(input_path));
        }

        let base_dir = PathBuf::from(&self.output_base_dir);
        fs::create_dir_all(&base_dir)?;
        if self.write_json_reports {
            fs::create_dir_all(base_dir.join("reports"))?;
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            AgroLeafError::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_fills_defaults() {
        let config = Config::from_toml_str(
            "input_path = \"leaves\"\noutput_base_dir = \"out\"\n",
        )
        .unwrap();

        assert_eq!(config.input_path, "leaves");
        assert_eq!(config.analysis_dimensions, [224, 224]);
        assert_eq!(config.min_external_confidence, 50.0);
        assert!(config.use_parallel);
        assert_eq!(config.allowed_extensions, vec!["png", "jpg", "jpeg"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_toml_is_a_load_error() {
        let err = Config::from_toml_str("input_path = [").unwrap_err();
        assert!(matches!(err, AgroLeafError::ConfigLoad { .. }));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = Config::default();
        config.analysis_dimensions = [0, 224];
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.min_external_confidence = 120.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.allowed_extensions = vec![".png".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_uppercase_extensions() {
        let mut config = Config::default();
        config.allowed_extensions = vec!["png".to_string(), "JPG".to_string()];
        assert!(matches!(config.validate(), Err(AgroLeafError::Config(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("/no/such/agro_leaf_config.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_then_load_from_file() {
        let path = std::env::temp_dir().join(format!("agro_leaf_config_{}.toml", std::process::id()));
        let config = Config {
            input_path: "fields".to_string(),
            min_external_confidence: 65.0,
            use_parallel: false,
            ..Config::default()
        };

        config.save_to_file(&path).unwrap();
        let loaded = Config::load_or_default(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn default_survives_toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }
}
