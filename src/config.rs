//! Host-level configuration and environment capabilities.
//!
//! A `retouch.toml` carries the settings the host environment owns, as
//! opposed to the per-field settings a [`PipelineBuilder`](crate::pipeline::PipelineBuilder)
//! accumulates:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! driver = "gd"     # Default backend when a pipeline has no override
//!                   # (omit to let the codec choose); "gd" or "imagick"
//! quality = 100     # Encode quality for lossy formats (1-100)
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Image-processing backend identifier.
///
/// Hosts that run multiple codec backends address them by these names; the
/// pipeline records the selection and forwards it to the codec at decode
/// time. Backends outside this set are rejected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Gd,
    Imagick,
}

impl Driver {
    /// Parse a backend name. Recognized names are `gd` and `imagick`.
    pub fn parse(name: &str) -> Option<Driver> {
        match name {
            "gd" => Some(Driver::Gd),
            "imagick" => Some(Driver::Imagick),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Driver::Gd => "gd",
            Driver::Imagick => "imagick",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host configuration loaded from `retouch.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Default backend for pipelines without a driver override.
    pub driver: Option<Driver>,
    /// Encode quality for lossy output formats (1-100).
    pub quality: u8,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            driver: None,
            quality: 100,
        }
    }
}

impl HostConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, HostConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: HostConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), HostConfigError> {
        if self.quality == 0 || self.quality > 100 {
            return Err(HostConfigError::Validation(
                "quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}

/// Capabilities of the execution environment.
///
/// Resolved once at process start and handed to
/// [`PipelineBuilder::new`](crate::pipeline::PipelineBuilder::new), so
/// configuration validation never introspects the runtime environment
/// inline. Tests construct the struct directly to exercise the absent case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Whether EXIF metadata can be read. Auto-orientation requires it.
    pub exif: bool,
}

impl Capabilities {
    /// The capability set of this build. EXIF reading is statically linked
    /// in, so it is always present.
    pub fn native() -> Self {
        Self { exif: true }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::native()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_parses_recognized_names() {
        assert_eq!(Driver::parse("gd"), Some(Driver::Gd));
        assert_eq!(Driver::parse("imagick"), Some(Driver::Imagick));
    }

    #[test]
    fn driver_rejects_unknown_names() {
        assert_eq!(Driver::parse("webp"), None);
        assert_eq!(Driver::parse("GD"), None);
        assert_eq!(Driver::parse(""), None);
    }

    #[test]
    fn driver_display_round_trips() {
        assert_eq!(Driver::parse(&Driver::Imagick.to_string()), Some(Driver::Imagick));
    }

    #[test]
    fn default_host_config() {
        let config = HostConfig::default();
        assert_eq!(config.driver, None);
        assert_eq!(config.quality, 100);
        config.validate().unwrap();
    }

    #[test]
    fn sparse_toml_overrides_only_named_values() {
        let config: HostConfig = toml::from_str("driver = \"imagick\"").unwrap();
        assert_eq!(config.driver, Some(Driver::Imagick));
        assert_eq!(config.quality, 100);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<HostConfig, _> = toml::from_str("qualty = 90");
        assert!(result.is_err());
    }

    #[test]
    fn zero_quality_fails_validation() {
        let config: HostConfig = toml::from_str("quality = 0").unwrap();
        assert!(matches!(
            config.validate(),
            Err(HostConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("retouch.toml");
        std::fs::write(&path, "driver = \"gd\"\nquality = 85\n").unwrap();

        let config = HostConfig::load(&path).unwrap();
        assert_eq!(config.driver, Some(Driver::Gd));
        assert_eq!(config.quality, 85);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = HostConfig::load(Path::new("/nonexistent/retouch.toml"));
        assert!(matches!(result, Err(HostConfigError::Io(_))));
    }

    #[test]
    fn native_capabilities_include_exif() {
        assert!(Capabilities::native().exif);
    }
}
