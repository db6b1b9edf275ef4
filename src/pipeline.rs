//! Pipeline configuration: fluent builder → immutable config.
//!
//! A [`PipelineBuilder`] accumulates the per-field options an admin panel
//! exposes for an image upload — crop enablement, fixed aspect ratio,
//! minimum crop-box bounds, resizability, zoomability, target dimensions,
//! auto-orientation — and validates them as they arrive. [`build`]
//! (PipelineBuilder::build) snapshots the result into an immutable
//! [`PipelineConfig`] that the executor reads; nothing can mutate a config
//! mid-execution, and one config is safely shared across concurrent runs.
//!
//! Validating calls return `Result<Self, ConfigError>` so a bad value aborts
//! the chain at the call that caused it:
//!
//! ```
//! use retouch::config::Capabilities;
//! use retouch::pipeline::{Croppable, PipelineBuilder};
//!
//! # fn main() -> Result<(), retouch::pipeline::ConfigError> {
//! let config = PipelineBuilder::new(Capabilities::native())
//!     .driver("imagick")?
//!     .croppable(Croppable::FixedRatio(16.0 / 9.0))?
//!     .crop_box_min(200, 0)
//!     .resize(Some(1200), None)
//!     .auto_orientate()?
//!     .build();
//! assert!(config.cropping_enabled);
//! # Ok(())
//! # }
//! ```
//!
//! No builder call performs I/O or touches image data.

use crate::config::{Capabilities, Driver};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration-time errors. Each is raised synchronously by the builder
/// call that triggers it; the chain aborts and no partially-invalid config
/// escapes.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown image driver '{0}' (recognized drivers: gd, imagick)")]
    InvalidDriver(String),
    #[error("auto-orientation requires EXIF support, which this environment lacks")]
    MissingCapability,
    #[error("crop aspect ratio must be a strictly positive number, got {0}")]
    InvalidAspectRatio(f64),
}

/// Crop enablement for [`PipelineBuilder::croppable`].
///
/// `FixedRatio` both enables cropping and pins the crop box to a
/// width÷height ratio; `Enabled` toggles cropping without touching a
/// previously set ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Croppable {
    Enabled(bool),
    FixedRatio(f64),
}

/// A crop rectangle in source-image pixel coordinates, produced by the
/// host's interactive crop widget and transmitted alongside the upload.
///
/// Per-invocation data with no persistent identity. The executor applies it
/// verbatim — see the crate-level notes on client-trusted coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropInstruction {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

/// Immutable pipeline configuration, built once per upload field.
///
/// Read-only at execution time; share freely across concurrent `run` calls.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Backend selection override; `None` inherits the host default.
    pub driver_override: Option<Driver>,
    pub cropping_enabled: bool,
    /// Fixed width÷height ratio the crop widget should enforce.
    pub crop_aspect_ratio: Option<f64>,
    /// Minimum crop-box size the crop widget should enforce, in pixels.
    pub min_crop_box_width: u32,
    pub min_crop_box_height: u32,
    /// Whether the crop widget lets the user resize the crop box.
    pub crop_box_resizable: bool,
    /// Whether the crop widget offers zooming.
    pub crop_zoom_enabled: bool,
    /// Resize targets. A missing axis is derived from the aspect ratio at
    /// execution time; both `None` leaves the resize step inert.
    pub target_width: Option<u32>,
    pub target_height: Option<u32>,
    /// Normalize EXIF orientation before any other pixel work.
    pub auto_orientate: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            driver_override: None,
            cropping_enabled: false,
            crop_aspect_ratio: None,
            min_crop_box_width: 0,
            min_crop_box_height: 0,
            crop_box_resizable: true,
            crop_zoom_enabled: false,
            target_width: None,
            target_height: None,
            auto_orientate: false,
        }
    }
}

/// Fluent, validating builder for [`PipelineConfig`].
///
/// Configuration is append-only: no call removes a previously set option,
/// except that [`croppable`](Self::croppable) rewrites the crop settings it
/// owns (see its docs for the exact overwrite boundary).
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    capabilities: Capabilities,
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Start from defaults. `capabilities` is the environment capability set
    /// resolved at process start; it gates [`auto_orientate`](Self::auto_orientate).
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            config: PipelineConfig::default(),
        }
    }

    /// Select the codec backend by name, overriding the host default.
    ///
    /// Fails with [`ConfigError::InvalidDriver`] for anything other than
    /// `gd` or `imagick`.
    pub fn driver(mut self, name: &str) -> Result<Self, ConfigError> {
        let driver =
            Driver::parse(name).ok_or_else(|| ConfigError::InvalidDriver(name.to_string()))?;
        self.config.driver_override = Some(driver);
        Ok(self)
    }

    /// Configure cropping.
    ///
    /// `Croppable::FixedRatio(r)` requires `r > 0`, stores the ratio, and
    /// enables cropping. `Croppable::Enabled(b)` sets the enablement flag
    /// and leaves any previously set ratio in place — disabling cropping
    /// does not forget the ratio.
    ///
    /// Every call resets the minimum crop-box bounds to zero; set them
    /// afterwards with [`crop_box_min`](Self::crop_box_min).
    pub fn croppable(mut self, mode: Croppable) -> Result<Self, ConfigError> {
        match mode {
            Croppable::Enabled(enabled) => {
                self.config.cropping_enabled = enabled;
            }
            Croppable::FixedRatio(ratio) => {
                if !(ratio > 0.0) || !ratio.is_finite() {
                    return Err(ConfigError::InvalidAspectRatio(ratio));
                }
                self.config.crop_aspect_ratio = Some(ratio);
                self.config.cropping_enabled = true;
            }
        }
        self.config.min_crop_box_width = 0;
        self.config.min_crop_box_height = 0;
        Ok(self)
    }

    /// Minimum crop-box size in pixels. A hint for the host's crop widget;
    /// the executor never re-validates rectangles against it.
    pub fn crop_box_min(mut self, width: u32, height: u32) -> Self {
        self.config.min_crop_box_width = width;
        self.config.min_crop_box_height = height;
        self
    }

    /// Make the crop box fixed-size in the crop widget.
    pub fn disable_crop_box_resize(mut self) -> Self {
        self.config.crop_box_resizable = false;
        self
    }

    /// Offer zooming in the crop widget.
    pub fn enable_crop_zoom(mut self) -> Self {
        self.config.crop_zoom_enabled = true;
        self
    }

    /// Set resize targets. A `None` axis is derived proportionally at
    /// execution time; a zero target is treated as unset.
    pub fn resize(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.config.target_width = width.filter(|&w| w > 0);
        self.config.target_height = height.filter(|&h| h > 0);
        self
    }

    /// Normalize EXIF orientation at execution time.
    ///
    /// Fails with [`ConfigError::MissingCapability`] when the environment
    /// cannot read EXIF metadata.
    pub fn auto_orientate(mut self) -> Result<Self, ConfigError> {
        if !self.capabilities.exif {
            return Err(ConfigError::MissingCapability);
        }
        self.config.auto_orientate = true;
        Ok(self)
    }

    /// Snapshot the accumulated options into an immutable config.
    pub fn build(self) -> PipelineConfig {
        self.config
    }
}
