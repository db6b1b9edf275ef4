//! The transform executor: one conditional pass over one uploaded image.
//!
//! [`run`] takes a finalized [`PipelineConfig`](crate::pipeline::PipelineConfig),
//! the path of an uploaded file, and an optional crop rectangle, and applies
//! the fixed sequence
//!
//! ```text
//! decode → orientate? → crop? → resize? → encode → overwrite in place
//! ```
//!
//! with each step conditional on the config. When neither cropping nor a
//! resize target is configured the executor returns
//! [`Outcome::Passthrough`] without touching the file at all — no decode,
//! no re-encode, no quality loss.
//!
//! The executor holds no state across calls. Each run is a fresh linear
//! sequence; the decoded image is scoped to the call and dropped on every
//! exit path, so a failing step can never leak the decode buffer. There are
//! no retries and no partial-success mode: either the whole configured
//! sequence completes and the file is overwritten, or the original bytes
//! remain (unless the final write itself is what failed).

use crate::config::HostConfig;
use crate::imaging::calculations;
use crate::imaging::codec::{CodecError, ImageCodec, MediaFormat};
use crate::pipeline::{CropInstruction, PipelineConfig};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("could not decode source image: {0}")]
    Decode(CodecError),
    #[error("crop rectangle rejected: {0}")]
    CropBounds(CodecError),
    #[error("could not re-encode image: {0}")]
    Encode(CodecError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a run did to the upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No step was configured; the upload was left byte-for-byte untouched.
    Passthrough,
    /// The configured sequence ran and the file was overwritten in place.
    Processed {
        width: u32,
        height: u32,
        format: MediaFormat,
    },
}

/// Execute the configured pipeline against the upload at `path`,
/// overwriting it in place.
///
/// `crop` is the per-invocation rectangle from the host's crop widget.
/// Cropping is opportunistic: a crop-enabled config with no rectangle
/// simply skips the step. The rectangle is applied verbatim — the config's
/// aspect-ratio and minimum-box settings are widget hints, never
/// re-validated here.
pub fn run<C: ImageCodec>(
    codec: &C,
    host: &HostConfig,
    config: &PipelineConfig,
    path: &Path,
    crop: Option<&CropInstruction>,
) -> Result<Outcome, PipelineError> {
    // Nothing configured: leave the original bytes alone rather than
    // paying a lossy decode/encode round trip.
    if !config.cropping_enabled && config.target_width.is_none() && config.target_height.is_none()
    {
        tracing::debug!(path = %path.display(), "no transformation configured, passing through");
        return Ok(Outcome::Passthrough);
    }

    let driver = config.driver_override.or(host.driver);
    let decoded = codec.decode(path, driver).map_err(PipelineError::Decode)?;
    let format = decoded.format;
    let orientation = decoded.orientation;
    let mut image = decoded.image;

    if config.auto_orientate && !orientation.is_upright() {
        tracing::debug!(?orientation, "normalizing EXIF orientation");
        image = codec.orientate(image, orientation);
    }

    if config.cropping_enabled {
        if let Some(rect) = crop {
            tracing::debug!(
                width = rect.width,
                height = rect.height,
                x = rect.x,
                y = rect.y,
                "applying crop rectangle"
            );
            image = codec.crop(image, rect).map_err(PipelineError::CropBounds)?;
        }
    }

    let current = codec.dimensions(&image);
    if let Some((width, height)) =
        calculations::resize_target(current, config.target_width, config.target_height)
    {
        // An already-sized image needs no resample pass.
        if (width, height) != current {
            tracing::debug!(width, height, "resizing");
            image = codec.resize(image, width, height);
        }
    }

    let bytes = codec
        .encode(&image, format, host.quality)
        .map_err(PipelineError::Encode)?;
    let (width, height) = codec.dimensions(&image);
    fs::write(path, &bytes)?;
    tracing::debug!(
        path = %path.display(),
        width,
        height,
        format = format.mime(),
        bytes = bytes.len(),
        "upload overwritten in place"
    );

    Ok(Outcome::Processed {
        width,
        height,
        format,
    })
}
