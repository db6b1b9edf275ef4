//! The image codec trait and shared value types.
//!
//! [`ImageCodec`] defines the five pixel-level primitives the executor
//! orchestrates: decode, orientate, crop, resize, encode. The executor is
//! generic over the trait, so orchestration tests run against the recording
//! [`MockCodec`](tests::MockCodec) and never decode a pixel; production uses
//! [`RustCodec`](super::rust_codec::RustCodec).

use crate::config::Driver;
use crate::pipeline::CropInstruction;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error(
        "crop rectangle {width}x{height}+{x}+{y} escapes the {image_width}x{image_height} image"
    )]
    OutOfBounds {
        width: u32,
        height: u32,
        x: u32,
        y: u32,
        image_width: u32,
        image_height: u32,
    },
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Serialized image container formats the pipeline preserves.
///
/// Transformations never change the container: JPEG in means JPEG out. The
/// format is captured once at decode time and handed back to
/// [`ImageCodec::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    Tiff,
}

impl MediaFormat {
    pub fn mime(self) -> &'static str {
        match self {
            MediaFormat::Jpeg => "image/jpeg",
            MediaFormat::Png => "image/png",
            MediaFormat::Gif => "image/gif",
            MediaFormat::WebP => "image/webp",
            MediaFormat::Tiff => "image/tiff",
        }
    }
}

/// EXIF orientation, captured at decode time.
///
/// The eight tag values map to the transform that brings the pixels
/// upright. Applying it consumes the orientation: encoded output carries no
/// orientation metadata, so the pixels are the single source of truth
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Tag value 1 (or missing/unreadable EXIF): nothing to do.
    #[default]
    Upright,
    /// Tag value 2.
    FlipHorizontal,
    /// Tag value 3.
    Rotate180,
    /// Tag value 4.
    FlipVertical,
    /// Tag value 5: mirror along the top-left↔bottom-right diagonal.
    Transpose,
    /// Tag value 6: 90° clockwise.
    Rotate90,
    /// Tag value 7: mirror along the top-right↔bottom-left diagonal.
    Transverse,
    /// Tag value 8: 270° clockwise.
    Rotate270,
}

impl Orientation {
    /// Map a raw EXIF orientation tag value. Out-of-range values are treated
    /// as upright, matching how viewers handle corrupt tags.
    pub fn from_exif(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270,
            _ => Orientation::Upright,
        }
    }

    pub fn is_upright(self) -> bool {
        self == Orientation::Upright
    }

    /// Whether applying this orientation swaps width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90
                | Orientation::Transverse
                | Orientation::Rotate270
        )
    }
}

/// Result of a decode: the image handle plus everything captured from the
/// container that later steps need.
pub struct Decoded<I> {
    pub image: I,
    pub format: MediaFormat,
    pub orientation: Orientation,
}

/// The pixel-level primitives the executor orchestrates.
///
/// Implementations are stateless across calls; all per-image state lives in
/// the `Image` handle, which is scoped to one pipeline run and released by
/// dropping it.
pub trait ImageCodec {
    /// In-memory image handle. Dropping it releases the decoded pixels.
    type Image;

    /// Decode the file at `path`, capturing container format and EXIF
    /// orientation. `driver` is the backend the host or pipeline selected;
    /// codecs with a single backend record it and carry on.
    fn decode(&self, path: &Path, driver: Option<Driver>)
    -> Result<Decoded<Self::Image>, CodecError>;

    /// Bring the pixels upright according to `orientation`.
    fn orientate(&self, image: Self::Image, orientation: Orientation) -> Self::Image;

    /// Cut the rectangle out of the image. Bounds policy is the codec's
    /// own; rectangles it rejects surface as [`CodecError::OutOfBounds`].
    fn crop(&self, image: Self::Image, rect: &CropInstruction) -> Result<Self::Image, CodecError>;

    /// Resample to exactly `width` × `height`. Callers are responsible for
    /// aspect-ratio math; upsizing is permitted.
    fn resize(&self, image: Self::Image, width: u32, height: u32) -> Self::Image;

    /// Serialize in `format` at `quality` (1-100; ignored by formats
    /// without a quality knob).
    fn encode(&self, image: &Self::Image, format: MediaFormat, quality: u8)
    -> Result<Vec<u8>, CodecError>;

    /// Current pixel dimensions of a decoded image.
    fn dimensions(&self, image: &Self::Image) -> (u32, u32);
}
