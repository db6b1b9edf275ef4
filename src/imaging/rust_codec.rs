//! Pure Rust production codec — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, WebP, TIFF) | `image` crate (pure Rust decoders) |
//! | EXIF orientation read | `kamadak-exif` (`Tag::Orientation`, primary IFD) |
//! | Orientation apply | `image::DynamicImage` rotate/flip combinations |
//! | Crop | `image::DynamicImage::crop_imm` after an explicit bounds check |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode | format-matched `image` encoders; JPEG takes the quality knob |
//!
//! The gd/imagick driver selection hosts pass down is recorded and logged;
//! this codec has a single backend and treats both names the same.

use super::calculations;
use super::codec::{CodecError, Decoded, ImageCodec, MediaFormat, Orientation};
use crate::config::Driver;
use crate::pipeline::CropInstruction;
use exif::{In, Reader, Tag};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Pure Rust codec over the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Containers the pipeline preserves. Anything else fails the decode.
fn media_format(format: ImageFormat, path: &Path) -> Result<MediaFormat, CodecError> {
    match format {
        ImageFormat::Jpeg => Ok(MediaFormat::Jpeg),
        ImageFormat::Png => Ok(MediaFormat::Png),
        ImageFormat::Gif => Ok(MediaFormat::Gif),
        ImageFormat::WebP => Ok(MediaFormat::WebP),
        ImageFormat::Tiff => Ok(MediaFormat::Tiff),
        other => Err(CodecError::Decode {
            path: path.display().to_string(),
            reason: format!("unsupported container format {other:?}"),
        }),
    }
}

fn image_format(format: MediaFormat) -> ImageFormat {
    match format {
        MediaFormat::Jpeg => ImageFormat::Jpeg,
        MediaFormat::Png => ImageFormat::Png,
        MediaFormat::Gif => ImageFormat::Gif,
        MediaFormat::WebP => ImageFormat::WebP,
        MediaFormat::Tiff => ImageFormat::Tiff,
    }
}

/// Read the EXIF orientation tag from the container. Missing or unreadable
/// EXIF means upright — every camera default.
fn read_orientation(path: &Path) -> Orientation {
    let Ok(file) = File::open(path) else {
        return Orientation::Upright;
    };
    let mut reader = BufReader::new(file);
    match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from_exif)
            .unwrap_or_default(),
        Err(_) => Orientation::Upright,
    }
}

impl ImageCodec for RustCodec {
    type Image = DynamicImage;

    fn decode(
        &self,
        path: &Path,
        driver: Option<Driver>,
    ) -> Result<Decoded<DynamicImage>, CodecError> {
        if let Some(driver) = driver {
            tracing::debug!(
                driver = driver.as_str(),
                "backend selection recorded; pure-Rust codec has a single backend"
            );
        }

        let reader = ImageReader::open(path)
            .map_err(CodecError::Io)?
            .with_guessed_format()
            .map_err(CodecError::Io)?;
        let format = reader.format().ok_or_else(|| CodecError::Decode {
            path: path.display().to_string(),
            reason: "unrecognized image container".into(),
        })?;
        let format = media_format(format, path)?;
        let image = reader.decode().map_err(|e| CodecError::Decode {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let orientation = read_orientation(path);

        Ok(Decoded {
            image,
            format,
            orientation,
        })
    }

    fn orientate(&self, image: DynamicImage, orientation: Orientation) -> DynamicImage {
        match orientation {
            Orientation::Upright => image,
            Orientation::FlipHorizontal => image.fliph(),
            Orientation::Rotate180 => image.rotate180(),
            Orientation::FlipVertical => image.flipv(),
            Orientation::Transpose => image.rotate90().fliph(),
            Orientation::Rotate90 => image.rotate90(),
            Orientation::Transverse => image.rotate270().fliph(),
            Orientation::Rotate270 => image.rotate270(),
        }
    }

    fn crop(
        &self,
        image: DynamicImage,
        rect: &CropInstruction,
    ) -> Result<DynamicImage, CodecError> {
        let (image_width, image_height) = (image.width(), image.height());
        if !calculations::crop_in_bounds((image_width, image_height), rect) {
            return Err(CodecError::OutOfBounds {
                width: rect.width,
                height: rect.height,
                x: rect.x,
                y: rect.y,
                image_width,
                image_height,
            });
        }
        Ok(image.crop_imm(rect.x, rect.y, rect.width, rect.height))
    }

    fn resize(&self, image: DynamicImage, width: u32, height: u32) -> DynamicImage {
        // Callers already did the aspect math; resample to the exact target.
        image.resize_exact(width, height, FilterType::Lanczos3)
    }

    fn encode(
        &self,
        image: &DynamicImage,
        format: MediaFormat,
        quality: u8,
    ) -> Result<Vec<u8>, CodecError> {
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        match format {
            MediaFormat::Jpeg => {
                let encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
                image
                    .write_with_encoder(encoder)
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
            }
            // The remaining formats have no quality knob in the image crate;
            // they encode at their natural settings.
            other => {
                image
                    .write_to(&mut cursor, image_format(other))
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
            }
        }
        Ok(buffer)
    }

    fn dimensions(&self, image: &DynamicImage) -> (u32, u32) {
        (image.width(), image.height())
    }
}
