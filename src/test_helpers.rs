//! Shared test utilities: synthetic image files.
//!
//! Everything here writes small but fully valid image files into a caller
//! supplied path (use `tempfile::TempDir`). The EXIF helper splices a
//! minimal APP1 segment into a baseline JPEG so orientation handling can be
//! tested without binary fixtures in the repo.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Gradient test pattern — distinguishable pixels so crops and flips move
/// real data around.
fn test_pattern(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = test_pattern(width, height);
    let mut buffer = Vec::new();
    JpegEncoder::new(Cursor::new(&mut buffer))
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    buffer
}

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, encode_jpeg(width, height)).unwrap();
}

/// Create a small valid PNG file with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    test_pattern(width, height).save(path).unwrap();
}

/// Create a JPEG carrying an EXIF orientation tag.
///
/// Builds the minimal TIFF structure by hand — one IFD0 entry, tag 0x0112
/// (Orientation), type SHORT — wraps it in an `Exif\0\0` APP1 segment, and
/// splices that directly after the SOI marker of a baseline JPEG.
pub fn create_exif_jpeg(path: &Path, width: u32, height: u32, orientation: u16) {
    let jpeg = encode_jpeg(width, height);

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II*\0"); // little-endian byte order + magic
    tiff.extend_from_slice(&8u32.to_le_bytes()); // IFD0 starts right after the header
    tiff.extend_from_slice(&1u16.to_le_bytes()); // one entry
    tiff.extend_from_slice(&0x0112u16.to_le_bytes()); // Orientation
    tiff.extend_from_slice(&3u16.to_le_bytes()); // SHORT
    tiff.extend_from_slice(&1u32.to_le_bytes()); // count
    tiff.extend_from_slice(&orientation.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]); // value field padding
    tiff.extend_from_slice(&0u32.to_le_bytes()); // no next IFD

    let mut app1 = Vec::new();
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(&tiff);

    let mut out = Vec::new();
    out.extend_from_slice(&jpeg[..2]); // SOI
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((app1.len() as u16 + 2).to_be_bytes()));
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[2..]);

    std::fs::write(path, out).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_jpeg_decodes_to_requested_size() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 123, 45);
        assert_eq!(image::image_dimensions(&path).unwrap(), (123, 45));
    }

    #[test]
    fn exif_jpeg_still_decodes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_exif_jpeg(&path, 60, 40, 6);
        assert_eq!(image::image_dimensions(&path).unwrap(), (60, 40));
    }

    #[test]
    fn exif_jpeg_orientation_tag_is_readable() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_exif_jpeg(&path, 60, 40, 3);

        let file = std::fs::File::open(&path).unwrap();
        let mut reader = std::io::BufReader::new(file);
        let exif = exif::Reader::new().read_from_container(&mut reader).unwrap();
        let field = exif
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .unwrap();
        assert_eq!(field.value.get_uint(0), Some(3));
    }
}
