//! Image operations behind an injected codec seam.
//!
//! | Piece | Role |
//! |---|---|
//! | [`codec`] | The [`ImageCodec`] trait the executor is generic over, plus the shared value types (format, orientation, errors) |
//! | [`rust_codec`] | Production implementation: `image` crate decoders/encoders + `kamadak-exif` |
//! | [`calculations`] | Pure dimension math (no I/O, no pixels) |

pub mod calculations;
pub mod codec;
pub mod rust_codec;

pub use codec::{CodecError, Decoded, ImageCodec, MediaFormat, Orientation};
pub use rust_codec::RustCodec;
