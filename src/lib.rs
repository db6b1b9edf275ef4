//! # Retouch
//!
//! A deterministic post-processing pipeline for a single uploaded image:
//! optional EXIF-based re-orientation, optional interactive cropping, and
//! optional constrained resizing, re-encoded to the original format and
//! written back in place.
//!
//! # Architecture: Configure, Then Execute
//!
//! Two pieces, consumed in sequence:
//!
//! ```text
//! 1. PipelineBuilder   chained calls                    →  PipelineConfig
//! 2. executor::run     config + file + crop rectangle   →  Outcome
//! ```
//!
//! The builder validates at configuration time (unknown driver names, missing
//! EXIF capability, non-positive aspect ratios) and produces an immutable
//! snapshot, so a config can be built once per upload field and shared
//! read-only across any number of executions. The executor walks a fixed,
//! order-sensitive sequence — decode, orientate, crop, resize, encode — with
//! every step conditional on the config, and skips the decode/encode round
//! trip entirely when nothing is configured (re-encoding an untouched JPEG
//! would only lose quality).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | `PipelineBuilder` → `PipelineConfig`, crop instructions, configuration errors |
//! | [`executor`] | The conditional transform sequence, passthrough short-circuit, overwrite-in-place |
//! | [`imaging`] | The `ImageCodec` seam, the pure-Rust production codec, dimension math |
//! | [`config`] | Host-level `retouch.toml` (default driver, encode quality) and capability flags |
//!
//! # Design Decisions
//!
//! ## Codec as an Injected Seam
//!
//! The pixel-level primitives live behind the [`imaging::ImageCodec`] trait
//! (decode, orientate, crop, resize, encode). The executor is generic over
//! it, so tests drive the orchestration with a recording mock and never
//! touch pixels, while production uses [`imaging::RustCodec`] — the `image`
//! crate plus `kamadak-exif`, pure Rust, statically linked.
//!
//! ## Crop Coordinates Are Client Truth
//!
//! The crop rectangle arrives from an interactive browser widget. The
//! executor applies it verbatim: aspect ratio and minimum crop-box settings
//! in the config are hints for that widget, not server-side constraints.
//! Only the codec's own bounds policy can reject a rectangle.
//!
//! ## Release Is RAII
//!
//! The decoded image is scoped to one `run` call and dropped on every exit
//! path, success or failure. There is no free call to forget on the error
//! path.

pub mod config;
pub mod executor;
pub mod imaging;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod test_helpers;
