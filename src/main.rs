use clap::Parser;
use retouch::config::{Capabilities, HostConfig};
use retouch::executor::{self, Outcome};
use retouch::imaging::RustCodec;
use retouch::pipeline::{CropInstruction, Croppable, PipelineBuilder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "retouch")]
#[command(about = "Post-process an uploaded image in place")]
#[command(long_about = "\
Post-process an uploaded image in place

Applies a deterministic pipeline to one image file: EXIF orientation
normalization, an interactive crop rectangle, and a constrained resize, in
that order, re-encoded to the file's own format. The file is overwritten in
place; with no steps configured it is left byte-for-byte untouched.

Examples:

  # Normalize a phone photo and cap it at 1600px wide
  retouch --auto-orientate --resize 1600x photo.jpg

  # Apply the crop rectangle a browser widget produced
  retouch --crop 400x400+120+80 avatar.png

  # Fit into a 1200x800 box, asking the host's imagick backend
  retouch --driver imagick --resize 1200x800 banner.jpg

Crop rectangles are applied exactly as given; --ratio and --min-crop-box
describe what an interactive crop widget should enforce and are only
recorded in the pipeline configuration.")]
#[command(version)]
struct Cli {
    /// Image file to process (overwritten in place)
    file: PathBuf,

    /// Codec backend to request: gd or imagick
    #[arg(long)]
    driver: Option<String>,

    /// Enable cropping with a fixed width/height ratio (e.g. 1.777)
    #[arg(long)]
    ratio: Option<f64>,

    /// Crop rectangle as WxH+X+Y, in source-image pixels
    #[arg(long, value_parser = parse_crop)]
    crop: Option<CropInstruction>,

    /// Minimum crop box as WxH (crop-widget hint)
    #[arg(long, value_parser = parse_pair)]
    min_crop_box: Option<(u32, u32)>,

    /// Target size as WxH, Wx or xH; a missing axis is derived, ratio preserved
    #[arg(long, value_parser = parse_resize)]
    resize: Option<(Option<u32>, Option<u32>)>,

    /// Normalize EXIF orientation before other steps
    #[arg(long)]
    auto_orientate: bool,

    /// Host config file (default driver, encode quality)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Parse `WxH+X+Y` into a crop instruction.
fn parse_crop(s: &str) -> Result<CropInstruction, String> {
    let err = || format!("expected WxH+X+Y, got '{s}'");
    let (size, offsets) = s.split_once('+').ok_or_else(err)?;
    let (x, y) = offsets.split_once('+').ok_or_else(err)?;
    let (width, height) = size.split_once('x').ok_or_else(err)?;
    Ok(CropInstruction {
        width: width.parse().map_err(|_| err())?,
        height: height.parse().map_err(|_| err())?,
        x: x.parse().map_err(|_| err())?,
        y: y.parse().map_err(|_| err())?,
    })
}

/// Parse `WxH` into a pair.
fn parse_pair(s: &str) -> Result<(u32, u32), String> {
    let err = || format!("expected WxH, got '{s}'");
    let (w, h) = s.split_once('x').ok_or_else(err)?;
    Ok((w.parse().map_err(|_| err())?, h.parse().map_err(|_| err())?))
}

/// Parse `WxH`, `Wx` or `xH` into optional resize targets.
fn parse_resize(s: &str) -> Result<(Option<u32>, Option<u32>), String> {
    let err = || format!("expected WxH, Wx or xH, got '{s}'");
    let (w, h) = s.split_once('x').ok_or_else(err)?;
    let width = if w.is_empty() {
        None
    } else {
        Some(w.parse().map_err(|_| err())?)
    };
    let height = if h.is_empty() {
        None
    } else {
        Some(h.parse().map_err(|_| err())?)
    };
    if width.is_none() && height.is_none() {
        return Err(err());
    }
    Ok((width, height))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let host = match &cli.config {
        Some(path) => HostConfig::load(path)?,
        None => HostConfig::default(),
    };

    let mut builder = PipelineBuilder::new(Capabilities::native());
    if let Some(name) = &cli.driver {
        builder = builder.driver(name)?;
    }
    if let Some(ratio) = cli.ratio {
        builder = builder.croppable(Croppable::FixedRatio(ratio))?;
    } else if cli.crop.is_some() {
        builder = builder.croppable(Croppable::Enabled(true))?;
    }
    if let Some((width, height)) = cli.min_crop_box {
        builder = builder.crop_box_min(width, height);
    }
    if let Some((width, height)) = cli.resize {
        builder = builder.resize(width, height);
    }
    if cli.auto_orientate {
        builder = builder.auto_orientate()?;
    }
    let config = builder.build();

    let codec = RustCodec::new();
    match executor::run(&codec, &host, &config, &cli.file, cli.crop.as_ref())? {
        Outcome::Passthrough => {
            println!(
                "{}: no transformation configured, left untouched",
                cli.file.display()
            );
        }
        Outcome::Processed {
            width,
            height,
            format,
        } => {
            println!(
                "{}: {}x{} {}",
                cli.file.display(),
                width,
                height,
                format.mime()
            );
        }
    }

    Ok(())
}
