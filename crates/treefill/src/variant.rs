//! One-pixel image variants, generated and written in batches

use image::{ColorType, DynamicImage, ImageFormat, Luma, Rgb, Rgba};
use rand::Rng;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::estimate::{estimate_file_size, estimated_from_len};
use crate::types::Variant;

/// Hex characters of the random identifier used as a variant's file name
pub const NAME_LEN: usize = 12;

/// Decoded source image, used read-only as the template for every variant
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
    estimated_file_size: u64,
}

impl SourceImage {
    /// Decode the image at `path` and derive the per-variant size estimate
    pub fn open(path: &Path) -> Result<Self> {
        let estimated_file_size = estimate_file_size(path)?;
        let image = image::open(path).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!(
            "Loaded {} ({}x{}, {:?}), estimated variant size {} bytes",
            path.display(),
            image.width(),
            image.height(),
            image.color(),
            estimated_file_size
        );
        Ok(Self {
            image,
            estimated_file_size,
        })
    }

    /// Wrap an already decoded image whose encoded source was `encoded_len` bytes
    pub fn from_image(image: DynamicImage, encoded_len: u64) -> Self {
        Self {
            image,
            estimated_file_size: estimated_from_len(encoded_len),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn color(&self) -> ColorType {
        self.image.color()
    }

    pub fn estimated_file_size(&self) -> u64 {
        self.estimated_file_size
    }
}

/// Color layouts a variant can be drawn for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Single-channel grayscale
    Luma,
    Rgb,
    Rgba,
}

impl ColorMode {
    pub fn from_color_type(color: ColorType) -> Result<Self> {
        match color {
            ColorType::L8 => Ok(Self::Luma),
            ColorType::Rgb8 => Ok(Self::Rgb),
            ColorType::Rgba8 => Ok(Self::Rgba),
            other => Err(Error::UnsupportedMode(format!("{other:?}"))),
        }
    }

    /// Draw a uniformly random color for this layout
    pub fn random_value<R: Rng + ?Sized>(self, rng: &mut R) -> PixelValue {
        match self {
            Self::Luma => PixelValue::Luma(rng.r#gen()),
            Self::Rgb => PixelValue::Rgb(rng.r#gen()),
            Self::Rgba => PixelValue::Rgba(rng.r#gen()),
        }
    }
}

/// A single pixel's new color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelValue {
    Luma(u8),
    Rgb([u8; 3]),
    Rgba([u8; 4]),
}

fn put_pixel(image: &mut DynamicImage, x: u32, y: u32, value: PixelValue) -> Result<()> {
    match (image, value) {
        (DynamicImage::ImageLuma8(buf), PixelValue::Luma(v)) => buf.put_pixel(x, y, Luma([v])),
        (DynamicImage::ImageRgb8(buf), PixelValue::Rgb(v)) => buf.put_pixel(x, y, Rgb(v)),
        (DynamicImage::ImageRgba8(buf), PixelValue::Rgba(v)) => buf.put_pixel(x, y, Rgba(v)),
        (image, _) => return Err(Error::UnsupportedMode(format!("{:?}", image.color()))),
    }
    Ok(())
}

/// Encodes a variant to disk
///
/// Each call opens, writes and closes its own file.
pub trait VariantEncoder {
    /// File extension written by this encoder, without the dot
    fn extension(&self) -> &'static str;

    /// Write `image` to `path`
    fn write(&self, image: &DynamicImage, path: &Path) -> Result<()>;
}

/// Uncompressed BMP output, chosen for encode speed
#[derive(Debug, Clone, Copy, Default)]
pub struct BmpEncoder;

impl VariantEncoder for BmpEncoder {
    fn extension(&self) -> &'static str {
        "bmp"
    }

    fn write(&self, image: &DynamicImage, path: &Path) -> Result<()> {
        image
            .save_with_format(path, ImageFormat::Bmp)
            .map_err(|source| Error::Encode {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Random file name from a UUID drawn from `rng`
pub fn variant_file_name<R: Rng + ?Sized>(rng: &mut R, extension: &str) -> String {
    let id = uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid();
    let hex = id.simple().to_string();
    format!("{}.{extension}", &hex[..NAME_LEN])
}

/// Write `count` one-pixel variants of `source` into `directory`.
///
/// The color mode is checked before anything is written. A failed write ends
/// the batch early and the variants written so far are returned. Every
/// variant is accounted at the source's estimated file size.
pub fn generate_batch<E, R>(
    source: &SourceImage,
    directory: &Path,
    count: usize,
    encoder: &E,
    rng: &mut R,
) -> Result<Vec<Variant>>
where
    E: VariantEncoder + ?Sized,
    R: Rng + ?Sized,
{
    let mode = ColorMode::from_color_type(source.color())?;
    let (width, height) = (source.width(), source.height());
    if width == 0 || height == 0 {
        return Err(Error::InvalidParameter(
            "source image has no pixels".to_string(),
        ));
    }

    let mut produced = Vec::with_capacity(count);
    for _ in 0..count {
        let x = rng.gen_range(0..width);
        let y = rng.gen_range(0..height);
        let value = mode.random_value(rng);

        let mut variant = source.image.clone();
        put_pixel(&mut variant, x, y, value)?;

        let path: PathBuf = directory.join(variant_file_name(rng, encoder.extension()));
        if let Err(e) = encoder.write(&variant, &path) {
            log::warn!(
                "Error creating image batch in {}: {} ({} of {} written)",
                directory.display(),
                e,
                produced.len(),
                count
            );
            break;
        }

        produced.push(Variant {
            path,
            estimated_size: source.estimated_file_size,
        });
    }

    Ok(produced)
}
