use crate::constants::{
    BACKGROUND_COLOR, DEFAULT_QUALITY, MAX_HEIGHT, MAX_JPEG_DIMENSION, MAX_QUALITY, MAX_WIDTH,
    MIN_QUALITY,
};
use crate::error::{OptimizeError, Result};
use crate::utils::calculate_savings_percent;
use crate::verbose;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, Rgb, RgbImage};
use jpeg_encoder::{ColorType, Encoder};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeOptions {
    pub quality: u8,
    pub max_width: u32,
    pub max_height: u32,
}

impl OptimizeOptions {
    pub fn new(quality: Option<u8>, max_width: Option<u32>, max_height: Option<u32>) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(OptimizeError::InvalidQuality(quality));
        }

        let max_width = max_width.unwrap_or(MAX_WIDTH);
        let max_height = max_height.unwrap_or(MAX_HEIGHT);
        if max_width == 0 || max_height == 0 {
            return Err(OptimizeError::InvalidBounds(max_width, max_height));
        }

        Ok(Self {
            quality,
            max_width,
            max_height,
        })
    }
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            max_width: MAX_WIDTH,
            max_height: MAX_HEIGHT,
        }
    }
}

/// Outcome of optimizing a single file. Sizes are in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizationResult {
    pub original_size: u64,
    pub optimized_size: u64,
    pub original_dimensions: (u32, u32),
    pub final_dimensions: (u32, u32),
}

impl OptimizationResult {
    pub fn resized(&self) -> bool {
        self.original_dimensions != self.final_dimensions
    }

    /// Bytes saved; negative when the re-encoded file grew.
    pub fn saved_bytes(&self) -> i64 {
        self.original_size as i64 - self.optimized_size as i64
    }

    pub fn savings_percent(&self) -> f64 {
        calculate_savings_percent(self.original_size, self.optimized_size)
    }
}

/// Core optimization pipeline for one file:
/// load -> flatten transparency -> fit within bounds -> encode JPEG -> save
///
/// # Arguments
/// * `input_path` - Path to the source image
/// * `output_path` - Destination path; may equal `input_path` to overwrite in place
/// * `options` - Bounding box and JPEG quality
///
/// # Returns
/// * `Ok(OptimizationResult)` - Sizes and dimensions before and after
/// * `Err(OptimizeError)` - If decoding, encoding or writing fails
///
/// The source is fully decoded and its handle released before the destination
/// is written, and the JPEG is encoded in memory first, so an encoder failure
/// leaves the destination untouched.
pub fn optimize_image(
    input_path: &Path,
    output_path: &Path,
    options: &OptimizeOptions,
) -> Result<OptimizationResult> {
    let (img, original_size) = load_image_with_metadata(input_path)?;
    let original_dimensions = img.dimensions();

    let mut img = flatten_transparency(img);
    resize_image(&mut img, options);
    let final_dimensions = img.dimensions();

    let encoded = encode_jpeg(&img, options.quality)?;
    drop(img);
    fs::write(output_path, &encoded)?;

    let optimized_size = fs::metadata(output_path)?.len();

    Ok(OptimizationResult {
        original_size,
        optimized_size,
        original_dimensions,
        final_dimensions,
    })
}

/// Loads an image file and returns it along with its size on disk.
///
/// # Arguments
/// * `input_path` - Path to the image file to load
///
/// # Returns
/// * `Ok((image, file_size))` - The decoded image and its file size in bytes
/// * `Err(OptimizeError)` - If the file cannot be read or decoded
///
/// The format is sniffed from the file contents, so a mislabelled extension
/// still decodes.
pub fn load_image_with_metadata(input_path: &Path) -> Result<(DynamicImage, u64)> {
    let file_size = fs::metadata(input_path)?.len();
    let img = ImageReader::open(input_path)?
        .with_guessed_format()?
        .decode()?;

    verbose!(
        "Decoded {}x{} {:?} ({} bytes)",
        img.width(),
        img.height(),
        img.color(),
        file_size
    );

    Ok((img, file_size))
}

/// Removes transparency so the image can be stored as JPEG.
///
/// Images with an alpha channel are blended over an opaque white canvas.
/// Palette images arrive here already expanded to RGBA by the decoder, so
/// indexed transparency is handled the same way. Grayscale without alpha
/// stays grayscale; everything else becomes 8-bit RGB.
pub fn flatten_transparency(img: DynamicImage) -> DynamicImage {
    if img.color().has_alpha() {
        verbose!("Flattening {:?} onto a white background", img.color());
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut canvas = RgbImage::from_pixel(width, height, Rgb(BACKGROUND_COLOR));

        for (dst, src) in canvas.pixels_mut().zip(rgba.pixels()) {
            let [r, g, b, a] = src.0;
            dst.0 = [
                blend(r, a, BACKGROUND_COLOR[0]),
                blend(g, a, BACKGROUND_COLOR[1]),
                blend(b, a, BACKGROUND_COLOR[2]),
            ];
        }
        return DynamicImage::ImageRgb8(canvas);
    }

    match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
        DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(img.to_luma8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

fn blend(channel: u8, alpha: u8, background: u8) -> u8 {
    let alpha = alpha as u32;
    ((channel as u32 * alpha + background as u32 * (255 - alpha) + 127) / 255) as u8
}

/// Computes the size that fits `width`x`height` inside the bounding box while
/// keeping the aspect ratio. Never enlarges.
///
/// The constrained side becomes exactly the bound; the other side is the floor
/// or ceiling of its exact value, whichever keeps the ratio closer, and at
/// least one pixel.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let aspect = width as f64 / height as f64;
    let box_w = max_width as f64;
    let box_h = max_height as f64;

    if box_w / box_h >= aspect {
        let new_width = round_aspect(box_h * aspect, |n| (aspect - n / box_h).abs());
        (new_width, max_height)
    } else {
        let new_height = round_aspect(box_w / aspect, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - box_w / n).abs()
            }
        });
        (max_width, new_height)
    }
}

fn round_aspect(exact: f64, error: impl Fn(f64) -> f64) -> u32 {
    let floor = exact.floor();
    let ceil = exact.ceil();
    let best = if error(ceil) < error(floor) { ceil } else { floor };
    (best as u32).max(1)
}

/// Shrinks the image into the configured bounding box with Lanczos3.
/// Returns whether the image was resized.
pub fn resize_image(img: &mut DynamicImage, options: &OptimizeOptions) -> bool {
    let (width, height) = img.dimensions();
    let (new_width, new_height) = fit_within(width, height, options.max_width, options.max_height);

    if (new_width, new_height) == (width, height) {
        return false;
    }

    verbose!(
        "Resampling {}x{} -> {}x{} (Lanczos3)",
        width,
        height,
        new_width,
        new_height
    );
    *img = img.resize_exact(new_width, new_height, FilterType::Lanczos3);
    true
}

/// Encodes as a progressive JPEG with optimized Huffman tables.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();
    let (Ok(jpeg_width), Ok(jpeg_height)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(OptimizeError::DimensionsTooLarge(
            width,
            height,
            MAX_JPEG_DIMENSION,
        ));
    };

    let (pixels, color_type): (Cow<'_, [u8]>, ColorType) = match img {
        DynamicImage::ImageLuma8(gray) => (Cow::Borrowed(gray.as_raw().as_slice()), ColorType::Luma),
        DynamicImage::ImageRgb8(rgb) => (Cow::Borrowed(rgb.as_raw().as_slice()), ColorType::Rgb),
        other => (Cow::Owned(other.to_rgb8().into_raw()), ColorType::Rgb),
    };

    verbose!(
        "Encoding {}x{} JPEG at quality {} (progressive, optimized Huffman tables)",
        width,
        height,
        quality
    );

    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer, quality);
    encoder.set_progressive(true);
    encoder.set_optimized_huffman_tables(true);
    encoder.encode(&pixels, jpeg_width, jpeg_height, color_type)?;

    Ok(buffer)
}
