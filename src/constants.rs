/// Folder scanned for images, relative to the working directory.
pub const MEDIA_FOLDER: &str = "media";

pub const MAX_WIDTH: u32 = 1920;
pub const MAX_HEIGHT: u32 = 1920;

pub const DEFAULT_QUALITY: u8 = 85;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Inserted before the extension of every optimized copy.
/// An empty suffix overwrites the originals in place.
pub const OUTPUT_SUFFIX: &str = "_optimized";

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Largest side a baseline JFIF frame header can describe.
pub const MAX_JPEG_DIMENSION: u32 = u16::MAX as u32;

pub const BACKGROUND_COLOR: [u8; 3] = [255, 255, 255];

pub const CONFIRMATION_ANSWER: &str = "yes";

pub const SEPARATOR_WIDTH: usize = 50;
pub const PROGRESS_SPINNER_TEMPLATE: &str = "  {spinner:.green} {msg}";

// Common output message prefixes
pub const WARNING_PREFIX: &str = "⚠️";
pub const ERROR_PREFIX: &str = "❌";
