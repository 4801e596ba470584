use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("JPEG encoding error: {0}")]
    JpegEncoding(#[from] jpeg_encoder::EncodingError),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid bounding box: {0}x{1}. Both sides must be at least 1 pixel")]
    InvalidBounds(u32, u32),

    #[error("Image too large for JPEG: {0}x{1}. Maximum allowed: {2}x{2}")]
    DimensionsTooLarge(u32, u32, u32),

    #[error("Invalid file name: {}", .0.display())]
    InvalidFileName(PathBuf),

    #[error("'{}' folder not found!", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No images found in '{}' folder!", .0.display())]
    NoImageFilesFound(PathBuf),

    #[error("Cancelled.")]
    Cancelled,

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, OptimizeError>;
