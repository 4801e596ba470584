#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes a busy RGB pattern so the encoder has real detail to compress.
pub fn create_photo(path: &Path, width: u32, height: u32) {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            ((x.wrapping_mul(7919) ^ y.wrapping_mul(104_729)) % 256) as u8,
            ((x * 3 + y * 5) % 256) as u8,
            ((x ^ y) % 256) as u8,
        ])
    }))
    .save(path)
    .unwrap();
}

pub fn create_transparent_png(path: &Path, width: u32, height: u32) {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
        .save(path)
        .unwrap();
}

pub fn create_corrupt_file(path: &Path) {
    File::create(path)
        .unwrap()
        .write_all(b"definitely not an image")
        .unwrap();
}

/// A working directory with an empty `media` folder inside.
pub fn create_workspace() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let media = temp_dir.path().join("media");
    std::fs::create_dir(&media).unwrap();
    (temp_dir, media)
}
