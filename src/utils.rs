//! Utility functions for common operations
//!
//! Helpers shared by discovery, the per-file transform and the run report.

use crate::constants::{PROGRESS_SPINNER_TEMPLATE, SUPPORTED_IMAGE_EXTENSIONS};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Check if a file path represents a supported image file
///
/// # Arguments
/// * `path` - The file path to check
///
/// # Returns
/// * `true` if the extension is one of jpg, jpeg, png or webp (any case)
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Check whether a file stem already carries the optimized marker.
///
/// An empty marker never matches, so in-place mode still finds the originals.
pub fn has_marker(path: &Path, marker: &str) -> bool {
    if marker.is_empty() {
        return false;
    }
    path.file_stem()
        .map(|stem| stem.to_string_lossy().contains(marker))
        .unwrap_or(false)
}

/// Create a progress spinner with consistent styling
///
/// # Arguments
/// * `message` - Initial message to display
///
/// # Returns
/// * Configured `ProgressBar` instance, hidden in quiet mode
pub fn create_progress_spinner(message: &str) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template(PROGRESS_SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn bytes_to_kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Format a byte count as kilobytes with one decimal, e.g. `"12.5KB"`.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1}KB", bytes_to_kb(bytes))
}

/// Format a byte count as `"<kb>KB (<mb>MB)"`.
pub fn format_kb_mb(bytes: u64) -> String {
    format!("{:.1}KB ({:.1}MB)", bytes_to_kb(bytes), bytes_to_mb(bytes))
}

/// Calculate size savings as a percentage
///
/// # Arguments
/// * `original_size` - Original file size in bytes
/// * `optimized_size` - Optimized file size in bytes
///
/// # Returns
/// * Savings as percentage (positive means reduction, negative means growth)
pub fn calculate_savings_percent(original_size: u64, optimized_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - optimized_size as f64) / original_size as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("test.jpg")));
        assert!(is_image_file(Path::new("test.JPEG")));
        assert!(is_image_file(Path::new("test.png")));
        assert!(is_image_file(Path::new("test.WebP")));

        assert!(!is_image_file(Path::new("test.gif")));
        assert!(!is_image_file(Path::new("test.bmp")));
        assert!(!is_image_file(Path::new("test.txt")));
        assert!(!is_image_file(Path::new("test")));
        assert!(!is_image_file(Path::new(".jpg")));
    }

    #[test]
    fn test_has_marker() {
        assert!(has_marker(Path::new("photo_optimized.jpg"), "_optimized"));
        assert!(has_marker(Path::new("a_optimized_b.png"), "_optimized"));
        assert!(!has_marker(Path::new("photo.jpg"), "_optimized"));
        // Only the stem counts, not the directory
        assert!(!has_marker(Path::new("x_optimized/photo.jpg"), "_optimized"));
        assert!(!has_marker(Path::new("photo.jpg"), ""));
    }

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(0), "0.0KB");
        assert_eq!(format_kb(1024), "1.0KB");
        assert_eq!(format_kb(1536), "1.5KB");
        assert_eq!(format_kb_mb(5 * 1024 * 1024), "5120.0KB (5.0MB)");
    }

    #[test]
    fn test_calculate_savings_percent() {
        assert_eq!(calculate_savings_percent(1000, 800), 20.0);
        assert_eq!(calculate_savings_percent(1000, 1200), -20.0);
        assert_eq!(calculate_savings_percent(1000, 1000), 0.0);
        assert_eq!(calculate_savings_percent(0, 500), 0.0);
    }
}
