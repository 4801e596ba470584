use crate::constants::{
    CONFIRMATION_ANSWER, DEFAULT_QUALITY, MAX_HEIGHT, MAX_WIDTH, MEDIA_FOLDER, OUTPUT_SUFFIX,
    SEPARATOR_WIDTH,
};
use crate::error::{OptimizeError, Result};
use crate::processing::{optimize_image, OptimizationResult, OptimizeOptions};
use crate::utils::{
    bytes_to_mb, calculate_savings_percent, create_progress_spinner, format_kb, format_kb_mb,
    has_marker, is_image_file,
};
use crate::{file_error, info, warn};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Everything a run needs: where to look, how to name outputs and how to encode.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub media_dir: PathBuf,
    /// Marker appended to output stems; empty means overwrite in place.
    pub output_suffix: String,
    pub options: OptimizeOptions,
}

impl RunConfig {
    /// Builds the run from the build-time constants, validating quality and bounds.
    pub fn from_constants() -> Result<Self> {
        Ok(Self {
            media_dir: PathBuf::from(MEDIA_FOLDER),
            output_suffix: OUTPUT_SUFFIX.to_string(),
            options: OptimizeOptions::new(
                Some(DEFAULT_QUALITY),
                Some(MAX_WIDTH),
                Some(MAX_HEIGHT),
            )?,
        })
    }

    pub fn overwrites_in_place(&self) -> bool {
        self.output_suffix.is_empty()
    }
}

/// Running totals for one invocation. Failed files count as attempted only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub total_original: u64,
    pub total_optimized: u64,
}

impl RunSummary {
    pub fn record_success(&mut self, result: &OptimizationResult) {
        self.attempted += 1;
        self.succeeded += 1;
        self.total_original += result.original_size;
        self.total_optimized += result.optimized_size;
    }

    pub fn record_failure(&mut self) {
        self.attempted += 1;
    }

    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }

    pub fn savings_percent(&self) -> f64 {
        calculate_savings_percent(self.total_original, self.total_optimized)
    }
}

/// Optimizes every qualifying image in `config.media_dir`, one at a time.
///
/// # Arguments
/// * `config` - Target folder, suffix policy and encoder options
/// * `confirmation` - Source of the yes/no answer when overwriting in place
///
/// # Returns
/// * `Ok(RunSummary)` - Totals, including runs where some files failed
/// * `Err(OptimizeError)` - Missing folder, no images, or a declined overwrite
pub fn run_optimizer<R: BufRead>(config: &RunConfig, confirmation: &mut R) -> Result<RunSummary> {
    info!("🎨 Web Image Optimizer\n");
    info!("{}", "=".repeat(SEPARATOR_WIDTH));

    let image_files = collect_image_files(&config.media_dir, &config.output_suffix)?;
    let total_files = image_files.len();

    info!("📁 Found {} images to optimize\n", total_files);

    if config.overwrites_in_place() {
        if !confirm_overwrite(confirmation)? {
            return Err(OptimizeError::Cancelled);
        }
    } else {
        info!(
            "ℹ️  Optimized images will be saved with '{}' suffix",
            config.output_suffix
        );
        info!("   Original images will be kept unchanged\n");
    }

    let mut summary = RunSummary::default();

    for (index, input_path) in image_files.iter().enumerate() {
        let file_name = input_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("\n[{}/{}] Processing: {}", index + 1, total_files, file_name);

        match process_single_image(input_path, config) {
            Ok(result) => {
                print_file_result(&result);
                summary.record_success(&result);
            }
            Err(e) => {
                file_error!("{}", e);
                summary.record_failure();
            }
        }
    }

    print_summary(&summary, config);

    Ok(summary)
}

/// Lists the images directly inside `dir`, sorted by file name.
///
/// Files whose stem contains `marker` are skipped so earlier outputs are not
/// optimized twice.
pub fn collect_image_files(dir: &Path, marker: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(OptimizeError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut image_files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && is_image_file(path) && !has_marker(path, marker) {
            image_files.push(path.to_path_buf());
        }
    }

    if image_files.is_empty() {
        return Err(OptimizeError::NoImageFilesFound(dir.to_path_buf()));
    }

    Ok(image_files)
}

/// `photo.jpg` + `_optimized` -> `photo_optimized.jpg` in the same folder.
/// An empty suffix returns the input path itself.
pub fn generate_output_path(input_path: &Path, suffix: &str) -> Result<PathBuf> {
    if suffix.is_empty() {
        return Ok(input_path.to_path_buf());
    }

    let file_stem = input_path
        .file_stem()
        .ok_or_else(|| OptimizeError::InvalidFileName(input_path.to_path_buf()))?;

    let mut output_name = file_stem.to_os_string();
    output_name.push(suffix);
    if let Some(extension) = input_path.extension() {
        output_name.push(".");
        output_name.push(extension);
    }

    Ok(input_path.with_file_name(output_name))
}

/// Asks before overwriting originals. Only `yes` (any case) proceeds; EOF declines.
pub fn confirm_overwrite<R: BufRead>(reader: &mut R) -> Result<bool> {
    print!(
        "⚠️  WARNING: This will overwrite your original images!\n   \
         Make sure you have backups!\n   \
         Continue? (yes/no): "
    );
    io::stdout().flush()?;

    let mut answer = String::new();
    reader.read_line(&mut answer)?;

    Ok(answer.trim().eq_ignore_ascii_case(CONFIRMATION_ANSWER))
}

fn process_single_image(input_path: &Path, config: &RunConfig) -> Result<OptimizationResult> {
    let output_path = generate_output_path(input_path, &config.output_suffix)?;

    let spinner = create_progress_spinner("Optimizing...");
    let result = optimize_image(input_path, &output_path, &config.options);
    spinner.finish_and_clear();

    result
}

fn print_file_result(result: &OptimizationResult) {
    let (original_width, original_height) = result.original_dimensions;
    let (width, height) = result.final_dimensions;

    if result.resized() {
        info!(
            "  ↔️  Resized from {}×{} to {}×{}",
            original_width, original_height, width, height
        );
    } else {
        info!("  ↔️  Kept original size: {}×{}", width, height);
    }

    info!(
        "  💾 Original: {} → Optimized: {}",
        format_kb(result.original_size),
        format_kb(result.optimized_size)
    );
    info!(
        "  ✨ Saved: {:.1}% ({:.1}KB)",
        result.savings_percent(),
        result.saved_bytes() as f64 / 1024.0
    );

    if result.saved_bytes() < 0 {
        warn!("Optimized file is larger than the original");
    }
}

fn print_summary(summary: &RunSummary, config: &RunConfig) {
    info!("\n{}", "=".repeat(SEPARATOR_WIDTH));
    info!("✅ Optimization Complete!\n");
    info!("📊 Summary:");
    info!(
        "   • Successfully optimized: {}/{} images",
        summary.succeeded, summary.attempted
    );
    if summary.failed() > 0 {
        info!("   • Failed: {} (see errors above)", summary.failed());
    }
    info!(
        "   • Total original size: {}",
        format_kb_mb(summary.total_original)
    );
    info!(
        "   • Total optimized size: {}",
        format_kb_mb(summary.total_optimized)
    );

    if summary.total_original > 0 {
        info!(
            "   • Total savings: {:.1}% ({:.1}MB)",
            summary.savings_percent(),
            bytes_to_mb(summary.total_original) - bytes_to_mb(summary.total_optimized)
        );
    }

    info!("\n🚀 Your images are now optimized for the web!");

    if !config.overwrites_in_place() {
        let suffix = &config.output_suffix;
        info!("\nℹ️  Next steps:");
        info!(
            "   1. Review the optimized images (they have '{}' in the name)",
            suffix
        );
        info!("   2. If satisfied, rename them to remove '{}'", suffix);
        info!("   3. Delete the original large images");
        info!("   4. Update any pages that reference them if needed");
    }
}
