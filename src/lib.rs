pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod logger;
pub mod processing;
pub mod utils;

pub use batch::{
    collect_image_files, confirm_overwrite, generate_output_path, run_optimizer, RunConfig,
    RunSummary,
};
pub use error::{OptimizeError, Result};
pub use processing::{
    encode_jpeg, fit_within, flatten_transparency, load_image_with_metadata, optimize_image,
    resize_image, OptimizationResult, OptimizeOptions,
};
pub use utils::is_image_file;
