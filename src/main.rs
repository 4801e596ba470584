use clap::Parser;
use std::io;
use std::process::ExitCode;
use web_image_optimizer::cli::Args;
use web_image_optimizer::error;
use web_image_optimizer::logger::{set_quiet_mode, set_verbose_mode};
use web_image_optimizer::{run_optimizer, OptimizeError, RunConfig};

fn main() -> ExitCode {
    let args = Args::parse();
    set_quiet_mode(args.quiet);
    set_verbose_mode(args.verbose);

    let mut stdin = io::stdin().lock();
    let outcome = RunConfig::from_constants().and_then(|config| run_optimizer(&config, &mut stdin));

    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(OptimizeError::Cancelled) => {
            println!("{}", OptimizeError::Cancelled);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
