use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "optimize-images",
    about = "Resize and recompress the images in ./media for the web",
    long_about = "optimize-images scans the ./media folder for JPEG, PNG and WebP files, \
                  flattens transparency onto white, shrinks anything larger than 1920x1920 \
                  and re-encodes it as a quality 85 progressive JPEG. Optimized copies are \
                  written next to the originals with an '_optimized' suffix.",
    version,
    after_help = "EXAMPLES:\n  \
    optimize-images\n  \
    optimize-images --verbose\n  \
    optimize-images --quiet"
)]
pub struct Args {
    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Only print errors",
        long_help = "Suppress progress and summary output. Errors and the overwrite \
                     confirmation prompt are still shown."
    )]
    pub quiet: bool,

    #[arg(
        short = 'v',
        long,
        help = "Print decoder and encoder details for every file"
    )]
    pub verbose: bool,
}
