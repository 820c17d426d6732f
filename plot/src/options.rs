use clap::{Parser, Subcommand};
use profile::{DEFAULT_SCALE, DEFAULT_WIDTH};
use std::path::PathBuf;

/// A tool for drawing elevation profiles of GPS tracks.
#[derive(Parser, Debug)]
pub struct Cli {
    /// GPX track log.
    pub input: PathBuf,

    /// Target image width, in pixels. The written image may be a few
    /// pixels narrower.
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Empty margin below the curve, in pixels.
    #[arg(long, default_value_t = 0)]
    pub ground: u32,

    /// Empty margin above the curve, in pixels.
    #[arg(long, default_value_t = 0)]
    pub sky: u32,

    /// Multiplier applied to distances measured in coordinate degrees.
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    pub scale: f64,

    /// Stroke a smoothed spline instead of straight segments.
    ///
    /// Not recommended: the spline overshoots between sparse or
    /// unevenly spaced samples.
    #[arg(long)]
    pub curve: bool,

    /// Mark every recorded sample with a vertical line.
    #[arg(long)]
    pub markers: bool,

    /// Draw flat or motionless tracks instead of failing.
    #[arg(long)]
    pub flat_fallback: bool,

    /// Narrate every pipeline stage.
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the log to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the profile to an image file.
    Png {
        /// Image path; the format follows the extension.
        out: PathBuf,

        /// Open the image in the system viewer once written.
        #[arg(long)]
        open: bool,
    },

    /// Print draw points to stdout.
    Display,

    /// Print draw points to stdout as JSON.
    Json,

    /// Plot elevation against distance in the terminal.
    Term,
}
