//! golibgen command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod extract;
pub mod golib;

/// Build descriptor generation for a gccgo-compiled Go runtime
#[derive(Parser)]
#[command(name = "golibgen")]
#[command(about = "Extracts Go package descriptors from a gcc build log")]
#[command(version)]
pub struct Cli {
    /// Print executed commands and skipped log lines
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a gcc build log and write the package descriptors
    Extract {
        /// Verbose gcc build log (make V=1 output)
        #[arg(short, long, default_value = "build.log")]
        log: PathBuf,

        /// gcc target build directory
        #[arg(short, long, default_value = "x86_64-pc-linux-gnu")]
        builddir: PathBuf,

        /// Directory receiving the generated descriptors
        #[arg(short, long, default_value = "libgo")]
        output: PathBuf,
    },

    /// Resolve a Go library through `go list` and emit registrations
    Golib {
        /// Output path (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Name of the library
        lib_name: String,

        /// Source directory of the library
        lib_dir: PathBuf,

        /// Entrance *.go files of the library
        #[arg(required = true)]
        files: Vec<String>,
    },
}
