//! golibgen - build descriptor generation for a gccgo-compiled Go runtime
//!
//! Two modes of operation:
//! - `extract`: scan a verbose gcc build log and emit the package
//!   descriptors (packages.uk, sources.uk, packages_config.uk,
//!   packages.idx, Makefile.runtime.uk)
//! - `golib`: resolve a Go library's dependencies through `go list` and
//!   emit build-library registrations

mod commands;

use clap::Parser;
use commands::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "golibgen=debug,convenient_buildlog=debug,convenient_golist=debug"
    } else {
        "golibgen=info,convenient_buildlog=info,convenient_golist=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = match &cli.command {
        Commands::Extract {
            log,
            builddir,
            output,
        } => commands::extract::execute(log, builddir, output),
        Commands::Golib {
            out,
            lib_name,
            lib_dir,
            files,
        } => commands::golib::execute(out.as_deref(), lib_name, lib_dir, files),
    };

    if let Err(e) = result {
        eprintln!("golibgen: {e}");
        std::process::exit(1);
    }
}
