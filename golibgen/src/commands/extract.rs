//! Log extraction command
//!
//! Drives the build-log pipeline and writes the five descriptors into
//! the output directory. The generated-file copies are wiped first so a
//! re-run never mixes imports from two different gcc builds.

use std::error::Error;
use std::fs;
use std::path::Path;

use convenient_buildlog::emit;
use convenient_buildlog::{ExtractionConfig, LogExtractor};
use tracing::info;

/// Regeneration hint templated into the descriptor headers
const TOOL_NAME: &str = "golibgen extract";

pub fn execute(log: &Path, builddir: &Path, output: &Path) -> Result<(), Box<dyn Error>> {
    println!("Build log: {}", log.display());
    println!("Build directory: {}", builddir.display());
    println!("Target: {}", output.display());

    let generated_dir = output.join("generated");
    if generated_dir.exists() {
        fs::remove_dir_all(&generated_dir)?;
    }
    fs::create_dir_all(&generated_dir)?;

    let config = ExtractionConfig {
        build_log: log.to_path_buf(),
        build_dir: builddir.to_path_buf(),
        generated_dir,
    };
    let result = LogExtractor::new(config).scan()?;

    println!(
        "Found {} packages and {} native sources (gcc {})",
        result.graph.units.len(),
        result.graph.native_sources().len(),
        result.version
    );

    info!("Writing descriptors to {}", output.display());
    fs::write(
        output.join("packages.uk"),
        emit::emit_rules(&result.graph, &result.version, TOOL_NAME),
    )?;
    fs::write(output.join("sources.uk"), emit::emit_sources(&result.graph))?;
    fs::write(
        output.join("packages_config.uk"),
        emit::emit_config(&result.graph),
    )?;
    fs::write(output.join("packages.idx"), emit::emit_index(&result.graph))?;
    fs::write(
        output.join("Makefile.runtime.uk"),
        emit::emit_runtime(&result.graph, &result.version, TOOL_NAME),
    )?;

    Ok(())
}
