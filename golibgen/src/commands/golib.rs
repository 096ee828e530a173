//! go list resolution command

use std::error::Error;
use std::fs;
use std::path::Path;

use convenient_golist::{ImportGraph, generate_fragment, go_list};
use tracing::info;

pub fn execute(
    out: Option<&Path>,
    lib_name: &str,
    lib_dir: &Path,
    files: &[String],
) -> Result<(), Box<dyn Error>> {
    if !lib_dir.exists() {
        return Err(format!("{} not found", lib_dir.display()).into());
    }

    // Starting from the entrance files, go list reports every package
    // needed to build them, downloading missing dependencies on the way
    info!("Resolving {} through go list", lib_name);
    let packages = go_list(lib_dir, files)?;
    let graph = ImportGraph::new(packages);
    let mk = generate_fragment(&graph, lib_name)?;

    match out {
        Some(path) => fs::write(path, mk)?,
        None => print!("{mk}"),
    }
    Ok(())
}
