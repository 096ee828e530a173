// Per-object dependency file parsing
//
// For every package object the gcc build leaves a *.lo.dep file containing
// one line of whitespace-separated tokens. Tokens ending in .gox name the
// export files of the packages this object depends on; they are the
// authoritative source for the dependency graph. The remaining tokens are
// source references and only serve as a cross-check against the build log.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{BuildlogError, BuildlogResult};

/// Export-file suffix marking a dependency edge
pub const EXPORT_SUFFIX: &str = ".gox";

/// Parsed contents of one *.lo.dep file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepFile {
    /// Direct dependencies as object paths ("runtime.o")
    pub deps: Vec<String>,
    /// Non-.gox tokens: the source references recorded by the toolchain
    pub sources: Vec<String>,
}

/// Divergence between the log line and the dep file for one unit.
/// Both inputs are generated independently by the gcc build, so they can
/// drift apart; neither direction blocks processing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Dep-file source tokens the log line never mentioned
    pub missing_in_log: Vec<String>,
    /// Log-derived sources the dep file never mentioned
    pub missing_in_dep: Vec<String>,
}

/// Dep file paired with an object: "bar/baz.o" -> "<build>/libgo/bar/baz.lo.dep"
pub fn dep_file_path(build_dir: &Path, object: &str) -> PathBuf {
    // The extractor guarantees the object ends in ".o"
    let stem = &object[..object.len() - 1];
    build_dir.join("libgo").join(format!("{stem}lo.dep"))
}

/// Read and split one dep file. The first token is the rule target itself
/// and is skipped.
pub fn read_dep_file(path: &Path) -> BuildlogResult<DepFile> {
    let content = fs::read_to_string(path).map_err(|e| BuildlogError::DepFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    let line = content.lines().next().unwrap_or("").trim();

    let mut dep_file = DepFile::default();
    for token in line.split_whitespace().skip(1) {
        if let Some(stem) = token.strip_suffix(EXPORT_SUFFIX) {
            dep_file.deps.push(format!("{stem}.o"));
        } else {
            dep_file.sources.push(token.to_string());
        }
    }
    Ok(dep_file)
}

/// Cross-check the log-derived source list against the dep-file tokens,
/// warning in both directions. Dep-file tokens absent from the log are
/// treated as dependency-only references and never promoted to sources.
pub fn reconcile(package: &str, log_sources: &[String], dep_file: &DepFile) -> Reconciliation {
    let mut result = Reconciliation::default();

    for token in &dep_file.sources {
        if !log_sources.iter().any(|s| s == token) {
            warn!("{} not found in build log for package {}", token, package);
            result.missing_in_log.push(token.clone());
        }
    }

    for source in log_sources {
        if !dep_file.sources.iter().any(|t| t == source) {
            result.missing_in_dep.push(source.clone());
        }
    }
    if !result.missing_in_dep.is_empty() {
        warn!("Additional sources in build log for package {}", package);
    }

    result
}
