// Source path resolution for Go compile lines
//
// Three path shapes come out of the build log: paths below the extracted
// source tree (rewritten relative to the tree), bare filenames produced by
// the toolchain into its own build directory (copied next to the emitted
// descriptors), and everything else (warned about and dropped).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{BuildlogError, BuildlogResult};

/// Marker separating the build prefix from the extracted source tree
pub const EXTRACTED_MARKER: &str = "/libgo/";

/// Generated file carrying the gcc version literal
pub const BUILDCFG_FILE: &str = "buildcfg.go";

/// Version substituted into headers when buildcfg.go never shows up
pub const UNKNOWN_VERSION: &str = "unknown";

/// Where a Go source path resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedSource {
    /// Path below the extracted source tree, relative to the marker
    Extracted(String),
    /// Toolchain-generated file, copied next to the descriptors
    Generated(String),
}

/// Resolves extracted source paths and imports generated files
pub struct SourceResolver {
    build_dir: PathBuf,
    generated_dir: PathBuf,
    version: Option<String>,
}

impl SourceResolver {
    pub fn new(build_dir: impl Into<PathBuf>, generated_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
            generated_dir: generated_dir.into(),
            version: None,
        }
    }

    /// Resolve one source path from a Go compile line. Returns `None` for
    /// paths that belong to neither the extracted tree nor the generated
    /// set; a single bad reference must not fail the whole run.
    pub fn resolve(&mut self, source: &str) -> BuildlogResult<Option<ResolvedSource>> {
        if let Some(p) = source.find(EXTRACTED_MARKER) {
            let rest = &source[p + EXTRACTED_MARKER.len()..];
            return Ok(Some(ResolvedSource::Extracted(rest.to_string())));
        }

        // A bare filename is one of the files the toolchain generates into
        // its own build directory. Import a copy so the descriptors stay
        // usable after the gcc build tree is gone.
        if !source.contains('/') {
            info!("Importing generated file \"{}\"", source);
            let path = self.build_dir.join("libgo").join(source);

            if source == BUILDCFG_FILE && self.version.is_none() {
                self.version = extract_version_from_buildcfg(&path);
            }

            fs::copy(&path, self.generated_dir.join(source)).map_err(|e| {
                BuildlogError::GeneratedImport {
                    path: path.clone(),
                    source: e,
                }
            })?;
            return Ok(Some(ResolvedSource::Generated(source.to_string())));
        }

        warn!("\"{}\" has unknown path. Ignoring.", source);
        Ok(None)
    }

    /// The version extracted from buildcfg.go, or the fixed placeholder
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(UNKNOWN_VERSION)
    }
}

/// Pull the version literal out of buildcfg.go. The file declares it as a
/// single line of the form `const version = "<value>"`. A missing file or
/// missing declaration yields `None`, never an error.
pub fn extract_version_from_buildcfg(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("const version = ") {
            let rest = rest.trim_end().trim_end_matches(';');
            if let Some(value) = rest.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
                return Some(value.to_string());
            }
        }
    }
    None
}
