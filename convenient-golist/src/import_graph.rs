// Import graph over go list package records
//
// Built once per invocation from the buffered listing, read-only
// afterwards. Standard packages are part of the base runtime and never
// get their own registration; the entry-point package contributes only
// its direct dependencies to the caller's unit.

use crate::listing::PackageInfo;

/// Import path go list reports for file-level entry points
pub const COMMAND_LINE_PACKAGE: &str = "command-line-arguments";

/// Read-only view over the packages reported by go list
#[derive(Debug, Clone, Default)]
pub struct ImportGraph {
    packages: Vec<PackageInfo>,
}

impl ImportGraph {
    pub fn new(packages: Vec<PackageInfo>) -> Self {
        Self { packages }
    }

    /// All package records in listing order
    pub fn packages(&self) -> &[PackageInfo] {
        &self.packages
    }

    /// Whether an import path names a standard-library package.
    /// Unlisted imports are not standard.
    pub fn is_standard(&self, import: &str) -> bool {
        self.packages
            .iter()
            .any(|p| p.import_path.as_deref() == Some(import) && p.is_standard())
    }

    /// Whether a record is the entry-point package the caller asked
    /// about: it carries a build target, or its import path is the
    /// requested library itself or go list's file-level placeholder.
    pub fn is_entry(pkg: &PackageInfo, lib_name: &str) -> bool {
        pkg.target.is_some()
            || matches!(
                pkg.import_path.as_deref(),
                Some(p) if p == lib_name || p == COMMAND_LINE_PACKAGE
            )
    }

    /// Direct non-standard dependencies of a package, in listing order
    pub fn foreign_deps<'a>(&self, pkg: &'a PackageInfo) -> Vec<&'a str> {
        pkg.deps
            .iter()
            .map(String::as_str)
            .filter(|dep| !self.is_standard(dep))
            .collect()
    }
}
