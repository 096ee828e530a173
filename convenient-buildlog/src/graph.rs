// Package graph assembly
//
// Flat accumulation of build units and native sources over one log scan.
// Units keep log-appearance order; sorted views are derived at emission
// time so output stays deterministic.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::resolve::ResolvedSource;

/// Suffix appended to the path of a native source whose basename is
/// already taken. Both entries keep resolving to the same file on disk,
/// but the build rules they generate stay distinguishable.
pub const COLLISION_TAG: &str = "|libgo";

/// One compiled Go package object with its build metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildUnit {
    /// Object path relative to the build tree ("bar/baz.o")
    pub object: String,
    /// Resolved source references in log order, deduplicated
    pub sources: Vec<ResolvedSource>,
    /// Direct dependencies as object paths, taken from the dep file
    pub deps: Vec<String>,
    /// Extra compile flags for this unit
    pub flags: Vec<String>,
}

impl BuildUnit {
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            sources: Vec::new(),
            deps: Vec::new(),
            flags: Vec::new(),
        }
    }

    /// Package name: the object path without its ".o" suffix
    pub fn name(&self) -> &str {
        self.object.strip_suffix(".o").unwrap_or(&self.object)
    }

    /// Record a resolved source, dropping repeats
    pub fn add_source(&mut self, source: ResolvedSource) {
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
    }
}

/// Whole-run accumulation of build units and native sources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageGraph {
    /// Units in log-appearance order
    pub units: Vec<BuildUnit>,
    native_sources: Vec<String>,
    #[serde(skip)]
    native_basenames: HashSet<String>,
}

impl PackageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unit(&mut self, unit: BuildUnit) {
        self.units.push(unit);
    }

    pub fn unit(&self, object: &str) -> Option<&BuildUnit> {
        self.units.iter().find(|u| u.object == object)
    }

    /// Record a native source path. The second and subsequent sources
    /// sharing a basename are tagged so their build rules stay unique.
    pub fn add_native_source(&mut self, path: &str) {
        let base = basename(path).to_string();
        if self.native_basenames.insert(base) {
            self.native_sources.push(path.to_string());
        } else {
            warn!("Duplicate base name for \"{}\", tagging", path);
            self.native_sources.push(format!("{path}{COLLISION_TAG}"));
        }
    }

    /// Native sources in log-appearance order
    pub fn native_sources(&self) -> &[String] {
        &self.native_sources
    }

    /// Sorted copy of the native sources for emission
    pub fn sorted_native_sources(&self) -> Vec<String> {
        let mut sources = self.native_sources.clone();
        sources.sort();
        sources
    }

    /// Package name -> direct dependency names, sorted by package name.
    /// Dependency order within a unit follows the dep file.
    pub fn dependency_index(&self) -> BTreeMap<&str, Vec<&str>> {
        self.units
            .iter()
            .map(|unit| {
                let deps = unit
                    .deps
                    .iter()
                    .map(|d| d.strip_suffix(".o").unwrap_or(d))
                    .collect();
                (unit.name(), deps)
            })
            .collect()
    }

    /// Units with an empty dependency set. Valid leaves, not errors:
    /// a package nothing else pulls in is simply optional.
    pub fn leaf_units(&self) -> Vec<&BuildUnit> {
        self.units.iter().filter(|u| u.deps.is_empty()).collect()
    }

    /// Post-scan reporting: announce the optional packages
    pub fn finalize(&self) {
        for unit in self.leaf_units() {
            info!("\"{}\" is an optional package", unit.name());
        }
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_name_strips_object_suffix() {
        assert_eq!(BuildUnit::new("bar/baz.o").name(), "bar/baz");
    }

    #[test]
    fn test_unit_sources_deduplicate() {
        let mut unit = BuildUnit::new("bufio.o");
        unit.add_source(ResolvedSource::Extracted("go/bufio/bufio.go".to_string()));
        unit.add_source(ResolvedSource::Extracted("go/bufio/bufio.go".to_string()));
        assert_eq!(unit.sources.len(), 1);
    }

    #[test]
    fn test_native_source_collision_is_tagged() {
        let mut graph = PackageGraph::new();
        graph.add_native_source("runtime/util.c");
        graph.add_native_source("other/util.c");
        graph.add_native_source("runtime/main.c");
        assert_eq!(
            graph.native_sources(),
            &["runtime/util.c", "other/util.c|libgo", "runtime/main.c"]
        );
    }

    #[test]
    fn test_native_source_collision_is_order_stable() {
        let feed = ["a/util.c", "b/util.c", "c/util.c", "a/other.c"];
        let run = || {
            let mut graph = PackageGraph::new();
            for path in feed {
                graph.add_native_source(path);
            }
            graph.native_sources().to_vec()
        };
        assert_eq!(run(), run());
        assert_eq!(run()[1], "b/util.c|libgo");
        assert_eq!(run()[2], "c/util.c|libgo");
    }

    #[test]
    fn test_dependency_index_strips_suffixes_and_sorts() {
        let mut graph = PackageGraph::new();
        let mut b = BuildUnit::new("zlib.o");
        b.deps = vec!["runtime.o".to_string()];
        graph.add_unit(b);
        let mut a = BuildUnit::new("bar/baz.o");
        a.deps = vec!["qux.o".to_string()];
        graph.add_unit(a);

        let index = graph.dependency_index();
        let entries: Vec<_> = index.into_iter().collect();
        assert_eq!(
            entries,
            vec![("bar/baz", vec!["qux"]), ("zlib", vec!["runtime"])]
        );
    }

    #[test]
    fn test_leaf_units_have_no_deps() {
        let mut graph = PackageGraph::new();
        graph.add_unit(BuildUnit::new("errors.o"));
        let mut b = BuildUnit::new("bufio.o");
        b.deps = vec!["errors.o".to_string()];
        graph.add_unit(b);

        let leaves = graph.leaf_units();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].object, "errors.o");
    }
}
