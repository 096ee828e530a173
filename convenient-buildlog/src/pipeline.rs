// The single forward pass over the build log
//
// classifier -> extractor -> resolver / dep file -> graph. The log is
// scanned top to bottom exactly once; there is no backtracking and no
// state outside the graph handed back to the caller.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::classify::{LineClassifier, LineKind};
use crate::depfile;
use crate::error::BuildlogResult;
use crate::extract::{CommandExtractor, Extraction};
use crate::graph::{BuildUnit, PackageGraph};
use crate::resolve::{EXTRACTED_MARKER, SourceResolver};

/// Object prefix of the toolchain's own helper binaries. Those compiles
/// show up in the log like any package but are irrelevant downstream.
const CMD_PREFIX: &str = "cmd/";

/// Where the pipeline finds its inputs and leaves its copies
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Verbose gcc build log (make V=1 output)
    pub build_log: PathBuf,
    /// gcc target build directory (e.g. "x86_64-pc-linux-gnu")
    pub build_dir: PathBuf,
    /// Directory receiving copies of toolchain-generated sources
    pub generated_dir: PathBuf,
}

/// Everything one scan produces
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub graph: PackageGraph,
    /// gcc version from buildcfg.go, or the fixed placeholder
    pub version: String,
}

/// Drives one scan of the build log into a package graph
pub struct LogExtractor {
    config: ExtractionConfig,
    classifier: LineClassifier,
    extractor: CommandExtractor,
}

impl LogExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            classifier: LineClassifier::new(),
            extractor: CommandExtractor::new(),
        }
    }

    /// Scan the whole build log. Skipped lines are a matter of policy,
    /// not errors; IO problems and unreadable dep files abort the run.
    pub fn scan(&self) -> BuildlogResult<ScanResult> {
        let file = File::open(&self.config.build_log)?;
        let mut resolver = SourceResolver::new(&self.config.build_dir, &self.config.generated_dir);
        let mut graph = PackageGraph::new();

        for line in BufReader::new(file).lines() {
            let line = line?;
            match self.classifier.classify(&line) {
                Some(LineKind::NativeCompile) => self.scan_native(&line, &mut graph),
                Some(LineKind::GoCompile) => self.scan_go(&line, &mut resolver, &mut graph)?,
                None => {}
            }
        }

        graph.finalize();
        Ok(ScanResult {
            graph,
            version: resolver.version().to_string(),
        })
    }

    fn scan_native(&self, line: &str, graph: &mut PackageGraph) {
        let source = match self.extractor.native_source(line) {
            Extraction::One(source) => source,
            Extraction::Missing => return,
            Extraction::Ambiguous(count) => {
                debug!("Skipping native compile with {} source candidates", count);
                return;
            }
        };

        // Only sources below the extracted tree are linkable downstream
        let Some(p) = source.find(EXTRACTED_MARKER) else {
            return;
        };
        graph.add_native_source(&source[p + EXTRACTED_MARKER.len()..]);
    }

    fn scan_go(
        &self,
        line: &str,
        resolver: &mut SourceResolver,
        graph: &mut PackageGraph,
    ) -> BuildlogResult<()> {
        let line = self.classifier.strip_go_invocation(line);

        let object = match self.extractor.object(line) {
            Extraction::One(object) => object,
            Extraction::Missing => return Ok(()),
            Extraction::Ambiguous(count) => {
                debug!("Skipping Go compile with {} output candidates", count);
                return Ok(());
            }
        };

        // Helper binaries for the toolchain itself
        if object.starts_with(CMD_PREFIX) {
            return Ok(());
        }
        if !object.ends_with(".o") {
            return Ok(());
        }

        let log_sources = self.extractor.go_sources(line);
        let dep_path = depfile::dep_file_path(&self.config.build_dir, &object);
        let dep_file = depfile::read_dep_file(&dep_path)?;
        depfile::reconcile(
            object.strip_suffix(".o").unwrap_or(&object),
            &log_sources,
            &dep_file,
        );

        let mut unit = BuildUnit::new(object.as_str());
        unit.deps = dep_file.deps;
        for source in &log_sources {
            if let Some(resolved) = resolver.resolve(source)? {
                unit.add_source(resolved);
            }
        }
        unit.flags = self.extractor.flags(line);
        if !unit.flags.is_empty() {
            info!(
                "Using additional flags \"{}\" for \"{}\"",
                unit.flags.join(" "),
                unit.object
            );
        }

        graph.add_unit(unit);
        Ok(())
    }
}
