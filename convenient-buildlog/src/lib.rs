//! Build-log package extraction for a gccgo-compiled Go runtime
//!
//! Scans the verbose build log of a gcc `--enable-languages=go` build,
//! reconstructs the package dependency graph from the per-object
//! `*.lo.dep` files and emits the descriptors the downstream unikernel
//! build consumes: the package rule makefile, the native source list,
//! the Kconfig package toggles and the flat dependency index.
//!
//! The scan is a single forward pass. Lines that do not match one of the
//! two recognized compile shapes, or that match ambiguously, are skipped:
//! only unambiguous compiles are safe to turn into build rules.

pub mod classify;
pub mod depfile;
pub mod emit;
pub mod error;
pub mod extract;
pub mod graph;
pub mod pipeline;
pub mod resolve;

pub use classify::{LineClassifier, LineKind};
pub use error::{BuildlogError, BuildlogResult};
pub use extract::{CommandExtractor, Extraction};
pub use graph::{BuildUnit, PackageGraph};
pub use pipeline::{ExtractionConfig, LogExtractor, ScanResult};
pub use resolve::{ResolvedSource, SourceResolver, UNKNOWN_VERSION};
