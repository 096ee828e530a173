//! go list based dependency resolution
//!
//! Invokes `go list --json --deps` over a library's entrance files and
//! turns the resulting package records into build-library registrations
//! for the downstream makefiles. Standard packages are already part of
//! the compiled runtime and are skipped; the entry-point package only
//! contributes its direct dependencies to the caller's own unit.

pub mod import_graph;
pub mod listing;
pub mod makefile;

pub use import_graph::ImportGraph;
pub use listing::{GoListError, GoListResult, PackageInfo, go_list, parse_listing};
pub use makefile::{generate_fragment, golib_ident};
