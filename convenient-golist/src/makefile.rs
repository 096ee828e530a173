// Build-library registration fragment
//
// Turns an import graph into addgolib registrations for the downstream
// makefiles. Every emitted source path is checked on disk before the
// fragment is considered valid: a missing file would silently drop a
// build unit, so it aborts the run instead.

use std::path::Path;

use crate::import_graph::ImportGraph;
use crate::listing::{GoListError, GoListResult};

/// Upper-case a library/import path into a variable prefix
/// ("example.com/left-pad" -> "EXAMPLE_COM_LEFT_PAD")
pub fn golib_ident(name: &str) -> String {
    name.replace(['.', '/', '-'], "_").to_uppercase()
}

/// Emit the registration fragment for every non-standard package in the
/// graph. The entry-point package gets no registration of its own; its
/// direct dependencies are flattened into the caller's unit instead.
pub fn generate_fragment(graph: &ImportGraph, lib_name: &str) -> GoListResult<String> {
    let lib_prefix = golib_ident(lib_name);
    let mut mk = String::new();

    for pkg in graph.packages() {
        // Standard packages ship with the runtime, nothing to register
        if pkg.is_standard() {
            continue;
        }

        if ImportGraph::is_entry(pkg, lib_name) {
            for dep in graph.foreign_deps(pkg) {
                mk.push_str(&format!("{lib_prefix}_DEPS += {dep}\n"));
            }
            continue;
        }

        let import = pkg
            .import_path
            .as_deref()
            .ok_or(GoListError::MissingImportPath)?;
        let prefix = golib_ident(import);

        mk.push_str(&format!("$(eval $(call addgolib,{import}))\n"));

        let dir = pkg.dir.as_deref().unwrap_or("");
        for file in &pkg.go_files {
            let path = Path::new(dir).join(file);
            if !path.exists() {
                return Err(GoListError::MissingSource(path));
            }
            mk.push_str(&format!("{prefix}_SRCS += {}\n", path.display()));
        }
        // TODO: carry CgoFiles once a dependency actually ships C sources

        for dep in graph.foreign_deps(pkg) {
            mk.push_str(&format!("{prefix}_DEPS += {dep}\n"));
        }
    }

    Ok(mk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golib_ident_mangling() {
        assert_eq!(golib_ident("example.com/left-pad"), "EXAMPLE_COM_LEFT_PAD");
        assert_eq!(golib_ident("mylib"), "MYLIB");
    }
}
