//! Fragment generation tests over an on-disk package layout
//!
//! The listing fixtures mimic `go list --json` output for a small
//! library with one standard and one foreign dependency; the foreign
//! package's sources are laid out in a temporary directory because the
//! generator verifies every emitted path on disk.

use std::fs;

use convenient_golist::{GoListError, ImportGraph, generate_fragment, parse_listing};
use tempfile::TempDir;

fn listing_for(dep_dir: &str) -> String {
    format!(
        "{{\n\t\"ImportPath\": \"errors\",\n\t\"Standard\": true\n}}\n\
         {{\n\t\"ImportPath\": \"example.com/leftpad\",\n\t\"Dir\": \"{dep_dir}\",\n\t\"GoFiles\": [\"leftpad.go\", \"pad.go\"],\n\t\"Deps\": [\"errors\"]\n}}\n\
         {{\n\t\"ImportPath\": \"example.com/app\",\n\t\"Target\": \"/go/bin/app\",\n\t\"Deps\": [\"errors\", \"example.com/leftpad\"]\n}}"
    )
}

#[test]
fn test_fragment_registers_foreign_packages_only() {
    let temp = TempDir::new().unwrap();
    let dep_dir = temp.path().join("leftpad");
    fs::create_dir_all(&dep_dir).unwrap();
    fs::write(dep_dir.join("leftpad.go"), "package leftpad\n").unwrap();
    fs::write(dep_dir.join("pad.go"), "package leftpad\n").unwrap();

    let packages = parse_listing(&listing_for(dep_dir.to_str().unwrap())).unwrap();
    let graph = ImportGraph::new(packages);
    let mk = generate_fragment(&graph, "example.com/app").unwrap();

    // One registration for the foreign dependency, none for the
    // standard package or the entry point
    assert_eq!(mk.matches("$(eval $(call addgolib,").count(), 1);
    assert!(mk.contains("$(eval $(call addgolib,example.com/leftpad))\n"));
    assert!(!mk.contains("addgolib,errors"));
    assert!(!mk.contains("addgolib,example.com/app"));

    // The dependency's own sources and filtered deps
    assert!(mk.contains(&format!(
        "EXAMPLE_COM_LEFTPAD_SRCS += {}\n",
        dep_dir.join("leftpad.go").display()
    )));
    assert!(mk.contains(&format!(
        "EXAMPLE_COM_LEFTPAD_SRCS += {}\n",
        dep_dir.join("pad.go").display()
    )));
    assert!(!mk.contains("EXAMPLE_COM_LEFTPAD_DEPS += errors"));

    // The entry point's deps are flattened into the caller's unit
    assert!(mk.contains("EXAMPLE_COM_APP_DEPS += example.com/leftpad\n"));
    assert!(!mk.contains("EXAMPLE_COM_APP_DEPS += errors"));
}

#[test]
fn test_missing_source_file_is_fatal() {
    let temp = TempDir::new().unwrap();
    let dep_dir = temp.path().join("leftpad");
    fs::create_dir_all(&dep_dir).unwrap();
    fs::write(dep_dir.join("leftpad.go"), "package leftpad\n").unwrap();
    // pad.go is deliberately absent

    let packages = parse_listing(&listing_for(dep_dir.to_str().unwrap())).unwrap();
    let graph = ImportGraph::new(packages);
    let result = generate_fragment(&graph, "example.com/app");

    match result {
        Err(GoListError::MissingSource(path)) => {
            assert!(path.ends_with("pad.go"));
        }
        other => panic!("Expected MissingSource, got {other:?}"),
    }
}

#[test]
fn test_entry_by_import_path_without_target() {
    let listing = "{\"ImportPath\": \"example.com/lib\", \"Deps\": [\"errors\"]}\n\
                   {\"ImportPath\": \"errors\", \"Standard\": true}";
    let packages = parse_listing(listing).unwrap();
    let graph = ImportGraph::new(packages);

    let mk = generate_fragment(&graph, "example.com/lib").unwrap();
    // Only standard deps: the entry contributes nothing at all
    assert!(mk.is_empty());
}

#[test]
fn test_package_without_import_path_is_fatal() {
    let listing = "{\"GoFiles\": [\"orphan.go\"]}";
    let packages = parse_listing(listing).unwrap();
    let graph = ImportGraph::new(packages);

    assert!(matches!(
        generate_fragment(&graph, "example.com/app"),
        Err(GoListError::MissingImportPath)
    ));
}
