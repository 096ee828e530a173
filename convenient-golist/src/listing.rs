// go list invocation and output parsing
//
// `go list --json` emits one JSON object per package with no enclosing
// array and no separators. The whole output is buffered, normalized into
// a single array and parsed in one go; nothing is streamed.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of go list resolution operations
pub type GoListResult<T> = Result<T, GoListError>;

/// Errors during go list resolution. All of these abort the run: a
/// partially resolved package set would silently drop build units.
#[derive(Debug, thiserror::Error)]
pub enum GoListError {
    #[error("Failed to run go list: {0}")]
    Spawn(std::io::Error),

    #[error("go list failed ({code}):\n{stderr}")]
    Failed { code: i32, stderr: String },

    #[error("Cannot parse go list output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Package record without ImportPath")]
    MissingImportPath,

    #[error("Source file {0} does not exist")]
    MissingSource(PathBuf),
}

/// One package record from `go list --json`. Every field is optional in
/// the tool's contract; absent lists deserialize as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PackageInfo {
    pub import_path: Option<String>,
    pub standard: Option<bool>,
    pub target: Option<String>,
    pub root: Option<String>,
    pub dir: Option<String>,
    pub go_files: Vec<String>,
    pub deps: Vec<String>,
}

impl PackageInfo {
    /// Whether this record names a standard-library package
    pub fn is_standard(&self) -> bool {
        self.standard.unwrap_or(false)
    }
}

#[derive(Debug, Deserialize)]
struct PackageList {
    packages: Vec<PackageInfo>,
}

/// Parse the concatenated per-package objects into package records by
/// wrapping them into one JSON array first.
pub fn parse_listing(output: &str) -> GoListResult<Vec<PackageInfo>> {
    let json_text = format!("{{ \"packages\" : [{}] }}", output.replace("}\n{", "},{"));
    let list: PackageList = serde_json::from_str(&json_text)?;
    Ok(list.packages)
}

/// Run `go list --json --deps` over the entrance files of a library,
/// blocking until the tool finishes. This implicitly downloads missing
/// dependencies; the tool's stderr is surfaced verbatim on failure.
pub fn go_list(lib_dir: &Path, files: &[String]) -> GoListResult<Vec<PackageInfo>> {
    let mut cmd = Command::new("go");
    cmd.args(["list", "--json", "-a", "--compiler=gccgo", "--deps"])
        .args(files)
        .current_dir(lib_dir)
        .env("LD_LIBRARY_PATH", "/usr/lib64/");
    debug!("{:?}", cmd);

    let output = cmd.output().map_err(GoListError::Spawn)?;
    if !output.status.success() {
        return Err(GoListError::Failed {
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    parse_listing(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "{\n\t\"ImportPath\": \"errors\",\n\t\"Standard\": true,\n\t\"GoFiles\": [\"errors.go\"]\n}\n{\n\t\"ImportPath\": \"example.com/leftpad\",\n\t\"Dir\": \"/home/dev/leftpad\",\n\t\"GoFiles\": [\"leftpad.go\"],\n\t\"Deps\": [\"errors\"]\n}";

    #[test]
    fn test_parse_concatenated_objects() {
        let packages = parse_listing(LISTING).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].import_path.as_deref(), Some("errors"));
        assert!(packages[0].is_standard());
        assert!(!packages[1].is_standard());
        assert_eq!(packages[1].deps, vec!["errors"]);
    }

    #[test]
    fn test_parse_single_object() {
        let packages = parse_listing("{\"ImportPath\": \"bytes\", \"Standard\": true}").unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].import_path.as_deref(), Some("bytes"));
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_listing("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_output_is_fatal() {
        assert!(matches!(
            parse_listing("{\"ImportPath\": "),
            Err(GoListError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let packages =
            parse_listing("{\"ImportPath\": \"fmt\", \"Standard\": true, \"Stale\": false}")
                .unwrap();
        assert_eq!(packages[0].import_path.as_deref(), Some("fmt"));
    }
}
