// Build-log line classification
// Only two line shapes matter: gccgo package compiles and xgcc compiles
// of native sources under the libgo tree

use regex::Regex;

/// How a single build-log line is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// gccgo compile producing a package object
    GoCompile,
    /// xgcc compile of a C or assembly file under the libgo tree
    NativeCompile,
}

/// Classifies raw build-log lines
pub struct LineClassifier {
    /// Match: libtool: compile: ... gccgo ...
    go_compile: Regex,
    /// Match: libtool: compile: ... xgcc ... /libgo/ ...
    native_compile: Regex,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LineClassifier {
    pub fn new() -> Self {
        Self {
            go_compile: Regex::new(r"^libtool: compile:.*gccgo\s").unwrap(),
            native_compile: Regex::new(r"^libtool: compile:.*xgcc.*/libgo/").unwrap(),
        }
    }

    /// Classify one log line. The -fPIC variant of a compile is never
    /// selected, whatever else the line matches: the static package build
    /// must not pick up the shared-library object.
    pub fn classify(&self, line: &str) -> Option<LineKind> {
        if line.contains("-fPIC") {
            return None;
        }
        if self.native_compile.is_match(line) {
            return Some(LineKind::NativeCompile);
        }
        if self.go_compile.is_match(line) {
            return Some(LineKind::GoCompile);
        }
        None
    }

    /// Strip everything up to and including the gccgo invocation so that
    /// field extraction never picks tokens out of the driver path itself.
    pub fn strip_go_invocation<'a>(&self, line: &'a str) -> &'a str {
        match self.go_compile.find(line) {
            Some(m) => &line[m.end()..],
            None => line,
        }
    }
}
