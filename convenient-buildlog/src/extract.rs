// Compile-command field extraction
// Pattern scanning over classified lines, not full shell tokenization.
// Zero or multiple hits for a single-valued field are explicit outcomes so
// the skip-on-ambiguity policy stays an auditable branch in the pipeline.

use regex::Regex;

/// Outcome of extracting a single-valued field from a log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction<T> {
    /// Exactly one candidate was found
    One(T),
    /// No candidate was found
    Missing,
    /// More than one candidate was found; carries the count
    Ambiguous(usize),
}

impl<T> Extraction<T> {
    pub fn is_one(&self) -> bool {
        matches!(self, Extraction::One(_))
    }
}

/// Extracts object paths, source lists and flags from compile lines
pub struct CommandExtractor {
    /// Match: " -o <path>"
    out: Regex,
    /// Match: " <path>.go"
    go_src: Regex,
    /// Match: "-c <path>.S" or "-c <path>.c"
    native_src: Regex,
    /// Match: " -fgo-<...>"
    go_flag: Regex,
}

impl Default for CommandExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExtractor {
    pub fn new() -> Self {
        Self {
            out: Regex::new(r"\s-o\s([a-z0-9_/\-.]+)").unwrap(),
            go_src: Regex::new(r"\s([a-z0-9_/\-.]+\.go)").unwrap(),
            native_src: Regex::new(r"-c\s([a-z0-9_/\-.]+\.(?:S|c))").unwrap(),
            go_flag: Regex::new(r"\s(-fgo-[a-z0-9_/\-.=]+)").unwrap(),
        }
    }

    /// The single output object of the command line
    pub fn object(&self, line: &str) -> Extraction<String> {
        single(&self.out, line)
    }

    /// The single native source of a -c compile
    pub fn native_source(&self, line: &str) -> Extraction<String> {
        single(&self.native_src, line)
    }

    /// All Go source paths on the line, in order of appearance
    pub fn go_sources(&self, line: &str) -> Vec<String> {
        self.go_src
            .captures_iter(line)
            .map(|c| c[1].to_string())
            .collect()
    }

    /// Extra -fgo- flags. The pkgpath flag is dropped: the emitted build
    /// command reconstructs it from the object name instead.
    pub fn flags(&self, line: &str) -> Vec<String> {
        self.go_flag
            .captures_iter(line)
            .map(|c| c[1].to_string())
            .filter(|flag| !flag.starts_with("-fgo-pkgpath"))
            .collect()
    }
}

fn single(re: &Regex, line: &str) -> Extraction<String> {
    let mut matches = re.captures_iter(line).map(|c| c[1].to_string());
    let first = match matches.next() {
        Some(m) => m,
        None => return Extraction::Missing,
    };
    let rest = matches.count();
    if rest > 0 {
        return Extraction::Ambiguous(rest + 1);
    }
    Extraction::One(first)
}
