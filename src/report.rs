//! Findings and their grouping into a scan result.

use std::fmt;
use std::path::{Path, PathBuf};

/// How actionable a file is for a device scanner. Every scanned file gets exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Audio or correctly named cover art
    Allowed,
    /// Safe to delete
    Junk,
    /// Sometimes confuses players; optional to delete
    Maybe,
    /// No rule matched
    Unknown,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Allowed,
        Category::Junk,
        Category::Maybe,
        Category::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Allowed => "allowed",
            Category::Junk => "junk",
            Category::Maybe => "maybe",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A path plus the human-readable reason it was reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub path: PathBuf,
    pub reason: String,
}

impl Finding {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Finding {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The finding's path relative to `root`, or the full path if it lies outside it
    pub fn display_path<'a>(&'a self, root: &Path) -> &'a Path {
        self.path.strip_prefix(root).unwrap_or(&self.path)
    }
}

/// Everything one scan found, grouped for reporting.
/// Each sequence keeps scan-encounter order. Read-only outside the crate once built.
#[derive(Debug, Default)]
pub struct ScanResult {
    root: PathBuf,
    allowed: Vec<Finding>,
    junk: Vec<Finding>,
    maybe: Vec<Finding>,
    unknown: Vec<Finding>,
    issues: Vec<Finding>,
    junk_dirs: Vec<PathBuf>,
    files_scanned: usize,
    interrupted: bool,
}

impl ScanResult {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ScanResult {
            root: root.into(),
            ..Default::default()
        }
    }

    /// The canonical folder that was scanned
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn issues(&self) -> &[Finding] {
        &self.issues
    }

    pub fn junk_dirs(&self) -> &[PathBuf] {
        &self.junk_dirs
    }

    /// Regular files classified, one per category finding
    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    /// True when the walk was cancelled before visiting every entry
    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn bucket(&self, category: Category) -> &[Finding] {
        match category {
            Category::Allowed => &self.allowed,
            Category::Junk => &self.junk,
            Category::Maybe => &self.maybe,
            Category::Unknown => &self.unknown,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<Finding> {
        match category {
            Category::Allowed => &mut self.allowed,
            Category::Junk => &mut self.junk,
            Category::Maybe => &mut self.maybe,
            Category::Unknown => &mut self.unknown,
        }
    }

    /// Record the single category finding for one file
    pub fn record(&mut self, category: Category, finding: Finding) {
        self.files_scanned += 1;
        self.bucket_mut(category).push(finding);
    }

    pub fn record_issue(&mut self, finding: Finding) {
        self.issues.push(finding);
    }

    pub fn record_junk_dir(&mut self, path: PathBuf) {
        self.junk_dirs.push(path);
    }

    pub(crate) fn mark_interrupted(&mut self) {
        self.interrupted = true;
    }

    pub fn count(&self, category: Category) -> usize {
        self.bucket(category).len()
    }

    /// Append a partial result (e.g. from another walker) after this one's entries
    pub fn merge(&mut self, other: ScanResult) {
        self.allowed.extend(other.allowed);
        self.junk.extend(other.junk);
        self.maybe.extend(other.maybe);
        self.unknown.extend(other.unknown);
        self.issues.extend(other.issues);
        self.junk_dirs.extend(other.junk_dirs);
        self.files_scanned += other.files_scanned;
        self.interrupted |= other.interrupted;
    }
}
