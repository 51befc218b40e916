//! Choosing which files to delete from a finished scan.

use crate::error::SelectionError;
use crate::report::{Category, ScanResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How much to delete. Levels are ordered from conservative to aggressive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Aggressiveness {
    /// Delete junk files only (recommended)
    #[value(name = "junk")]
    JunkOnly,
    /// Delete junk and potentially problematic files
    #[value(name = "junk-maybe")]
    JunkAndMaybe,
    /// Delete junk, potentially problematic and unknown files
    #[value(name = "all")]
    JunkMaybeAndUnknown,
    /// Delete nothing
    #[value(name = "report")]
    ReportOnly,
}

impl Aggressiveness {
    /// Categories this level deletes, in plan order
    pub fn buckets(self) -> &'static [Category] {
        match self {
            Aggressiveness::JunkOnly => &[Category::Junk],
            Aggressiveness::JunkAndMaybe => &[Category::Junk, Category::Maybe],
            Aggressiveness::JunkMaybeAndUnknown => {
                &[Category::Junk, Category::Maybe, Category::Unknown]
            }
            Aggressiveness::ReportOnly => &[],
        }
    }

    /// Menu label, matching the digit accepted by `from_str`
    pub fn menu_entry(self) -> &'static str {
        match self {
            Aggressiveness::JunkOnly => "1) Delete ONLY junk files (recommended)",
            Aggressiveness::JunkAndMaybe => "2) Delete junk + potentially problematic files",
            Aggressiveness::JunkMaybeAndUnknown => {
                "3) Delete junk + potentially problematic + unknown (aggressive)"
            }
            Aggressiveness::ReportOnly => "4) Report only (no deletions)",
        }
    }

    pub const MENU: [Aggressiveness; 4] = [
        Aggressiveness::JunkOnly,
        Aggressiveness::JunkAndMaybe,
        Aggressiveness::JunkMaybeAndUnknown,
        Aggressiveness::ReportOnly,
    ];
}

impl FromStr for Aggressiveness {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "junk" => Ok(Aggressiveness::JunkOnly),
            "2" | "junk-maybe" => Ok(Aggressiveness::JunkAndMaybe),
            "3" | "all" => Ok(Aggressiveness::JunkMaybeAndUnknown),
            "4" | "report" => Ok(Aggressiveness::ReportOnly),
            _ => Err(SelectionError::UnknownLevel(s.trim().to_string())),
        }
    }
}

/// The ordered list of files selected for removal. Consumed by the executor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionPlan {
    paths: Vec<PathBuf>,
}

impl DeletionPlan {
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}

/// Select the files to delete for `level`. Pure: touches no files.
/// Health issues never put a file in the plan, and `Allowed` files never appear.
pub fn plan_deletions(result: &ScanResult, level: Aggressiveness) -> DeletionPlan {
    let paths = level
        .buckets()
        .iter()
        .flat_map(|&category| result.bucket(category))
        .map(|finding| finding.path.clone())
        .collect();

    DeletionPlan { paths }
}
