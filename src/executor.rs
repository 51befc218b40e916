//! Carrying out a deletion plan and tidying empty folders afterwards.

use crate::plan::DeletionPlan;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::WalkDir;

/// Per-path results of running a plan
#[derive(Debug, Default)]
pub struct DeletionOutcome {
    pub deleted: usize,
    pub failed: usize,
    pub failures: Vec<(PathBuf, io::Error)>,
}

/// Delete every planned file. A failure is recorded and the rest are still attempted.
pub fn execute(plan: DeletionPlan) -> DeletionOutcome {
    let mut outcome = DeletionOutcome::default();

    for path in plan.into_paths() {
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed: {}", path.display());
                outcome.deleted += 1;
            }
            Err(err) => {
                error!("Failed to remove {}: {}", path.display(), err);
                outcome.failed += 1;
                outcome.failures.push((path, err));
            }
        }
    }

    info!(
        "Deletion finished: {} deleted, {} failed",
        outcome.deleted, outcome.failed
    );
    outcome
}

/// Total current size of the planned files. Files that vanished count as zero.
pub fn reclaimable_bytes(plan: &DeletionPlan) -> u64 {
    plan.paths()
        .iter()
        .filter_map(|path| fs::symlink_metadata(path).ok())
        .filter(|meta| meta.is_file())
        .map(|meta| meta.len())
        .sum()
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

/// Remove directories under `root` that are empty, deepest first, so a folder
/// emptied by removing its children goes too. The root itself is kept.
/// Returns the number of directories removed.
pub fn remove_empty_dirs(root: &Path) -> usize {
    let mut removed = 0;

    for entry in WalkDir::new(root)
        .min_depth(1)
        .contents_first(true)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
    {
        let path = entry.path();
        if !is_empty_dir(path) {
            continue;
        }
        match fs::remove_dir(path) {
            Ok(()) => {
                debug!("Removed empty directory: {}", path.display());
                removed += 1;
            }
            Err(err) => debug!("Could not remove {}: {}", path.display(), err),
        }
    }

    info!("Removed {} empty directories", removed);
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{plan_deletions, Aggressiveness};
    use crate::report::{Category, Finding, ScanResult};
    use tempfile::tempdir;

    fn plan_for(paths: &[PathBuf]) -> DeletionPlan {
        let mut result = ScanResult::new("/");
        for path in paths {
            result.record(Category::Junk, Finding::new(path, "junk"));
        }
        plan_deletions(&result, Aggressiveness::JunkOnly)
    }

    #[test]
    fn failures_do_not_stop_execution() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a.m3u");
        let missing = dir.path().join("missing.log");
        let last = dir.path().join("b.m3u");
        fs::write(&first, b"x").unwrap();
        fs::write(&last, b"x").unwrap();

        let outcome = execute(plan_for(&[first.clone(), missing.clone(), last.clone()]));

        assert_eq!(outcome.deleted, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.failures[0].0, missing);
        assert_eq!(outcome.failures[0].1.kind(), io::ErrorKind::NotFound);
        assert!(!first.exists());
        assert!(!last.exists());
    }

    #[test]
    fn reclaimable_bytes_sums_existing_files() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.log");
        let b = dir.path().join("b.log");
        fs::write(&a, vec![0u8; 10]).unwrap();
        fs::write(&b, vec![0u8; 5]).unwrap();

        let plan = plan_for(&[a, b, dir.path().join("gone.log")]);
        assert_eq!(reclaimable_bytes(&plan), 15);
    }

    #[test]
    fn empty_dirs_removed_bottom_up() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("__MACOSX/Album/Disc 1")).unwrap();
        fs::create_dir_all(dir.path().join("Artist/Album")).unwrap();
        fs::write(dir.path().join("Artist/Album/01.flac"), b"x").unwrap();

        let removed = remove_empty_dirs(dir.path());

        assert_eq!(removed, 3);
        assert!(!dir.path().join("__MACOSX").exists());
        assert!(dir.path().join("Artist/Album/01.flac").exists());
        assert!(dir.path().exists());
    }
}
