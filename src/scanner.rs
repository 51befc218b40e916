//! Walking a music folder and recording what every entry is.

use crate::classify::classify;
use crate::error::Error;
use crate::health::{check_health, HealthIssue};
use crate::report::{Finding, ScanResult};
use crate::rules::RuleTables;

use ignore::{DirEntry, WalkBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Options controlling scan behavior (runtime flags)
#[derive(Clone, Default)]
pub struct ScanOptions {
    /// Show a spinner on stderr while walking
    pub progress: bool,
    /// When set to true by another thread, the walk stops before the next entry
    pub cancel: Option<Arc<AtomicBool>>,
}

impl ScanOptions {
    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Make sure the scan root exists and is a directory
pub fn validate_root(root: &Path) -> Result<PathBuf, Error> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(root.canonicalize()?),
        Ok(_) => Err(Error::RootNotDirectory(root.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(Error::RootNotFound(root.to_path_buf()))
        }
        Err(err) => Err(Error::Io(err)),
    }
}

/// The path a walk error refers to, if it carries one
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}

/// Record one symlink. Links are never followed; a dangling one is reported.
fn handle_symlink(path: &Path, result: &mut ScanResult) {
    match fs::metadata(path) {
        Ok(_) => debug!("Skipping symlink: {}", path.display()),
        Err(err) => {
            debug!("Broken symlink {}: {}", path.display(), err);
            result.record_issue(Finding::new(path, HealthIssue::Uninspectable.to_string()));
        }
    }
}

/// Classify and health-check one regular file
fn handle_file(root: &Path, entry: &DirEntry, rules: &RuleTables, result: &mut ScanResult) {
    let path = entry.path();
    let name = entry.file_name().to_string_lossy();

    let classification = classify(&name, rules);
    debug!(
        "{}: {} ({})",
        path.display(),
        classification.category,
        classification.reason
    );
    result.record(
        classification.category,
        Finding::new(path, classification.reason),
    );

    let size = match entry.metadata() {
        Ok(meta) => Some(meta.len()),
        Err(err) => {
            warn!("Could not get metadata for {}: {}", path.display(), err);
            None
        }
    };

    let relative = path.strip_prefix(root).unwrap_or(path);
    for issue in check_health(relative, size, rules) {
        result.record_issue(Finding::new(path, issue.to_string()));
    }
}

fn handle_entry(root: &Path, entry: &DirEntry, rules: &RuleTables, result: &mut ScanResult) {
    let path = entry.path();
    let Some(file_type) = entry.file_type() else {
        return;
    };

    if file_type.is_dir() {
        if rules.is_junk_dirname(&entry.file_name().to_string_lossy()) {
            debug!("Junk directory: {}", path.display());
            result.record_junk_dir(path.to_path_buf());
        }
    } else if file_type.is_symlink() {
        handle_symlink(path, result);
    } else if file_type.is_file() {
        handle_file(root, entry, rules, result);
    } else {
        debug!("Skipping special file: {}", path.display());
    }
}

fn spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let progress = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        progress.set_style(style);
    }
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress
}

/// Walk `root` once, classifying every regular file, health-checking it and
/// noting junk directories.
///
/// Only an invalid root is an error. Unreadable entries, broken links and
/// special files are recorded or skipped and the walk carries on.
pub fn scan(root: &Path, rules: &RuleTables, options: &ScanOptions) -> Result<ScanResult, Error> {
    let root = validate_root(root)?;
    let mut result = ScanResult::new(&root);

    info!("Scanning {}", root.display());
    let progress = spinner(options.progress);

    let walker = WalkBuilder::new(&root)
        .hidden(false)
        // Every entry counts; no ignore files apply to a music library
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .follow_links(false)
        .build();

    let mut entries_seen = 0u64;
    for entry_result in walker {
        if options.cancelled() {
            warn!("Scan interrupted after {} entries", entries_seen);
            result.mark_interrupted();
            break;
        }

        entries_seen += 1;
        if entries_seen % 100 == 0 {
            progress.set_message(format!("Scanning: {} entries", entries_seen));
        }

        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                match error_path(&err) {
                    Some(path) => {
                        warn!("Failed to access {}: {}", path.display(), err);
                        result.record_issue(Finding::new(
                            path,
                            HealthIssue::Uninspectable.to_string(),
                        ));
                    }
                    None => warn!("Failed to access entry: {}", err),
                }
                continue;
            }
        };

        // The root itself is neither a file nor a junk directory
        if entry.depth() == 0 {
            continue;
        }

        handle_entry(&root, &entry, rules, &mut result);
    }

    progress.finish_and_clear();
    info!(
        "Scanned {} files, {} health issues, {} junk directories",
        result.files_scanned(),
        result.issues().len(),
        result.junk_dirs().len()
    );

    Ok(result)
}
