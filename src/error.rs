use std::path::PathBuf;
use thiserror::Error;

/// Input errors: the scan never starts
#[derive(Error, Debug)]
pub enum Error {
    #[error("folder does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("not a folder: {0}")]
    RootNotDirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An unrecognized deletion level; callers treat it as "no action taken"
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("invalid choice '{0}' (expected 1-4 or junk, junk-maybe, all, report)")]
    UnknownLevel(String),
}
