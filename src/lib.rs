//! dapsweep - Music Library Audit for Digital Audio Players
//!
//! Simple player firmware indexes a card by walking every folder and choking on
//! whatever it does not expect: macOS sidecars, playlists and databases, oddly
//! named artwork, deep trees, long or exotic names, empty files. dapsweep walks a
//! music folder once and reports all of that, then optionally deletes the files
//! it considers safe to remove.
//!
//! ## Pipeline
//!
//! - [`rules`]: the fixed tables, embedded from `rules.toml`
//! - [`classify`]: one [`Category`] per file, by first matching rule
//! - [`health`]: path and name hygiene, independent of category
//! - [`scanner`]: the walk, producing a [`ScanResult`]
//! - [`plan`]: the files to delete for an [`Aggressiveness`] level
//! - [`executor`]: deleting a plan and sweeping empty folders
//!
//! Deletion is driven by category only, never by health issues.

pub mod classify;
pub mod error;
pub mod executor;
pub mod health;
pub mod plan;
pub mod report;
pub mod rules;
pub mod scanner;

// The whole pipeline is reachable from the crate root
pub use classify::{classify, Classification, Rule};
pub use error::{Error, SelectionError};
pub use executor::{execute, reclaimable_bytes, remove_empty_dirs, DeletionOutcome};
pub use health::{check_health, HealthIssue};
pub use plan::{plan_deletions, Aggressiveness, DeletionPlan};
pub use report::{Category, Finding, ScanResult};
pub use rules::{Limits, RuleTables};
pub use scanner::{scan, validate_root, ScanOptions};
