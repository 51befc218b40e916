//! Fixed rule tables loaded from the embedded rules.toml.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;

/// Numeric limits for the path/name health checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Limits {
    /// Maximum number of path components below the scan root (file name included)
    pub max_depth: usize,
    /// Maximum length of the root-relative path, in characters
    pub max_relative_path_len: usize,
    /// Maximum length of a file name, in characters
    pub max_filename_len: usize,
}

/// The process-wide rule tables. Built once by [`RuleTables::load`] and only
/// ever handed out by shared reference afterwards.
#[derive(Debug, Clone)]
pub struct RuleTables {
    pub audio_exts: HashSet<String>,
    pub image_exts: HashSet<String>,
    pub junk_exts: HashSet<String>,
    pub problematic_exts: HashSet<String>,
    pub junk_filenames: HashSet<String>,
    pub junk_dirnames: HashSet<String>,
    pub appledouble_prefix: String,
    pub cover_stems: HashSet<String>,
    pub limits: Limits,
}

/// Structure to deserialize the rule tables from TOML
#[derive(Debug, Deserialize)]
struct RulesConfig {
    extensions: ExtensionConfig,
    names: NameConfig,
    limits: Limits,
}

#[derive(Debug, Deserialize)]
struct ExtensionConfig {
    audio: Vec<String>,
    image: Vec<String>,
    junk: Vec<String>,
    problematic: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NameConfig {
    junk_files: Vec<String>,
    junk_dirs: Vec<String>,
    appledouble_prefix: String,
    cover_stems: Vec<String>,
}

// Rule tables ship inside the binary; there is no runtime config file
const RULES_TOML: &str = include_str!("../rules.toml");

/// Lowercase a table and strip any leading dot an extension entry was written with
fn normalize(entries: Vec<String>, strip_dot: bool) -> HashSet<String> {
    entries
        .into_iter()
        .map(|entry| {
            let entry = entry.trim().to_lowercase();
            if strip_dot {
                entry.trim_start_matches('.').to_string()
            } else {
                entry
            }
        })
        .collect()
}

impl RuleTables {
    /// Parse the embedded rule tables
    pub fn load() -> Result<Self> {
        Self::from_toml(RULES_TOML).context("Failed to parse embedded rules.toml")
    }

    fn from_toml(source: &str) -> Result<Self> {
        let config: RulesConfig = toml::from_str(source)?;

        if config.names.appledouble_prefix.is_empty() {
            anyhow::bail!("appledouble_prefix must not be empty");
        }

        Ok(RuleTables {
            audio_exts: normalize(config.extensions.audio, true),
            image_exts: normalize(config.extensions.image, true),
            junk_exts: normalize(config.extensions.junk, true),
            problematic_exts: normalize(config.extensions.problematic, true),
            junk_filenames: normalize(config.names.junk_files, false),
            junk_dirnames: normalize(config.names.junk_dirs, false),
            appledouble_prefix: config.names.appledouble_prefix,
            cover_stems: normalize(config.names.cover_stems, false),
            limits: config.limits,
        })
    }

    /// Check a directory name against the junk-directory table (case-insensitive)
    pub fn is_junk_dirname(&self, name: &str) -> bool {
        self.junk_dirnames.contains(&name.to_lowercase())
    }
}
