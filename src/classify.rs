//! First-match classification of a file into a [`Category`].
//!
//! Rules run in [`RULE_ORDER`] and the first match wins: an AppleDouble sidecar
//! such as `._cover.jpg` is junk even though it also has an image extension.

use crate::report::Category;
use crate::rules::RuleTables;
use std::collections::HashSet;

/// One classification rule. Evaluated in [`RULE_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    AppleDouble,
    JunkFilename,
    Audio,
    Image,
    JunkExtension,
    Sidecar,
}

/// Evaluation order; first match wins
pub const RULE_ORDER: [Rule; 6] = [
    Rule::AppleDouble,
    Rule::JunkFilename,
    Rule::Audio,
    Rule::Image,
    Rule::JunkExtension,
    Rule::Sidecar,
];

/// The outcome of classifying one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub reason: String,
    /// The rule that matched, or `None` when the file fell through to `Unknown`
    pub rule: Option<Rule>,
}

/// A file name split into the lowercased pieces the rules look at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName<'a> {
    pub name: &'a str,
    pub lower: String,
    pub stem: String,
    pub ext: Option<String>,
}

impl<'a> FileName<'a> {
    /// Split on the final dot. A leading dot (`.ds_store`) or trailing dot (`track.`)
    /// does not start an extension.
    pub fn parse(name: &'a str) -> Self {
        let lower = name.to_lowercase();
        let (stem, ext) = match lower.rfind('.') {
            Some(i) if i > 0 && i + 1 < lower.len() => {
                (lower[..i].to_string(), Some(lower[i + 1..].to_string()))
            }
            _ => (lower.clone(), None),
        };
        FileName {
            name,
            lower,
            stem,
            ext,
        }
    }

    fn ext_in(&self, table: &HashSet<String>) -> bool {
        self.ext.as_ref().is_some_and(|ext| table.contains(ext))
    }

    fn ext_label(&self) -> String {
        match &self.ext {
            Some(ext) => format!(".{}", ext),
            None => "no extension".to_string(),
        }
    }
}

impl Rule {
    /// Apply this rule alone; `None` means it does not match
    pub fn apply(self, file: &FileName<'_>, rules: &RuleTables) -> Option<(Category, String)> {
        match self {
            Rule::AppleDouble => file
                .name
                .starts_with(&rules.appledouble_prefix)
                .then(|| (Category::Junk, "macOS sidecar file".to_string())),
            Rule::JunkFilename => rules
                .junk_filenames
                .contains(&file.lower)
                .then(|| (Category::Junk, format!("junk metadata file ({})", file.name))),
            Rule::Audio => file
                .ext_in(&rules.audio_exts)
                .then(|| (Category::Allowed, "audio file".to_string())),
            Rule::Image => {
                if !file.ext_in(&rules.image_exts) {
                    return None;
                }
                let preferred = rules.cover_stems.contains(&file.stem)
                    || file.stem.contains("cover")
                    || file.stem.contains("folder");
                Some(if preferred {
                    (Category::Allowed, "cover art".to_string())
                } else {
                    (
                        Category::Maybe,
                        "artwork with non-standard name, cover-art pickup may fail".to_string(),
                    )
                })
            }
            Rule::JunkExtension => file.ext_in(&rules.junk_exts).then(|| {
                (
                    Category::Junk,
                    format!("junk playlist/database/log file ({})", file.ext_label()),
                )
            }),
            Rule::Sidecar => file.ext_in(&rules.problematic_exts).then(|| {
                (
                    Category::Maybe,
                    format!(
                        "non-audio sidecar ({}), may confuse device scans",
                        file.ext_label()
                    ),
                )
            }),
        }
    }
}

/// Classify a file by its name alone. Always yields exactly one category.
pub fn classify(name: &str, rules: &RuleTables) -> Classification {
    let file = FileName::parse(name);

    for rule in RULE_ORDER {
        if let Some((category, reason)) = rule.apply(&file, rules) {
            return Classification {
                category,
                reason,
                rule: Some(rule),
            };
        }
    }

    Classification {
        category: Category::Unknown,
        reason: format!("unknown file type ({})", file.ext_label()),
        rule: None,
    }
}
