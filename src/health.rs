//! Path and file-name hygiene checks, independent of a file's category.

use crate::rules::RuleTables;
use std::fmt;
use std::path::Path;

/// Characters that Windows-formatted cards and many player firmwares reject
pub const HOSTILE_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// A single hygiene problem with one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthIssue {
    DeepNesting { depth: usize, limit: usize },
    LongPath { len: usize, limit: usize },
    LongFilename { len: usize, limit: usize },
    NonAscii,
    HostileChars(Vec<char>),
    EdgeWhitespace,
    DoubleSpace,
    ZeroByte,
    Uninspectable,
}

impl fmt::Display for HealthIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthIssue::DeepNesting { depth, limit } => {
                write!(f, "deep folder nesting (depth {}, limit {})", depth, limit)
            }
            HealthIssue::LongPath { len, limit } => {
                write!(f, "long relative path ({} chars, limit {})", len, limit)
            }
            HealthIssue::LongFilename { len, limit } => {
                write!(f, "very long filename ({} chars, limit {})", len, limit)
            }
            HealthIssue::NonAscii => {
                f.write_str("contains non-ASCII characters (possible emoji/unicode)")
            }
            HealthIssue::HostileChars(chars) => {
                let shown: Vec<String> = chars.iter().map(|c| format!("{:?}", c)).collect();
                write!(
                    f,
                    "filename contains characters that can break devices ({})",
                    shown.join(" ")
                )
            }
            HealthIssue::EdgeWhitespace => f.write_str("filename has leading/trailing whitespace"),
            HealthIssue::DoubleSpace => f.write_str("filename contains double spaces"),
            HealthIssue::ZeroByte => f.write_str("zero-byte file"),
            HealthIssue::Uninspectable => {
                f.write_str("could not inspect file (permissions/corruption)")
            }
        }
    }
}

fn is_hostile(c: char) -> bool {
    HOSTILE_CHARS.contains(&c) || c.is_ascii_control()
}

/// Distinct hostile characters of `name`, in first-seen order
fn hostile_chars(name: &str) -> Vec<char> {
    let mut found = Vec::new();
    for c in name.chars().filter(|&c| is_hostile(c)) {
        if !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

/// Run every hygiene check on a file.
///
/// `relative` is the path below the scan root (the file name is its last
/// component). `size` is `None` when the file's metadata could not be read.
/// Checks are independent; the result lists issues in a fixed order.
pub fn check_health(relative: &Path, size: Option<u64>, rules: &RuleTables) -> Vec<HealthIssue> {
    let limits = &rules.limits;
    let mut issues = Vec::new();

    let rel_str = relative.to_string_lossy();
    let name = relative
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    let depth = relative.components().count();
    if depth > limits.max_depth {
        issues.push(HealthIssue::DeepNesting {
            depth,
            limit: limits.max_depth,
        });
    }

    let rel_len = rel_str.chars().count();
    if rel_len > limits.max_relative_path_len {
        issues.push(HealthIssue::LongPath {
            len: rel_len,
            limit: limits.max_relative_path_len,
        });
    }

    let name_len = name.chars().count();
    if name_len > limits.max_filename_len {
        issues.push(HealthIssue::LongFilename {
            len: name_len,
            limit: limits.max_filename_len,
        });
    }

    // Lossy conversion turns undecodable bytes into U+FFFD, so bad encodings land here too
    if !rel_str.is_ascii() {
        issues.push(HealthIssue::NonAscii);
    }

    let hostile = hostile_chars(&name);
    if !hostile.is_empty() {
        issues.push(HealthIssue::HostileChars(hostile));
    }

    if name.trim() != name {
        issues.push(HealthIssue::EdgeWhitespace);
    }

    if name.contains("  ") {
        issues.push(HealthIssue::DoubleSpace);
    }

    match size {
        Some(0) => issues.push(HealthIssue::ZeroByte),
        Some(_) => {}
        None => issues.push(HealthIssue::Uninspectable),
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn rules() -> RuleTables {
        RuleTables::load().unwrap()
    }

    #[test]
    fn clean_file_has_no_issues() {
        let rel = Path::new("Artist/Album/Track 01.flac");
        assert!(check_health(rel, Some(1024), &rules()).is_empty());
    }

    #[test]
    fn zero_byte_and_uninspectable() {
        let rules = rules();
        let rel = Path::new("a.flac");
        assert_eq!(check_health(rel, Some(0), &rules), vec![HealthIssue::ZeroByte]);
        assert_eq!(
            check_health(rel, None, &rules),
            vec![HealthIssue::Uninspectable]
        );
    }

    #[test]
    fn relative_path_length_boundary() {
        let rules = rules();
        let limit = rules.limits.max_relative_path_len;

        // long directory + "/" + "track1.mp3", total exactly at the limit
        let at_limit = PathBuf::from("d".repeat(limit - 11)).join("track1.mp3");
        assert_eq!(at_limit.to_string_lossy().chars().count(), limit);
        assert!(check_health(&at_limit, Some(1), &rules).is_empty());

        let over = PathBuf::from("d".repeat(limit - 10)).join("track1.mp3");
        let issues = check_health(&over, Some(1), &rules);
        assert_eq!(
            issues,
            vec![HealthIssue::LongPath {
                len: limit + 1,
                limit
            }]
        );
    }

    #[test]
    fn long_filename_message() {
        let rules = rules();
        let name = format!("{}.flac", "x".repeat(125));
        assert_eq!(name.len(), 130);

        let issues = check_health(Path::new(&name), Some(10), &rules);
        let long: Vec<String> = issues
            .iter()
            .filter(|i| matches!(i, HealthIssue::LongFilename { .. }))
            .map(|i| i.to_string())
            .collect();
        assert_eq!(long, vec!["very long filename (130 chars, limit 120)"]);
    }

    #[test]
    fn depth_counts_components() {
        let rules = rules();
        let at_limit = Path::new("a/b/c/d/e/f.mp3");
        assert!(check_health(at_limit, Some(1), &rules).is_empty());

        let deep = Path::new("a/b/c/d/e/f/g.mp3");
        assert_eq!(
            check_health(deep, Some(1), &rules),
            vec![HealthIssue::DeepNesting { depth: 7, limit: 6 }]
        );
    }

    #[test]
    fn non_ascii_anywhere_in_path() {
        let rules = rules();
        let rel = Path::new("Sigur Rós/track.flac");
        assert_eq!(check_health(rel, Some(1), &rules), vec![HealthIssue::NonAscii]);
    }

    #[test]
    fn hostile_and_control_characters() {
        let rules = rules();
        let issues = check_health(Path::new("what?:\u{7}.mp3"), Some(1), &rules);
        assert_eq!(issues, vec![HealthIssue::HostileChars(vec!['?', ':', '\u{7}'])]);
        assert!(issues[0].to_string().starts_with("filename contains characters"));
    }

    #[test]
    fn whitespace_checks() {
        let rules = rules();
        assert_eq!(
            check_health(Path::new(" intro.mp3"), Some(1), &rules),
            vec![HealthIssue::EdgeWhitespace]
        );
        assert_eq!(
            check_health(Path::new("a  b.mp3"), Some(1), &rules),
            vec![HealthIssue::DoubleSpace]
        );
    }

    #[test]
    fn issues_accumulate_in_fixed_order() {
        let rules = rules();
        let name = format!(" {}  é?.mp3", "n".repeat(130));
        let rel = PathBuf::from("1/2/3/4/5/6").join(&name);

        let issues = check_health(&rel, Some(0), &rules);
        let kinds: Vec<&str> = issues
            .iter()
            .map(|i| match i {
                HealthIssue::DeepNesting { .. } => "depth",
                HealthIssue::LongPath { .. } => "path",
                HealthIssue::LongFilename { .. } => "name",
                HealthIssue::NonAscii => "ascii",
                HealthIssue::HostileChars(_) => "chars",
                HealthIssue::EdgeWhitespace => "edge",
                HealthIssue::DoubleSpace => "double",
                HealthIssue::ZeroByte => "zero",
                HealthIssue::Uninspectable => "stat",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["depth", "name", "ascii", "chars", "edge", "double", "zero"]
        );
    }
}
