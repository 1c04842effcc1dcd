//! No-Intro name parsing.
//!
//! Names follow the pattern
//! ```text
//! Title (Region1, Region2) (Rev X) (En,Fr,De) (Proto) [b]
//! ```
//! Everything before the first `(` or `[` is the title; each group after it is
//! classified by content.

use crate::region::is_region_list;

/// Components of a No-Intro style name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedGameName {
    /// Title with all groups removed.
    pub title: String,
    /// Regions in the order they appear (e.g., `["Europe", "France"]`).
    pub regions: Vec<String>,
    /// `"Rev A"`, `"Rev 1"`, ...
    pub revision: Option<String>,
    /// `"v1.1"`, ...
    pub version: Option<String>,
    /// Language codes from a group like `(En,Fr,De)`.
    pub languages: Vec<String>,
    pub disc_number: Option<u32>,
    /// Label after the disc number, e.g. `"Leon"` in `(Disc 1 - Leon)`.
    pub disc_label: Option<String>,
    /// Unclassified groups, e.g. `"Proto"`, `"Beta"`, `"[a1]"`.
    pub flags: Vec<String>,
    pub status: DumpStatus,
}

/// Dump status from bracketed groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DumpStatus {
    /// No status group, or `[!]`.
    #[default]
    Verified,
    /// `[b]`
    BadDump,
    /// `[o]`
    Overdump,
}

/// A `(...)` or `[...]` group after the title.
#[derive(Debug, PartialEq, Eq)]
enum Group<'a> {
    Paren(&'a str),
    Bracket(&'a str),
}

/// Parse a No-Intro style name.
///
/// ```
/// use romdb_naming::parse_game_name;
///
/// let parsed = parse_game_name("Foo (Europe, France) (Rev 1)");
/// assert_eq!(parsed.title, "Foo");
/// assert_eq!(parsed.regions, vec!["Europe", "France"]);
/// assert_eq!(parsed.revision.as_deref(), Some("Rev 1"));
/// ```
pub fn parse_game_name(name: &str) -> ParsedGameName {
    let (title, groups) = split_groups(name);
    let mut parsed = ParsedGameName {
        title: title.to_string(),
        ..Default::default()
    };

    for group in groups {
        match group {
            Group::Paren(content) => parsed.classify_paren(content.trim()),
            Group::Bracket(content) => parsed.classify_bracket(content.trim()),
        }
    }

    parsed
}

/// The title a library view shows: the name without any groups.
///
/// Names with nothing but groups fall back to the trimmed full name.
pub fn display_name(name: &str) -> String {
    let (title, _) = split_groups(name);
    if title.is_empty() {
        name.trim().to_string()
    } else {
        title.to_string()
    }
}

/// Split `name` into the title and the groups after it.
///
/// Nested delimiters of the same kind are balanced; an unclosed group runs to
/// the end of the name. Empty groups are dropped.
fn split_groups(name: &str) -> (&str, Vec<Group<'_>>) {
    let mut groups = Vec::new();
    let mut title_end = None;
    let mut chars = name.char_indices();

    while let Some((i, ch)) = chars.next() {
        let (open, close) = match ch {
            '(' => ('(', ')'),
            '[' => ('[', ']'),
            _ => continue,
        };
        title_end.get_or_insert(i);

        let start = i + open.len_utf8();
        let mut end = name.len();
        let mut depth = 1u32;
        for (j, c) in chars.by_ref() {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    end = j;
                    break;
                }
            }
        }

        let content = &name[start..end];
        if content.trim().is_empty() {
            continue;
        }
        groups.push(if open == '(' {
            Group::Paren(content)
        } else {
            Group::Bracket(content)
        });
    }

    let title = match title_end {
        Some(pos) => name[..pos].trim(),
        None => name.trim(),
    };
    (title, groups)
}

impl ParsedGameName {
    fn classify_paren(&mut self, content: &str) {
        if is_region_list(content) {
            for region in content.split(',').map(str::trim) {
                if !self.regions.iter().any(|r| r == region) {
                    self.regions.push(region.to_string());
                }
            }
        } else if content.starts_with("Rev ") {
            self.revision = Some(content.to_string());
        } else if is_version(content) {
            self.version = Some(content.to_string());
        } else if let Some(rest) = content.strip_prefix("Disc ") {
            let (number, label) = match rest.split_once(" - ") {
                Some((n, l)) => (n, Some(l.trim())),
                None => (rest, None),
            };
            if let Ok(n) = number.trim().parse::<u32>() {
                self.disc_number = Some(n);
                self.disc_label = label.map(str::to_string);
            } else {
                self.flags.push(content.to_string());
            }
        } else if is_language_list(content) {
            self.languages
                .extend(content.split(',').map(|l| l.trim().to_string()));
        } else {
            self.flags.push(content.to_string());
        }
    }

    fn classify_bracket(&mut self, content: &str) {
        match content {
            "!" => self.status = DumpStatus::Verified,
            "b" => self.status = DumpStatus::BadDump,
            "o" => self.status = DumpStatus::Overdump,
            other => self.flags.push(format!("[{other}]")),
        }
    }
}

/// `v1.0`, `V2`, ...
fn is_version(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some('v' | 'V')) && chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// Two or more comma-separated codes like `En`, `Fr`, `Zh`.
///
/// A single code is ambiguous with other short groups, so it never counts.
fn is_language_list(s: &str) -> bool {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    parts.len() >= 2
        && parts.iter().all(|p| {
            let mut chars = p.chars();
            (2..=3).contains(&p.len())
                && chars.next().is_some_and(|c| c.is_ascii_uppercase())
                && chars.all(|c| c.is_ascii_lowercase())
        })
}
