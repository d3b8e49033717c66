//! Filename rewriting rule for `*.adoc.docx` files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Compound suffix a file must end with to be selected.
pub const MATCH_SUFFIX: &str = ".adoc.docx";
/// Replacement written in place of [`MATCH_SUFFIX`].
pub const REPLACEMENT_SUFFIX: &str = ".docx";

/// How the matched suffix is rewritten inside the filename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplaceStrategy {
    /// Replace every occurrence of the suffix text anywhere in the filename.
    /// `a.adoc.docx.b.adoc.docx` becomes `a.docx.b.docx`.
    #[default]
    Substring,
    /// Replace only the trailing occurrence.
    /// `a.adoc.docx.b.adoc.docx` becomes `a.adoc.docx.b.docx`.
    Suffix,
}

#[derive(Debug, Clone, Copy)]
pub struct SuffixRule {
    from: &'static str,
    to: &'static str,
    strategy: ReplaceStrategy,
}

impl Default for SuffixRule {
    fn default() -> Self {
        Self::new(ReplaceStrategy::default())
    }
}

impl SuffixRule {
    #[must_use]
    pub const fn new(strategy: ReplaceStrategy) -> Self {
        Self {
            from: MATCH_SUFFIX,
            to: REPLACEMENT_SUFFIX,
            strategy,
        }
    }

    #[must_use]
    pub const fn strategy(&self) -> ReplaceStrategy {
        self.strategy
    }

    /// Whether the filename component of `path` ends with the matched suffix.
    ///
    /// Names are compared as raw bytes, so names that are not valid UTF-8
    /// still match.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name.as_encoded_bytes().ends_with(self.from.as_bytes()))
    }

    /// Rewrites the filename of `path`, keeping its parent directory.
    ///
    /// Returns `None` when the path is not selected by [`Self::matches`].
    #[must_use]
    pub fn apply(&self, path: &Path) -> Option<PathBuf> {
        if !self.matches(path) {
            return None;
        }
        let name = path.file_name()?.as_encoded_bytes();
        let from = self.from.as_bytes();
        let stem = &name[..name.len() - from.len()];

        let new_name = match self.strategy {
            ReplaceStrategy::Substring => replace_all(name, from, self.to.as_bytes()),
            ReplaceStrategy::Suffix => [stem, self.to.as_bytes()].concat(),
        };
        // SAFETY: `new_name` is the original encoded name cut only at the
        // boundaries of the ASCII `from` text, with ASCII `to` text spliced in.
        let new_name = unsafe { OsString::from_encoded_bytes_unchecked(new_name) };
        Some(path.with_file_name(new_name))
    }
}

/// Left-to-right, non-overlapping replacement of every `from` in `haystack`.
fn replace_all(haystack: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while !rest.is_empty() {
        if rest.starts_with(from) {
            out.extend_from_slice(to);
            rest = &rest[from.len()..];
        } else {
            out.push(rest[0]);
            rest = &rest[1..];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_only_compound_suffix() {
        let rule = SuffixRule::default();
        assert!(rule.matches(Path::new("dir/report.adoc.docx")));
        assert!(!rule.matches(Path::new("dir/report.docx")));
        assert!(!rule.matches(Path::new("dir/report.adoc")));
        assert!(!rule.matches(Path::new("dir/report.adoc.docx.bak")));
        assert!(!rule.matches(Path::new("dir.adoc.docx/notes.txt")));
    }

    #[test]
    fn test_apply_keeps_parent_directory() {
        let rule = SuffixRule::default();
        let renamed = rule.apply(Path::new("/tmp/r/a/report.adoc.docx"));
        assert_eq!(renamed, Some(PathBuf::from("/tmp/r/a/report.docx")));
    }

    #[test]
    fn test_apply_does_not_touch_matching_directory_names() {
        let rule = SuffixRule::default();
        let renamed = rule.apply(Path::new("x.adoc.docx/y.adoc.docx"));
        assert_eq!(renamed, Some(PathBuf::from("x.adoc.docx/y.docx")));
    }

    #[test]
    fn test_apply_returns_none_for_other_files() {
        let rule = SuffixRule::default();
        assert_eq!(rule.apply(Path::new("b/notes.txt")), None);
        assert_eq!(rule.apply(Path::new("/")), None);
    }

    #[test]
    fn test_substring_strategy_replaces_every_occurrence() {
        let rule = SuffixRule::new(ReplaceStrategy::Substring);
        let renamed = rule.apply(Path::new("a.adoc.docx.b.adoc.docx"));
        assert_eq!(renamed, Some(PathBuf::from("a.docx.b.docx")));
    }

    #[test]
    fn test_suffix_strategy_replaces_trailing_occurrence_only() {
        let rule = SuffixRule::new(ReplaceStrategy::Suffix);
        let renamed = rule.apply(Path::new("a.adoc.docx.b.adoc.docx"));
        assert_eq!(renamed, Some(PathBuf::from("a.adoc.docx.b.docx")));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_are_selected_and_rewritten() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("d").join(OsStr::from_bytes(b"r\xffport.adoc.docx"));
        let expected = Path::new("d").join(OsStr::from_bytes(b"r\xffport.docx"));

        for strategy in [ReplaceStrategy::Substring, ReplaceStrategy::Suffix] {
            let rule = SuffixRule::new(strategy);
            assert!(rule.matches(&path));
            assert_eq!(rule.apply(&path), Some(expected.clone()));
        }
    }

    #[test]
    fn test_bare_suffix_filename() {
        let rule = SuffixRule::new(ReplaceStrategy::Suffix);
        assert_eq!(
            rule.apply(Path::new("d/.adoc.docx")),
            Some(PathBuf::from("d/.docx"))
        );
    }
}
