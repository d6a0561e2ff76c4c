//! Strip rules, the extension whitelist, and filename splitting.
//!
//! Names are split the way most file managers do it: the extension is the
//! text after the last dot, except that leading dots belong to the stem, so
//! `.env` has no extension and `archive.tar.gz` has extension `gz`.

use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};

use super::name::{extension_dot, name_bytes, name_from_bytes, remove_all, trim_bytes};

/// Ordered list of literal substrings removed from filenames.
///
/// Rules are applied in order to the same name, so removing one rule's match
/// can create or destroy an occurrence of a later rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripRules(Vec<String>);

impl StripRules {
    /// Build from literal strings. Empty entries are dropped; everything else is
    /// kept verbatim, so `" "` removes every space.
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            rules
                .into_iter()
                .map(Into::into)
                .filter(|r: &String| !r.is_empty())
                .collect(),
        )
    }

    /// Build from line-oriented text (one rule per line, surrounding whitespace
    /// trimmed, so blank and whitespace-only lines are dropped).
    pub fn from_lines(text: &str) -> Self {
        Self::new(text.lines().map(str::trim))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Remove every occurrence of every rule (in order), then trim whitespace.
    pub fn apply(&self, name: &str) -> String {
        let mut out = name.to_owned();
        for rule in &self.0 {
            out = out.replace(rule.as_str(), "");
        }
        out.trim().to_owned()
    }

    /// Same as [`StripRules::apply`] for a raw file name; bytes that are not
    /// UTF-8 are kept as they are.
    pub fn apply_os(&self, name: &OsStr) -> OsString {
        if let Some(s) = name.to_str() {
            return self.apply(s).into();
        }
        let mut out = name_bytes(name).into_owned();
        for rule in &self.0 {
            out = remove_all(&out, rule.as_bytes());
        }
        name_from_bytes(trim_bytes(&out).to_vec())
    }
}

/// Set of allowed extensions (without the leading dot). Matching is exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionWhitelist(BTreeSet<String>);

impl ExtensionWhitelist {
    /// Build from extension strings; surrounding whitespace and leading dots are removed.
    pub fn new<I, S>(exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            exts.into_iter()
                .map(|e| normalize_extension(e.as_ref()))
                .filter(|e| !e.is_empty())
                .collect(),
        )
    }

    pub fn from_lines(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, ext: &str) -> bool {
        self.0.contains(ext)
    }

    /// True when the extension of `file_name` is whitelisted.
    pub fn allows(&self, file_name: &str) -> bool {
        self.allows_os(OsStr::new(file_name))
    }

    /// Same as [`ExtensionWhitelist::allows`] for a raw file name. An extension
    /// that is not UTF-8 is never whitelisted.
    pub fn allows_os(&self, file_name: &OsStr) -> bool {
        let bytes = file_name.as_encoded_bytes();
        match extension_dot(bytes) {
            Some(dot) => std::str::from_utf8(&bytes[dot + 1..]).is_ok_and(|ext| self.contains(ext)),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_owned()
}

/// Split a filename into (stem, extension) at the last dot that is not a leading dot.
///
/// `"a.txt"` -> `("a", Some("txt"))`, `".env"` -> `(".env", None)`, `"a."` -> `("a", Some(""))`.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match extension_dot(name.as_bytes()) {
        Some(dot) => (&name[..dot], Some(&name[dot + 1..])),
        None => (name, None),
    }
}

/// Extension of a filename without the dot; empty when there is none.
pub fn extension_of(name: &str) -> &str {
    split_extension(name).1.unwrap_or("")
}
