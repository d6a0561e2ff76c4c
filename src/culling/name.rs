//! Byte-level filename helpers.
//!
//! File names are handled as `OsStr`/`OsString` so names that are not valid
//! UTF-8 are stripped and renamed without loss on Unix. Rules and extensions
//! are always UTF-8, and a byte match of a UTF-8 needle never splits a UTF-8
//! character, so results for UTF-8 names are the same as with `str` methods.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};

#[cfg(unix)]
use std::os::unix::ffi::{OsStrExt, OsStringExt};

/// Raw bytes of a file name.
#[cfg(unix)]
pub(crate) fn name_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    Cow::Borrowed(name.as_bytes())
}

/// Raw bytes of a file name. Off Unix only UTF-8 names reach this point.
#[cfg(not(unix))]
pub(crate) fn name_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    match name.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

#[cfg(unix)]
pub(crate) fn name_from_bytes(bytes: Vec<u8>) -> OsString {
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
pub(crate) fn name_from_bytes(bytes: Vec<u8>) -> OsString {
    OsString::from(String::from_utf8_lossy(&bytes).into_owned())
}

/// Whether stripping can work on `name` on this platform.
pub(crate) fn is_processable(name: &OsStr) -> bool {
    cfg!(unix) || name.to_str().is_some()
}

/// Index of the dot that starts the extension: the last dot that is not a leading dot.
pub(crate) fn extension_dot(bytes: &[u8]) -> Option<usize> {
    let leading = bytes.iter().take_while(|&&b| b == b'.').count();
    bytes[leading..]
        .iter()
        .rposition(|&b| b == b'.')
        .map(|i| leading + i)
}

/// Remove every non-overlapping occurrence of `needle`, scanning left to right.
pub(crate) fn remove_all(haystack: &[u8], needle: &[u8]) -> Vec<u8> {
    if needle.is_empty() {
        return haystack.to_vec();
    }
    let mut out = Vec::with_capacity(haystack.len());
    let mut i = 0;
    while i < haystack.len() {
        if haystack[i..].starts_with(needle) {
            i += needle.len();
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    out
}

/// Trim Unicode whitespace from both ends. Invalid UTF-8 bytes are never trimmed.
pub(crate) fn trim_bytes(bytes: &[u8]) -> &[u8] {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.trim().as_bytes();
    }
    // At least one invalid sequence separates the leading and trailing valid runs.
    let lead = bytes
        .utf8_chunks()
        .next()
        .map_or(0, |c| c.valid().len() - c.valid().trim_start().len());
    let tail = bytes
        .utf8_chunks()
        .last()
        .filter(|c| c.invalid().is_empty())
        .map_or(0, |c| c.valid().len() - c.valid().trim_end().len());
    &bytes[lead..bytes.len() - tail]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_dot_skips_leading_dots() {
        assert_eq!(extension_dot(b"a.txt"), Some(1));
        assert_eq!(extension_dot(b".env"), None);
        assert_eq!(extension_dot(b"..a.b"), Some(3));
        assert_eq!(extension_dot(b"..."), None);
        assert_eq!(extension_dot(b"a."), Some(1));
    }

    #[test]
    fn remove_all_is_left_to_right() {
        assert_eq!(remove_all(b"aaa", b"aa"), b"a");
        assert_eq!(remove_all(b"x[t]y[t]", b"[t]"), b"xy");
        assert_eq!(remove_all(b"abc", b""), b"abc");
    }

    #[test]
    fn trim_bytes_keeps_invalid_sequences() {
        assert_eq!(trim_bytes(b"  a b  "), b"a b");
        assert_eq!(trim_bytes(b" caf\xe9.mp4 "), b"caf\xe9.mp4");
        assert_eq!(trim_bytes(b"\xff"), b"\xff");
        assert_eq!(trim_bytes(b"   "), b"");
    }
}
