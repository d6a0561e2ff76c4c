//! I/O helper utilities.
//!
//! Turns raw io::Error values into short, actionable hints. The hint text is
//! appended to `CullError` messages and to anyhow contexts in the config layer.
//!
//! Usage:
//!   // in functions returning anyhow::Result<_>
//!   fs::read_to_string(p).map_err(io_error_with_help("read rules file", p))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

#[cfg(unix)]
use libc;

/// Platform-aware hint for an I/O error, or None when nothing useful can be said.
fn hint_for(e: &io::Error) -> Option<&'static str> {
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let hint = match code {
                libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions on the directory"),
                libc::EXDEV => Some("cross-filesystem; renames must stay on one filesystem"),
                libc::EBUSY => Some("resource busy; ensure no other process holds the file"),
                libc::ENOENT => Some("path not found; verify it exists"),
                libc::EEXIST => Some("already exists"),
                libc::ENOSPC => Some("insufficient space on device"),
                libc::EROFS => Some("read-only filesystem; cannot rename here"),
                libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
                libc::ENAMETOOLONG => Some("filename too long for this filesystem"),
                libc::EMFILE => Some("process file descriptor limit reached"),
                libc::ENFILE => Some("system-wide file table overflow"),
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
        #[cfg(windows)]
        {
            let hint = match code {
                5 => Some("access denied; check permissions"),           // ERROR_ACCESS_DENIED
                17 => Some("not same device"),                            // ERROR_NOT_SAME_DEVICE
                32 => Some("sharing violation; file is in use"),          // ERROR_SHARING_VIOLATION
                2 | 3 => Some("path not found; verify it exists"),        // FILE/ PATH NOT FOUND
                80 | 183 => Some("already exists"),                       // ERROR_FILE_EXISTS / ALREADY_EXISTS
                206 => Some("filename or path too long"),                 // ERROR_FILENAME_EXCED_RANGE
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
    }

    // Fallback to Kind-based hints
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions on the directory"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

/// Hint suffix ready to append to an error message (empty when there is none).
pub fn io_hint(e: &io::Error) -> String {
    match hint_for(e) {
        Some(h) => format!(" ({h})"),
        None => String::new(),
    }
}

/// Adapter for anyhow::Result code.
/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!("{} '{}': {}{}", op, path.display(), e, io_hint(&e))
}
