//! Collision resolution.
//!
//! Policy:
//! - If the proposed name is free in its directory, use it.
//! - Otherwise try `stem-1.ext`, `stem-2.ext`, ... and take the first free one.
//!
//! Notes:
//! - Existence is checked against live state at the moment of resolution, so
//!   renames applied earlier in the same run are seen.
//! - Probing stops after `MAX_SUFFIX_PROBES` suffixes with `CollisionExhausted`.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;
use tracing::trace;

use crate::errors::CullError;

use super::name::{extension_dot, name_bytes, name_from_bytes};

/// Upper bound on numbered candidates tried for one name.
pub const MAX_SUFFIX_PROBES: u64 = 100_000;

/// Answers "is this name taken in this directory right now?".
pub trait DirectoryState {
    fn contains(&self, dir: &Path, name: &OsStr) -> bool;
}

/// Queries the real filesystem on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveDirectory;

impl DirectoryState for LiveDirectory {
    fn contains(&self, dir: &Path, name: &OsStr) -> bool {
        // symlink_metadata so a dangling symlink still counts as taken
        fs::symlink_metadata(dir.join(name)).is_ok()
    }
}

/// Name for the `n`th collision candidate: `stem-n.ext` (or `stem-n` without extension).
pub fn numbered_name(name: &OsStr, n: u64) -> OsString {
    let bytes = name_bytes(name);
    let (stem, ext) = match extension_dot(&bytes) {
        Some(dot) => (&bytes[..dot], &bytes[dot..]),
        None => (&bytes[..], &[][..]),
    };
    let mut out = Vec::with_capacity(bytes.len() + 8);
    out.extend_from_slice(stem);
    out.extend_from_slice(format!("-{n}").as_bytes());
    out.extend_from_slice(ext);
    name_from_bytes(out)
}

/// Resolve `proposed` to a name that is free in `dir`.
pub fn resolve_target<S>(state: &S, dir: &Path, proposed: &OsStr) -> Result<OsString, CullError>
where
    S: DirectoryState + ?Sized,
{
    resolve_target_bounded(state, dir, proposed, MAX_SUFFIX_PROBES)
}

pub(crate) fn resolve_target_bounded<S>(
    state: &S,
    dir: &Path,
    proposed: &OsStr,
    max_probes: u64,
) -> Result<OsString, CullError>
where
    S: DirectoryState + ?Sized,
{
    if !state.contains(dir, proposed) {
        return Ok(proposed.to_os_string());
    }

    for n in 1..=max_probes {
        let candidate = numbered_name(proposed, n);
        if !state.contains(dir, &candidate) {
            return Ok(candidate);
        }
        if n == 3 {
            trace!(name = ?proposed, dir = %dir.display(), "multiple collisions, still probing");
        }
    }

    Err(CullError::CollisionExhausted {
        dir: dir.to_path_buf(),
        name: proposed.to_string_lossy().into_owned(),
        attempts: max_probes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    struct Names(HashSet<&'static str>);

    impl DirectoryState for Names {
        fn contains(&self, _dir: &Path, name: &OsStr) -> bool {
            name.to_str().is_some_and(|n| self.0.contains(n))
        }
    }

    struct AlwaysTaken;

    impl DirectoryState for AlwaysTaken {
        fn contains(&self, _dir: &Path, _name: &OsStr) -> bool {
            true
        }
    }

    fn dir() -> PathBuf {
        PathBuf::from("/virtual")
    }

    #[test]
    fn free_name_is_kept() {
        let state = Names(HashSet::new());
        assert_eq!(resolve_target(&state, &dir(), OsStr::new("a.txt")).unwrap(), "a.txt");
    }

    #[test]
    fn skips_taken_suffixes() {
        let state = Names(["a.txt", "a-1.txt"].into_iter().collect());
        assert_eq!(resolve_target(&state, &dir(), OsStr::new("a.txt")).unwrap(), "a-2.txt");
    }

    #[test]
    fn suffix_starts_at_one_even_if_higher_ones_are_free() {
        let state = Names(["a.txt", "a-2.txt"].into_iter().collect());
        assert_eq!(resolve_target(&state, &dir(), OsStr::new("a.txt")).unwrap(), "a-1.txt");
    }

    #[test]
    fn numbered_name_forms() {
        assert_eq!(numbered_name(OsStr::new("movie.mkv"), 1), "movie-1.mkv");
        assert_eq!(numbered_name(OsStr::new("archive.tar.gz"), 2), "archive.tar-2.gz");
        assert_eq!(numbered_name(OsStr::new(".env"), 1), ".env-1");
        assert_eq!(numbered_name(OsStr::new("README"), 3), "README-3");
    }

    #[cfg(unix)]
    #[test]
    fn numbered_name_keeps_raw_bytes() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};
        let name = OsStr::from_bytes(b"caf\xe9.mp4");
        assert_eq!(numbered_name(name, 2).into_vec(), b"caf\xe9-2.mp4".to_vec());
    }

    #[test]
    fn adversarial_state_is_bounded() {
        let err = resolve_target_bounded(&AlwaysTaken, &dir(), OsStr::new("a.txt"), 50).unwrap_err();
        match err {
            CullError::CollisionExhausted { attempts, name, .. } => {
                assert_eq!(attempts, 50);
                assert_eq!(name, "a.txt");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn adversarial_state_is_bounded_at_default_cap() {
        let err = resolve_target(&AlwaysTaken, &dir(), OsStr::new("a.txt")).unwrap_err();
        assert_eq!(err.kind(), "collision_exhausted");
    }

    #[test]
    fn live_directory_sees_real_files() {
        let td = tempfile::tempdir().unwrap();
        std::fs::write(td.path().join("a.txt"), b"x").unwrap();
        assert!(LiveDirectory.contains(td.path(), OsStr::new("a.txt")));
        assert!(!LiveDirectory.contains(td.path(), OsStr::new("b.txt")));
        assert_eq!(resolve_target(&LiveDirectory, td.path(), OsStr::new("a.txt")).unwrap(), "a-1.txt");
    }
}
