use std::io;
use std::path::Path;

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = std::fs::File::open(dir)?;
    f.sync_all()
}

#[cfg(windows)]
#[allow(dead_code)]
pub(super) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
