//! Progress reporting seam between the applier and the terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Receives one `advance` per processed rename intent.
pub trait Progress {
    fn start(&mut self, _total: u64) {}
    fn advance(&mut self, item: &Path);
    fn finish(&mut self) {}
}

/// Discards progress (library callers, tests, `--no-progress`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn advance(&mut self, _item: &Path) {}
}

impl Progress for ProgressBar {
    fn start(&mut self, total: u64) {
        self.set_length(total);
        self.set_position(0);
    }

    fn advance(&mut self, item: &Path) {
        if let Some(name) = item.file_name() {
            self.set_message(name.to_string_lossy().into_owned());
        }
        self.inc(1);
    }

    fn finish(&mut self) {
        self.finish_and_clear();
    }
}

/// Terminal progress bar; hidden when disabled or when stderr is not a TTY.
pub fn terminal_bar(enabled: bool) -> ProgressBar {
    if !enabled || !atty::is(atty::Stream::Stderr) {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(0);
    if let Ok(style) =
        ProgressStyle::default_bar().template("Processing [{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} {msg}")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_bar_still_counts() {
        let mut pb = terminal_bar(false);
        Progress::start(&mut pb, 3);
        pb.advance(Path::new("/tmp/a.txt"));
        pb.advance(Path::new("/tmp/b.txt"));
        assert_eq!(pb.position(), 2);
        assert_eq!(pb.length(), Some(3));
    }
}
