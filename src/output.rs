use owo_colors::OwoColorize;

use crate::culling::RunSummary;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// One-line description of a run, e.g. "renamed 3, unchanged 0, failed 1".
pub fn summary_line(summary: &RunSummary) -> String {
    let mut line = format!(
        "renamed {}, unchanged {}, failed {}",
        summary.renamed_count(),
        summary.unchanged,
        summary.failed_count()
    );
    if summary.interrupted {
        line.push_str(" (interrupted)");
    }
    line
}

/// Report a finished run: "nothing to do", or the counts followed by one line per failure.
pub fn print_summary(summary: &RunSummary) {
    if summary.nothing_to_do() {
        print_info("No file names need changing in this folder.");
        return;
    }

    let line = summary_line(summary);
    if summary.is_success() {
        print_success(&format!("Done: {line}"));
    } else {
        print_warn(&format!("Finished with problems: {line}"));
    }

    for failure in &summary.failures {
        print_error(&failure.error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::culling::Renamed;
    use std::path::PathBuf;

    #[test]
    fn summary_line_counts() {
        let summary = RunSummary {
            planned: 2,
            renamed: vec![Renamed {
                from: PathBuf::from("/d/[x]a.txt"),
                to: PathBuf::from("/d/a.txt"),
            }],
            unchanged: 1,
            ..Default::default()
        };
        assert_eq!(summary_line(&summary), "renamed 1, unchanged 1, failed 0");
    }

    #[test]
    fn summary_line_marks_interruption() {
        let summary = RunSummary {
            planned: 4,
            interrupted: true,
            ..Default::default()
        };
        assert!(summary_line(&summary).ends_with("(interrupted)"));
    }
}
