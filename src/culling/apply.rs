//! Applying a plan.
//! Processes intents strictly in plan order: resolve the target against live
//! directory state, rename atomically, report progress, record failures.
//!
//! Notes:
//! - No rollback: a failed item is recorded and the run moves on.
//! - A shutdown request is honoured between intents, never in the middle of one.

use std::ffi::OsStr;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::errors::CullError;
use crate::fs_ops::try_atomic_rename;
use crate::progress::Progress;
use crate::shutdown;

use super::plan::{Plan, RenameIntent};
use super::resolve::{resolve_target, DirectoryState};
use super::summary::{ItemFailure, Renamed, RunSummary};

enum Outcome {
    Renamed(PathBuf),
    Unchanged,
}

/// Names that cannot be used as a file name on their own.
fn is_unusable(name: &OsStr) -> bool {
    name.is_empty() || name == "." || name == ".."
}

fn apply_intent<S>(intent: &RenameIntent, state: &S) -> Result<Outcome, ItemFailure>
where
    S: DirectoryState + ?Sized,
{
    let dir = &intent.file.dir;
    let source = intent.file.path();

    if is_unusable(&intent.proposed) {
        return Err(ItemFailure {
            path: source,
            target: None,
            error: CullError::UnusableName {
                dir: dir.clone(),
                original: intent.file.name.to_string_lossy().into_owned(),
                proposed: intent.proposed.to_string_lossy().into_owned(),
            },
        });
    }

    let name = match resolve_target(state, dir, &intent.proposed) {
        Ok(n) => n,
        Err(error) => {
            return Err(ItemFailure {
                path: source,
                target: None,
                error,
            });
        }
    };

    let target = dir.join(&name);
    if target == source {
        return Ok(Outcome::Unchanged);
    }

    match try_atomic_rename(&source, &target) {
        Ok(()) => Ok(Outcome::Renamed(target)),
        Err(error) => Err(ItemFailure {
            path: source,
            target: Some(target),
            error,
        }),
    }
}

/// Apply every intent of `plan` in order. Never fails as a whole; see `RunSummary`.
pub fn apply_plan<S, P>(plan: Plan, state: &S, progress: &mut P) -> RunSummary
where
    S: DirectoryState + ?Sized,
    P: Progress + ?Sized,
{
    let Plan {
        intents, failures, ..
    } = plan;

    let mut summary = RunSummary {
        planned: intents.len(),
        failures,
        ..Default::default()
    };

    if intents.is_empty() {
        info!("Nothing to rename");
        return summary;
    }

    progress.start(intents.len() as u64);
    for intent in &intents {
        if shutdown::is_requested() {
            warn!(
                remaining = summary.planned - summary.processed(),
                "Shutdown requested; stopping before the next rename"
            );
            summary.interrupted = true;
            break;
        }

        let source = intent.file.path();
        match apply_intent(intent, state) {
            Ok(Outcome::Renamed(target)) => {
                debug!(from = %source.display(), to = %target.display(), "Renamed");
                summary.renamed.push(Renamed {
                    from: source.clone(),
                    to: target,
                });
            }
            Ok(Outcome::Unchanged) => {
                debug!(path = %source.display(), "Resolved target is the current name; nothing to do");
                summary.unchanged += 1;
            }
            Err(failure) => {
                warn!(
                    code = failure.error.code(),
                    kind = failure.error.kind(),
                    path = %failure.path.display(),
                    error = %failure.error,
                    "Rename failed"
                );
                summary.failures.push(failure);
            }
        }
        progress.advance(&source);
    }
    progress.finish();

    info!(
        renamed = summary.renamed_count(),
        unchanged = summary.unchanged,
        failed = summary.failed_count(),
        interrupted = summary.interrupted,
        "Run finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::culling::plan::FileRef;
    use crate::culling::resolve::LiveDirectory;
    use crate::progress::NoProgress;
    use assert_fs::prelude::*;
    use serial_test::serial;
    use std::path::Path;

    #[derive(Default)]
    struct Recorder(Vec<PathBuf>);

    impl Progress for Recorder {
        fn advance(&mut self, item: &Path) {
            self.0.push(item.to_path_buf());
        }
    }

    fn intent(dir: &Path, name: &str, proposed: &str) -> RenameIntent {
        RenameIntent {
            file: FileRef {
                dir: dir.to_path_buf(),
                name: name.into(),
            },
            proposed: proposed.into(),
        }
    }

    fn plan_of(intents: Vec<RenameIntent>) -> Plan {
        Plan {
            intents,
            ..Default::default()
        }
    }

    #[test]
    #[serial]
    fn empty_plan_touches_nothing() {
        let mut rec = Recorder::default();
        let summary = apply_plan(Plan::default(), &LiveDirectory, &mut rec);
        assert!(summary.nothing_to_do());
        assert_eq!(summary.renamed_count(), 0);
        assert_eq!(summary.failed_count(), 0);
        assert!(rec.0.is_empty());
    }

    #[test]
    #[serial]
    fn later_intent_sees_earlier_rename() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("x1.txt").write_str("1").unwrap();
        dir.child("x2.txt").write_str("2").unwrap();

        let plan = plan_of(vec![
            intent(dir.path(), "x1.txt", "x.txt"),
            intent(dir.path(), "x2.txt", "x.txt"),
        ]);
        let mut rec = Recorder::default();
        let summary = apply_plan(plan, &LiveDirectory, &mut rec);

        assert!(summary.is_success());
        assert_eq!(std::fs::read_to_string(dir.path().join("x.txt")).unwrap(), "1");
        assert_eq!(std::fs::read_to_string(dir.path().join("x-1.txt")).unwrap(), "2");
        assert_eq!(rec.0.len(), 2);
    }

    #[test]
    #[serial]
    fn failure_does_not_stop_the_run() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("[x]b.txt").touch().unwrap();

        let plan = plan_of(vec![
            intent(dir.path(), "[x]gone.txt", "gone.txt"),
            intent(dir.path(), "[x]b.txt", "b.txt"),
        ]);
        let mut rec = Recorder::default();
        let summary = apply_plan(plan, &LiveDirectory, &mut rec);

        assert_eq!(summary.renamed_count(), 1);
        assert_eq!(summary.failed_count(), 1);
        let failure = &summary.failures[0];
        assert_eq!(failure.path, dir.path().join("[x]gone.txt"));
        assert_eq!(failure.target.as_deref(), Some(dir.path().join("gone.txt").as_path()));
        assert_eq!(failure.error.kind(), "rename_failed");
        assert!(dir.path().join("b.txt").exists());
        assert_eq!(rec.0.len(), 2, "progress is reported for failed items too");
    }

    #[test]
    #[serial]
    fn empty_proposal_is_rejected_not_applied() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("junk").touch().unwrap();

        let summary = apply_plan(plan_of(vec![intent(dir.path(), "junk", "")]), &LiveDirectory, &mut NoProgress);
        assert_eq!(summary.failed_count(), 1);
        assert!(matches!(summary.failures[0].error, CullError::UnusableName { .. }));
        assert!(dir.path().join("junk").exists());
    }

    #[test]
    #[serial]
    fn shutdown_stops_before_next_intent() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("[x]a.txt").touch().unwrap();

        shutdown::request();
        let summary = apply_plan(
            plan_of(vec![intent(dir.path(), "[x]a.txt", "a.txt")]),
            &LiveDirectory,
            &mut NoProgress,
        );
        shutdown::reset();

        assert!(summary.interrupted);
        assert!(!summary.is_success());
        assert_eq!(summary.renamed_count(), 0);
        assert!(dir.path().join("[x]a.txt").exists());
    }

    #[test]
    #[serial]
    fn enumeration_failures_carry_into_summary() {
        let plan = Plan {
            failures: vec![ItemFailure {
                path: PathBuf::from("/unreadable"),
                target: None,
                error: CullError::Enumeration {
                    path: PathBuf::from("/unreadable"),
                    source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                },
            }],
            ..Default::default()
        };
        let summary = apply_plan(plan, &LiveDirectory, &mut NoProgress);
        assert_eq!(summary.failed_count(), 1);
        assert!(!summary.nothing_to_do());
        assert_eq!(summary.processed(), 0);
    }

    #[test]
    #[serial]
    fn interrupted_run_logs_reach_file_while_guard_is_held() {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::{fmt as tsfmt, registry};

        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("[x]a.txt").touch().unwrap();
        let log_path = dir.path().join("run.log");
        let file = std::fs::File::create(&log_path).unwrap();

        let (writer, guard) = tracing_appender::non_blocking(file);
        let layer = tsfmt::layer().with_writer(writer).with_ansi(false);
        let dispatch = tracing::Dispatch::new(registry().with(EnvFilter::new("info")).with(layer));

        shutdown::request();
        let summary = tracing::dispatcher::with_default(&dispatch, || {
            apply_plan(
                plan_of(vec![intent(dir.path(), "[x]a.txt", "a.txt")]),
                &LiveDirectory,
                &mut NoProgress,
            )
        });
        shutdown::reset();
        drop(guard);

        assert!(summary.interrupted);
        let text = std::fs::read_to_string(&log_path).unwrap();
        assert!(text.contains("Shutdown requested"), "log was: {text}");
        assert!(text.contains("Run finished"), "log was: {text}");
    }
}
