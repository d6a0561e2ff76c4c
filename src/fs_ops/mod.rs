//! Filesystem operations shared by the planner and the applier.

mod atomic;
mod helpers;
mod util;

pub use atomic::try_atomic_rename;
pub use helpers::{io_error_with_help, io_hint};
