//! Output formatting for runs.
//!
//! The engine reports progress to a [`TestFormatter`] through a fixed set of
//! events: the run starts, a group starts, a test finishes, a group finishes
//! and the run finishes (or is aborted). Formatters decide what, if anything,
//! gets written. Errors returned by a formatter never stop the run; they are
//! collected into the [`RunReport`](crate::RunReport) together with the
//! [`FormatError`] naming the event that failed.

use std::{io, time::Duration};

use crate::{error::Error, outcome::TestOutcome};

pub mod color;
pub mod no;
pub mod pretty;
pub mod style;

/// The formatter event that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatError {
    RunStart,
    GroupStart,
    TestOutcome,
    GroupOutcomes,
    RunOutcomes,
    RunAborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtRunStart {
    pub groups: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtGroupStart<'g> {
    /// The group name, or `Group <position>` for unnamed groups.
    pub label: &'g str,
    /// 1-based position of the group in the run.
    pub position: usize,
    pub groups: usize,
    /// Number of tests that will run, after focus resolution.
    pub tests: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtTestOutcome<'t> {
    pub name: &'t str,
    pub outcome: &'t TestOutcome,
    /// 1-based position of the test in its group.
    pub position: usize,
    pub tests: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtGroupOutcomes<'g> {
    pub label: &'g str,
    pub passed: usize,
    pub tests: usize,
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtRunOutcomes {
    pub passed: usize,
    pub tests: usize,
    pub groups: usize,
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtRunAborted<'e> {
    pub error: &'e Error,
    pub duration: Duration,
}

/// Receives the progress of a run.
///
/// Only [`fmt_test_outcome`](Self::fmt_test_outcome) is required, every
/// other event defaults to doing nothing.
pub trait TestFormatter {
    fn fmt_run_start(&mut self, data: FmtRunStart) -> io::Result<()> {
        let _ = data;
        Ok(())
    }

    fn fmt_group_start(&mut self, data: FmtGroupStart<'_>) -> io::Result<()> {
        let _ = data;
        Ok(())
    }

    fn fmt_test_outcome(&mut self, data: FmtTestOutcome<'_>) -> io::Result<()>;

    fn fmt_group_outcomes(&mut self, data: FmtGroupOutcomes<'_>) -> io::Result<()> {
        let _ = data;
        Ok(())
    }

    fn fmt_run_outcomes(&mut self, data: FmtRunOutcomes) -> io::Result<()> {
        let _ = data;
        Ok(())
    }

    fn fmt_run_aborted(&mut self, data: FmtRunAborted<'_>) -> io::Result<()> {
        let _ = data;
        Ok(())
    }
}

impl<F: TestFormatter + ?Sized> TestFormatter for &mut F {
    fn fmt_run_start(&mut self, data: FmtRunStart) -> io::Result<()> {
        (**self).fmt_run_start(data)
    }

    fn fmt_group_start(&mut self, data: FmtGroupStart<'_>) -> io::Result<()> {
        (**self).fmt_group_start(data)
    }

    fn fmt_test_outcome(&mut self, data: FmtTestOutcome<'_>) -> io::Result<()> {
        (**self).fmt_test_outcome(data)
    }

    fn fmt_group_outcomes(&mut self, data: FmtGroupOutcomes<'_>) -> io::Result<()> {
        (**self).fmt_group_outcomes(data)
    }

    fn fmt_run_outcomes(&mut self, data: FmtRunOutcomes) -> io::Result<()> {
        (**self).fmt_run_outcomes(data)
    }

    fn fmt_run_aborted(&mut self, data: FmtRunAborted<'_>) -> io::Result<()> {
        (**self).fmt_run_aborted(data)
    }
}
