use std::io;

use crate::formatter::{FmtTestOutcome, TestFormatter};

/// A formatter that produces no output.
///
/// Useful when the [`RunReport`](crate::RunReport) is all we care about, for
/// example when embedding the harness into a system with its own reporting.
#[derive(Debug, Default, Clone)]
pub struct NoFormatter;

impl TestFormatter for NoFormatter {
    fn fmt_test_outcome(&mut self, _: FmtTestOutcome<'_>) -> io::Result<()> {
        Ok(())
    }
}
