use std::{io, time::Instant};

use crate::{
    error::Error,
    formatter::{
        FmtRunAborted, FmtRunOutcomes, FmtRunStart, FormatError, TestFormatter,
        pretty::PrettyFormatter,
    },
    group::TestGroup,
    panic::SilentPanicHookGuard,
    report::RunReport,
    runner::GroupRunner,
};

/// An ordered list of groups plus the formatter reporting on them.
pub struct Harness<'g, Formatter> {
    pub(crate) groups: Vec<Box<dyn TestGroup + 'g>>,
    pub(crate) formatter: Formatter,
}

/// A harness without groups that prints to stdout.
pub fn harness<'g>() -> Harness<'g, PrettyFormatter<io::Stdout>> {
    Harness {
        groups: Vec::new(),
        formatter: PrettyFormatter::default(),
    }
}

/// Run `groups` in order with the default formatter.
pub fn run_tests<'g, I>(groups: I) -> Result<RunReport, Error>
where
    I: IntoIterator,
    I::Item: TestGroup + 'g,
{
    harness().with_groups(groups).run()
}

impl<'g, Formatter> Harness<'g, Formatter> {
    pub fn with_group(mut self, group: impl TestGroup + 'g) -> Self {
        self.groups.push(Box::new(group));
        self
    }

    pub fn with_groups<I>(mut self, groups: I) -> Self
    where
        I: IntoIterator,
        I::Item: TestGroup + 'g,
    {
        self.groups.extend(
            groups
                .into_iter()
                .map(|group| Box::new(group) as Box<dyn TestGroup + 'g>),
        );
        self
    }

    pub fn with_formatter<WithFormatter>(
        self,
        formatter: WithFormatter,
    ) -> Harness<'g, WithFormatter> {
        Harness {
            groups: self.groups,
            formatter,
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'g, Formatter: TestFormatter> Harness<'g, Formatter> {
    /// Run every group in order.
    ///
    /// Failing tests are part of the returned report. An `Err` means the run
    /// was aborted, either by a failing hook or by a failing registration.
    pub fn run(self) -> Result<RunReport, Error> {
        let now = Instant::now();
        let Self {
            mut groups,
            mut formatter,
        } = self;

        let _panic_hook = SilentPanicHookGuard::install();
        let mut runner = GroupRunner::new(groups.len(), &mut formatter);
        tracing::debug!(groups = groups.len(), "starting run");

        let result = runner.formatter().fmt_run_start(FmtRunStart {
            groups: groups.len(),
        });
        runner.push_fmt_error(FormatError::RunStart, result);

        let mut reports = Vec::with_capacity(groups.len());
        for group in groups.iter_mut() {
            match group.run(&mut runner) {
                Ok(report) => reports.push(report),
                Err(error) => {
                    let result = runner.formatter().fmt_run_aborted(FmtRunAborted {
                        error: &error,
                        duration: now.elapsed(),
                    });
                    runner.push_fmt_error(FormatError::RunAborted, result);
                    return Err(error);
                }
            }
        }

        let duration = now.elapsed();
        let counters = *runner.counters();
        let result = runner.formatter().fmt_run_outcomes(FmtRunOutcomes {
            passed: counters.total_passed,
            tests: counters.total_tests,
            groups: counters.total_groups,
            duration,
        });
        runner.push_fmt_error(FormatError::RunOutcomes, result);
        tracing::info!(
            passed = counters.total_passed,
            total = counters.total_tests,
            "finished run"
        );

        let (counters, fmt_errors) = runner.into_parts();
        Ok(RunReport {
            groups: reports,
            counters,
            duration,
            fmt_errors,
        })
    }
}
