//! The execution engine.
//!
//! A [`GroupRunner`] lives for one harness run. It owns the [`RunCounters`],
//! executes groups strictly one after another and, inside a group, runs
//! every test wrapped in its `before each` and `after each` hooks. Tests
//! never abort the run; a failing hook does.

use std::{io, time::Instant};

use crate::{
    error::Error,
    formatter::{FmtGroupOutcomes, FmtGroupStart, FmtTestOutcome, FormatError, TestFormatter},
    group::effective_tests,
    handle::TestHandle,
    hook::{HookKind, Hooks},
    outcome::{TestFailure, TestOutcome, TestStatus},
    panic::catch_panic,
    report::GroupReport,
    test::{Test, TestResult},
};

/// Aggregate counters of one run, reset for every run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub total_groups: usize,
    pub total_tests: usize,
    pub total_passed: usize,
    pub group_tests: usize,
    pub group_passed: usize,
    /// 1-based position of the current group.
    pub current_group: usize,
    /// 1-based position of the current test within its group.
    pub current_test: usize,
}

impl RunCounters {
    pub fn new(total_groups: usize) -> Self {
        Self {
            total_groups,
            ..Self::default()
        }
    }

    pub fn all_passed(&self) -> bool {
        self.total_passed == self.total_tests
    }
}

pub struct GroupRunner<'f> {
    counters: RunCounters,
    formatter: &'f mut dyn TestFormatter,
    fmt_errors: Vec<(FormatError, io::Error)>,
}

impl<'f> GroupRunner<'f> {
    pub(crate) fn new(total_groups: usize, formatter: &'f mut dyn TestFormatter) -> Self {
        Self {
            counters: RunCounters::new(total_groups),
            formatter,
            fmt_errors: Vec::new(),
        }
    }

    pub fn counters(&self) -> &RunCounters {
        &self.counters
    }

    pub(crate) fn formatter(&mut self) -> &mut dyn TestFormatter {
        &mut *self.formatter
    }

    pub(crate) fn push_fmt_error(&mut self, kind: FormatError, result: io::Result<()>) {
        if let Err(err) = result {
            tracing::debug!(?kind, %err, "formatter failed");
            self.fmt_errors.push((kind, err));
        }
    }

    pub(crate) fn into_parts(self) -> (RunCounters, Vec<(FormatError, io::Error)>) {
        (self.counters, self.fmt_errors)
    }

    /// Run one group: resolve the effective tests, then run the hooks and
    /// tests in order.
    pub fn run_group<Ctx>(
        &mut self,
        name: Option<&str>,
        ctx: &mut Ctx,
        tests: &[Test<Ctx>],
        hooks: &Hooks<Ctx>,
    ) -> Result<GroupReport, Error> {
        let now = Instant::now();
        let effective = effective_tests(tests);

        self.counters.current_group += 1;
        self.counters.current_test = 0;
        self.counters.total_tests += effective.len();
        self.counters.group_tests = effective.len();
        self.counters.group_passed = 0;

        let position = self.counters.current_group;
        let label = name
            .map(str::to_string)
            .unwrap_or_else(|| format!("Group {position}"));
        tracing::debug!(
            group = %label,
            position,
            tests = effective.len(),
            focused = effective.len() != tests.len(),
            "running group"
        );

        let result = self.formatter.fmt_group_start(FmtGroupStart {
            label: &label,
            position,
            groups: self.counters.total_groups,
            tests: effective.len(),
        });
        self.push_fmt_error(FormatError::GroupStart, result);

        self.run_hook(HookKind::BeforeAll, hooks, ctx, &label)?;

        let mut outcomes = Vec::with_capacity(effective.len());
        for test in effective {
            self.run_hook(HookKind::BeforeEach, hooks, ctx, &label)?;
            let outcome = self.run_test(test, ctx);
            self.run_hook(HookKind::AfterEach, hooks, ctx, &label)?;
            outcomes.push((test.name.clone(), outcome));
        }

        self.run_hook(HookKind::AfterAll, hooks, ctx, &label)?;

        let duration = now.elapsed();
        let passed = self.counters.group_passed;
        let result = self.formatter.fmt_group_outcomes(FmtGroupOutcomes {
            label: &label,
            passed,
            tests: outcomes.len(),
            duration,
        });
        self.push_fmt_error(FormatError::GroupOutcomes, result);

        Ok(GroupReport {
            name: name.map(str::to_string),
            label,
            outcomes,
            passed,
            duration,
        })
    }

    /// Run a single test body and translate everything it did into one outcome.
    fn run_test<Ctx>(&mut self, test: &Test<Ctx>, ctx: &Ctx) -> TestOutcome {
        self.counters.current_test += 1;
        tracing::trace!(test = %test.name, position = self.counters.current_test, "running test");

        let now = Instant::now();
        let mut handle = TestHandle::new(ctx);
        let result = catch_panic(|| test.call(&mut handle));
        let duration = now.elapsed();

        let recorded = handle.take_failure();
        let status = match (recorded, result) {
            (Some(failure), _) => TestStatus::Failed(failure),
            (None, Ok(TestResult(Ok(())))) => TestStatus::Passed,
            (None, Ok(TestResult(Err(failure)))) => TestStatus::Failed(failure),
            (None, Err(payload)) => TestStatus::Failed(TestFailure::Panicked(payload)),
        };

        if status.passed() {
            self.counters.total_passed += 1;
            self.counters.group_passed += 1;
        }

        let outcome = TestOutcome { status, duration };
        tracing::trace!(test = %test.name, passed = outcome.passed(), "finished test");

        let result = self.formatter.fmt_test_outcome(FmtTestOutcome {
            name: &test.name,
            outcome: &outcome,
            position: self.counters.current_test,
            tests: self.counters.group_tests,
        });
        self.push_fmt_error(FormatError::TestOutcome, result);

        outcome
    }

    fn run_hook<Ctx>(
        &mut self,
        kind: HookKind,
        hooks: &Hooks<Ctx>,
        ctx: &mut Ctx,
        label: &str,
    ) -> Result<(), Error> {
        let Some(hook) = hooks.get(kind) else {
            return Ok(());
        };

        tracing::debug!(group = %label, hook = %kind, "running hook");
        let reason = match catch_panic(|| hook.call(ctx)) {
            Ok(TestResult(Ok(()))) => return Ok(()),
            Ok(TestResult(Err(failure))) => failure.to_string(),
            Err(payload) => format!("panicked: {payload}"),
        };

        tracing::warn!(group = %label, hook = %kind, %reason, "hook failed, aborting run");
        Err(Error::HookFailed {
            group: label.to_string(),
            hook: kind,
            reason,
        })
    }
}
