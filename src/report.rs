use std::{
    borrow::Cow,
    io,
    process::{ExitCode, Termination},
    time::Duration,
};

use crate::{formatter::FormatError, outcome::TestOutcome, runner::RunCounters};

pub type TestOutcomes = Vec<(Cow<'static, str>, TestOutcome)>;

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GroupReport {
    pub name: Option<String>,
    /// The name, or `Group <position>` for unnamed groups.
    pub label: String,
    pub outcomes: TestOutcomes,
    pub passed: usize,
    pub duration: Duration,
}

impl GroupReport {
    pub fn tests(&self) -> usize {
        self.outcomes.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.tests()
    }

    pub fn outcome(&self, name: &str) -> Option<&TestOutcome> {
        self.outcomes
            .iter()
            .find(|(test, _)| test == name)
            .map(|(_, outcome)| outcome)
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub struct RunReport {
    pub groups: Vec<GroupReport>,
    pub counters: RunCounters,
    pub duration: Duration,
    pub fmt_errors: Vec<(FormatError, io::Error)>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.counters.total_passed
    }

    pub fn total(&self) -> usize {
        self.counters.total_tests
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.counters.all_passed()
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.is_success() {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        }
    }
}

impl Termination for RunReport {
    fn report(self) -> ExitCode {
        self.exit_code()
    }
}
