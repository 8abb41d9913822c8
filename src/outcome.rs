use std::{fmt, time::Duration};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TestOutcome {
    pub status: TestStatus,
    pub duration: Duration,
}

impl TestOutcome {
    pub fn passed(&self) -> bool {
        self.status.passed()
    }

    pub fn failed(&self) -> bool {
        self.status.failed()
    }

    /// The reason of a failed test, if it has one.
    pub fn reason(&self) -> Option<&str> {
        match &self.status {
            TestStatus::Passed => None,
            TestStatus::Failed(failure) => failure.reason(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestStatus {
    Passed,
    Failed(TestFailure),
}

impl TestStatus {
    pub fn passed(&self) -> bool {
        matches!(self, TestStatus::Passed)
    }

    pub fn failed(&self) -> bool {
        matches!(self, TestStatus::Failed(_))
    }
}

/// Why a test failed.
///
/// Failures recorded through the [`TestHandle`](crate::handle::TestHandle),
/// returned [`AssertionFailure`](crate::handle::AssertionFailure)s, other
/// returned errors and panics all end up here.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestFailure {
    Assertion { message: Option<String> },
    Error(String),
    Panicked(String),
}

impl TestFailure {
    pub fn reason(&self) -> Option<&str> {
        match self {
            TestFailure::Assertion { message } => message.as_deref(),
            TestFailure::Error(msg) | TestFailure::Panicked(msg) => Some(msg),
        }
    }
}

impl fmt::Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestFailure::Assertion { message: None } => f.write_str("assertion failed"),
            TestFailure::Assertion {
                message: Some(message),
            } => f.write_str(message),
            TestFailure::Error(msg) => f.write_str(msg),
            TestFailure::Panicked(msg) => write!(f, "panicked: {msg}"),
        }
    }
}

impl From<TestFailure> for TestStatus {
    fn from(value: TestFailure) -> Self {
        TestStatus::Failed(value)
    }
}
