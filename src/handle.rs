use std::{fmt::Debug, ops::Deref};

use thiserror::Error;

use crate::outcome::TestFailure;

/// The failure raised by assertions.
///
/// Return it from a test body (usually via [`TestHandle::ensure`] and `?`) to
/// stop the body early. Its message becomes the reported failure reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or("test failed"))]
pub struct AssertionFailure {
    pub message: Option<String>,
}

impl AssertionFailure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// The view a running test has on the engine.
///
/// A handle lives for exactly one test invocation. It gives read access to
/// the group context and records failures. Recording does not stop the test
/// body; use [`ensure`](Self::ensure) with `?` for that.
///
/// Only the first recorded failure is kept.
pub struct TestHandle<'c, Ctx> {
    ctx: &'c Ctx,
    failure: Option<TestFailure>,
}

impl<'c, Ctx> TestHandle<'c, Ctx> {
    pub(crate) fn new(ctx: &'c Ctx) -> Self {
        Self { ctx, failure: None }
    }

    pub fn context(&self) -> &'c Ctx {
        self.ctx
    }

    /// Mark the test as failed without a reason.
    pub fn fail(&mut self) {
        self.record(None);
    }

    /// Mark the test as failed with `reason`.
    pub fn fail_with(&mut self, reason: impl Into<String>) {
        self.record(Some(reason.into()));
    }

    /// Fail the test if `condition` is false. Returns `condition`.
    pub fn assert(&mut self, condition: bool) -> bool {
        if !condition {
            self.record(None);
        }
        condition
    }

    /// Fail the test with `message` if `condition` is false. Returns `condition`.
    pub fn assert_with(&mut self, condition: bool, message: impl Into<String>) -> bool {
        if !condition {
            self.record(Some(message.into()));
        }
        condition
    }

    /// Fail the test if `actual != expected`.
    pub fn expect<T>(&mut self, actual: T, expected: T) -> bool
    where
        T: PartialEq,
    {
        self.assert(actual == expected)
    }

    /// Fail the test with `message` if `actual != expected`.
    pub fn expect_with<T>(&mut self, actual: T, expected: T, message: impl Into<String>) -> bool
    where
        T: PartialEq,
    {
        self.assert_with(actual == expected, message)
    }

    /// Like [`assert_with`](Self::assert_with) but meant for `?`.
    ///
    /// The failure is not recorded on the handle; returning the error from
    /// the body is what fails the test.
    pub fn ensure(
        &self,
        condition: bool,
        message: impl Into<String>,
    ) -> Result<(), AssertionFailure> {
        match condition {
            true => Ok(()),
            false => Err(AssertionFailure::with_message(message)),
        }
    }

    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }

    pub(crate) fn take_failure(&mut self) -> Option<TestFailure> {
        self.failure.take()
    }

    fn record(&mut self, message: Option<String>) {
        if self.failure.is_none() {
            self.failure = Some(TestFailure::Assertion { message });
        }
    }
}

impl<Ctx> Deref for TestHandle<'_, Ctx> {
    type Target = Ctx;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl<Ctx: Debug> Debug for TestHandle<'_, Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestHandle")
            .field("ctx", self.ctx)
            .field("failure", &self.failure)
            .finish()
    }
}
