//! Imperative registration.
//!
//! A [`Setup`] group is a name and a function that registers tests and
//! hooks on a fresh [`Registry`]. The registry only lives for one run of
//! that group, so nothing registered for one group leaks into the next.

use std::borrow::Cow;

use crate::{
    error::Error,
    group::{Group, TestGroup},
    handle::TestHandle,
    hook::HookKind,
    report::GroupReport,
    runner::GroupRunner,
    test::TestResult,
};

/// The registration buffer for one group.
#[derive(Debug)]
pub struct Registry {
    group: Group<()>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            group: Group::unnamed(()),
        }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a test. Fails if `name` is already registered.
    pub fn test<F, T>(&mut self, name: impl Into<Cow<'static, str>>, body: F) -> Result<(), Error>
    where
        F: Fn(&mut TestHandle<'_, ()>) -> T + 'static,
        T: Into<TestResult>,
    {
        self.group.test(name, body).map(|_| ())
    }

    /// Register a focused test. Fails if `name` is already registered as focused.
    pub fn only<F, T>(&mut self, name: impl Into<Cow<'static, str>>, body: F) -> Result<(), Error>
    where
        F: Fn(&mut TestHandle<'_, ()>) -> T + 'static,
        T: Into<TestResult>,
    {
        self.group.only(name, body).map(|_| ())
    }

    pub fn before_all<F, T>(&mut self, f: F)
    where
        F: Fn() -> T + 'static,
        T: Into<TestResult>,
    {
        self.group.hook(HookKind::BeforeAll, move |_: &mut ()| f());
    }

    pub fn before_each<F, T>(&mut self, f: F)
    where
        F: Fn() -> T + 'static,
        T: Into<TestResult>,
    {
        self.group.hook(HookKind::BeforeEach, move |_: &mut ()| f());
    }

    pub fn after_each<F, T>(&mut self, f: F)
    where
        F: Fn() -> T + 'static,
        T: Into<TestResult>,
    {
        self.group.hook(HookKind::AfterEach, move |_: &mut ()| f());
    }

    pub fn after_all<F, T>(&mut self, f: F)
    where
        F: Fn() -> T + 'static,
        T: Into<TestResult>,
    {
        self.group.hook(HookKind::AfterAll, move |_: &mut ()| f());
    }

    pub fn len(&self) -> usize {
        self.group.tests().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_group(self, name: impl Into<Cow<'static, str>>) -> Group<()> {
        self.group.with_name(name)
    }
}

/// What a setup function hands back.
#[derive(Debug)]
pub struct SetupResult(pub Result<(), Error>);

impl From<()> for SetupResult {
    fn from(_: ()) -> Self {
        Self(Ok(()))
    }
}

impl From<Result<(), Error>> for SetupResult {
    fn from(value: Result<(), Error>) -> Self {
        Self(value)
    }
}

pub struct Setup<F> {
    name: Cow<'static, str>,
    setup: F,
}

/// Create a group from a registration function.
///
/// `f` is called right before the group runs, with an empty [`Registry`].
pub fn setup<F, R>(name: impl Into<Cow<'static, str>>, f: F) -> Setup<F>
where
    F: FnMut(&mut Registry) -> R,
    R: Into<SetupResult>,
{
    Setup {
        name: name.into(),
        setup: f,
    }
}

impl<F, R> TestGroup for Setup<F>
where
    F: FnMut(&mut Registry) -> R,
    R: Into<SetupResult>,
{
    fn run(&mut self, runner: &mut GroupRunner<'_>) -> Result<GroupReport, Error> {
        let mut registry = Registry::new();
        let SetupResult(result) = (self.setup)(&mut registry).into();
        result?;
        tracing::debug!(group = %self.name, tests = registry.len(), "registered tests");
        registry.into_group(self.name.clone()).run(runner)
    }
}
