//! Declarative groups.
//!
//! A [`Group`] bundles a context value, its tests and optional lifecycle
//! hooks. Anything implementing [`TestGroup`] can be handed to the
//! [`Harness`](crate::Harness); groups with different context types can be
//! mixed in one run through `Box<dyn TestGroup>`.

use std::borrow::Cow;

use crate::{
    error::Error,
    handle::TestHandle,
    hook::{HookFnHandle, HookKind, Hooks},
    report::GroupReport,
    runner::GroupRunner,
    test::{Focus, Test, TestFnHandle, TestMeta, TestResult},
};

/// A group of tests that can be run by a [`GroupRunner`].
pub trait TestGroup {
    /// Run the group. The implementation should hand its tests to
    /// [`GroupRunner::run_group`].
    fn run(&mut self, runner: &mut GroupRunner<'_>) -> Result<GroupReport, Error>;
}

impl<G: TestGroup + ?Sized> TestGroup for Box<G> {
    fn run(&mut self, runner: &mut GroupRunner<'_>) -> Result<GroupReport, Error> {
        (**self).run(runner)
    }
}

impl<G: TestGroup + ?Sized> TestGroup for &mut G {
    fn run(&mut self, runner: &mut GroupRunner<'_>) -> Result<GroupReport, Error> {
        (**self).run(runner)
    }
}

#[derive(Debug)]
pub struct Group<Ctx = ()> {
    name: Option<Cow<'static, str>>,
    ctx: Ctx,
    tests: Vec<Test<Ctx>>,
    hooks: Hooks<Ctx>,
}

impl<Ctx> Group<Ctx> {
    pub fn new(name: impl Into<Cow<'static, str>>, ctx: Ctx) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::unnamed(ctx)
        }
    }

    /// A group that is identified by its position in the run.
    pub fn unnamed(ctx: Ctx) -> Self {
        Self {
            name: None,
            ctx,
            tests: Vec::new(),
            hooks: Hooks::default(),
        }
    }

    pub fn with_name(self, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn context(&self) -> &Ctx {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Ctx {
        &mut self.ctx
    }

    pub fn into_context(self) -> Ctx {
        self.ctx
    }

    pub fn tests(&self) -> &[Test<Ctx>] {
        &self.tests
    }

    pub fn hooks(&self) -> &Hooks<Ctx> {
        &self.hooks
    }

    /// Add a prepared test.
    ///
    /// Fails with [`Error::DuplicateTest`] if a test with the same name and
    /// the same [`Focus`] is already part of this group.
    pub fn add(&mut self, test: Test<Ctx>) -> Result<&mut Self, Error> {
        let duplicate = self
            .tests
            .iter()
            .any(|existing| existing.focus == test.focus && existing.name == test.name);
        if duplicate {
            return Err(Error::DuplicateTest {
                name: test.meta.name,
            });
        }

        self.tests.push(test);
        Ok(self)
    }

    pub fn test<F, T>(&mut self, name: impl Into<Cow<'static, str>>, f: F) -> Result<&mut Self, Error>
    where
        F: Fn(&mut TestHandle<'_, Ctx>) -> T + 'static,
        T: Into<TestResult>,
    {
        self.add(Test::new(
            TestFnHandle::from_boxed(f),
            TestMeta {
                name: name.into(),
                focus: Focus::Normal,
            },
        ))
    }

    /// Add a focused test. Once a group has focused tests, only those run.
    pub fn only<F, T>(&mut self, name: impl Into<Cow<'static, str>>, f: F) -> Result<&mut Self, Error>
    where
        F: Fn(&mut TestHandle<'_, Ctx>) -> T + 'static,
        T: Into<TestResult>,
    {
        self.add(Test::new(
            TestFnHandle::from_boxed(f),
            TestMeta {
                name: name.into(),
                focus: Focus::Only,
            },
        ))
    }

    pub fn with_test<F, T>(mut self, name: impl Into<Cow<'static, str>>, f: F) -> Result<Self, Error>
    where
        F: Fn(&mut TestHandle<'_, Ctx>) -> T + 'static,
        T: Into<TestResult>,
    {
        self.test(name, f)?;
        Ok(self)
    }

    pub fn with_only<F, T>(mut self, name: impl Into<Cow<'static, str>>, f: F) -> Result<Self, Error>
    where
        F: Fn(&mut TestHandle<'_, Ctx>) -> T + 'static,
        T: Into<TestResult>,
    {
        self.only(name, f)?;
        Ok(self)
    }

    /// Set the hook of `kind`, replacing a previously set one.
    pub fn hook<F, T>(&mut self, kind: HookKind, f: F) -> &mut Self
    where
        F: Fn(&mut Ctx) -> T + 'static,
        T: Into<TestResult>,
    {
        self.hooks.set(kind, HookFnHandle::new(f));
        self
    }

    pub fn with_before_all<F, T>(mut self, f: F) -> Self
    where
        F: Fn(&mut Ctx) -> T + 'static,
        T: Into<TestResult>,
    {
        self.hook(HookKind::BeforeAll, f);
        self
    }

    pub fn with_before_each<F, T>(mut self, f: F) -> Self
    where
        F: Fn(&mut Ctx) -> T + 'static,
        T: Into<TestResult>,
    {
        self.hook(HookKind::BeforeEach, f);
        self
    }

    pub fn with_after_each<F, T>(mut self, f: F) -> Self
    where
        F: Fn(&mut Ctx) -> T + 'static,
        T: Into<TestResult>,
    {
        self.hook(HookKind::AfterEach, f);
        self
    }

    pub fn with_after_all<F, T>(mut self, f: F) -> Self
    where
        F: Fn(&mut Ctx) -> T + 'static,
        T: Into<TestResult>,
    {
        self.hook(HookKind::AfterAll, f);
        self
    }

    pub fn is_focused(&self) -> bool {
        self.tests.iter().any(|test| test.focus.is_only())
    }

    /// The tests a run of this group executes, in declaration order.
    pub fn effective_tests(&self) -> Vec<&Test<Ctx>> {
        effective_tests(&self.tests)
    }
}

impl<Ctx> TestGroup for Group<Ctx> {
    fn run(&mut self, runner: &mut GroupRunner<'_>) -> Result<GroupReport, Error> {
        let Self {
            name,
            ctx,
            tests,
            hooks,
        } = self;
        runner.run_group(name.as_deref(), ctx, tests, hooks)
    }
}

/// The focused subset of `tests` if there is one, otherwise all of them.
pub fn effective_tests<Ctx>(tests: &[Test<Ctx>]) -> Vec<&Test<Ctx>> {
    let focused: Vec<_> = tests.iter().filter(|test| test.focus.is_only()).collect();
    match focused.is_empty() {
        true => tests.iter().collect(),
        false => focused,
    }
}
