use std::fmt::{self, Debug, Display};

use crate::test::TestResult;

/// The four lifecycle points of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    BeforeAll,
    BeforeEach,
    AfterEach,
    AfterAll,
}

impl Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HookKind::BeforeAll => "before all",
            HookKind::BeforeEach => "before each",
            HookKind::AfterEach => "after each",
            HookKind::AfterAll => "after all",
        })
    }
}

pub trait HookFn<Ctx> {
    fn call_hook(&self, ctx: &mut Ctx) -> TestResult;
}

impl<F, T, Ctx> HookFn<Ctx> for F
where
    F: Fn(&mut Ctx) -> T,
    T: Into<TestResult>,
{
    fn call_hook(&self, ctx: &mut Ctx) -> TestResult {
        (self)(ctx).into()
    }
}

pub struct HookFnHandle<Ctx>(Box<dyn HookFn<Ctx>>);

impl<Ctx> HookFnHandle<Ctx> {
    pub fn new<F, T>(f: F) -> Self
    where
        F: Fn(&mut Ctx) -> T + 'static,
        T: Into<TestResult>,
    {
        Self(Box::new(f))
    }

    pub fn call(&self, ctx: &mut Ctx) -> TestResult {
        self.0.call_hook(ctx)
    }
}

impl<Ctx> Debug for HookFnHandle<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HookFnHandle(...)")
    }
}

/// Optional lifecycle hooks of a group. An absent hook is a no-op.
#[derive(Debug)]
pub struct Hooks<Ctx> {
    pub before_all: Option<HookFnHandle<Ctx>>,
    pub before_each: Option<HookFnHandle<Ctx>>,
    pub after_each: Option<HookFnHandle<Ctx>>,
    pub after_all: Option<HookFnHandle<Ctx>>,
}

impl<Ctx> Default for Hooks<Ctx> {
    fn default() -> Self {
        Self {
            before_all: None,
            before_each: None,
            after_each: None,
            after_all: None,
        }
    }
}

impl<Ctx> Hooks<Ctx> {
    pub fn get(&self, kind: HookKind) -> Option<&HookFnHandle<Ctx>> {
        match kind {
            HookKind::BeforeAll => self.before_all.as_ref(),
            HookKind::BeforeEach => self.before_each.as_ref(),
            HookKind::AfterEach => self.after_each.as_ref(),
            HookKind::AfterAll => self.after_all.as_ref(),
        }
    }

    /// Replace the hook of `kind`.
    pub fn set(&mut self, kind: HookKind, hook: HookFnHandle<Ctx>) {
        let slot = match kind {
            HookKind::BeforeAll => &mut self.before_all,
            HookKind::BeforeEach => &mut self.before_each,
            HookKind::AfterEach => &mut self.after_each,
            HookKind::AfterAll => &mut self.after_all,
        };
        *slot = Some(hook);
    }
}
