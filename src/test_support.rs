use std::{
    borrow::Cow,
    io,
    sync::{Arc, Mutex},
};

use crate::{
    Harness,
    formatter::{color::SupportsColor, no::NoFormatter},
    test::{Focus, Test, TestFnHandle, TestMeta},
};

pub struct BuildTest<Ctx> {
    pub func: TestFnHandle<Ctx>,
    pub name: Cow<'static, str>,
    pub focus: Focus,
}

impl Default for BuildTest<()> {
    fn default() -> Self {
        Self {
            func: TestFnHandle::default(),
            name: Default::default(),
            focus: Default::default(),
        }
    }
}

impl<Ctx> From<BuildTest<Ctx>> for Test<Ctx> {
    fn from(value: BuildTest<Ctx>) -> Self {
        Test::new(
            value.func,
            TestMeta {
                name: value.name,
                focus: value.focus,
            },
        )
    }
}

macro_rules! test {
    {$($field:ident: $value:expr),* $(,)?} => {
        $crate::test::Test::from($crate::test_support::BuildTest {
            $($field: From::from($value),)*
            ..($crate::test_support::BuildTest {
                name: concat!(module_path!(), "::", file!(), ":", line!(), ":", column!()).into(),
                ..Default::default()
            })
        })
    };
}

pub(crate) use test;

/// A harness that reports nothing.
pub fn quiet<'g>() -> Harness<'g, NoFormatter> {
    crate::harness().with_formatter(NoFormatter)
}

#[derive(Debug, Default, Clone)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SupportsColor for Buffer {
    fn supports_color(&self) -> bool {
        false
    }
}

impl Buffer {
    pub fn try_to_string(&self) -> io::Result<String> {
        let guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        String::from_utf8(guard.to_vec()).map_err(io::Error::other)
    }
}
