use std::{
    io,
    process::ExitCode,
    sync::{Arc, Mutex},
};

use grouptest::{
    Error, Group, Harness,
    formatter::{
        FormatError,
        color::{ColorSetting, SupportsColor},
        pretty::PrettyFormatter,
    },
    handle::AssertionFailure,
    hook::HookKind,
    setup,
};
use pretty_assertions::assert_eq;

mod support;

#[derive(Debug, Default, Clone)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

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
    fn try_to_string(&self) -> io::Result<String> {
        let guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        String::from_utf8(guard.to_vec()).map_err(io::Error::other)
    }
}

fn harness<'g>(buffer: &Buffer) -> Harness<'g, PrettyFormatter<Buffer>> {
    grouptest::harness().with_formatter(
        PrettyFormatter::default()
            .with_target(buffer.clone())
            .with_color_setting(ColorSetting::Never),
    )
}

fn output(buffer: &Buffer) -> String {
    support::sanitize_elapsed(&buffer.try_to_string().unwrap())
}

#[test]
fn imperative_and_declarative_groups() {
    struct Counter {
        value: u32,
    }

    let buffer = Buffer::default();
    let report = harness(&buffer)
        .with_group(setup("Group 1", |r| {
            r.test("adds", |t| {
                t.expect(1 + 1, 2);
            })?;
            r.test("fails", |t| t.fail_with("nope"))
        }))
        .with_group(
            Group::unnamed(Counter { value: 0 })
                .with_before_each(|c: &mut Counter| c.value += 1)
                .with_test("reads context", |t| {
                    t.expect_with(t.value, 1, "before each did not run");
                })
                .unwrap(),
        )
        .run()
        .unwrap();

    assert_eq!(report.exit_code(), ExitCode::FAILURE);
    assert_eq!(
        output(&buffer),
        "\
Group 1 (1/2)
  ✓ adds (Xms) (1/2)
  ✗ fails (Xms) (2/2)
      ↳ nope
  Finished group 'Group 1': 1 of 2 tests passed (Xms)
Group 2 (2/2)
  ✓ reads context (Xms) (1/1)
  Finished group 'Group 2': 1 of 1 tests passed (Xms)
Finished all tests. 2/3 passed (Xms)
"
    );
}

#[test]
fn failure_reasons() {
    let buffer = Buffer::default();
    let report = harness(&buffer)
        .with_group(setup("reasons", |r| {
            r.test("no message", |t| t.fail())?;
            r.test("assert", |t| {
                t.assert_with(false, "X");
            })?;
            r.test("ensure", |t| -> Result<(), AssertionFailure> {
                t.ensure(false, "ensured")?;
                Ok(())
            })?;
            r.test("error", |_| Err::<(), _>("disk full"))?;
            r.test("panic", |_| -> () { panic!("boom") })
        }))
        .run()
        .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.failed(), 5);
    assert_eq!(
        output(&buffer),
        "\
reasons (1/1)
  ✗ no message (Xms) (1/5)
  ✗ assert (Xms) (2/5)
      ↳ X
  ✗ ensure (Xms) (3/5)
      ↳ ensured
  ✗ error (Xms) (4/5)
      ↳ disk full
  ✗ panic (Xms) (5/5)
      ↳ boom
  Finished group 'reasons': 0 of 5 tests passed (Xms)
Finished all tests. 0/5 passed (Xms)
"
    );
}

#[test]
fn only_focused_tests_are_reported() {
    let buffer = Buffer::default();
    let report = harness(&buffer)
        .with_group(setup("focus", |r| {
            r.test("skipped", |t| t.fail())?;
            r.only("first", |_| ())?;
            r.test("also skipped", |t| t.fail())?;
            r.only("second", |_| ())
        }))
        .run()
        .unwrap();

    assert!(report.is_success());
    assert_eq!(
        output(&buffer),
        "\
focus (1/1)
  ✓ first (Xms) (1/2)
  ✓ second (Xms) (2/2)
  Finished group 'focus': 2 of 2 tests passed (Xms)
Finished all tests. 2/2 passed (Xms)
"
    );
}

#[test]
fn empty_groups_pass() {
    let buffer = Buffer::default();
    let report = harness(&buffer)
        .with_group(Group::new("empty", ()))
        .run()
        .unwrap();

    assert_eq!(report.exit_code(), ExitCode::SUCCESS);
    assert_eq!(
        output(&buffer),
        "\
empty (1/1)
  Finished group 'empty': 0 of 0 tests passed (Xms)
Finished all tests. 0/0 passed (Xms)
"
    );
}

#[test]
fn failing_hook_aborts_the_run() {
    let buffer = Buffer::default();
    let err = harness(&buffer)
        .with_group(
            Group::new("broken", ())
                .with_before_each(|_: &mut ()| Err::<(), _>("no database"))
                .with_test("never runs", |_| ())
                .unwrap(),
        )
        .with_group(Group::new("never started", ()))
        .run()
        .unwrap_err();

    assert_eq!(
        err,
        Error::HookFailed {
            group: "broken".into(),
            hook: HookKind::BeforeEach,
            reason: "no database".into(),
        }
    );
    assert_eq!(
        output(&buffer),
        "\
broken (1/2)
Run aborted: before each hook of group 'broken' failed: no database (Xms)
"
    );
}

#[test]
fn formatter_errors_do_not_stop_the_run() {
    struct Closed;

    impl io::Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SupportsColor for Closed {
        fn supports_color(&self) -> bool {
            false
        }
    }

    let report = grouptest::harness()
        .with_formatter(PrettyFormatter::default().with_target(Closed))
        .with_group(Group::new("g", ()).with_test("ok", |_| ()).unwrap())
        .run()
        .unwrap();

    assert!(report.is_success());
    let kinds: Vec<_> = report.fmt_errors.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(
        kinds,
        [
            FormatError::GroupStart,
            FormatError::TestOutcome,
            FormatError::GroupOutcomes,
            FormatError::RunOutcomes,
        ]
    );
}
