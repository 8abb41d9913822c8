use std::{io, time::Duration};

use crate::formatter::{
    FmtGroupOutcomes, FmtGroupStart, FmtRunAborted, FmtRunOutcomes, FmtTestOutcome, TestFormatter,
    color::{ColorSetting, SupportsColor},
    style::{Ansi, Style, StyleEncoding},
};

const PASS: char = '\u{2713}';
const FAIL: char = '\u{2717}';
const REASON: char = '\u{21B3}';

/// The default console formatter.
///
/// ```text
/// Callbacks (3/4)
///   ✓ one (0ms) (1/3)
///   ✗ two (0ms) (2/3)
///       ↳ Before Each count was wrong
///   Finished group 'Callbacks': 1 of 2 tests passed (1ms)
/// Finished all tests. 1/2 passed (1ms)
/// ```
#[derive(Debug)]
pub struct PrettyFormatter<W: io::Write, E = Ansi> {
    target: W,
    color_setting: ColorSetting,
    encoding: E,
    indent: usize,
    in_group: bool,
}

impl Default for PrettyFormatter<io::Stdout, Ansi> {
    fn default() -> Self {
        Self {
            target: io::stdout(),
            color_setting: ColorSetting::default(),
            encoding: Ansi,
            indent: 2,
            in_group: false,
        }
    }
}

impl<W: io::Write, E> PrettyFormatter<W, E> {
    pub fn with_target<WithTarget: io::Write>(
        self,
        with_target: WithTarget,
    ) -> PrettyFormatter<WithTarget, E> {
        PrettyFormatter {
            target: with_target,
            color_setting: self.color_setting,
            encoding: self.encoding,
            indent: self.indent,
            in_group: self.in_group,
        }
    }

    pub fn with_encoding<WithEncoding: StyleEncoding>(
        self,
        with_encoding: WithEncoding,
    ) -> PrettyFormatter<W, WithEncoding> {
        PrettyFormatter {
            target: self.target,
            color_setting: self.color_setting,
            encoding: with_encoding,
            indent: self.indent,
            in_group: self.in_group,
        }
    }

    pub fn with_color_setting(self, color_setting: impl Into<ColorSetting>) -> Self {
        Self {
            color_setting: color_setting.into(),
            ..self
        }
    }

    /// Number of spaces lines inside a group are indented by.
    pub fn with_indent(self, indent: usize) -> Self {
        Self { indent, ..self }
    }

    pub fn into_target(self) -> W {
        self.target
    }
}

impl<W: io::Write + SupportsColor, E: StyleEncoding> PrettyFormatter<W, E> {
    /// Return whether this formatter will currently emit decorated output.
    pub fn use_color(&self) -> bool {
        self.color_setting.use_color(&self.target)
    }

    fn paint(&self, message: &str, styles: &[Style]) -> String {
        match self.use_color() {
            true => self.encoding.format(message, styles),
            false => message.to_string(),
        }
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let width = match self.in_group {
            true => self.indent,
            false => 0,
        };
        writeln!(self.target, "{:width$}{line}", "")
    }
}

fn millis(duration: Duration) -> u128 {
    duration.as_millis()
}

impl<W: io::Write + SupportsColor, E: StyleEncoding> TestFormatter for PrettyFormatter<W, E> {
    fn fmt_group_start(&mut self, data: FmtGroupStart<'_>) -> io::Result<()> {
        self.in_group = false;
        let line = format!("{} ({}/{})", data.label, data.position, data.groups);
        self.write_line(&line)?;
        self.in_group = true;
        Ok(())
    }

    fn fmt_test_outcome(&mut self, data: FmtTestOutcome<'_>) -> io::Result<()> {
        let FmtTestOutcome {
            name,
            outcome,
            position,
            tests,
        } = data;
        let elapsed = millis(outcome.duration);

        let line = match outcome.passed() {
            true => {
                let message = format!("{PASS} {name} ({elapsed}ms) ({position}/{tests})");
                self.paint(&message, &[Style::Green])
            }
            false => {
                let mut message = format!("{FAIL} {name} ({elapsed}ms) ({position}/{tests})");
                if let Some(reason) = outcome.reason() {
                    let width = match self.in_group {
                        true => self.indent + 4,
                        false => 4,
                    };
                    message.push('\n');
                    message.push_str(&format!("{:width$}{REASON} {reason}", ""));
                }
                self.paint(&message, &[Style::Red])
            }
        };

        self.write_line(&line)
    }

    fn fmt_group_outcomes(&mut self, data: FmtGroupOutcomes<'_>) -> io::Result<()> {
        let FmtGroupOutcomes {
            label,
            passed,
            tests,
            duration,
        } = data;
        let message = format!(
            "Finished group '{label}': {passed} of {tests} tests passed ({}ms)",
            millis(duration)
        );
        let style = match passed == tests {
            true => Style::Green,
            false => Style::Red,
        };
        let line = self.paint(&message, &[style]);
        self.write_line(&line)?;
        self.in_group = false;
        Ok(())
    }

    fn fmt_run_outcomes(&mut self, data: FmtRunOutcomes) -> io::Result<()> {
        let FmtRunOutcomes {
            passed,
            tests,
            duration,
            ..
        } = data;
        let message = format!(
            "Finished all tests. {passed}/{tests} passed ({}ms)",
            millis(duration)
        );
        let style = match passed == tests {
            true => Style::Green,
            false => Style::Red,
        };
        let line = self.paint(&message, &[style, Style::Bold]);
        self.in_group = false;
        self.write_line(&line)
    }

    fn fmt_run_aborted(&mut self, data: FmtRunAborted<'_>) -> io::Result<()> {
        let message = format!("Run aborted: {} ({}ms)", data.error, millis(data.duration));
        let line = self.paint(&message, &[Style::Red, Style::Bold]);
        self.in_group = false;
        self.write_line(&line)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        formatter::style::Css,
        outcome::{TestFailure, TestOutcome, TestStatus},
        test_support::Buffer,
    };

    fn outcome(status: TestStatus) -> TestOutcome {
        TestOutcome {
            status,
            duration: Duration::from_millis(3),
        }
    }

    fn never_colored(buffer: &Buffer) -> PrettyFormatter<Buffer> {
        PrettyFormatter::default()
            .with_target(buffer.clone())
            .with_color_setting(ColorSetting::Never)
    }

    #[test]
    fn group_lines_are_indented() {
        let buffer = Buffer::default();
        let mut formatter = never_colored(&buffer);

        let passed = outcome(TestStatus::Passed);
        let failed = outcome(TestStatus::Failed(TestFailure::Assertion {
            message: Some("X".into()),
        }));

        formatter
            .fmt_group_start(FmtGroupStart {
                label: "Group 1",
                position: 1,
                groups: 2,
                tests: 2,
            })
            .unwrap();
        formatter
            .fmt_test_outcome(FmtTestOutcome {
                name: "passes",
                outcome: &passed,
                position: 1,
                tests: 2,
            })
            .unwrap();
        formatter
            .fmt_test_outcome(FmtTestOutcome {
                name: "fails",
                outcome: &failed,
                position: 2,
                tests: 2,
            })
            .unwrap();
        formatter
            .fmt_group_outcomes(FmtGroupOutcomes {
                label: "Group 1",
                passed: 1,
                tests: 2,
                duration: Duration::from_millis(7),
            })
            .unwrap();
        formatter
            .fmt_run_outcomes(FmtRunOutcomes {
                passed: 1,
                tests: 2,
                groups: 1,
                duration: Duration::from_millis(9),
            })
            .unwrap();

        assert_eq!(
            buffer.try_to_string().unwrap(),
            "Group 1 (1/2)\n  ✓ passes (3ms) (1/2)\n  ✗ fails (3ms) (2/2)\n      ↳ X\n  Finished group 'Group 1': 1 of 2 tests passed (7ms)\nFinished all tests. 1/2 passed (9ms)\n"
        );
    }

    #[test]
    fn failures_without_reason_have_no_reason_line() {
        let buffer = Buffer::default();
        let mut formatter = never_colored(&buffer);
        let failed = outcome(TestStatus::Failed(TestFailure::Assertion { message: None }));

        formatter
            .fmt_test_outcome(FmtTestOutcome {
                name: "Fail No Message",
                outcome: &failed,
                position: 1,
                tests: 1,
            })
            .unwrap();

        assert_eq!(
            buffer.try_to_string().unwrap(),
            "✗ Fail No Message (3ms) (1/1)\n"
        );
    }

    #[test]
    fn colored_summary_uses_the_encoding() {
        let buffer = Buffer::default();
        let mut formatter = never_colored(&buffer).with_color_setting(ColorSetting::Always);
        formatter
            .fmt_run_outcomes(FmtRunOutcomes {
                passed: 2,
                tests: 2,
                groups: 1,
                duration: Duration::ZERO,
            })
            .unwrap();
        assert_eq!(
            buffer.try_to_string().unwrap(),
            "\x1b[32m\x1b[1mFinished all tests. 2/2 passed (0ms)\x1b[0m\n"
        );

        let buffer = Buffer::default();
        let mut formatter = never_colored(&buffer)
            .with_color_setting(ColorSetting::Always)
            .with_encoding(Css);
        formatter
            .fmt_run_outcomes(FmtRunOutcomes {
                passed: 1,
                tests: 2,
                groups: 1,
                duration: Duration::ZERO,
            })
            .unwrap();
        assert_eq!(
            buffer.try_to_string().unwrap(),
            "<span style=\"color: red; font-weight: 700;\">Finished all tests. 1/2 passed (0ms)</span>\n"
        );
    }
}
