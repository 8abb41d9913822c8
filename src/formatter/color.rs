use std::{env, ffi::OsStr, io};

/// Whether a formatter should decorate its output.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ColorSetting {
    /// Decorate when the target is a terminal and `NO_COLOR` is not set.
    #[default]
    Automatic,
    Always,
    Never,
}

impl From<bool> for ColorSetting {
    fn from(value: bool) -> Self {
        match value {
            true => Self::Always,
            false => Self::Never,
        }
    }
}

impl ColorSetting {
    pub fn use_color(self, target: &impl SupportsColor) -> bool {
        match self {
            ColorSetting::Automatic => !no_color_requested() && target.supports_color(),
            ColorSetting::Always => true,
            ColorSetting::Never => false,
        }
    }
}

fn no_color_requested() -> bool {
    env::var_os("NO_COLOR").is_some_and(|value| value != OsStr::new(""))
}

pub trait SupportsColor {
    fn supports_color(&self) -> bool;
}

impl<T: io::IsTerminal> SupportsColor for T {
    fn supports_color(&self) -> bool {
        self.is_terminal()
    }
}
