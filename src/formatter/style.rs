//! Text decoration for console output.
//!
//! A [`StyleEncoding`] turns a message and a set of [`Style`] tags into a
//! decorated string. The engine never looks at the result, so swapping the
//! encoding (terminal vs. browser-like consoles) does not change any outcome.

use std::fmt::Write;

/// A single decoration applied to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Green,
    Red,
    Bold,
    Underline,
    Inverse,
}

pub(crate) mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const BOLD: &str = "\x1b[1m";
    pub const UNDERLINE: &str = "\x1b[4m";
    pub const INVERSE: &str = "\x1b[7m";
}

impl Style {
    pub const fn ansi_code(self) -> &'static str {
        match self {
            Style::Green => ansi::GREEN,
            Style::Red => ansi::RED,
            Style::Bold => ansi::BOLD,
            Style::Underline => ansi::UNDERLINE,
            Style::Inverse => ansi::INVERSE,
        }
    }

    pub const fn css_rule(self) -> &'static str {
        match self {
            Style::Green => "color: green;",
            Style::Red => "color: red;",
            Style::Bold => "font-weight: 700;",
            Style::Underline => "text-decoration: underline;",
            Style::Inverse => "filter: invert(100%);",
        }
    }
}

/// How styles are encoded for a particular output environment.
///
/// Implementations must be pure: the same input always yields the same string.
pub trait StyleEncoding {
    fn format(&self, message: &str, styles: &[Style]) -> String;
}

/// ANSI escape sequences, for terminals.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ansi;

impl StyleEncoding for Ansi {
    fn format(&self, message: &str, styles: &[Style]) -> String {
        if styles.is_empty() {
            return message.to_string();
        }

        let mut out = String::with_capacity(message.len() + styles.len() * 5 + ansi::RESET.len());
        for style in styles {
            out.push_str(style.ansi_code());
        }
        out.push_str(message);
        out.push_str(ansi::RESET);
        out
    }
}

/// Inline CSS rules, for consoles that render markup.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Css;

impl StyleEncoding for Css {
    fn format(&self, message: &str, styles: &[Style]) -> String {
        if styles.is_empty() {
            return message.to_string();
        }

        let rules = styles
            .iter()
            .map(|style| style.css_rule())
            .collect::<Vec<_>>()
            .join(" ");
        let mut out = String::new();
        let _ = write!(out, "<span style=\"{rules}\">{message}</span>");
        out
    }
}

/// No decoration at all.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Plain;

impl StyleEncoding for Plain {
    fn format(&self, message: &str, _: &[Style]) -> String {
        message.to_string()
    }
}

/// Decorate `message` with ANSI escape sequences.
pub fn format(message: &str, styles: &[Style]) -> String {
    Ansi.format(message, styles)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ansi_prefixes_codes_and_resets() {
        let out = format("ok", &[Style::Green, Style::Bold]);
        assert_eq!(out, "\x1b[32m\x1b[1mok\x1b[0m");
    }

    #[test]
    fn ansi_without_styles_is_untouched() {
        assert_eq!(Ansi.format("plain text", &[]), "plain text");
    }

    #[test]
    fn css_joins_rules_into_a_span() {
        let out = Css.format("failed", &[Style::Red, Style::Underline]);
        assert_eq!(
            out,
            "<span style=\"color: red; text-decoration: underline;\">failed</span>"
        );
    }

    #[test]
    fn plain_ignores_styles() {
        assert_eq!(Plain.format("x", &[Style::Inverse, Style::Red]), "x");
    }

    #[test]
    fn every_style_has_distinct_ansi_code() {
        let styles = [
            Style::Green,
            Style::Red,
            Style::Bold,
            Style::Underline,
            Style::Inverse,
        ];
        let mut codes: Vec<_> = styles.iter().map(|s| s.ansi_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), styles.len());
    }
}
