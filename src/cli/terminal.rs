//! Colored terminal output

use std::sync::LazyLock;

use owo_colors::{OwoColorize, colors::css};

static STDOUT_COLOR: LazyLock<bool> =
    LazyLock::new(|| supports_color::on(supports_color::Stream::Stdout).is_some());

/// Whether colored output is enabled, detected once per process
pub fn supports_color() -> bool {
    *STDOUT_COLOR
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as a heading (blue)
    fn heading(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if supports_color() {
        style(text)
    } else {
        text.to_string()
    }
}

impl Colorize for str {
    fn success(&self) -> String {
        paint(self, |text| text.fg::<css::Green>().to_string())
    }

    fn heading(&self) -> String {
        paint(self, |text| text.fg::<css::LightBlue>().bold().to_string())
    }

    fn dim(&self) -> String {
        paint(self, |text| text.dimmed().to_string())
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn heading(&self) -> String {
        self.as_str().heading()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}
