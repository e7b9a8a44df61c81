//! Console color decision and ANSI painting

use std::fmt;
use std::io::IsTerminal;

use crossterm::Command;
use crossterm::style::{Color, ResetColor, SetForegroundColor};

/// Whether the console sink writes ANSI color sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Enabled,
    Disabled,
}

impl ColorMode {
    /// Decide once for stdout of this process
    ///
    /// Color requires a terminal on stdout and no `NO_COLOR` in the
    /// environment.
    #[must_use]
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::decide(std::io::stdout().is_terminal(), no_color)
    }

    /// Decide from the two inputs of `detect`
    ///
    /// On Windows this also switches the console into virtual terminal
    /// mode; if that fails, color stays off.
    #[must_use]
    pub fn decide(is_terminal: bool, no_color: bool) -> Self {
        if !is_terminal || no_color || !enable_virtual_terminal() {
            Self::Disabled
        } else {
            Self::Enabled
        }
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }

    /// Write `body` wrapped in `color`; plain when disabled or `color` is `None`
    pub(crate) fn paint_with<W, F>(self, w: &mut W, color: Option<Color>, body: F) -> fmt::Result
    where
        W: fmt::Write,
        F: FnOnce(&mut W) -> fmt::Result,
    {
        match color {
            Some(color) if self.is_enabled() => {
                SetForegroundColor(color).write_ansi(w)?;
                body(w)?;
                ResetColor.write_ansi(w)
            }
            _ => body(w),
        }
    }

    pub(crate) fn paint<W: fmt::Write>(
        self,
        w: &mut W,
        color: Option<Color>,
        text: &str,
    ) -> fmt::Result {
        self.paint_with(w, color, |w| w.write_str(text))
    }
}

#[cfg(windows)]
fn enable_virtual_terminal() -> bool {
    use std::sync::OnceLock;

    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(crossterm::ansi_support::supports_ansi)
}

#[cfg(not(windows))]
fn enable_virtual_terminal() -> bool {
    true
}
