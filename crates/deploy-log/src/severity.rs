//! Severity levels and their console presentation

use crossterm::style::Color;
use tracing::Level;

/// Log severity, ordered by increasing urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Map a `tracing` level to a severity
    ///
    /// `critical` marks an `ERROR` event emitted through `critical!`.
    /// `TRACE` has no severity and renders as unrecognized.
    #[must_use]
    pub fn from_level(level: &Level, critical: bool) -> Option<Self> {
        if *level == Level::ERROR {
            Some(if critical { Self::Critical } else { Self::Error })
        } else if *level == Level::WARN {
            Some(Self::Warning)
        } else if *level == Level::INFO {
            Some(Self::Info)
        } else if *level == Level::DEBUG {
            Some(Self::Debug)
        } else {
            None
        }
    }

    /// Upper-case name written in both sinks
    #[must_use]
    pub fn levelname(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

/// How a severity is drawn on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    /// Text between the brackets
    pub token: &'static str,
    /// Whether the token takes the message color
    pub color_token: bool,
    /// Message color, `None` for the terminal default
    pub color: Option<Color>,
}

/// Presentation for a severity; `None` is the unrecognized row
#[must_use]
pub fn presentation(severity: Option<Severity>) -> Presentation {
    match severity {
        Some(Severity::Debug) => Presentation {
            token: "=",
            color_token: false,
            color: Some(Color::DarkGrey),
        },
        Some(Severity::Info) => Presentation {
            token: "+",
            color_token: true,
            color: Some(Color::Blue),
        },
        Some(Severity::Warning) => Presentation {
            token: "*",
            color_token: true,
            color: Some(Color::Yellow),
        },
        Some(Severity::Error) => Presentation {
            token: "*",
            color_token: true,
            color: Some(Color::Red),
        },
        Some(Severity::Critical) => Presentation {
            token: "!",
            color_token: true,
            color: Some(Color::Red),
        },
        None => Presentation {
            token: "*",
            color_token: false,
            color: None,
        },
    }
}
