//! Event formatters for the console and file sinks

use std::fmt::{self, Write as _};

use crossterm::style::Color;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, FormatTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::color::ColorMode;
use crate::severity::{Severity, presentation};

/// Timestamp layout shared by both sinks
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local-time timer in `TIMESTAMP_FORMAT`
#[must_use]
pub fn local_timer() -> ChronoLocal {
    ChronoLocal::new(TIMESTAMP_FORMAT.to_string())
}

const TIMESTAMP_COLOR: Color = Color::DarkGreen;

/// Fields of one event, split into the message and everything else
#[derive(Debug, Default)]
struct EventFields {
    message: String,
    critical: bool,
    extra: String,
}

impl EventFields {
    fn from_event(event: &Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }

    fn severity(&self, event: &Event<'_>) -> Option<Severity> {
        Severity::from_level(event.metadata().level(), self.critical)
    }

    /// Message followed by ` key=value` for each remaining field
    fn text(&self) -> String {
        format!("{}{}", self.message, self.extra)
    }
}

impl Visit for EventFields {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "critical" {
            self.critical = value;
        } else {
            let _ = write!(self.extra, " {}={value}", field.name());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.extra, " {}={value}", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.extra, " {}={value:?}", field.name());
        }
    }
}

fn levelname(severity: Option<Severity>, event: &Event<'_>) -> String {
    severity.map_or_else(
        || event.metadata().level().to_string(),
        |s| s.levelname().to_string(),
    )
}

/// Console line: `<timestamp> <LEVEL> [<token>] <message>`, colored per severity
#[derive(Debug, Clone)]
pub struct ConsoleFormat<T = ChronoLocal> {
    timer: T,
    color: ColorMode,
}

impl ConsoleFormat {
    #[must_use]
    pub fn new(color: ColorMode) -> Self {
        Self {
            timer: local_timer(),
            color,
        }
    }
}

impl<T> ConsoleFormat<T> {
    /// Replace the timer
    #[must_use]
    pub fn with_timer<T2>(self, timer: T2) -> ConsoleFormat<T2> {
        ConsoleFormat {
            timer,
            color: self.color,
        }
    }
}

impl<S, N, T> FormatEvent<S, N> for ConsoleFormat<T>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    T: FormatTime,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let fields = EventFields::from_event(event);
        let severity = fields.severity(event);
        let style = presentation(severity);

        self.color
            .paint_with(&mut writer, Some(TIMESTAMP_COLOR), |w| {
                self.timer.format_time(w)
            })?;
        write!(writer, " {:<8} [", levelname(severity, event))?;

        let token_color = if style.color_token { style.color } else { None };
        self.color.paint(&mut writer, token_color, style.token)?;
        writer.write_str("] ")?;

        self.color.paint(&mut writer, style.color, &fields.text())?;
        writeln!(writer)
    }
}

/// File line: `<timestamp> <LEVEL> [<pid>] <message>`, never colored
#[derive(Debug, Clone)]
pub struct FileFormat<T = ChronoLocal> {
    timer: T,
    pid: u32,
}

impl FileFormat {
    #[must_use]
    pub fn new() -> Self {
        Self {
            timer: local_timer(),
            pid: std::process::id(),
        }
    }
}

impl Default for FileFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FileFormat<T> {
    /// Replace the timer
    #[must_use]
    pub fn with_timer<T2>(self, timer: T2) -> FileFormat<T2> {
        FileFormat {
            timer,
            pid: self.pid,
        }
    }
}

impl<S, N, T> FormatEvent<S, N> for FileFormat<T>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    T: FormatTime,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let fields = EventFields::from_event(event);
        let severity = fields.severity(event);

        self.timer.format_time(&mut writer)?;
        writeln!(
            writer,
            " {:<8} [{}] {}",
            levelname(severity, event),
            self.pid,
            fields.text()
        )
    }
}
