//! deploy-log: dual-sink logging
//!
//! Every `tracing` event goes to a colored console line and a plain line in
//! a per-run log file, each sink with its own threshold.

pub mod color;
pub mod format;
pub mod logger;
pub mod severity;

pub use color::ColorMode;
pub use logger::{LogConfig, LogError, LogSession, init};
pub use severity::Severity;

#[doc(hidden)]
pub use tracing as __tracing;

/// Emit a critical event: an `ERROR` event rendered as `CRITICAL`
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::__tracing::error!(critical = true, $($arg)+)
    };
}
