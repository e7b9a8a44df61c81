//! deploy-exec: local process execution
//!
//! Runs external programs with inherited stdio and reports their exit status

pub mod error;
pub mod local;
pub mod result;
pub mod traits;
