//! Command executor trait

use async_trait::async_trait;

use crate::error::ExecError;
use crate::result::{CommandLine, CommandResult};

/// Runs a command to completion and reports its exit status
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run the command, waiting until it exits
    ///
    /// # Errors
    /// Returns `ExecError` if the process cannot be spawned or waited on.
    /// A non-zero exit status is not an error.
    async fn run(&self, cmd: &CommandLine) -> Result<CommandResult, ExecError>;
}
