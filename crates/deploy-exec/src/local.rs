//! Local command execution using `tokio::process`

use std::process::{ExitStatus, Stdio};
use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::ExecError;
use crate::result::{CommandLine, CommandResult};
use crate::traits::CommandExecutor;

/// Local command executor
///
/// Spawns the program directly (no shell) with stdin, stdout and stderr
/// inherited from this process, then waits for it to exit.
#[derive(Debug, Clone)]
pub struct LocalExecutor;

impl LocalExecutor {
    /// Create a new local executor
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self), fields(program = %cmd.program), level = "debug")]
    async fn execute(&self, cmd: &CommandLine) -> Result<CommandResult, ExecError> {
        if cmd.program.is_empty() {
            return Err(ExecError::EmptyCommand);
        }

        let start = Instant::now();

        let mut child = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| ExecError::Spawn {
                program: cmd.program.clone(),
                message: e.to_string(),
            })?;

        debug!("Executing command: {cmd}");

        let exit = child.wait().await.map_err(|e| ExecError::Wait {
            program: cmd.program.clone(),
            message: e.to_string(),
        })?;

        let duration = start.elapsed();
        let status = status_code(exit);

        debug!(status, duration = ?duration, "command completed");

        Ok(CommandResult { status, duration })
    }
}

impl Default for LocalExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Exit code of the child, or the negated signal number if it was killed
fn status_code(exit: ExitStatus) -> i32 {
    if let Some(code) = exit.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = exit.signal() {
            return -signal;
        }
    }

    -1
}

#[async_trait]
impl CommandExecutor for LocalExecutor {
    async fn run(&self, cmd: &CommandLine) -> Result<CommandResult, ExecError> {
        self.execute(cmd).await
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;

    #[derive(Clone, Default)]
    struct Messages(Arc<Mutex<Vec<String>>>);

    impl Messages {
        fn all(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct MessageVisitor<'a>(&'a mut String);

    impl Visit for MessageVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                *self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: Subscriber> Layer<S> for Messages {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut message = String::new();
            event.record(&mut MessageVisitor(&mut message));
            self.0.lock().unwrap().push(message);
        }
    }

    fn sh(script: &str) -> CommandLine {
        CommandLine::new("sh").args(["-c", script])
    }

    #[tokio::test]
    async fn test_run_success() {
        let executor = LocalExecutor::new();
        let result = executor.run(&sh("exit 0")).await.unwrap();

        assert!(result.success());
        assert_eq!(result.status, 0);
    }

    #[tokio::test]
    async fn test_run_failure() {
        let executor = LocalExecutor::new();
        let result = executor.run(&sh("exit 42")).await.unwrap();

        assert!(!result.success());
        assert_eq!(result.status, 42);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_killed_by_signal() {
        let executor = LocalExecutor::new();
        let result = executor.run(&sh("kill -9 $$")).await.unwrap();

        assert_eq!(result.status, -9);
    }

    #[tokio::test]
    async fn test_missing_program() {
        let executor = LocalExecutor::new();
        let err = executor
            .run(&CommandLine::new("deploy-no-such-binary-4f2a").arg("install"))
            .await
            .unwrap_err();

        assert!(err.is_spawn());
        assert!(matches!(err, ExecError::Spawn { ref program, .. } if program == "deploy-no-such-binary-4f2a"));
    }

    #[tokio::test]
    async fn test_empty_program() {
        let executor = LocalExecutor::new();
        let err = executor.run(&CommandLine::new("")).await.unwrap_err();

        assert!(matches!(err, ExecError::EmptyCommand));
    }

    #[tokio::test]
    async fn test_executing_line_after_launch() {
        let messages = Messages::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(messages.clone()));

        let executor = LocalExecutor::new();
        executor.run(&sh("exit 0")).await.unwrap();
        executor
            .run(&CommandLine::new("deploy-no-such-binary-4f2a").arg("install"))
            .await
            .unwrap_err();

        let executing: Vec<String> = messages
            .all()
            .into_iter()
            .filter(|m| m.starts_with("Executing command:"))
            .collect();
        assert_eq!(executing, vec!["Executing command: sh -c \"exit 0\"".to_string()]);
    }
}
