//! Subprocess runner shared by CLI-driven agent adapters.
//!
//! Spawns a language-model CLI, reads its stdout as JSON Lines and yields one
//! `serde_json::Value` per non-empty line. A non-zero exit status becomes a
//! trailing `AgentError::ExecutionError` carrying the captured stderr.

use crate::agents::base::AgentError;
use std::pin::Pin;
use std::process::Stdio;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::process::Command;
use tokio_stream::Stream;

/// Stream of parsed JSON lines produced by [`CliExecutor::execute`].
pub type JsonLineStream = Pin<Box<dyn Stream<Item = Result<serde_json::Value, AgentError>> + Send>>;

/// A fully described CLI invocation.
#[derive(Debug, Clone)]
pub struct CliInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: String,
    /// Text written to the child's stdin before its output is read.
    pub stdin: Option<String>,
}

impl CliInvocation {
    pub fn new(program: impl Into<String>, working_dir: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a flag and its value.
    pub fn opt(self, flag: &str, value: impl Into<String>) -> Self {
        self.arg(flag).arg(value)
    }

    pub fn input(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }
}

pub struct CliExecutor;

impl CliExecutor {
    /// Spawn `invocation` and stream its stdout one JSON value per line.
    ///
    /// Blank lines are ignored. A line that is not JSON is reported as
    /// `AgentError::StreamParseError` without ending the stream.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cf_core::agents::cli_executor::{CliExecutor, CliInvocation};
    /// use tokio_stream::StreamExt;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let stream = CliExecutor::execute(
    ///         CliInvocation::new("echo", ".").arg(r#"{"type":"test"}"#),
    ///     );
    ///
    ///     let values: Vec<_> = stream.collect().await;
    ///     assert_eq!(values.len(), 1);
    /// }
    /// ```
    pub fn execute(invocation: CliInvocation) -> JsonLineStream {
        let stream = async_stream::stream! {
            let CliInvocation { program, args, working_dir, stdin } = invocation;
            tracing::debug!(%program, ?args, %working_dir, "spawning agent CLI");

            let mut cmd = Command::new(&program);
            cmd.args(&args);
            cmd.current_dir(&working_dir);
            cmd.stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() });
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());

            let mut child = match cmd.spawn() {
                Ok(child) => child,
                Err(e) => {
                    yield Err(AgentError::ExecutionError(format!(
                        "cannot start '{program}': {e}"
                    )));
                    return;
                }
            };

            if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
                let written = async {
                    pipe.write_all(input.as_bytes()).await?;
                    pipe.write_all(b"\n").await?;
                    pipe.flush().await
                }
                .await;
                if let Err(e) = written {
                    yield Err(AgentError::ExecutionError(format!(
                        "cannot send the prompt to '{program}': {e}"
                    )));
                    return;
                }
                // Dropping the pipe closes stdin.
            }

            let stdout = match child.stdout.take() {
                Some(stdout) => stdout,
                None => {
                    yield Err(AgentError::ExecutionError(
                        "child stdout was not piped".to_string()
                    ));
                    return;
                }
            };

            // Drain stderr concurrently so a chatty CLI cannot block on a full pipe.
            let stderr_task = child.stderr.take().map(|mut stderr| {
                tokio::spawn(async move {
                    let mut buf = String::new();
                    let _ = stderr.read_to_string(&mut buf).await;
                    buf
                })
            });

            let mut lines = BufReader::new(stdout).lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<serde_json::Value>(&line) {
                            Ok(value) => {
                                yield Ok(value);
                            }
                            Err(e) => {
                                yield Err(AgentError::StreamParseError(format!(
                                    "not a JSON line ({e}): {line}"
                                )));
                            }
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        yield Err(AgentError::StreamParseError(e.to_string()));
                        break;
                    }
                }
            }

            let status = child.wait().await;
            let stderr = match stderr_task {
                Some(task) => task.await.unwrap_or_default(),
                None => String::new(),
            };

            match status {
                Ok(status) if status.success() => {}
                Ok(status) => {
                    yield Err(AgentError::ExecutionError(format!(
                        "'{program}' exited with {status}: {}",
                        stderr.trim()
                    )));
                }
                Err(e) => {
                    yield Err(AgentError::ExecutionError(format!(
                        "lost track of '{program}': {e}"
                    )));
                }
            }
        };

        Box::pin(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn test_execute_echo_json() {
        let stream = CliExecutor::execute(
            CliInvocation::new("echo", ".").arg(r#"{"type":"test","value":42}"#),
        );

        let values: Vec<_> = stream
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .expect("Should parse JSON successfully");

        assert_eq!(values.len(), 1);
        assert_eq!(values[0].get("type").and_then(|v| v.as_str()), Some("test"));
        assert_eq!(values[0].get("value").and_then(|v| v.as_i64()), Some(42));
    }

    #[tokio::test]
    async fn test_execute_invalid_command() {
        let stream = CliExecutor::execute(CliInvocation::new("nonexistent-command-xyz", "."));

        let results: Vec<_> = stream.collect::<Vec<_>>().await;

        assert_eq!(results.len(), 1);
        if let Err(AgentError::ExecutionError(msg)) = &results[0] {
            assert!(msg.contains("cannot start 'nonexistent-command-xyz'"));
        } else {
            panic!("Expected ExecutionError");
        }
    }

    #[tokio::test]
    async fn test_execute_non_json_line() {
        let stream = CliExecutor::execute(CliInvocation::new("echo", ".").arg("plain text"));

        let results: Vec<_> = stream.collect::<Vec<_>>().await;

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(AgentError::StreamParseError(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_filters_empty_lines_and_reports_exit_status() {
        let temp_dir = tempfile::tempdir().unwrap();

        let stream = CliExecutor::execute(
            CliInvocation::new("sh", temp_dir.path().to_str().unwrap())
                .arg("-c")
                .arg(r#"echo; echo '{"num": 1}'; echo; echo '{"num": 2}'; echo oops >&2; exit 3"#),
        );

        let results: Vec<_> = stream.collect::<Vec<_>>().await;

        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].as_ref().unwrap().get("num").and_then(|v| v.as_i64()),
            Some(1)
        );
        assert_eq!(
            results[1].as_ref().unwrap().get("num").and_then(|v| v.as_i64()),
            Some(2)
        );
        match &results[2] {
            Err(AgentError::ExecutionError(msg)) => assert!(msg.contains("oops")),
            other => panic!("Expected exit status error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_pipes_stdin() {
        let stream = CliExecutor::execute(
            CliInvocation::new("cat", ".").input(r#"{"echo":"back"}"#),
        );

        let results: Vec<_> = stream.collect::<Vec<_>>().await;

        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].as_ref().unwrap().get("echo").and_then(|v| v.as_str()),
            Some("back")
        );
    }
}
