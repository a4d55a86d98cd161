// src/elf/command.rs
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Runs external inspection tools with output capture.
///
/// The contract is "never fail, always return text": a nonzero exit, a
/// missing binary, or a timeout all come back as an error-annotated string,
/// so downstream parsers can degrade to their unknown/not-found
/// classifications instead of forcing every caller to branch on success.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl CommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Execute `program` with `args` and capture its output.
    ///
    /// On a zero exit this returns trimmed stdout, falling back to trimmed
    /// stderr when stdout is empty (some tools report on stderr only).
    pub async fn run(&self, program: &str, args: &[&str]) -> String {
        tracing::debug!("running '{}' {:?}", program, args);

        // kill_on_drop so a timed-out tool does not outlive the analysis.
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, output).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    "'{}' timed out after {}s",
                    program,
                    self.timeout.as_secs()
                );
                return format!(
                    "Error executing command: {} timed out after {}s",
                    program,
                    self.timeout.as_secs()
                );
            }
        };

        match output {
            Ok(output) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if stdout.is_empty() {
                    String::from_utf8_lossy(&output.stderr).trim().to_string()
                } else {
                    stdout
                }
            }
            Ok(output) => {
                tracing::warn!("'{}' exited with {}", program, output.status);
                format!(
                    "Error executing command: {} exited with {}",
                    program, output.status
                )
            }
            Err(e) => {
                tracing::warn!("failed to spawn '{}': {}", program, e);
                format!("Error executing command: {}", e)
            }
        }
    }
}
