//! Command execution
//!
//! Runs backend tools as child processes and captures their standard output.
//! Commands are argument vectors handed straight to the OS, never a shell
//! string, so slot numbers and paths cannot inject extra commands.

use crate::error::BackendError;

use std::fmt;
use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default time a backend tool may run before it is killed
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Create a command line with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs a command line and returns its standard output
///
/// Implementations must report spawn failures, non-zero exits and
/// timeouts as `BackendError` and never hand back partial output.
pub trait CommandExecutor: Send + Sync {
    /// Execute the command and return captured stdout
    fn execute(&self, command: &CommandLine) -> Result<String, BackendError>;
}

/// Executor backed by `std::process` with a hard timeout
#[derive(Debug, Clone)]
pub struct SystemExecutor {
    timeout: Duration,
}

impl SystemExecutor {
    /// Create an executor with the given timeout
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl CommandExecutor for SystemExecutor {
    fn execute(&self, command: &CommandLine) -> Result<String, BackendError> {
        log::debug!("Running `{}` (timeout {:?})", command, self.timeout);

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(&command.program, e))?;

        // Drain both pipes while waiting so a chatty child cannot block on a full pipe
        let stdout = child.stdout.take().map(read_in_background);
        let stderr = child.stderr.take().map(read_in_background);

        let deadline = Instant::now() + self.timeout;
        let timed_out = || {
            log::warn!("`{}` timed out after {:?}", command, self.timeout);
            BackendError::TimedOut {
                command: command.to_string(),
                timeout: self.timeout,
            }
        };

        let status = match wait_with_deadline(&mut child, deadline) {
            Ok(Some(status)) => status,
            Ok(None) => {
                kill_and_reap(&mut child);
                return Err(timed_out());
            }
            Err(e) => {
                kill_and_reap(&mut child);
                return Err(BackendError::Spawn {
                    program: command.program.clone(),
                    source: e,
                });
            }
        };

        // A grandchild that inherited the pipes keeps them open after the child exits
        if !readers_done_before(&[stdout.as_ref(), stderr.as_ref()], deadline) {
            return Err(timed_out());
        }

        let io_error = |source| BackendError::Spawn {
            program: command.program.clone(),
            source,
        };
        let stdout = collect(stdout).map_err(io_error)?;
        let stderr = collect(stderr).map_err(io_error)?;

        if !status.success() {
            let diagnostics = String::from_utf8_lossy(&stderr).trim().to_string();
            // nvidia-smi reports most failures on stdout
            let diagnostics = if diagnostics.is_empty() {
                String::from_utf8_lossy(&stdout).trim().to_string()
            } else {
                diagnostics
            };

            log::debug!("`{}` failed with {}", command, status);
            return Err(BackendError::NonZeroExit {
                command: command.to_string(),
                code: status.code(),
                stderr: diagnostics,
            });
        }

        String::from_utf8(stdout).map_err(|_| BackendError::InvalidOutput {
            command: command.to_string(),
        })
    }
}

fn spawn_error(program: &str, err: io::Error) -> BackendError {
    if err.kind() == io::ErrorKind::NotFound {
        BackendError::NotFound {
            program: program.to_string(),
        }
    } else {
        BackendError::Spawn {
            program: program.to_string(),
            source: err,
        }
    }
}

type ReaderHandle = JoinHandle<io::Result<Vec<u8>>>;

fn read_in_background<R>(mut reader: R) -> ReaderHandle
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn collect(handle: Option<ReaderHandle>) -> io::Result<Vec<u8>> {
    match handle {
        Some(handle) => handle
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("output reader thread panicked"))),
        None => Ok(Vec::new()),
    }
}

/// Wait for the child until `deadline`; `Ok(None)` means it is still running
fn wait_with_deadline(child: &mut Child, deadline: Instant) -> io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

/// Wait until every reader thread has hit EOF or `deadline` passes
fn readers_done_before(readers: &[Option<&ReaderHandle>], deadline: Instant) -> bool {
    loop {
        if readers.iter().flatten().all(|handle| handle.is_finished()) {
            return true;
        }

        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

fn kill_and_reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        log::debug!("Failed to kill child process {}: {}", child.id(), e);
    }
    let _ = child.wait();
}
