//! External command execution.
//!
//! Every stage of the pipeline shells out to another program. The
//! [`CommandExecutor`] trait is the single seam between the pipeline and the
//! operating system: it takes an [`Invocation`] and hands back a
//! [`Completion`] carrying the exit status and whatever the child wrote to
//! stdout. [`SystemExecutor`] is the real implementation; tests plug in a
//! scripted fake.

use std::fmt;
use std::io::{self, Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use thiserror::Error;

/// Where a child's standard output goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StdoutMode {
    /// Collect it into [`Completion::stdout`].
    Capture,
    /// Forward it to this process's stderr so our own stdout stays untouched.
    Stderr,
}

/// A fully described external command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Bytes fed to the child's stdin. `None` leaves stdin attached to nothing.
    pub stdin: Option<Vec<u8>>,
    pub stdout: StdoutMode,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
            stdout: StdoutMode::Capture,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: Vec<u8>) -> Self {
        self.stdin = Some(input);
        self
    }

    pub fn stdout(mut self, mode: StdoutMode) -> Self {
        self.stdout = mode;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words =
            std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        f.write_str(&shell_words::join(words))
    }
}

/// How a child process ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    Code(i32),
    Signal(i32),
}

impl Exit {
    pub fn success(self) -> bool {
        self == Exit::Code(0)
    }

    /// Exit code this process should report when mirroring the child.
    ///
    /// Codes are truncated to the low byte the way a shell reports them;
    /// signals follow the `128 + N` convention.
    pub fn exit_code(self) -> u8 {
        match self {
            Exit::Code(code) => (code & 0xff) as u8,
            Exit::Signal(sig) => 128u8.wrapping_add((sig & 0x7f) as u8),
        }
    }
}

impl From<ExitStatus> for Exit {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Exit::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(sig) = status.signal() {
                return Exit::Signal(sig);
            }
        }
        Exit::Code(1)
    }
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exit::Code(code) => write!(f, "exit status {code}"),
            Exit::Signal(sig) => write!(f, "signal {sig}"),
        }
    }
}

/// Result of running an [`Invocation`] to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub status: Exit,
    /// Captured stdout; always empty for [`StdoutMode::Stderr`].
    pub stdout: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("`{program}` not found")]
    NotFound { program: String },
    #[error("failed to run `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{program}` failed with {status}")]
    Failed { program: String, status: Exit },
}

impl CommandError {
    /// Exit code to report for this failure: the child's own status when it
    /// ran, 127 when it could not be found, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::NotFound { .. } => 127,
            CommandError::Io { .. } => 1,
            CommandError::Failed { status, .. } => status.exit_code(),
        }
    }
}

pub trait CommandExecutor {
    /// Run `invocation` to completion.
    ///
    /// Returns `Ok` whatever the exit status; callers decide what a non-zero
    /// status means. `Err` is reserved for failures to launch or talk to the
    /// child.
    fn execute(&mut self, invocation: &Invocation) -> Result<Completion, CommandError>;

    /// Run `invocation` and treat any non-zero exit as an error.
    fn run_checked(&mut self, invocation: &Invocation) -> Result<Vec<u8>, CommandError> {
        let completion = self.execute(invocation)?;
        if !completion.status.success() {
            return Err(CommandError::Failed {
                program: invocation.program.clone(),
                status: completion.status,
            });
        }
        Ok(completion.stdout)
    }
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for &mut E {
    fn execute(&mut self, invocation: &Invocation) -> Result<Completion, CommandError> {
        (**self).execute(invocation)
    }
}

/// Runs commands with [`std::process::Command`]. Child stderr is inherited so
/// tool diagnostics reach the terminal untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for SystemExecutor {
    fn execute(&mut self, invocation: &Invocation) -> Result<Completion, CommandError> {
        let program = &invocation.program;
        let io_err = |source: io::Error| CommandError::Io {
            program: program.clone(),
            source,
        };

        let mut command = Command::new(program);
        command
            .args(&invocation.args)
            .stderr(Stdio::inherit())
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });
        match invocation.stdout {
            StdoutMode::Capture => command.stdout(Stdio::piped()),
            StdoutMode::Stderr => command.stdout(io::stderr()),
        };

        tracing::debug!(command = %invocation, "spawning");
        let mut child = command.spawn().map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => CommandError::NotFound {
                program: program.clone(),
            },
            _ => io_err(err),
        })?;

        let stdin = child.stdin.take();
        let mut stdout = child.stdout.take();
        let mut captured = Vec::new();

        // Feed stdin from a helper thread while draining stdout here, so a
        // child that writes before it finishes reading cannot wedge both pipes.
        thread::scope(|scope| -> Result<(), CommandError> {
            let writer = match (stdin, invocation.stdin.as_deref()) {
                (Some(mut pipe), Some(bytes)) => Some(scope.spawn(move || {
                    let result = pipe.write_all(bytes);
                    drop(pipe);
                    result
                })),
                _ => None,
            };
            if let Some(out) = stdout.as_mut() {
                out.read_to_end(&mut captured).map_err(io_err)?;
            }
            if let Some(handle) = writer {
                match handle.join() {
                    Ok(Ok(())) => {}
                    // The child quit without reading everything; its exit
                    // status tells the real story.
                    Ok(Err(err)) if err.kind() == io::ErrorKind::BrokenPipe => {}
                    Ok(Err(err)) => return Err(io_err(err)),
                    Err(_) => return Err(io_err(io::Error::other("stdin writer panicked"))),
                }
            }
            Ok(())
        })?;

        let status = Exit::from(child.wait().map_err(io_err)?);
        tracing::debug!(program = %program, %status, bytes = captured.len(), "finished");
        Ok(Completion {
            status,
            stdout: captured,
        })
    }
}
