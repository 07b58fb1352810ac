// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Command, Error, Reading, Result, Value};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{self, Child, ExitStatus, Stdio};

/// The size of the line buffer, including the terminator.
///
/// At most `MAX_BUF_SIZE - 1` bytes of a line are read.
pub const MAX_BUF_SIZE: usize = 1024;

/// The shell used to interpret command strings.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// The prefix written before each line read.
pub const DEFAULT_LABEL: &str = "GPIO State: ";

// exit statuses the shell uses when it cannot launch the command
const STATUS_NOT_EXECUTABLE: i32 = 126;
const STATUS_NOT_FOUND: i32 = 127;

/// Runs GPIO tool command lines and interprets their output.
///
/// Each call spawns the command through the shell with its standard output
/// captured, reads at most one line, and reaps the child before returning.
/// The runner holds no state between calls.
///
/// # Examples
/// ```no_run
/// # fn example() -> gpiocmd::Result<()> {
/// use gpiocmd::{Command, Runner, Value};
///
/// let runner = Runner::default();
/// if runner.read(Command::ReadButton14)? == Value::Inactive {
///     runner.drive(Command::SetPin17High)?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Runner {
    shell: PathBuf,
    label: String,
    echo: bool,
    max_line: usize,
}

impl Default for Runner {
    fn default() -> Self {
        Runner {
            shell: DEFAULT_SHELL.into(),
            label: DEFAULT_LABEL.into(),
            echo: true,
            max_line: MAX_BUF_SIZE,
        }
    }
}

impl Runner {
    /// Start building a runner with the default configuration.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The shell used to interpret commands.
    pub fn shell(&self) -> &Path {
        &self.shell
    }

    /// The prefix written before each line read.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns true if lines read are echoed.
    pub fn echo(&self) -> bool {
        self.echo
    }

    /// The size of the line buffer, including the terminator.
    pub fn max_line(&self) -> usize {
        self.max_line
    }

    /// Run the command and read the state it reports.
    ///
    /// The line read, if any, is echoed to standard output prefixed
    /// by the label.
    ///
    /// The command is not validated, it is passed to the shell as is.
    pub fn read_state<C: AsRef<str>>(&self, command: C) -> Result<Reading> {
        self.read_state_into(command, &mut io::stdout())
    }

    /// Run the command and read the state it reports, echoing the line
    /// read to the provided sink.
    pub fn read_state_into<C: AsRef<str>, W: Write>(
        &self,
        command: C,
        sink: &mut W,
    ) -> Result<Reading> {
        let command = command.as_ref();
        let mut child = self.spawn(command)?;
        let line = match child.stdout.take() {
            Some(out) => read_line(out, self.max_line - 1).unwrap_or_else(|e| {
                tracing::warn!(command, error = %e, "failed to read command output");
                Vec::new()
            }),
            None => Vec::new(),
        };
        // the read end of the pipe is closed at this point
        if line.is_empty() {
            let status = reap(command, &mut child)?;
            check_launched(command, status)?;
            tracing::debug!(command, "no output");
            return Ok(Reading::NoReading);
        }
        if self.echo {
            if let Err(e) = self.emit(sink, &line) {
                tracing::warn!(command, error = %e, "failed to echo state");
            }
        }
        reap(command, &mut child)?;
        let value = Value::from_line(&line);
        tracing::debug!(command, %value, "read state");
        Ok(Reading::Level(value))
    }

    /// Run the command and return the level it reports.
    ///
    /// A command that produces no output reports [`Value::Inactive`].
    pub fn read<C: AsRef<str>>(&self, command: C) -> Result<Value> {
        self.read_state(command).map(|r| r.value())
    }

    /// Run the command and return the level it reports as a bit.
    pub fn read_bit<C: AsRef<str>>(&self, command: C) -> Result<u8> {
        self.read_state(command).map(u8::from)
    }

    /// Run a command that drives a line.
    ///
    /// Any output from the command is echoed as for [`read_state`].
    ///
    /// [`read_state`]: #method.read_state
    pub fn drive(&self, command: Command) -> Result<()> {
        self.read_state(command).map(|_| ())
    }

    fn spawn(&self, command: &str) -> Result<Child> {
        tracing::debug!(command, shell = %self.shell.display(), "spawning");
        let child = process::Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::Spawn(command.into(), e))?;
        tracing::debug!(command, pid = child.id(), "spawned");
        Ok(child)
    }

    // A single write, so the echo is not interleaved with other output.
    fn emit<W: Write>(&self, sink: &mut W, line: &[u8]) -> io::Result<()> {
        let mut buf = Vec::with_capacity(self.label.len() + line.len());
        buf.extend_from_slice(self.label.as_bytes());
        buf.extend_from_slice(line);
        sink.write_all(&buf)?;
        sink.flush()
    }
}

/// A builder of [`Runner`]s.
///
/// Mutators override the defaults, then [`build`] validates the result.
///
/// [`build`]: #method.build
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Builder {
    cfg: Runner,
}

impl Builder {
    /// Set the shell used to interpret commands.
    ///
    /// The shell is invoked as `<shell> -c <command>`.
    pub fn with_shell<P: Into<PathBuf>>(&mut self, shell: P) -> &mut Self {
        self.cfg.shell = shell.into();
        self
    }

    /// Set the prefix written before each line read.
    pub fn with_label<S: Into<String>>(&mut self, label: S) -> &mut Self {
        self.cfg.label = label.into();
        self
    }

    /// Enable or disable echoing of lines read.
    pub fn with_echo(&mut self, echo: bool) -> &mut Self {
        self.cfg.echo = echo;
        self
    }

    /// Set the size of the line buffer, including the terminator.
    pub fn with_max_line(&mut self, max_line: usize) -> &mut Self {
        self.cfg.max_line = max_line;
        self
    }

    /// Build the runner.
    pub fn build(&self) -> Result<Runner> {
        if self.cfg.shell.as_os_str().is_empty() {
            return Err(Error::InvalidArgument("No shell specified.".into()));
        }
        if self.cfg.max_line < 2 {
            return Err(Error::InvalidArgument(format!(
                "Line buffer of {} bytes cannot hold a line.",
                self.cfg.max_line
            )));
        }
        Ok(self.cfg.clone())
    }
}

/// Run the command with a default [`Runner`] and return the state bit.
pub fn read_gpio_state<C: AsRef<str>>(command: C) -> Result<u8> {
    Runner::default().read_bit(command)
}

// Read up to limit bytes, stopping after the first newline.
fn read_line<R: Read>(r: R, limit: usize) -> io::Result<Vec<u8>> {
    let mut line = Vec::new();
    BufReader::new(r)
        .take(limit as u64)
        .read_until(b'\n', &mut line)?;
    Ok(line)
}

fn reap(command: &str, child: &mut Child) -> Result<ExitStatus> {
    let status = child
        .wait()
        .map_err(|e| Error::Reclaim(command.into(), e))?;
    tracing::debug!(command, %status, "reaped");
    Ok(status)
}

fn check_launched(command: &str, status: ExitStatus) -> Result<()> {
    let kind = match status.code() {
        Some(STATUS_NOT_FOUND) => io::ErrorKind::NotFound,
        Some(STATUS_NOT_EXECUTABLE) => io::ErrorKind::PermissionDenied,
        _ => return Ok(()),
    };
    Err(Error::Spawn(
        command.into(),
        io::Error::new(kind, format!("shell reported {status}")),
    ))
}
