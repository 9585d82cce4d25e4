//! Shell command execution for hook commands.
//!
//! Commands run synchronously: the caller is blocked until the shell exits.
//! There is no timeout and no backgrounding, so a hanging hook stalls the
//! stream that triggered it.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

/// How a shell command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    /// Normal exit with the given status code.
    Code(i32),
    /// Terminated by the given signal.
    Signal(i32),
}

impl ShellExit {
    pub fn success(&self) -> bool {
        matches!(self, ShellExit::Code(0))
    }

    fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ShellExit::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ShellExit::Signal(signal);
            }
        }
        ShellExit::Code(-1)
    }
}

impl fmt::Display for ShellExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellExit::Code(code) => write!(f, "{code}"),
            ShellExit::Signal(signal) => write!(f, "signal {signal}"),
        }
    }
}

/// Runs a command line through a shell and reports how it exited.
///
/// `Err` means the shell itself could not be started or waited on.
pub trait ShellRunner {
    fn run(&mut self, command: &str) -> io::Result<ShellExit>;
}

impl<R: ShellRunner + ?Sized> ShellRunner for &mut R {
    fn run(&mut self, command: &str) -> io::Result<ShellExit> {
        (**self).run(command)
    }
}

impl<R: ShellRunner + ?Sized> ShellRunner for Box<R> {
    fn run(&mut self, command: &str) -> io::Result<ShellExit> {
        (**self).run(command)
    }
}

/// Runs commands with `<shell> -c <command>`, inheriting stdio.
#[derive(Debug, Clone)]
pub struct SystemShell {
    shell: PathBuf,
}

impl SystemShell {
    pub const DEFAULT_SHELL: &'static str = "/bin/sh";

    pub fn new() -> Self {
        Self::with_shell(Self::DEFAULT_SHELL)
    }

    pub fn with_shell(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for SystemShell {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellRunner for SystemShell {
    fn run(&mut self, command: &str) -> io::Result<ShellExit> {
        tracing::debug!(shell = %self.shell.display(), command, "Running hook command");
        let status = Command::new(&self.shell).arg("-c").arg(command).status()?;
        Ok(ShellExit::from_status(status))
    }
}

/// Records commands instead of running them; every command "succeeds".
#[derive(Debug, Clone, Default)]
pub struct DryRunShell {
    commands: Vec<String>,
}

impl DryRunShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl ShellRunner for DryRunShell {
    fn run(&mut self, command: &str) -> io::Result<ShellExit> {
        tracing::info!(command, "Dry run, not executing");
        self.commands.push(command.to_string());
        Ok(ShellExit::Code(0))
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
