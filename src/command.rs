use crate::error::ShellError;
use crate::parser::{RedirectionMap, STDERR_FD, STDOUT_FD};
use log::debug;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::process::Stdio;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Status reported when a command name cannot be resolved.
pub const NOT_FOUND_STATUS: ExitCode = 127;

/// Where one output stream of a command goes.
#[derive(Debug)]
pub enum OutputStream {
    /// The interpreter's own stream.
    Inherited,
    /// A redirection target, opened for writing and truncated.
    File(File),
}

impl OutputStream {
    /// Convert this output into a [`Stdio`] handle for `std::process::Command`.
    ///
    /// The file is moved into the handle, so it is closed once the handle is
    /// dropped.
    pub fn stdio(self) -> Stdio {
        match self {
            OutputStream::Inherited => Stdio::inherit(),
            OutputStream::File(file) => file.into(),
        }
    }
}

/// Output and error destinations of a single command.
///
/// Owns the descriptors opened for redirections. They are closed when this
/// value (or the [`Stdio`] handles made from it) is dropped.
#[derive(Debug)]
pub struct CommandStreams {
    pub stdout: OutputStream,
    pub stderr: OutputStream,
}

impl CommandStreams {
    /// Both streams inherited from the interpreter.
    pub fn inherited() -> Self {
        Self {
            stdout: OutputStream::Inherited,
            stderr: OutputStream::Inherited,
        }
    }

    /// Opens the targets for descriptors 1 and 2 in create-or-truncate mode.
    ///
    /// Relative targets are resolved against `cwd`. Other descriptors are
    /// accepted but ignored. On failure, anything already opened is closed
    /// before the error is returned.
    pub fn open(
        command: &str,
        redirects: &RedirectionMap,
        cwd: &Path,
    ) -> Result<Self, ShellError> {
        let mut streams = Self::inherited();
        for (&fd, target) in redirects {
            let slot = match fd {
                STDOUT_FD => &mut streams.stdout,
                STDERR_FD => &mut streams.stderr,
                other => {
                    debug!("ignoring redirection of descriptor {other} to {target}");
                    continue;
                }
            };
            let file = open_target(&cwd.join(target)).map_err(|source| {
                ShellError::RedirectionOpen {
                    command: command.to_string(),
                    path: target.clone(),
                    source,
                }
            })?;
            *slot = OutputStream::File(file);
        }
        Ok(streams)
    }
}

fn open_target(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
