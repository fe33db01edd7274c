use crate::builtin::Builtin;
use crate::command::{CommandStreams, ExitCode, NOT_FOUND_STATUS, OutputStream};
use crate::env::Environment;
use crate::error::ShellError;
use crate::external::{self, ExternalCommand};
use crate::io_adapters::{LineReader, ReadOutcome};
use crate::parser::{self, CommandLine, ParsedCommand};
use log::{debug, warn};
use std::io::{self, Write};

/// Prefix for errors that belong to no command.
const SHELL_NAME: &str = env!("CARGO_PKG_NAME");

/// A minimal shell-like interpreter that can execute built-in and external commands.
///
/// The interpreter owns the session [`Environment`]. Every line is parsed,
/// its redirection targets are opened, and the command is dispatched to a
/// [`Builtin`] or launched from `PATH`. Failures are reported and never end
/// the session; only `exit` or the end of input does.
///
/// Example
/// ```
/// use shell_repl::Interpreter;
/// let mut sh = Interpreter::default();
/// let mut out = Vec::<u8>::new();
/// let code = sh.execute_line_with("echo 'hello   world'", &mut out, &mut std::io::sink());
/// assert_eq!(code, 0);
/// assert_eq!(out, b"hello   world\n");
/// ```
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// True once `exit` has run.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Prompts, reads and executes lines until `exit`, end of input or an
    /// interrupt. Only a failure of the reader itself is returned as an error.
    pub fn repl(&mut self, reader: &mut dyn LineReader, prompt: &str) -> anyhow::Result<()> {
        while !self.env.should_exit {
            match reader.read_line(prompt)? {
                ReadOutcome::Line(line) => {
                    self.execute_line(&line);
                }
                ReadOutcome::Eof => {
                    debug!("end of input");
                    break;
                }
                ReadOutcome::Interrupted => {
                    debug!("interrupted at prompt");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Executes one input line against the process's standard streams.
    pub fn execute_line(&mut self, line: &str) -> ExitCode {
        self.execute_line_with(line, &mut io::stdout(), &mut io::stderr())
    }

    /// Executes one input line.
    ///
    /// Built-ins write to `stdout`/`stderr` unless redirected; external
    /// programs always inherit the process's own streams when not redirected.
    /// Blank lines do nothing and return 0.
    pub fn execute_line_with(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> ExitCode {
        let Some(CommandLine { command, redirects }) = parser::parse_line(line) else {
            return 0;
        };
        debug!("parsed {command:?} with redirects {redirects:?}");

        let opener = match &command {
            Some(command) => command.name.as_str(),
            None => SHELL_NAME,
        };
        let cwd = &self.env.current_dir;
        let streams = match CommandStreams::open(opener, &redirects, cwd) {
            Ok(streams) => streams,
            Err(err) => {
                report(stderr, &err);
                return 1;
            }
        };
        // Nothing to run: the targets were created and are closed again here.
        let Some(command) = command else {
            return 0;
        };

        match Builtin::from_name(&command.name) {
            Some(builtin) => self.run_builtin(builtin, &command, streams, stdout, stderr),
            None => self.run_external(command, streams, stdout, stderr),
        }
    }

    fn run_builtin(
        &mut self,
        builtin: Builtin,
        command: &ParsedCommand,
        mut streams: CommandStreams,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> ExitCode {
        let out: &mut dyn Write = match &mut streams.stdout {
            OutputStream::File(file) => file,
            OutputStream::Inherited => stdout,
        };
        let err: &mut dyn Write = match &mut streams.stderr {
            OutputStream::File(file) => file,
            OutputStream::Inherited => stderr,
        };

        let code = match builtin.execute(&command.arguments, out, &mut self.env) {
            Ok(code) => code,
            Err(e) if e.downcast_ref::<ShellError>().is_some() => {
                report(err, &e);
                1
            }
            Err(e) => {
                report(err, &format!("{}: {e}", command.name));
                1
            }
        };
        if let Err(e) = out.flush() {
            warn!("{}: flushing output failed: {e}", command.name);
        }
        code
    }

    fn run_external(
        &mut self,
        command: ParsedCommand,
        mut streams: CommandStreams,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> ExitCode {
        let Some(path) = external::resolve(&self.env, &command.name) else {
            let err = ShellError::CommandNotFound { name: command.name };
            match &mut streams.stderr {
                OutputStream::File(file) => report(file, &err),
                OutputStream::Inherited => report(stderr, &err),
            }
            return NOT_FOUND_STATUS;
        };

        // Keep earlier builtin output ahead of whatever the child prints.
        if let Err(e) = stdout.flush() {
            warn!("flushing output before launch failed: {e}");
        }

        let external = ExternalCommand::new(path, command.name, command.arguments);
        match external.execute(streams, &self.env) {
            Ok(code) => code,
            Err(err) => {
                report(stderr, &err);
                1
            }
        }
    }
}

impl Default for Interpreter {
    /// An interpreter over the current process environment.
    fn default() -> Self {
        Self::new(Environment::new())
    }
}

/// Prints one user-facing error message.
fn report(out: &mut dyn Write, err: &dyn std::fmt::Display) {
    debug!("command failed: {err}");
    if writeln!(out, "{err}").and_then(|_| out.flush()).is_err() {
        warn!("could not report error: {err}");
    }
}
