use crate::command::ExitCode;
use crate::env::Environment;
use crate::error::ShellError;
use crate::external;
use anyhow::Result;
use log::debug;
use std::env as stdenv;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Built-in commands known to the shell at compile time.
///
/// Builtins run in-process and are always looked up before `PATH`, so an
/// executable with the same name can never shadow them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Echo,
    Type,
    Pwd,
    Cd,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [
        Builtin::Exit,
        Builtin::Echo,
        Builtin::Type,
        Builtin::Pwd,
        Builtin::Cd,
    ];

    /// Canonical name of the command, e.g. "echo" or "cd".
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
            Builtin::Echo => "echo",
            Builtin::Type => "type",
            Builtin::Pwd => "pwd",
            Builtin::Cd => "cd",
        }
    }

    /// Exact, case-sensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    /// Executes the command using provided output streams and environment.
    ///
    /// Return value follows shell conventions: 0 for success, non-zero for
    /// error. A returned `Err` has not been shown to the user yet.
    pub fn execute(
        self,
        args: &[String],
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        match self {
            Builtin::Exit => exit(env),
            Builtin::Echo => echo(args, stdout),
            Builtin::Type => type_of(args, stdout, env),
            Builtin::Pwd => pwd(stdout, env),
            Builtin::Cd => cd(args, env),
        }
    }
}

/// Arguments are ignored; the read loop stops before the next prompt.
fn exit(env: &mut Environment) -> Result<ExitCode> {
    env.should_exit = true;
    Ok(0)
}

fn echo(args: &[String], stdout: &mut dyn Write) -> Result<ExitCode> {
    writeln!(stdout, "{}", args.join(" "))?;
    Ok(0)
}

fn pwd(stdout: &mut dyn Write, env: &Environment) -> Result<ExitCode> {
    writeln!(stdout, "{}", env.current_dir.display())?;
    Ok(0)
}

/// Reports how each name would be interpreted. Status is 1 if any name is
/// unknown.
fn type_of(args: &[String], stdout: &mut dyn Write, env: &Environment) -> Result<ExitCode> {
    if args.is_empty() {
        return Err(ShellError::MissingOperand { builtin: "type" }.into());
    }

    let mut code = 0;
    for name in args {
        if Builtin::from_name(name).is_some() {
            writeln!(stdout, "{name} is a shell builtin")?;
        } else if let Some(path) = external::resolve(env, name) {
            writeln!(stdout, "{name} is {}", path.display())?;
        } else {
            writeln!(stdout, "{name}: not found")?;
            code = 1;
        }
    }
    Ok(code)
}

/// Changes the working directory. Without an argument this does nothing.
///
/// The path is resolved lexically, so `..` leaves a symlinked directory the
/// way it was entered rather than through its physical parent.
fn cd(args: &[String], env: &mut Environment) -> Result<ExitCode> {
    let Some(arg) = args.first() else {
        return Ok(0);
    };
    let not_found = || ShellError::NoSuchDirectory { path: arg.clone() };

    let target = cd_target(arg, env)
        .map(|path| normalize(&path))
        .ok_or_else(not_found)?;
    if !target.is_dir() {
        return Err(not_found().into());
    }

    stdenv::set_current_dir(&target).map_err(|err| {
        debug!("chdir to {} failed: {err}", target.display());
        not_found()
    })?;
    env.current_dir = target;
    Ok(0)
}

/// Drops `.` components and lets `..` remove the previous one. `..` at the
/// root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

/// Maps a `cd` argument to a path. `None` when it needs `HOME` and that is
/// unset.
fn cd_target(arg: &str, env: &Environment) -> Option<PathBuf> {
    if arg == "~" {
        return env.home_dir().map(PathBuf::from);
    }
    if let Some(rest) = arg.strip_prefix("~/") {
        return env.home_dir().map(|home| PathBuf::from(home).join(rest));
    }
    if arg.starts_with('/') {
        return Some(PathBuf::from(arg));
    }
    Some(env.current_dir.join(arg))
}
