use crate::command::{CommandStreams, ExitCode};
use crate::env::Environment;
use crate::error::ShellError;
use log::{debug, trace};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

/// A program found on disk, ready to be launched under its typed name.
pub struct ExternalCommand {
    path: PathBuf,
    name: String,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(path: PathBuf, name: String, args: Vec<String>) -> Self {
        Self { path, name, args }
    }

    /// Starts the program and blocks until it terminates.
    ///
    /// Standard input is always inherited. The child sees `name` as its
    /// `argv[0]`. Redirected descriptors in `streams` are closed before this
    /// returns, whether or not the spawn succeeded.
    pub fn execute(
        self,
        streams: CommandStreams,
        env: &Environment,
    ) -> Result<ExitCode, ShellError> {
        let mut command = std::process::Command::new(&self.path);
        set_display_name(&mut command, &self.name);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(streams.stdout.stdio())
            .stderr(streams.stderr.stdio())
            .envs(env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&env.current_dir);

        debug!("launching {} as {:?} with {:?}", self.path.display(), self.name, self.args);
        let spawned = command.spawn();
        // The command holds the parent's copies of the redirected files.
        drop(command);

        let mut child = spawned.map_err(|source| ShellError::Spawn {
            command: self.name.clone(),
            source,
        })?;
        let exit_status = child.wait().map_err(|source| ShellError::Spawn {
            command: self.name.clone(),
            source,
        })?;
        debug!("{} finished: {exit_status}", self.name);

        match exit_status.code() {
            Some(x) => Ok(x),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }
}

#[cfg(unix)]
fn set_display_name(command: &mut std::process::Command, name: &str) {
    use std::os::unix::process::CommandExt;
    command.arg0(name);
}

#[cfg(not(unix))]
fn set_display_name(_command: &mut std::process::Command, _name: &str) {}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// Resolve a command name the way a typical shell would.
///
/// Behavior:
/// - Empty name: returns `None`.
/// - Name containing a `/`: checked directly, relative names against `cwd`.
/// - Bare name: each non-empty directory of `search_paths` is tried in order
///   (relative ones against `cwd`) and the first executable match wins.
///
/// A candidate that exists without execute permission is skipped, never
/// reported. Nothing is cached: every call looks at the filesystem again.
pub fn find_command_path(search_paths: &OsStr, name: &str, cwd: &Path) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    if name.contains('/') {
        let path = cwd.join(name);
        return is_executable(&path).then_some(path);
    }

    for dir in std::env::split_paths(search_paths) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let candidate = cwd.join(dir).join(name);
        trace!("checking {}", candidate.display());
        if is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Resolves `name` using the session's `PATH` and working directory.
pub(crate) fn resolve(env: &Environment, name: &str) -> Option<PathBuf> {
    let search_paths = env.search_path().unwrap_or_default();
    find_command_path(OsStr::new(&search_paths), name, &env.current_dir)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
