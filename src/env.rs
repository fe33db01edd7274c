use log::warn;
use std::collections::HashMap;
use std::env as stdenv;
use std::path::PathBuf;

/// Name of the variable listing the directories searched for executables.
pub const PATH_VAR: &str = "PATH";
/// Name of the variable holding the user's home directory.
pub const HOME_VAR: &str = "HOME";

/// Session state of the interpreter.
///
/// The environment contains:
/// - `vars`: variables used for lookups and handed to every launched program.
/// - `current_dir`: the working directory, changed only by `cd`.
/// - `should_exit`: set by `exit`; the read loop stops before prompting again.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Key-value store of environment variables (e.g., PATH, HOME).
    pub vars: HashMap<String, String>,
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// When set to true, indicates that the interactive loop should exit.
    pub should_exit: bool,
}

impl Environment {
    /// Capture the current process state into a new `Environment` instance.
    ///
    /// Variables whose name or value is not valid UTF-8 are left out of the
    /// session. Launched programs still inherit them from the process.
    pub fn new() -> Self {
        let vars = stdenv::vars_os()
            .filter_map(|(key, val)| match (key.into_string(), val.into_string()) {
                (Ok(key), Ok(val)) => Some((key, val)),
                (key, _) => {
                    let key = key.unwrap_or_else(|raw| raw.to_string_lossy().into_owned());
                    warn!("skipping environment variable {key:?}: not valid UTF-8");
                    None
                }
            })
            .collect();
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            vars,
            current_dir,
            should_exit: false,
        }
    }

    /// An environment with the given working directory and no variables.
    pub fn empty(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            current_dir: current_dir.into(),
            should_exit: false,
        }
    }

    /// Get the value of a session variable.
    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    /// Set or override an environment variable in `self.vars`.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    pub fn search_path(&self) -> Option<String> {
        self.get_var(PATH_VAR)
    }

    pub fn home_dir(&self) -> Option<String> {
        self.get_var(HOME_VAR).filter(|home| !home.is_empty())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
