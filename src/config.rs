use argh::FromArgs;
use log::LevelFilter;
use std::path::PathBuf;

/// Prompt used when none is configured.
pub const DEFAULT_PROMPT: &str = "$ ";

#[derive(FromArgs, Debug)]
/// Interactive command interpreter with built-ins, PATH lookup and output redirection.
pub struct ShellConfig {
    #[argh(option, default = "String::from(DEFAULT_PROMPT)")]
    /// text shown before each input line (default: "$ ")
    pub prompt: String,

    #[argh(option, short = 'c')]
    /// execute this line and exit with its status instead of reading input
    pub command: Option<String>,

    #[argh(option, default = "LevelFilter::Off")]
    /// log verbosity: off, error, warn, info, debug or trace (default: off)
    pub log_level: LevelFilter,

    #[argh(option)]
    /// append log records to this file instead of standard error
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::from_args(&["shell_repl"], &[]).unwrap();
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.command, None);
        assert_eq!(config.log_level, LevelFilter::Off);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_all_options() {
        let config = ShellConfig::from_args(
            &["shell_repl"],
            &[
                "-c",
                "echo hi",
                "--prompt",
                "> ",
                "--log-level",
                "debug",
                "--log-file",
                "/tmp/shell.log",
            ],
        )
        .unwrap();
        assert_eq!(config.command.as_deref(), Some("echo hi"));
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/shell.log")));
    }

    #[test]
    fn test_bad_log_level_is_rejected() {
        let res = ShellConfig::from_args(&["shell_repl"], &["--log-level", "chatty"]);
        assert!(res.is_err());
    }
}
