//! A small interactive command interpreter.
//!
//! Each input line goes through a fixed pipeline: the [`lexer`] splits it into
//! words honoring quotes and backslash escapes, the [`parser`] strips output
//! redirections into a [`parser::RedirectionMap`], and the [`Interpreter`]
//! either runs one of the built-in commands in-process or resolves the name on
//! `PATH` and launches the program with its standard streams bound to the
//! redirection targets.
//!
//! The [`Interpreter`] owns the session state ([`env::Environment`]) and is
//! driven by any [`io_adapters::LineReader`].

mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
mod external;
mod interpreter;
pub mod io_adapters;
pub mod lexer;
pub mod logging;
pub mod parser;

pub use builtin::Builtin;
pub use config::ShellConfig;
pub use error::ShellError;
pub use external::find_command_path;
pub use interpreter::Interpreter;
