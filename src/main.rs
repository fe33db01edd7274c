use anyhow::Result;
use shell_repl::io_adapters::{BufferedReader, EditorReader, LineReader};
use shell_repl::{Interpreter, ShellConfig, logging};
use std::io::IsTerminal;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config: ShellConfig = argh::from_env();
    if let Err(err) = logging::init(config.log_level, config.log_file.as_deref()) {
        eprintln!("shell_repl: logging disabled: {err:#}");
    }

    let mut shell = Interpreter::default();

    if let Some(line) = &config.command {
        let code = shell.execute_line(line);
        if shell.should_exit() {
            return ExitCode::SUCCESS;
        }
        return ExitCode::from((code & 0xff) as u8);
    }

    match repl(&mut shell, &config.prompt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("shell_repl: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn repl(shell: &mut Interpreter, prompt: &str) -> Result<()> {
    let mut reader: Box<dyn LineReader> = if std::io::stdin().is_terminal() {
        Box::new(EditorReader::new()?)
    } else {
        Box::new(BufferedReader::stdio())
    };
    shell.repl(reader.as_mut(), prompt)
}
