//! Sources of input lines for the read loop.

use anyhow::Result;
use log::warn;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, Write};

/// What one read attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line of input, without its terminator.
    Line(String),
    /// The input is exhausted.
    Eof,
    /// The user pressed Ctrl-C at the prompt.
    Interrupted,
}

/// Blocking "show a prompt and read one line" collaborator.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

/// Interactive terminal input with line editing and in-memory history.
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        warn!("could not record history entry: {err}");
                    }
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(err.into()),
        }
    }
}

/// Plain buffered input, used when standard input is not a terminal.
///
/// The prompt is written to `prompt_out` and flushed before every read.
/// Bytes that are not valid UTF-8 are replaced with U+FFFD, so a bad line
/// is still handed to the interpreter instead of ending the session.
pub struct BufferedReader<R, W> {
    input: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> BufferedReader<R, W> {
    pub fn new(input: R, prompt_out: W) -> Self {
        Self { input, prompt_out }
    }
}

impl BufferedReader<io::StdinLock<'static>, io::Stdout> {
    /// Reads from the process's standard input, prompting on standard output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineReader for BufferedReader<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.prompt_out.write_all(prompt.as_bytes())?;
        self.prompt_out.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(ReadOutcome::Eof);
        }
        if raw.ends_with(b"\n") {
            raw.pop();
            if raw.ends_with(b"\r") {
                raw.pop();
            }
        }
        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(err) => {
                warn!("input line is not valid UTF-8: {}", err.utf8_error());
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        Ok(ReadOutcome::Line(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_buffered_reader_prompts_and_strips_terminators() {
        let input = Cursor::new(b"echo a\r\nls\nlast".to_vec());
        let mut prompts = Vec::<u8>::new();
        let mut reader = BufferedReader::new(input, &mut prompts);

        assert_eq!(reader.read_line("$ ").unwrap(), ReadOutcome::Line("echo a".into()));
        assert_eq!(reader.read_line("$ ").unwrap(), ReadOutcome::Line("ls".into()));
        assert_eq!(reader.read_line("$ ").unwrap(), ReadOutcome::Line("last".into()));
        assert_eq!(reader.read_line("$ ").unwrap(), ReadOutcome::Eof);
        drop(reader);

        assert_eq!(prompts, b"$ $ $ $ ");
    }

    #[test]
    fn test_buffered_reader_replaces_invalid_utf8() {
        let input = Cursor::new(b"echo \xff\xfe\necho after\n".to_vec());
        let mut reader = BufferedReader::new(input, io::sink());

        assert_eq!(
            reader.read_line("$ ").unwrap(),
            ReadOutcome::Line("echo \u{fffd}\u{fffd}".into())
        );
        assert_eq!(reader.read_line("$ ").unwrap(), ReadOutcome::Line("echo after".into()));
        assert_eq!(reader.read_line("$ ").unwrap(), ReadOutcome::Eof);
    }

    #[test]
    fn test_buffered_reader_keeps_blank_lines() {
        let mut reader = BufferedReader::new(Cursor::new(b"\n".to_vec()), io::sink());
        assert_eq!(reader.read_line("> ").unwrap(), ReadOutcome::Line(String::new()));
        assert_eq!(reader.read_line("> ").unwrap(), ReadOutcome::Eof);
    }
}
