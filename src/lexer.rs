//! Lexical analysis (tokenization) of one input line into words.
//!
//! Quoting and escaping are consumed here: every produced token is a plain,
//! fully unescaped string. Quoted regions do not split words, so `a'b c'd`
//! is the single word `ab cd`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Unquoted,
    SingleQuote,
    DoubleQuote,
}

struct LexingFSM {
    input: Vec<char>,
    pos: usize,
    state: LexingState,
    buffer: String,
}

impl LexingFSM {
    /// Creates a new instance of the lexical analysis Finite State Machine.
    ///
    /// # Arguments
    /// * `line` - The input string to be lexed.
    fn new(line: &str) -> Self {
        LexingFSM {
            input: line.chars().collect(),
            pos: 0,
            state: LexingState::Unquoted,
            buffer: String::new(),
        }
    }

    /// Runs a single left-to-right scan over the input and returns the words.
    ///
    /// Never fails: a missing closing quote simply extends the quoted region
    /// to the end of the line.
    fn make_tokens(&mut self) -> Vec<String> {
        let mut out = Vec::new();

        while let Some(ch) = self.read_char() {
            match self.state {
                LexingState::Unquoted => self.handle_unquoted(ch, &mut out),
                LexingState::SingleQuote => self.handle_single_quote(ch),
                LexingState::DoubleQuote => self.handle_double_quote(ch),
            }
        }

        self.finish_word(&mut out);
        out
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn handle_unquoted(&mut self, ch: char, out: &mut Vec<String>) {
        match ch {
            c if c.is_whitespace() => self.finish_word(out),
            '\'' => self.state = LexingState::SingleQuote,
            '"' => self.state = LexingState::DoubleQuote,
            '\\' => {
                // A trailing backslash has nothing to escape and is dropped.
                if let Some(escaped) = self.read_char() {
                    self.buffer.push(escaped);
                }
            }
            c => self.buffer.push(c),
        }
    }

    fn handle_single_quote(&mut self, ch: char) {
        match ch {
            '\'' => self.state = LexingState::Unquoted,
            c => self.buffer.push(c),
        }
    }

    fn handle_double_quote(&mut self, ch: char) {
        match ch {
            '"' => self.state = LexingState::Unquoted,
            '\\' => match self.peek_char() {
                Some(escaped @ ('"' | '\\')) => {
                    self.read_char();
                    self.buffer.push(escaped);
                }
                _ => self.buffer.push('\\'),
            },
            c => self.buffer.push(c),
        }
    }

    /// Emits the pending word, if any. Empty words are never produced.
    fn finish_word(&mut self, out: &mut Vec<String>) {
        if !self.buffer.is_empty() {
            out.push(std::mem::take(&mut self.buffer));
        }
    }
}

/// The main entry point function to perform lexical analysis.
///
/// An empty or whitespace-only line yields no tokens.
///
/// ```
/// use shell_repl::lexer::split_into_tokens;
/// assert_eq!(split_into_tokens(r#"echo 'a  b' "c\"d""#), vec!["echo", "a  b", "c\"d"]);
/// ```
pub fn split_into_tokens(line: &str) -> Vec<String> {
    let mut lexer = LexingFSM::new(line);
    lexer.make_tokens()
}
