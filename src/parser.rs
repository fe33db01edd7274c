//! Turns lexed words into a command plus its output redirections.

use crate::lexer;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// File descriptor number of standard output.
pub const STDOUT_FD: u32 = 1;
/// File descriptor number of standard error.
pub const STDERR_FD: u32 = 2;

/// Target file per redirected descriptor. A later directive for the same
/// descriptor replaces the earlier one.
pub type RedirectionMap = BTreeMap<u32, String>;

/// A bare operator such as `>`, `1>` or `2>`; the target is the next word.
static REDIRECT_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]*)>$").expect("valid redirect operator pattern"));

/// An operator glued to its target such as `>out.txt` or `2>err.log`.
/// `>>` is append, which is not supported, so it is never matched.
static REDIRECT_INLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]*)>([^>].*)$").expect("valid inline redirect pattern"));

/// A command name with its arguments, after redirections were removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub arguments: Vec<String>,
}

impl ParsedCommand {
    /// Builds a command from the cleaned word list. Returns `None` when there
    /// is nothing to run.
    pub fn from_words(words: Vec<String>) -> Option<Self> {
        let mut words = words.into_iter();
        let name = words.next()?;
        Some(Self {
            name,
            arguments: words.collect(),
        })
    }
}

/// Everything one input line asks for.
///
/// `command` is `None` for a line made only of redirections; its targets are
/// still created or truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub command: Option<ParsedCommand>,
    pub redirects: RedirectionMap,
}

/// Parses the descriptor prefix of an operator. An empty prefix means stdout.
fn parse_fd(digits: &str) -> Option<u32> {
    if digits.is_empty() {
        Some(STDOUT_FD)
    } else {
        digits.parse().ok()
    }
}

/// Splits words into the arguments to keep and the redirection directives.
///
/// Relative order of the kept words is preserved. An operator without a
/// following word is dropped silently.
pub fn extract_redirections(tokens: Vec<String>) -> (Vec<String>, RedirectionMap) {
    let mut words = Vec::with_capacity(tokens.len());
    let mut redirects = RedirectionMap::new();
    let mut tokens = tokens.into_iter();

    while let Some(token) = tokens.next() {
        if let Some(fd) = REDIRECT_OPERATOR
            .captures(&token)
            .and_then(|caps| parse_fd(&caps[1]))
        {
            if let Some(target) = tokens.next() {
                redirects.insert(fd, target);
            }
            continue;
        }

        if let Some((fd, target)) = REDIRECT_INLINE.captures(&token).and_then(|caps| {
            let fd = parse_fd(&caps[1])?;
            Some((fd, caps[2].to_string()))
        }) {
            redirects.insert(fd, target);
            continue;
        }

        words.push(token);
    }

    (words, redirects)
}

/// Runs the whole front end on one input line.
///
/// Returns `None` when the line asks for nothing at all.
pub fn parse_line(line: &str) -> Option<CommandLine> {
    let tokens = lexer::split_into_tokens(line);
    let (words, redirects) = extract_redirections(tokens);
    let command = ParsedCommand::from_words(words);
    if command.is_none() && redirects.is_empty() {
        return None;
    }
    Some(CommandLine { command, redirects })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        lexer::split_into_tokens(line)
    }

    fn map(entries: &[(u32, &str)]) -> RedirectionMap {
        entries
            .iter()
            .map(|(fd, path)| (*fd, path.to_string()))
            .collect()
    }

    #[test]
    fn test_separate_operator_and_target() {
        let (args, redirects) = extract_redirections(words("echo hi > out.txt"));
        assert_eq!(args, vec!["echo", "hi"]);
        assert_eq!(redirects, map(&[(1, "out.txt")]));
    }

    #[test]
    fn test_inline_targets_for_both_streams() {
        let (args, redirects) = extract_redirections(words("cmd 2>err.log 1>out.log"));
        assert_eq!(args, vec!["cmd"]);
        assert_eq!(redirects, map(&[(1, "out.log"), (2, "err.log")]));
    }

    #[test]
    fn test_order_of_remaining_words_is_kept() {
        let (args, redirects) = extract_redirections(words("a 2> e b >o c"));
        assert_eq!(args, vec!["a", "b", "c"]);
        assert_eq!(redirects, map(&[(1, "o"), (2, "e")]));
    }

    #[test]
    fn test_last_directive_for_a_descriptor_wins() {
        let (_, redirects) = extract_redirections(words("echo x > first 1> second"));
        assert_eq!(redirects, map(&[(1, "second")]));
    }

    #[test]
    fn test_dangling_operator_is_ignored() {
        let (args, redirects) = extract_redirections(words("echo hi >"));
        assert_eq!(args, vec!["echo", "hi"]);
        assert!(redirects.is_empty());
    }

    #[test]
    fn test_other_descriptors_are_recorded() {
        let (args, redirects) = extract_redirections(words("cmd 3> three"));
        assert_eq!(args, vec!["cmd"]);
        assert_eq!(redirects, map(&[(3, "three")]));
    }

    #[test]
    fn test_append_operator_is_not_a_redirection() {
        let (args, redirects) = extract_redirections(words("echo a >>b"));
        assert_eq!(args, vec!["echo", "a", ">>b"]);
        assert!(redirects.is_empty());
    }

    #[test]
    fn test_oversized_descriptor_is_an_argument() {
        let (args, redirects) = extract_redirections(words("echo 99999999999>x"));
        assert_eq!(args, vec!["echo", "99999999999>x"]);
        assert!(redirects.is_empty());
    }

    #[test]
    fn test_words_containing_gt_in_the_middle_are_kept() {
        let (args, redirects) = extract_redirections(words("echo a>b"));
        assert_eq!(args, vec!["echo", "a>b"]);
        assert!(redirects.is_empty());
    }

    #[test]
    fn test_parse_line_builds_command() {
        let line = parse_line("  echo 'hello world'  2>/tmp/err ").expect("command");
        let command = line.command.expect("command name");
        assert_eq!(command.name, "echo");
        assert_eq!(command.arguments, vec!["hello world"]);
        assert_eq!(line.redirects, map(&[(2, "/tmp/err")]));
    }

    #[test]
    fn test_parse_line_blank_and_redirect_only() {
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line(">"), None);

        let line = parse_line("> out.txt").expect("redirect-only line");
        assert_eq!(line.command, None);
        assert_eq!(line.redirects, map(&[(1, "out.txt")]));
    }
}
