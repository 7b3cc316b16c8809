//! A module implementing lexical analysis (tokenization) of a command line.
//!
//! The language has no quoting or escaping: a literal space always ends a word.

/// The only delimiter recognized between words.
const DELIMITER: char = ' ';

/// Splits a command line into words.
///
/// The caller is expected to trim the line first. Runs of spaces collapse, so the
/// result never contains an empty token, and an empty or all-space line yields an
/// empty vector, which means "nothing to execute".
///
/// Only the ASCII space is a delimiter; other whitespace such as tabs stays inside
/// the token it appears in.
///
/// # Example
/// ```
/// use wish::lexer::split_into_tokens;
/// assert_eq!(split_into_tokens("ls  -l /tmp"), vec!["ls", "-l", "/tmp"]);
/// ```
pub fn split_into_tokens(line: &str) -> Vec<String> {
    line.split(DELIMITER)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}
