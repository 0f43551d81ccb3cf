// Line cursor over the remaining note text.
//
// Remaining text is always a borrowed suffix of the original input, so every
// rule consumes a prefix and hands back the rest without copying. `\n`,
// `\r\n` and a lone `\r` all end a line.

use crate::error::{NoteError, NoteResult};

/// One line taken off the front of the text, plus everything after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextLine<'a> {
    pub line: &'a str,
    pub rest: &'a str,
}

/// A line is blank only when it is empty. Whitespace-only lines are content.
pub fn is_blank(line: &str) -> bool {
    line.is_empty()
}

/// True while at least one non-blank line remains.
pub fn has_content(text: &str) -> bool {
    text.chars().any(|c| c != '\n' && c != '\r')
}

/// Split off the first physical line.
fn split_first_line(text: &str) -> (&str, &str) {
    match text.find(|c: char| c == '\n' || c == '\r') {
        Some(idx) => {
            let skip = if text[idx..].starts_with("\r\n") { 2 } else { 1 };
            (&text[..idx], &text[idx + skip..])
        }
        None => (text, ""),
    }
}

/// Next line of `text`.
///
/// With `include_blank` the very first line is returned whatever it holds.
/// Without it, leading blank lines are skipped. Returns `None` when there is
/// no line to return: empty text, or only blank lines when skipping them.
pub fn next_line(text: &str, include_blank: bool) -> Option<NextLine<'_>> {
    if text.is_empty() {
        return None;
    }

    let mut rest = text;
    loop {
        let (line, after) = split_first_line(rest);
        if include_blank || !is_blank(line) {
            return Some(NextLine { line, rest: after });
        }
        if after.is_empty() {
            return None;
        }
        rest = after;
    }
}

/// Next non-blank line, treating its absence as a caller error.
pub fn require_line(text: &str) -> NoteResult<NextLine<'_>> {
    next_line(text, false).ok_or(NoteError::NoContent)
}
