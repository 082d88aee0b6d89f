//! Greedy line wrapping against a character budget.
//!
//! Lines are measured in characters rather than glyph widths: card text is
//! short and set in a handful of fixed sizes, so a per-size character budget
//! is all the precision the layout needs.

use std::collections::VecDeque;
use std::str::SplitWhitespace;

/// Marker appended to every fragment of a force-broken word except the last
pub const BREAK_MARKER: char = '-';

/// A lazily wrapped piece of text. Iterating it (any number of times) yields
/// the lines; nothing is computed until then.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wrap<'a> {
    text: &'a str,
    max_chars: usize,
}

/// Wrap `text` into lines of at most `max_chars` characters.
///
/// Words are packed greedily, separated by single spaces. A word longer than
/// the whole budget is force-broken into fragments of `max_chars - 1`
/// characters plus [BREAK_MARKER], the remainder starting the next line.
/// A budget of 0 is treated as 1; below 2 fragments carry no marker since
/// there would be no room left for text.
pub fn wrap(text: &str, max_chars: usize) -> Wrap<'_> {
    Wrap {
        text,
        max_chars: max_chars.max(1),
    }
}

impl<'a> Wrap<'a> {
    /// A fresh iterator over the wrapped lines
    pub fn lines(&self) -> WrapLines<'a> {
        WrapLines {
            words: self.text.split_whitespace(),
            max_chars: self.max_chars,
            line: String::new(),
            line_len: 0,
            pending: VecDeque::new(),
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}

impl<'a> IntoIterator for Wrap<'a> {
    type Item = String;
    type IntoIter = WrapLines<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines()
    }
}

impl<'a> IntoIterator for &Wrap<'a> {
    type Item = String;
    type IntoIter = WrapLines<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines()
    }
}

/// Iterator over the lines of a [Wrap]
#[derive(Debug, Clone)]
pub struct WrapLines<'a> {
    words: SplitWhitespace<'a>,
    max_chars: usize,
    /// the line being accumulated
    line: String,
    /// length of `line` in characters
    line_len: usize,
    /// completed lines not yet handed out
    pending: VecDeque<String>,
}

fn fragment_len(max_chars: usize) -> usize {
    if max_chars >= 2 {
        max_chars - 1
    } else {
        1
    }
}

impl WrapLines<'_> {
    fn flush(&mut self) {
        if self.line_len > 0 {
            self.pending.push_back(std::mem::take(&mut self.line));
            self.line_len = 0;
        }
    }

    fn push_word(&mut self, word: &str) {
        let word_len = word.chars().count();
        let joined_len = if self.line_len == 0 {
            word_len
        } else {
            self.line_len + 1 + word_len
        };

        if joined_len <= self.max_chars {
            if self.line_len > 0 {
                self.line.push(' ');
            }
            self.line.push_str(word);
            self.line_len = joined_len;
            return;
        }

        self.flush();

        if word_len <= self.max_chars {
            self.line.push_str(word);
            self.line_len = word_len;
            return;
        }

        let step = fragment_len(self.max_chars);
        let chars: Vec<char> = word.chars().collect();
        let mut rest = chars.as_slice();
        while rest.len() > self.max_chars {
            let (head, tail) = rest.split_at(step);
            let mut fragment: String = head.iter().collect();
            if self.max_chars >= 2 {
                fragment.push(BREAK_MARKER);
            }
            self.pending.push_back(fragment);
            rest = tail;
        }
        self.line = rest.iter().collect();
        self.line_len = rest.len();
    }
}

impl Iterator for WrapLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(line);
            }
            match self.words.next() {
                Some(word) => self.push_word(word),
                None => {
                    self.flush();
                    return self.pending.pop_front();
                }
            }
        }
    }
}

/// The number of lines [wrap] would produce for the same input, without
/// building any of them
pub fn count_lines(text: &str, max_chars: usize) -> usize {
    let max_chars = max_chars.max(1);
    let step = fragment_len(max_chars);

    let mut count = 0;
    let mut line_len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let joined_len = if line_len == 0 {
            word_len
        } else {
            line_len + 1 + word_len
        };
        if joined_len <= max_chars {
            line_len = joined_len;
            continue;
        }

        if line_len > 0 {
            count += 1;
        }

        if word_len <= max_chars {
            line_len = word_len;
        } else {
            let fragments = (word_len - max_chars).div_ceil(step);
            count += fragments;
            line_len = word_len - fragments * step;
        }
    }

    if line_len > 0 {
        count += 1;
    }
    count
}
