//! Character-level tokenizer for SVG path data strings.
//!
//! Scans a scalar buffer left to right and produces a finite, non-restartable
//! stream of [`Token`]s. The tokenizer never reports errors: text it cannot
//! scan as a command or number simply ends the stream.

/// A single lexical unit of path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// A command letter such as `M`, `l`, or `Z`.
    Command(char),
    /// A numeric argument.
    Number(f64),
}

/// Separators may appear in any quantity between tokens.
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | ',')
}

/// Any letter becomes a command token; validating it against the command
/// table is the interpreter's job. The exponent markers are excluded so a
/// stray `e` left behind by a malformed number ends the stream instead of
/// reaching dispatch.
fn is_command(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')
}

fn is_number_start(c: char) -> bool {
    matches!(c, '+' | '-' | '.' | '0'..='9')
}

/// Body characters of a number run. Note that `.` is accepted without limit:
/// `1.2.3` scans as a single run and then fails float parsing, ending the
/// stream. Shorthand like `.5.5` is therefore one dead token, not two
/// numbers; changing this would silently reparse some existing inputs.
fn is_number_char(c: char) -> bool {
    matches!(c, '.' | '0'..='9')
}

/// Tokenizer over an immutable scalar buffer.
///
/// One tokenizer serves exactly one parse; once the stream ends it stays
/// ended.
#[derive(Debug)]
pub struct Tokenizer {
    chars: Vec<char>,
    cursor: usize,
    done: bool,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            cursor: 0,
            done: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.cursor + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += 1;
        Some(c)
    }

    fn skip_separators(&mut self) {
        while self.peek().is_some_and(is_separator) {
            self.cursor += 1;
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_separators();

        let c = self.peek()?;

        if is_command(c) {
            self.bump();
            return Some(Token::Command(c));
        }

        if is_number_start(c) {
            let mut text = String::new();
            text.push(c);
            self.bump();

            while let Some(c) = self.peek() {
                if !is_number_char(c) {
                    break;
                }
                text.push(c);
                self.bump();
            }

            // An exponent marker only counts when something that can start a
            // number follows it; otherwise it is left in place and the run
            // ends with the digits scanned so far.
            if matches!(self.peek(), Some('e' | 'E'))
                && self.peek_at(1).is_some_and(is_number_start)
            {
                text.push(self.bump()?);
                text.push(self.bump()?);

                while let Some(c) = self.peek() {
                    if !is_number_char(c) {
                        break;
                    }
                    text.push(c);
                    self.bump();
                }
            }

            return text.parse().ok().map(Token::Number);
        }

        // Anything else ends the stream silently.
        None
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.is_none() {
            self.done = true;
        }
        token
    }
}
