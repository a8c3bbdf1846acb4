//! Path string tokenizer.
//!
//! Grammar:
//!
//! ```text
//! path     := segment ("." segment | index)*
//! segment  := bareword | "[" quote escaped-text quote "]"
//! index    := "[" digits "]"
//! bareword := chars excluding "." "[" "]"
//! ```
//!
//! Barewords are always keys, even when they consist of digits only. Only a
//! bracketed number becomes an array index.

use crate::types::{Path, PathStep};
use crate::PathError;

/// Parse a canonical path string into its steps.
///
/// # Example
///
/// ```
/// use form_path::{parse_path, path};
///
/// assert_eq!(parse_path("todos[0].task").unwrap(), path!["todos", 0, "task"]);
/// assert_eq!(parse_path("['ding.dong']").unwrap(), path!["ding.dong"]);
/// assert!(parse_path("").unwrap().is_empty());
/// ```
pub fn parse_path(input: &str) -> Result<Path, PathError> {
    PathTokenizer::new(input).parse()
}

struct PathTokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> PathTokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(mut self) -> Result<Path, PathError> {
        let mut steps = Vec::new();
        if self.input.is_empty() {
            return Ok(Path::new(steps));
        }

        steps.push(self.parse_segment()?);

        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.advance();
                    steps.push(self.parse_segment()?);
                }
                '[' => steps.push(self.parse_bracket()?),
                ch => return Err(PathError::UnexpectedChar { ch, pos: self.pos }),
            }
        }

        Ok(Path::new(steps))
    }

    fn parse_segment(&mut self) -> Result<PathStep, PathError> {
        if self.peek() == Some('[') {
            return self.parse_bracket();
        }
        // An empty bareword (leading, doubled or trailing dot) is the empty key.
        Ok(PathStep::Key(self.parse_bareword().to_string()))
    }

    fn parse_bareword(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '.' | '[' | ']') {
                break;
            }
            self.advance();
        }
        &self.input[start..self.pos]
    }

    fn parse_bracket(&mut self) -> Result<PathStep, PathError> {
        let open = self.pos;
        self.expect('[')?;

        match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.advance();
                let key = self.parse_quoted(quote, open)?;
                match self.peek() {
                    Some(']') => {
                        self.advance();
                        Ok(PathStep::Key(key))
                    }
                    Some(ch) => Err(PathError::UnexpectedChar { ch, pos: self.pos }),
                    None => Err(PathError::UnclosedBracket { pos: open }),
                }
            }
            _ => {
                let start = self.pos;
                let close = self.input[start..]
                    .find(']')
                    .ok_or(PathError::UnclosedBracket { pos: open })?;
                let expression = self.input[start..start + close].trim();
                self.pos = start + close + 1;

                if !expression.is_empty() && expression.bytes().all(|b| b.is_ascii_digit()) {
                    let idx = expression
                        .parse::<usize>()
                        .map_err(|_| PathError::IndexOverflow { pos: start })?;
                    return Ok(PathStep::Index(idx));
                }
                Ok(PathStep::Key(expression.to_string()))
            }
        }
    }

    fn parse_quoted(&mut self, quote: char, open: usize) -> Result<String, PathError> {
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(PathError::UnterminatedQuote { pos: open }),
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(out);
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some(escaped) => {
                            out.push(escaped);
                            self.advance();
                        }
                        None => return Err(PathError::UnterminatedQuote { pos: open }),
                    }
                }
                Some(c) => {
                    out.push(c);
                    self.advance();
                }
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PathError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(PathError::UnexpectedChar { ch, pos: self.pos }),
            None => Err(PathError::UnclosedBracket { pos: self.pos }),
        }
    }
}
