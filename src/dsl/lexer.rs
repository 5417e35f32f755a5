//! Lexer (tokenizer) for the scenario format.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::{GenstabError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the scenario format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A component name, keyword or parameter key
    Identifier,
    /// A number, possibly with a unit suffix
    Number,
    /// A directive (starts with '.')
    Directive,
    /// Equals sign '='
    Equals,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing scenario input.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_blanks_and_comments();

        let line = self.line;
        let column = self.column;
        let make = |kind, text: String| Token {
            kind,
            text,
            line,
            column,
        };

        let Some(&ch) = self.chars.peek() else {
            return Ok(make(TokenKind::Eof, String::new()));
        };

        let token = match ch {
            '\n' => {
                self.advance();
                make(TokenKind::Newline, "\n".to_string())
            }
            '=' => {
                self.advance();
                make(TokenKind::Equals, "=".to_string())
            }
            // Leading-dot number such as `.5`
            '.' if self.chars.clone().nth(1).is_some_and(|c| c.is_ascii_digit()) => {
                make(TokenKind::Number, self.read_number())
            }
            '.' => {
                self.advance();
                let name = self.read_word();
                if name.is_empty() {
                    return Err(GenstabError::lexer(line, column, "empty directive name"));
                }
                make(TokenKind::Directive, format!(".{}", name))
            }
            '-' | '+' | '0'..='9' => make(TokenKind::Number, self.read_number()),
            _ if ch.is_alphabetic() || ch == '_' => make(TokenKind::Identifier, self.read_word()),
            _ => {
                return Err(GenstabError::lexer(
                    line,
                    column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        Ok(token)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_blanks_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            match ch {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '#' | ';' => {
                    while self.chars.peek().is_some_and(|&c| c != '\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn take_while(&mut self, text: &mut String, pred: impl Fn(char) -> bool) {
        while let Some(&ch) = self.chars.peek() {
            if !pred(ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }
    }

    fn read_word(&mut self) -> String {
        let mut text = String::new();
        self.take_while(&mut text, |c| c.is_alphanumeric() || c == '_');
        text
    }

    fn read_number(&mut self) -> String {
        let mut text = String::new();

        if let Some(&(sign @ ('-' | '+'))) = self.chars.peek() {
            text.push(sign);
            self.advance();
        }

        self.take_while(&mut text, |c| c.is_ascii_digit());

        if self.chars.peek() == Some(&'.') {
            text.push('.');
            self.advance();
            self.take_while(&mut text, |c| c.is_ascii_digit());
        }

        if let Some(&(exp @ ('e' | 'E'))) = self.chars.peek() {
            text.push(exp);
            self.advance();
            if let Some(&(sign @ ('-' | '+'))) = self.chars.peek() {
                text.push(sign);
                self.advance();
            }
            self.take_while(&mut text, |c| c.is_ascii_digit());
        }

        if let Some(&suffix) = self.chars.peek() {
            if is_suffix(suffix) {
                text.push(suffix);
                self.advance();
            }
        }

        text
    }
}

fn is_suffix(ch: char) -> bool {
    matches!(ch, 'u' | 'µ' | 'm' | 'k' | 'K' | 'M')
}

/// Parse a number string with an optional unit suffix.
///
/// Supported suffixes: `u`/`µ` (1e-6), `m` (1e-3), `k`/`K` (1e3), `M` (1e6).
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    let last = text.chars().last()?;

    let multiplier = match last {
        'u' | 'µ' => 1e-6,
        'm' => 1e-3,
        'k' | 'K' => 1e3,
        'M' => 1e6,
        _ => return text.parse::<f64>().ok(),
    };

    text[..text.len() - last.len_utf8()]
        .parse::<f64>()
        .ok()
        .map(|v| v * multiplier)
}
