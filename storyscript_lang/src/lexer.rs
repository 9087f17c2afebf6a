//! Lexer for the StoryScript DSL.
//!
//! Converts source text into a flat token sequence, tracking significant
//! indentation with an indent stack (space = 1 unit, tab = 2 units). The
//! lexer never fails: unrecognized characters are dropped and indentation
//! mismatches are tolerated, since source text is expected to come from
//! imperfect generation pipelines.

use log::{debug, warn};

use crate::token::{Token, TokenKind, keyword_kind};

/// Tokenize a full source text.
///
/// The returned stream is INDENT/DEDENT balanced and always ends with a
/// synthetic `Eof` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).run()
}

struct Lexer<'src> {
    rest: &'src str,
    line: u32,
    column: u32,
    indent_stack: Vec<usize>,
    tokens: Vec<Token>,
    /// True once a non-structural token has been emitted on the current
    /// line; disambiguates `>` as choice marker vs greater-than.
    line_has_tokens: bool,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            line: 1,
            column: 1,
            indent_stack: vec![0],
            tokens: Vec::new(),
            line_has_tokens: false,
        }
    }

    fn run(mut self) -> Vec<Token> {
        self.handle_line_start();
        while let Some(c) = self.peek() {
            match c {
                '\n' => {
                    self.push(TokenKind::Newline, "");
                    self.advance();
                    self.line_has_tokens = false;
                    self.handle_line_start();
                },
                ' ' | '\t' | '\r' => {
                    self.advance();
                },
                '#' => self.scan_comment(),
                '"' => self.scan_string(),
                ':' => self.single(TokenKind::Colon),
                ',' => self.single(TokenKind::Comma),
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                '-' => {
                    if self.peek_at(1) == Some('>') {
                        self.push(TokenKind::Arrow, "");
                        self.advance();
                        self.advance();
                        self.line_has_tokens = true;
                    } else {
                        // a bare dash is not part of the vocabulary
                        debug!("dropping stray '-' at {}:{}", self.line, self.column);
                        self.advance();
                    }
                },
                '=' => self.maybe_eq(TokenKind::EqEq, TokenKind::Assign),
                '!' => {
                    if self.peek_at(1) == Some('=') {
                        self.push(TokenKind::NotEq, "");
                        self.advance();
                        self.advance();
                        self.line_has_tokens = true;
                    } else {
                        debug!("dropping stray '!' at {}:{}", self.line, self.column);
                        self.advance();
                    }
                },
                '>' => {
                    let first_on_line = !self.line_has_tokens;
                    if self.peek_at(1) == Some('=') {
                        self.push(TokenKind::GreaterEq, "");
                        self.advance();
                        self.advance();
                    } else {
                        let kind = if first_on_line { TokenKind::ChoiceMarker } else { TokenKind::Greater };
                        self.single(kind);
                        continue;
                    }
                    self.line_has_tokens = true;
                },
                '<' => self.maybe_eq(TokenKind::LessEq, TokenKind::Less),
                c if c.is_ascii_digit() => self.scan_number(),
                c if c.is_alphabetic() || c == '_' => self.scan_word(),
                other => {
                    // tolerance over strictness: drop anything unrecognized
                    debug!("dropping unrecognized character {other:?} at {}:{}", self.line, self.column);
                    self.advance();
                },
            }
        }

        // flush any open indentation levels before the synthetic EOF
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push(TokenKind::Dedent, "");
        }
        self.push(TokenKind::Eof, "");
        self.tokens
    }

    /// Measure leading whitespace on a fresh line and emit INDENT/DEDENT
    /// tokens. Blank and comment-only lines are exempt from bookkeeping.
    fn handle_line_start(&mut self) {
        let mut width = 0usize;
        while let Some(c) = self.peek() {
            match c {
                ' ' => width += 1,
                '\t' => width += 2,
                '\r' => {},
                _ => break,
            }
            self.advance();
        }
        match self.peek() {
            None | Some('\n') | Some('#') => return,
            _ => {},
        }

        let top = *self.indent_stack.last().unwrap_or(&0);
        if width > top {
            self.indent_stack.push(width);
            self.push(TokenKind::Indent, "");
        } else if width < top {
            while self.indent_stack.len() > 1 && *self.indent_stack.last().unwrap_or(&0) > width {
                self.indent_stack.pop();
                self.push(TokenKind::Dedent, "");
            }
            let top = *self.indent_stack.last().unwrap_or(&0);
            if top != width {
                // partial dedent to a level never pushed; tolerated
                warn!("indentation mismatch at line {}: {} units does not match any open level", self.line, width);
            }
        }
    }

    fn scan_comment(&mut self) {
        let (line, column) = (self.line, self.column);
        self.advance(); // '#'
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.advance();
        }
        self.tokens.push(Token::new(TokenKind::Comment, text.trim(), line, column));
        self.line_has_tokens = true;
    }

    fn scan_string(&mut self) {
        let (line, column) = (self.line, self.column);
        self.advance(); // opening quote
        let mut text = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    // unterminated string closes at end of line
                    warn!("unterminated string at line {line}");
                    break;
                },
                Some('"') => {
                    self.advance();
                    break;
                },
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some('"') => text.push('"'),
                        Some('\\') => text.push('\\'),
                        Some(other) => {
                            text.push('\\');
                            text.push(other);
                        },
                        None => break,
                    }
                    self.advance();
                },
                Some(c) => {
                    text.push(c);
                    self.advance();
                },
            }
        }
        self.tokens.push(Token::new(TokenKind::Str, text, line, column));
        self.line_has_tokens = true;
    }

    fn scan_number(&mut self) {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else if c == '.' && !seen_dot && self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) {
                seen_dot = true;
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        self.tokens.push(Token::new(TokenKind::Number, text, line, column));
        self.line_has_tokens = true;
    }

    fn scan_word(&mut self) {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        match keyword_kind(&text) {
            Some(kind) => self.tokens.push(Token::new(kind, text, line, column)),
            None => self.tokens.push(Token::new(TokenKind::Ident, text, line, column)),
        }
        self.line_has_tokens = true;
    }

    fn single(&mut self, kind: TokenKind) {
        self.push(kind, "");
        self.advance();
        self.line_has_tokens = true;
    }

    fn maybe_eq(&mut self, double: TokenKind, lone: TokenKind) {
        if self.peek_at(1) == Some('=') {
            self.push(double, "");
            self.advance();
            self.advance();
        } else {
            self.push(lone, "");
            self.advance();
        }
        self.line_has_tokens = true;
    }

    fn push(&mut self, kind: TokenKind, text: &str) {
        self.tokens.push(Token::new(kind, text, self.line, self.column));
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.rest = &self.rest[c.len_utf8()..];
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}
