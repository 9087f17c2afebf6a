//! Recursive-descent parser for the StoryScript DSL.
//!
//! One production per keyword block, split into submodules by block family.
//! The parser is deliberately tolerant: a structural `ParseError` is raised
//! only when a required token kind is absent (the `expect` contract); any
//! other unexpected token is skipped one at a time via `synchronize`.
//! Blocks are delimited by indentation; a trailing `END` keyword is
//! consumed when present but never required.

use log::{debug, warn};

use storyscript_data::{StoryFile, TextLine};

use crate::error::ParseError;
use crate::lexer::tokenize;
use crate::token::{Token, TokenKind};

mod condition;
mod dialogue;
mod game;
mod scene;
mod statement;
mod trigger;

/// Parse a full StoryScript source text into a syntax tree.
///
/// # Errors
/// Returns a position-tagged [`ParseError`] when a structurally required
/// token (a block identifier, a condition operand, a closing paren) is
/// missing. Everything else malformed is skipped.
pub fn parse(source: &str) -> Result<StoryFile, ParseError> {
    Parser::new(tokenize(source)).parse_story()
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse_story(&mut self) -> Result<StoryFile, ParseError> {
        let mut story = StoryFile::default();
        loop {
            self.skip_trivia();
            match self.kind() {
                TokenKind::Eof => break,
                TokenKind::Game => story.game = Some(game::parse_game(self)?),
                TokenKind::Characters => game::parse_characters(self, &mut story.characters)?,
                TokenKind::Inventory => game::parse_inventory(self, &mut story.inventory)?,
                TokenKind::Scene => story.scenes.push(scene::parse_scene(self)?),
                TokenKind::Dialogue => story.dialogues.push(dialogue::parse_dialogue(self)?),
                TokenKind::Trigger => story.triggers.push(trigger::parse_trigger(self)?),
                TokenKind::Puzzle => story.puzzles.push(trigger::parse_puzzle(self)?),
                TokenKind::ActEnd => story.act_end = Some(trigger::parse_act_end(self)?),
                // stray END between blocks; indentation already closed them
                TokenKind::End => {
                    self.advance();
                },
                _ => self.synchronize(),
            }
        }
        debug!(
            "parsed story: {} scenes, {} dialogues, {} triggers",
            story.scenes.len(),
            story.dialogues.len(),
            story.triggers.len()
        );
        Ok(story)
    }

    // ---- token cursor -------------------------------------------------

    pub(super) fn peek(&self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    pub(super) fn kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(super) fn kind_at(&self, n: usize) -> TokenKind {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        self.tokens[idx].kind
    }

    pub(super) fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// The consume contract: assert the current token's kind, advance, or
    /// raise a position-tagged error.
    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let tok = self.peek();
            Err(ParseError {
                expected: kind,
                actual: tok.kind,
                line: tok.line,
                column: tok.column,
            })
        }
    }

    /// Skip newlines and comments.
    pub(super) fn skip_trivia(&mut self) {
        while matches!(self.kind(), TokenKind::Newline | TokenKind::Comment) {
            self.advance();
        }
    }

    /// Skip exactly one unexpected token so parsing can resume at the next
    /// recognizable keyword.
    pub(super) fn synchronize(&mut self) {
        let tok = self.advance();
        warn!("skipping unexpected {} at line {}, column {}", tok.kind, tok.line, tok.column);
    }

    // ---- shared productions -------------------------------------------

    /// Drive an indented block body: skip newlines, and if an INDENT is
    /// present call `f` once per body line until the matching DEDENT.
    /// A trailing END keyword is consumed if present.
    pub(super) fn block_body(
        &mut self,
        mut f: impl FnMut(&mut Parser) -> Result<(), ParseError>,
    ) -> Result<(), ParseError> {
        self.skip_trivia();
        if self.eat(TokenKind::Indent) {
            loop {
                self.skip_trivia();
                if self.check(TokenKind::Dedent) || self.check(TokenKind::Eof) {
                    break;
                }
                f(self)?;
            }
            self.eat(TokenKind::Dedent);
        }
        self.skip_trivia();
        self.eat(TokenKind::End);
        Ok(())
    }

    /// Parse an indented text block (DESCRIPTION / ON_ENTER / CUTSCENE
    /// bodies). The introducing keyword must already be consumed.
    pub(super) fn text_block(&mut self) -> Result<Vec<TextLine>, ParseError> {
        let mut lines = Vec::new();
        self.block_body(|p| {
            lines.push(p.text_line());
            Ok(())
        })?;
        Ok(lines)
    }

    /// Parse one line of a text block: `SPEAKER: "text"`,
    /// `SPEAKER (thinks): "text"`, or plain narrative.
    pub(super) fn text_line(&mut self) -> TextLine {
        if self.check(TokenKind::Ident)
            && self.kind_at(1) == TokenKind::Colon
            && self.kind_at(2) == TokenKind::Str
        {
            let speaker = self.advance().text;
            self.advance(); // colon
            let text = self.advance().text;
            return TextLine {
                speaker: Some(speaker),
                thought: false,
                text,
            };
        }
        if self.check(TokenKind::Ident)
            && self.kind_at(1) == TokenKind::LParen
            && self.kind_at(2) == TokenKind::Ident
            && self.kind_at(3) == TokenKind::RParen
            && self.kind_at(4) == TokenKind::Colon
            && self.kind_at(5) == TokenKind::Str
        {
            let speaker = self.advance().text;
            self.advance(); // (
            self.advance(); // thinks
            self.advance(); // )
            self.advance(); // colon
            let text = self.advance().text;
            return TextLine {
                speaker: Some(speaker),
                thought: true,
                text,
            };
        }
        TextLine::narrative(self.line_text())
    }

    /// Join the remaining tokens on the current line into plain text.
    /// Consumes up to but not including the line terminator.
    pub(super) fn line_text(&mut self) -> String {
        let mut pieces: Vec<String> = Vec::new();
        loop {
            match self.kind() {
                TokenKind::Newline | TokenKind::Dedent | TokenKind::Comment | TokenKind::Eof => break,
                _ => {
                    let tok = self.advance();
                    pieces.push(token_text(&tok));
                },
            }
        }
        pieces.join(" ")
    }
}

/// Plain-text rendering of a token, for joining free-text lines.
fn token_text(tok: &Token) -> String {
    if !tok.text.is_empty() {
        return tok.text.clone();
    }
    let s = match tok.kind {
        TokenKind::Colon => ":",
        TokenKind::Comma => ",",
        TokenKind::Arrow => "->",
        TokenKind::LParen => "(",
        TokenKind::RParen => ")",
        TokenKind::LBracket => "[",
        TokenKind::RBracket => "]",
        TokenKind::Assign => "=",
        TokenKind::EqEq => "==",
        TokenKind::NotEq => "!=",
        TokenKind::Greater | TokenKind::ChoiceMarker => ">",
        TokenKind::Less => "<",
        TokenKind::GreaterEq => ">=",
        TokenKind::LessEq => "<=",
        _ => "",
    };
    s.to_string()
}
