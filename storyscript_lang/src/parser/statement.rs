//! Statement productions: narrative and spoken lines, GIVE/SET/EXAMINE,
//! goto arrows, choice blocks, and conditionals.

use log::warn;

use storyscript_data::{Branch, ChoiceOption, GOTO_END, Statement, Value};

use super::{Parser, condition};
use crate::error::ParseError;
use crate::token::TokenKind;

/// Parse an indented statement list. The introducing keyword (LOOK, USE,
/// DIALOGUE header, ...) must already be consumed.
pub(super) fn parse_statement_block(p: &mut Parser) -> Result<Vec<Statement>, ParseError> {
    let mut stmts = Vec::new();
    p.block_body(|p| {
        if let Some(stmt) = parse_statement(p)? {
            stmts.push(stmt);
        }
        Ok(())
    })?;
    Ok(stmts)
}

/// Parse one statement, or skip one token and return None when nothing
/// matches.
pub(super) fn parse_statement(p: &mut Parser) -> Result<Option<Statement>, ParseError> {
    let stmt = match p.kind() {
        TokenKind::Str => Statement::Narrative { text: p.advance().text },
        TokenKind::If => parse_if(p)?,
        TokenKind::Choice => parse_choice(p)?,
        TokenKind::Arrow => {
            p.advance();
            let target = if p.check(TokenKind::End) {
                p.advance();
                GOTO_END.to_string()
            } else {
                p.expect(TokenKind::Ident)?.text
            };
            Statement::Goto { target }
        },
        TokenKind::Give => {
            p.advance();
            let item = p.expect(TokenKind::Ident)?.text;
            Statement::Give { item }
        },
        TokenKind::Set => {
            p.advance();
            let flag = p.expect(TokenKind::Ident)?.text;
            if !p.eat(TokenKind::Assign) && !p.eat(TokenKind::EqEq) {
                warn!("SET {flag} without '=' at line {}", p.peek().line);
            }
            let value = parse_literal(p);
            Statement::SetFlag { flag, value }
        },
        TokenKind::Examine => {
            p.advance();
            let target = p.expect(TokenKind::Ident)?.text;
            Statement::Examine { target }
        },
        TokenKind::Ident => {
            let line = p.text_line();
            match line.speaker {
                Some(speaker) => Statement::Spoken {
                    speaker,
                    thought: line.thought,
                    text: line.text,
                },
                None => Statement::Narrative { text: line.text },
            }
        },
        _ => {
            p.synchronize();
            return Ok(None);
        },
    };
    Ok(Some(stmt))
}

/// Typed literal: quoted string, number, `true`/`false`, or a bare
/// identifier treated as a string. A missing literal defaults to `true`.
pub(super) fn parse_literal(p: &mut Parser) -> Value {
    match p.kind() {
        TokenKind::Str => Value::Str(p.advance().text),
        TokenKind::Number => Value::Num(p.advance().text.parse().unwrap_or(0.0)),
        TokenKind::Ident => {
            let word = p.advance().text;
            match word.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::Str(word),
            }
        },
        other => {
            warn!("expected a literal, found {other} at line {}", p.peek().line);
            Value::Bool(true)
        },
    }
}

/// `IF <condition>` with an indented body, then any number of `ELSE IF`
/// branches and an optional final `ELSE`.
fn parse_if(p: &mut Parser) -> Result<Statement, ParseError> {
    p.expect(TokenKind::If)?;
    let cond = condition::parse_condition(p)?;
    let body = parse_statement_block(p)?;
    let mut branches = vec![Branch { condition: cond, body }];
    let mut else_body = None;
    loop {
        p.skip_trivia();
        if !p.eat(TokenKind::Else) {
            break;
        }
        if p.eat(TokenKind::If) {
            let cond = condition::parse_condition(p)?;
            let body = parse_statement_block(p)?;
            branches.push(Branch { condition: cond, body });
        } else {
            else_body = Some(parse_statement_block(p)?);
            break;
        }
    }
    Ok(Statement::If { branches, else_body })
}

/// `CHOICE` block: options introduced by a line-leading `>`.
fn parse_choice(p: &mut Parser) -> Result<Statement, ParseError> {
    p.expect(TokenKind::Choice)?;
    let mut options = Vec::new();
    p.block_body(|p| {
        if p.check(TokenKind::ChoiceMarker) || p.check(TokenKind::Greater) {
            options.push(parse_option(p)?);
        } else {
            p.synchronize();
        }
        Ok(())
    })?;
    Ok(Statement::Choice { options })
}

/// One choice option: `> "text"` or `> [plain text]`, an optional trailing
/// `IF <condition>` gate, then a body of statements terminated by the next
/// option marker or the enclosing DEDENT/END.
fn parse_option(p: &mut Parser) -> Result<ChoiceOption, ParseError> {
    p.advance(); // marker
    let text = if p.check(TokenKind::Str) {
        p.advance().text
    } else if p.eat(TokenKind::LBracket) {
        let mut pieces = Vec::new();
        while !matches!(p.kind(), TokenKind::RBracket | TokenKind::Newline | TokenKind::Eof) {
            pieces.push(p.advance().text);
        }
        p.eat(TokenKind::RBracket);
        pieces.retain(|s| !s.is_empty());
        pieces.join(" ")
    } else {
        p.line_text()
    };
    let gate = if p.eat(TokenKind::If) {
        Some(condition::parse_condition(p)?)
    } else {
        None
    };

    let mut body = Vec::new();
    p.skip_trivia();
    if p.check(TokenKind::Indent) {
        body = parse_statement_block(p)?;
    }
    // same-level statements also belong to this option, up to the next
    // marker or the end of the choice block
    loop {
        p.skip_trivia();
        match p.kind() {
            TokenKind::ChoiceMarker
            | TokenKind::Greater
            | TokenKind::Dedent
            | TokenKind::End
            | TokenKind::Eof => break,
            _ => {
                if let Some(stmt) = parse_statement(p)? {
                    body.push(stmt);
                }
            },
        }
    }
    Ok(ChoiceOption {
        text,
        condition: gate,
        body,
    })
}
