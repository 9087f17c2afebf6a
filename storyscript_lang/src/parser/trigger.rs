//! TRIGGER, PUZZLE, and ACT_END blocks.

use storyscript_data::{ActEnd, After, CmpOp, Puzzle, StateCheck, Trigger};

use super::{Parser, condition, statement};
use crate::error::ParseError;
use crate::token::TokenKind;

pub(super) fn parse_trigger(p: &mut Parser) -> Result<Trigger, ParseError> {
    p.expect(TokenKind::Trigger)?;
    let id = p.expect(TokenKind::Ident)?.text;
    let mut trigger = Trigger {
        id,
        ..Trigger::default()
    };
    p.block_body(|p| {
        match p.kind() {
            TokenKind::Require => {
                p.advance();
                trigger.requires.push(condition::parse_condition(p)?);
            },
            TokenKind::After => {
                p.advance();
                trigger.after = Some(parse_after(p));
            },
            TokenKind::Cutscene => {
                p.advance();
                trigger.cutscene = Some(p.text_block()?);
            },
            TokenKind::Arrow => {
                p.advance();
                trigger.goto = Some(p.expect(TokenKind::Ident)?.text);
            },
            _ => p.synchronize(),
        }
        Ok(())
    })?;
    Ok(trigger)
}

/// `AFTER` clause: a numeric threshold against a tracked flag, or any other
/// expression recorded raw as an elapsed-time clause.
fn parse_after(p: &mut Parser) -> After {
    if p.check(TokenKind::Ident)
        && matches!(
            p.kind_at(1),
            TokenKind::Assign
                | TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Greater
                | TokenKind::Less
                | TokenKind::GreaterEq
                | TokenKind::LessEq
        )
        && p.kind_at(2) == TokenKind::Number
    {
        let flag = p.advance().text;
        let op = match p.advance().kind {
            TokenKind::NotEq => CmpOp::Ne,
            TokenKind::Greater => CmpOp::Gt,
            TokenKind::Less => CmpOp::Lt,
            TokenKind::GreaterEq => CmpOp::Ge,
            TokenKind::LessEq => CmpOp::Le,
            _ => CmpOp::Eq,
        };
        let value = p.advance().text.parse().unwrap_or(0.0);
        After::Threshold { flag, op, value }
    } else {
        After::Elapsed { raw: p.line_text() }
    }
}

pub(super) fn parse_puzzle(p: &mut Parser) -> Result<Puzzle, ParseError> {
    p.expect(TokenKind::Puzzle)?;
    let id = p.expect(TokenKind::Ident)?.text;
    let mut puzzle = Puzzle {
        id,
        ..Puzzle::default()
    };
    p.block_body(|p| {
        match p.kind() {
            TokenKind::Solution => {
                p.advance();
                if p.check(TokenKind::Str) || p.check(TokenKind::Ident) {
                    puzzle.solution = Some(p.advance().text);
                }
                puzzle.on_solve = statement::parse_statement_block(p)?;
            },
            TokenKind::Hints => {
                p.advance();
                p.block_body(|p| {
                    let hint = if p.check(TokenKind::Str) {
                        p.advance().text
                    } else {
                        p.line_text()
                    };
                    puzzle.hints.push(hint);
                    Ok(())
                })?;
            },
            TokenKind::Ident if p.kind_at(1) == TokenKind::Colon => {
                let key = p.advance().text;
                p.advance(); // colon
                let value = if p.check(TokenKind::Str) {
                    p.advance().text
                } else {
                    p.line_text()
                };
                puzzle.props.insert(key, value);
            },
            _ => p.synchronize(),
        }
        Ok(())
    })?;
    Ok(puzzle)
}

pub(super) fn parse_act_end(p: &mut Parser) -> Result<ActEnd, ParseError> {
    p.expect(TokenKind::ActEnd)?;
    let mut act_end = ActEnd::default();
    p.block_body(|p| {
        match p.kind() {
            TokenKind::StateCheck => {
                p.advance();
                let mut check = StateCheck::default();
                p.block_body(|p| {
                    match p.kind() {
                        TokenKind::Require => {
                            p.advance();
                            check.requires.push(condition::parse_condition(p)?);
                        },
                        TokenKind::Track => {
                            p.advance();
                            while p.check(TokenKind::Ident) || p.check(TokenKind::Comma) {
                                if p.check(TokenKind::Ident) {
                                    check.track.push(p.advance().text);
                                } else {
                                    p.advance();
                                }
                            }
                        },
                        _ => p.synchronize(),
                    }
                    Ok(())
                })?;
                act_end.state_check = Some(check);
            },
            _ => {
                let line = p.text_line();
                act_end.text.push(line);
            },
        }
        Ok(())
    })?;
    Ok(act_end)
}
