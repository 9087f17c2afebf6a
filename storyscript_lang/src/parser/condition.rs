//! Condition grammar: `or` and `and` are left-associative over primaries;
//! a primary is `NOT <primary>`, `HAS(id)`, `AT(id)`, a comparison, or a
//! bare identifier truthiness check.

use storyscript_data::{CmpOp, Condition};

use super::{Parser, statement};
use crate::error::ParseError;
use crate::token::TokenKind;

pub(super) fn parse_condition(p: &mut Parser) -> Result<Condition, ParseError> {
    parse_or(p)
}

fn parse_or(p: &mut Parser) -> Result<Condition, ParseError> {
    let mut left = parse_and(p)?;
    while p.eat(TokenKind::Or) {
        let right = parse_and(p)?;
        left = Condition::Or {
            left: Box::new(left),
            right: Box::new(right),
        };
    }
    Ok(left)
}

fn parse_and(p: &mut Parser) -> Result<Condition, ParseError> {
    let mut left = parse_primary(p)?;
    while p.eat(TokenKind::And) {
        let right = parse_primary(p)?;
        left = Condition::And {
            left: Box::new(left),
            right: Box::new(right),
        };
    }
    Ok(left)
}

fn parse_primary(p: &mut Parser) -> Result<Condition, ParseError> {
    match p.kind() {
        TokenKind::Not => {
            p.advance();
            let inner = parse_primary(p)?;
            Ok(Condition::Not { inner: Box::new(inner) })
        },
        TokenKind::Has => {
            p.advance();
            p.expect(TokenKind::LParen)?;
            let item = p.expect(TokenKind::Ident)?.text;
            p.expect(TokenKind::RParen)?;
            Ok(Condition::Has { item })
        },
        TokenKind::At => {
            p.advance();
            p.expect(TokenKind::LParen)?;
            let scene = p.expect(TokenKind::Ident)?.text;
            p.expect(TokenKind::RParen)?;
            Ok(Condition::At { scene })
        },
        TokenKind::Ident => {
            let flag = p.advance().text;
            match cmp_op(p.kind()) {
                Some(op) => {
                    p.advance();
                    let value = statement::parse_literal(p);
                    Ok(Condition::Compare { flag, op, value })
                },
                None => Ok(Condition::Truthy { flag }),
            }
        },
        // a condition is structurally required here
        _ => {
            let tok = p.peek();
            Err(ParseError {
                expected: TokenKind::Ident,
                actual: tok.kind,
                line: tok.line,
                column: tok.column,
            })
        },
    }
}

fn cmp_op(kind: TokenKind) -> Option<CmpOp> {
    let op = match kind {
        TokenKind::Assign | TokenKind::EqEq => CmpOp::Eq,
        TokenKind::NotEq => CmpOp::Ne,
        TokenKind::Greater => CmpOp::Gt,
        TokenKind::Less => CmpOp::Lt,
        TokenKind::GreaterEq => CmpOp::Ge,
        TokenKind::LessEq => CmpOp::Le,
        _ => return None,
    };
    Some(op)
}
