//! GAME / CHARACTERS / INVENTORY metadata blocks.

use std::collections::BTreeMap;

use storyscript_data::{GameMeta, Id};

use super::Parser;
use crate::error::ParseError;
use crate::token::TokenKind;

/// `GAME "Title"` with an indented property list.
pub(super) fn parse_game(p: &mut Parser) -> Result<GameMeta, ParseError> {
    p.expect(TokenKind::Game)?;
    let title = p.expect(TokenKind::Str)?.text;
    let mut meta = GameMeta {
        title,
        props: BTreeMap::new(),
    };
    p.block_body(|p| {
        if p.check(TokenKind::Ident) && p.kind_at(1) == TokenKind::Colon {
            let key = p.advance().text;
            p.advance(); // colon
            let value = if p.check(TokenKind::Str) {
                p.advance().text
            } else {
                p.line_text()
            };
            meta.props.insert(key, value);
        } else {
            p.synchronize();
        }
        Ok(())
    })?;
    Ok(meta)
}

/// `CHARACTERS` block: one `ID: "Display Name"` entry per line.
pub(super) fn parse_characters(p: &mut Parser, out: &mut BTreeMap<Id, String>) -> Result<(), ParseError> {
    p.expect(TokenKind::Characters)?;
    p.block_body(|p| {
        if p.check(TokenKind::Ident) && p.kind_at(1) == TokenKind::Colon {
            let id = p.advance().text;
            p.advance(); // colon
            let name = if p.check(TokenKind::Str) {
                p.advance().text
            } else {
                p.line_text()
            };
            out.insert(id, name);
        } else {
            p.synchronize();
        }
        Ok(())
    })
}

/// `INVENTORY` block: declared item identifiers, commas tolerated.
pub(super) fn parse_inventory(p: &mut Parser, out: &mut Vec<Id>) -> Result<(), ParseError> {
    p.expect(TokenKind::Inventory)?;
    p.block_body(|p| {
        if p.check(TokenKind::Ident) {
            out.push(p.advance().text);
        } else if !p.eat(TokenKind::Comma) {
            p.synchronize();
        }
        Ok(())
    })
}
