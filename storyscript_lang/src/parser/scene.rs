//! SCENE and HOTSPOT blocks.

use storyscript_data::{Hotspot, Scene};

use super::{Parser, statement};
use crate::error::ParseError;
use crate::token::TokenKind;

pub(super) fn parse_scene(p: &mut Parser) -> Result<Scene, ParseError> {
    p.expect(TokenKind::Scene)?;
    let id = p.expect(TokenKind::Ident)?.text;
    let mut scene = Scene {
        id,
        ..Scene::default()
    };
    p.block_body(|p| {
        match p.kind() {
            TokenKind::Description => {
                p.advance();
                scene.description = Some(p.text_block()?);
            },
            TokenKind::OnEnter => {
                p.advance();
                scene.on_enter = Some(p.text_block()?);
            },
            TokenKind::Hotspot => scene.hotspots.push(parse_hotspot(p)?),
            TokenKind::Ident if p.kind_at(1) == TokenKind::Colon => {
                let key = p.advance().text;
                p.advance(); // colon
                let value = if p.check(TokenKind::Str) {
                    p.advance().text
                } else {
                    p.line_text()
                };
                scene.props.insert(key, value);
            },
            _ => p.synchronize(),
        }
        Ok(())
    })?;
    Ok(scene)
}

/// `HOTSPOT id "Display Name" [x, y, w, h]` with LOOK/TALK/USE sub-blocks.
fn parse_hotspot(p: &mut Parser) -> Result<Hotspot, ParseError> {
    p.expect(TokenKind::Hotspot)?;
    let id = p.expect(TokenKind::Ident)?.text;
    let mut hotspot = Hotspot {
        id,
        ..Hotspot::default()
    };
    if p.check(TokenKind::Str) {
        hotspot.name = Some(p.advance().text);
    }
    if p.eat(TokenKind::LBracket) {
        let mut nums = Vec::new();
        while !matches!(p.kind(), TokenKind::RBracket | TokenKind::Newline | TokenKind::Eof) {
            if p.check(TokenKind::Number) {
                nums.push(p.advance().text.parse::<f64>().unwrap_or(0.0));
            } else if !p.eat(TokenKind::Comma) {
                p.synchronize();
            }
        }
        p.eat(TokenKind::RBracket);
        if nums.len() == 4 {
            hotspot.bounds = Some([nums[0], nums[1], nums[2], nums[3]]);
        }
    }
    p.block_body(|p| {
        match p.kind() {
            TokenKind::Look => {
                p.advance();
                hotspot.look = Some(statement::parse_statement_block(p)?);
            },
            TokenKind::Talk => {
                p.advance();
                hotspot.talk = Some(statement::parse_statement_block(p)?);
            },
            TokenKind::Use => {
                p.advance();
                hotspot.use_action = Some(statement::parse_statement_block(p)?);
            },
            _ => p.synchronize(),
        }
        Ok(())
    })?;
    Ok(hotspot)
}
