//! DIALOGUE blocks.

use storyscript_data::Dialogue;

use super::{Parser, statement};
use crate::error::ParseError;
use crate::token::TokenKind;

pub(super) fn parse_dialogue(p: &mut Parser) -> Result<Dialogue, ParseError> {
    p.expect(TokenKind::Dialogue)?;
    let id = p.expect(TokenKind::Ident)?.text;
    let body = statement::parse_statement_block(p)?;
    Ok(Dialogue { id, body })
}
