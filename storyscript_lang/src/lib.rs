//! storyscript_lang: tokenizer and parser for the StoryScript DSL.
//!
//! StoryScript is an indentation-structured language for branching,
//! stateful interactive narratives: scenes with hotspots, dialogues with
//! choices, flags, triggers, and puzzles. This crate turns source text
//! into the typed syntax tree defined in `storyscript_data`; the
//! `storyscript_engine` crate executes that tree.
//!
//! The front end is tolerant by design. Source text is expected to come
//! from imperfect generation pipelines, so unknown characters and tokens
//! are skipped rather than rejected; the only hard failures are missing
//! structurally required tokens (see [`ParseError`]).

pub mod error;
pub mod json;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::ParseError;
pub use json::{story_to_json, story_to_json_string};
pub use lexer::tokenize;
pub use parser::parse;
pub use token::{Token, TokenKind};
