//! Shared data model for StoryScript content.
//!
//! The syntax tree produced by `storyscript_lang` and executed by
//! `storyscript_engine`. Pure data: nothing in this crate parses or
//! mutates state.

pub mod ast;
pub mod validate;
pub mod value;

pub use ast::*;
pub use validate::{ValidationError, validate_story};
pub use value::Value;
