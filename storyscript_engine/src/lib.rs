//! storyscript_engine: interpreter and runtime for StoryScript stories.
//!
//! Takes the immutable syntax tree built by `storyscript_lang` and runs it
//! against mutable game state: current scene, inventory, flags, visited
//! history, and a dialogue stack. Hosts (a renderer, a REPL, a playtest
//! harness) drive the runtime through [`Interpreter`] and react to the
//! structured [`Outcome`]s it returns.

pub mod error;
pub mod eval;
pub mod interpreter;
pub mod outcome;
pub mod state;

pub use error::RuntimeError;
pub use eval::eval as evaluate_condition;
pub use interpreter::{Interpreter, format_line};
pub use outcome::{ActionEntry, Outcome, TriggerHit};
pub use state::StoryState;
