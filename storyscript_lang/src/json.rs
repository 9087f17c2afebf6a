//! JSON view of a parsed story for tooling and debugging.
//!
//! Field names mirror the tree's node-type tags (the serde `type` tags on
//! `Statement`, `Condition`, and `After`) and must remain stable for
//! round-trip compatibility with external tooling.

use storyscript_data::StoryFile;

/// Render the syntax tree as a structured JSON document.
///
/// # Errors
/// Returns a `serde_json` error only if the tree contains a non-finite
/// number, which the lexer cannot produce.
pub fn story_to_json(story: &StoryFile) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(story)
}

/// Pretty-printed variant of [`story_to_json`].
///
/// # Errors
/// Same as [`story_to_json`].
pub fn story_to_json_string(story: &StoryFile) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(story)
}
