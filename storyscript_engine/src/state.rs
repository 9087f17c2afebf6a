//! Mutable runtime state, owned exclusively by one interpreter instance.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use storyscript_data::{Id, Value};

/// Snapshot of everything that changes during play. The syntax tree is
/// never part of this; it is reparsed from source each run and shared
/// read-only. Ordered collections keep serialization deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoryState {
    pub current_scene: Id,
    #[serde(default)]
    pub inventory: BTreeSet<Id>,
    #[serde(default)]
    pub flags: BTreeMap<String, Value>,
    #[serde(default)]
    pub visited: BTreeSet<Id>,
    #[serde(default)]
    pub dialogue_stack: Vec<Id>,
}

impl StoryState {
    /// Fresh state positioned at `start`, with it marked visited.
    pub fn at(start: &str) -> StoryState {
        let mut state = StoryState {
            current_scene: start.to_string(),
            ..StoryState::default()
        };
        state.visited.insert(start.to_string());
        state
    }
}
