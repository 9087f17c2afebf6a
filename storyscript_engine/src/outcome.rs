//! Structured results returned to the caller by interpreter operations.

use storyscript_data::{Id, Value, Verb};

/// Result of executing a statement list (or of a failed action attempt).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// False only for gameplay misses: unresolved target, verb with no
    /// block, stale choice. State is untouched in that case.
    pub success: bool,
    /// Formatted text lines in declaration order.
    pub lines: Vec<String>,
    /// Items added to inventory by GIVE statements.
    pub items_given: Vec<Id>,
    /// Flag assignments made by SET statements.
    pub flags_set: Vec<(String, Value)>,
    /// A scene-transition request surfaced to the caller. The interpreter
    /// never transitions on its own; call `transition` to honor it.
    pub goto: Option<Id>,
    /// Display texts of a pending choice set, when execution paused at a
    /// choice block.
    pub choices: Option<Vec<String>>,
}

impl Outcome {
    pub fn new() -> Outcome {
        Outcome {
            success: true,
            ..Outcome::default()
        }
    }

    /// A gameplay miss: one diagnostic line, nothing else.
    pub fn failure(diagnostic: impl Into<String>) -> Outcome {
        Outcome {
            success: false,
            lines: vec![diagnostic.into()],
            ..Outcome::default()
        }
    }

    /// Fold a nested execution's output into this one. Later goto and
    /// choice results win.
    pub fn merge(&mut self, other: Outcome) {
        self.lines.extend(other.lines);
        self.items_given.extend(other.items_given);
        self.flags_set.extend(other.flags_set);
        if other.goto.is_some() {
            self.goto = other.goto;
        }
        if other.choices.is_some() {
            self.choices = other.choices;
        }
    }
}

/// One available interaction in the current scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub verb: Verb,
    pub name: String,
    pub hotspot: Id,
}

/// A trigger whose requirements currently hold. Firing it is the caller's
/// decision; the interpreter only reports candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerHit {
    pub id: Id,
    pub cutscene: Vec<String>,
    pub goto: Option<Id>,
}
