use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::value::Value;

/// Stable identifier used across StoryFile references.
pub type Id = String;

/// Sentinel goto target that closes the active dialogue instead of naming one.
pub const GOTO_END: &str = "END";

/// Top-level parsed story, immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoryFile {
    pub game: Option<GameMeta>,
    #[serde(default)]
    pub characters: BTreeMap<Id, String>,
    #[serde(default)]
    pub inventory: Vec<Id>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub dialogues: Vec<Dialogue>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default)]
    pub puzzles: Vec<Puzzle>,
    pub act_end: Option<ActEnd>,
}

impl StoryFile {
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn dialogue(&self, id: &str) -> Option<&Dialogue> {
        self.dialogues.iter().find(|d| d.id == id)
    }
}

/// Game-level metadata from the `GAME` block.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameMeta {
    pub title: String,
    #[serde(default)]
    pub props: BTreeMap<String, String>,
}

/// A named location with descriptive text and interactive hotspots.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Scene {
    pub id: Id,
    #[serde(default)]
    pub props: BTreeMap<String, String>,
    pub description: Option<Vec<TextLine>>,
    pub on_enter: Option<Vec<TextLine>>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

/// An interactive object within a scene, offering up to three verbs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Hotspot {
    pub id: Id,
    pub name: Option<String>,
    /// `[x, y, w, h]` bounds from the hotspot header, if given.
    pub bounds: Option<[f64; 4]>,
    pub look: Option<Vec<Statement>>,
    pub talk: Option<Vec<Statement>>,
    #[serde(rename = "use")]
    pub use_action: Option<Vec<Statement>>,
}

impl Hotspot {
    /// The statement block for a verb, if the author populated one.
    pub fn block(&self, verb: Verb) -> Option<&[Statement]> {
        match verb {
            Verb::Look => self.look.as_deref(),
            Verb::Talk => self.talk.as_deref(),
            Verb::Use => self.use_action.as_deref(),
        }
    }
}

/// The three hotspot interaction verbs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    Look,
    Talk,
    Use,
}

impl Verb {
    /// Case-insensitive verb lookup used when resolving caller input.
    pub fn from_name(name: &str) -> Option<Verb> {
        match name.to_ascii_uppercase().as_str() {
            "LOOK" => Some(Verb::Look),
            "TALK" => Some(Verb::Talk),
            "USE" => Some(Verb::Use),
            _ => None,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Look => write!(f, "LOOK"),
            Verb::Talk => write!(f, "TALK"),
            Verb::Use => write!(f, "USE"),
        }
    }
}

/// One line of a description, on-enter, or cutscene text block.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TextLine {
    /// None for plain narrative text.
    pub speaker: Option<Id>,
    #[serde(default)]
    pub thought: bool,
    pub text: String,
}

impl TextLine {
    pub fn narrative(text: impl Into<String>) -> TextLine {
        TextLine {
            speaker: None,
            thought: false,
            text: text.into(),
        }
    }
}

/// A named dialogue and its statement body.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Dialogue {
    pub id: Id,
    #[serde(default)]
    pub body: Vec<Statement>,
}

/// Executable statements; the closed set the interpreter dispatches on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    /// Plain narrative text shown as-is.
    Narrative { text: String },
    /// Spoken (or thought) line attributed to a character.
    Spoken {
        speaker: Id,
        #[serde(default)]
        thought: bool,
        text: String,
    },
    /// Player-facing branch point; execution pauses until a choice is made.
    Choice { options: Vec<ChoiceOption> },
    /// Conditional branches tried in declaration order.
    If {
        branches: Vec<Branch>,
        else_body: Option<Vec<Statement>>,
    },
    /// `-> target`: dialogue jump, dialogue close (END), or scene request.
    Goto { target: Id },
    /// `GIVE item`: add to inventory.
    Give { item: Id },
    /// `SET flag = literal`.
    SetFlag { flag: String, value: Value },
    /// `EXAMINE target`: re-run a hotspot's LOOK block.
    Examine { target: Id },
}

/// One option within a choice block.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChoiceOption {
    pub text: String,
    /// Gate re-checked at selection time; None means always available.
    pub condition: Option<Condition>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

/// A guarded branch of an `IF` statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub condition: Condition,
    #[serde(default)]
    pub body: Vec<Statement>,
}

/// Boolean conditions; the closed set the evaluator dispatches on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// `HAS(item)`: inventory membership.
    Has { item: Id },
    /// `AT(scene)`: current-location check.
    At { scene: Id },
    /// `NOT <cond>`.
    Not { inner: Box<Condition> },
    /// `flag <op> literal`.
    Compare {
        flag: String,
        op: CmpOp,
        value: Value,
    },
    /// Bare identifier: flag exists and is truthy.
    Truthy { flag: String },
    /// `a AND b`, short-circuit.
    And {
        left: Box<Condition>,
        right: Box<Condition>,
    },
    /// `a OR b`, short-circuit.
    Or {
        left: Box<Condition>,
        right: Box<Condition>,
    },
}

/// Comparison operators; `=` and `==` both map to `Eq`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmpOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Gt => ">",
            CmpOp::Lt => "<",
            CmpOp::Ge => ">=",
            CmpOp::Le => "<=",
        };
        write!(f, "{s}")
    }
}

/// A globally-scanned rule that can fire cutscene content and a transition.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Trigger {
    pub id: Id,
    #[serde(default)]
    pub requires: Vec<Condition>,
    pub after: Option<After>,
    pub cutscene: Option<Vec<TextLine>>,
    pub goto: Option<Id>,
}

/// `AFTER` threshold clause on a trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum After {
    /// Numeric comparison against a tracked flag; fully evaluated.
    Threshold {
        flag: String,
        op: CmpOp,
        value: f64,
    },
    /// Elapsed-time expression. Recognized syntactically but never
    /// evaluated: the runtime treats it as always satisfied. Known gap
    /// carried over from the reference behavior.
    Elapsed { raw: String },
}

/// A named puzzle with an expected answer, solve effects, and hints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Puzzle {
    pub id: Id,
    #[serde(default)]
    pub props: BTreeMap<String, String>,
    pub solution: Option<String>,
    #[serde(default)]
    pub on_solve: Vec<Statement>,
    #[serde(default)]
    pub hints: Vec<String>,
}

/// Terminal act marker, optionally gating progression on a state check.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ActEnd {
    #[serde(default)]
    pub text: Vec<TextLine>,
    pub state_check: Option<StateCheck>,
}

/// Declared requirements and tracked flags for an act-end gate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StateCheck {
    #[serde(default)]
    pub requires: Vec<Condition>,
    #[serde(default)]
    pub track: Vec<String>,
}
