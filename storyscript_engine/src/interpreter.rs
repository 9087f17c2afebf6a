//! The StoryScript runtime.
//!
//! One interpreter owns one mutable [`StoryState`] and borrows one parsed
//! [`StoryFile`] read-only; any number of interpreters may share a tree.
//! Every operation runs to completion synchronously. Suspension for player
//! input happens outside this boundary: a choice block returns a pending
//! [`Outcome`] and the next `select_choice` call resumes exactly there.

use log::info;

use storyscript_data::{
    ActEnd, After, ChoiceOption, Condition, GOTO_END, Hotspot, Id, Scene, Statement, StoryFile,
    TextLine, Value, Verb,
};

use crate::error::RuntimeError;
use crate::eval;
use crate::outcome::{ActionEntry, Outcome, TriggerHit};
use crate::state::StoryState;

pub struct Interpreter<'story> {
    story: &'story StoryFile,
    state: StoryState,
    start_scene: Id,
    pending: Option<Vec<&'story ChoiceOption>>,
}

impl<'story> Interpreter<'story> {
    /// Build a runtime over a parsed story. The start location defaults to
    /// the first declared scene and is marked visited.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnknownScene`] when an explicit start names
    /// an undeclared scene.
    pub fn new(story: &'story StoryFile, start: Option<&str>) -> Result<Self, RuntimeError> {
        let start_scene = match start {
            Some(id) => {
                if story.scene(id).is_none() {
                    return Err(RuntimeError::UnknownScene(id.to_string()));
                }
                id.to_string()
            },
            None => story.scenes.first().map(|s| s.id.clone()).unwrap_or_default(),
        };
        Ok(Self {
            story,
            state: StoryState::at(&start_scene),
            start_scene,
            pending: None,
        })
    }

    /// Restore a runtime from a snapshot produced by [`Interpreter::serialize`].
    /// The tree is supplied separately; it is never part of the snapshot.
    ///
    /// # Errors
    /// Returns [`RuntimeError::Snapshot`] when the blob does not decode.
    pub fn deserialize(story: &'story StoryFile, blob: &str) -> Result<Self, RuntimeError> {
        let state: StoryState = serde_json::from_str(blob)?;
        Ok(Self {
            story,
            start_scene: state.current_scene.clone(),
            state,
            pending: None,
        })
    }

    /// Snapshot the mutable state as JSON: current scene, inventory, flags,
    /// visited scenes, dialogue stack. Enough to reconstruct identical
    /// future behavior over the same tree.
    ///
    /// # Errors
    /// Returns [`RuntimeError::Snapshot`] if encoding fails.
    pub fn serialize(&self) -> Result<String, RuntimeError> {
        Ok(serde_json::to_string(&self.state)?)
    }

    // ---- reads --------------------------------------------------------

    pub fn current_scene(&self) -> &str {
        &self.state.current_scene
    }

    /// Scene by id, or the current scene when `id` is None.
    pub fn get_scene(&self, id: Option<&str>) -> Option<&'story Scene> {
        match id {
            Some(id) => self.story.scene(id),
            None => self.story.scene(&self.state.current_scene),
        }
    }

    pub fn get_description(&self) -> Vec<String> {
        self.get_scene(None)
            .and_then(|s| s.description.as_ref())
            .map(|lines| lines.iter().map(format_line).collect())
            .unwrap_or_default()
    }

    pub fn get_on_enter_text(&self) -> Vec<String> {
        self.get_scene(None)
            .and_then(|s| s.on_enter.as_ref())
            .map(|lines| lines.iter().map(format_line).collect())
            .unwrap_or_default()
    }

    pub fn get_hotspots(&self) -> &'story [Hotspot] {
        self.get_scene(None).map(|s| s.hotspots.as_slice()).unwrap_or_default()
    }

    /// One entry per populated verb block on each hotspot, in declaration
    /// order.
    pub fn get_available_actions(&self) -> Vec<ActionEntry> {
        let mut actions = Vec::new();
        for hotspot in self.get_hotspots() {
            for verb in [Verb::Look, Verb::Talk, Verb::Use] {
                if hotspot.block(verb).is_some() {
                    actions.push(ActionEntry {
                        verb,
                        name: hotspot.name.clone().unwrap_or_else(|| hotspot.id.clone()),
                        hotspot: hotspot.id.clone(),
                    });
                }
            }
        }
        actions
    }

    pub fn get_state(&self) -> &StoryState {
        &self.state
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.state.inventory.contains(item)
    }

    pub fn get_flag(&self, name: &str) -> Option<&Value> {
        self.state.flags.get(name)
    }

    pub fn is_in_dialogue(&self) -> bool {
        !self.state.dialogue_stack.is_empty()
    }

    /// Display texts of the pending choice set, if execution is paused at a
    /// choice block.
    pub fn get_choices(&self) -> Option<Vec<String>> {
        self.pending
            .as_ref()
            .map(|opts| opts.iter().map(|o| o.text.clone()).collect())
    }

    pub fn act_end(&self) -> Option<&'story ActEnd> {
        self.story.act_end.as_ref()
    }

    pub fn evaluate_condition(&self, cond: &Condition) -> bool {
        eval::eval(cond, &self.state)
    }

    // ---- state mutation ----------------------------------------------

    pub fn give_item(&mut self, item: &str) {
        self.state.inventory.insert(item.to_string());
    }

    pub fn remove_item(&mut self, item: &str) {
        self.state.inventory.remove(item);
    }

    pub fn set_flag(&mut self, name: &str, value: Value) {
        self.state.flags.insert(name.to_string(), value);
    }

    /// Drop the innermost active dialogue and any pending choices.
    pub fn exit_dialogue(&mut self) {
        self.state.dialogue_stack.pop();
        self.pending = None;
    }

    /// Back to a fresh state at the original start scene.
    pub fn reset(&mut self) {
        self.state = StoryState::at(&self.start_scene);
        self.pending = None;
    }

    pub fn can_transition(&self, target: &str) -> bool {
        self.story.scene(target).is_some()
    }

    /// Move to a declared scene, marking it visited and clearing any active
    /// dialogue and choice context.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnknownScene`] for an undeclared target; the
    /// host is expected to have validated it (see [`Interpreter::can_transition`]).
    pub fn transition(&mut self, target: &str) -> Result<(), RuntimeError> {
        if self.story.scene(target).is_none() {
            return Err(RuntimeError::UnknownScene(target.to_string()));
        }
        info!("transition: {} -> {target}", self.state.current_scene);
        self.state.current_scene = target.to_string();
        self.state.visited.insert(target.to_string());
        self.state.dialogue_stack.clear();
        self.pending = None;
        Ok(())
    }

    // ---- play ---------------------------------------------------------

    /// Resolve a hotspot (exact id, exact display name, then
    /// case-insensitive substring of the display name) and run its block
    /// for the verb. Misses come back as failure outcomes, never errors.
    pub fn take_action(&mut self, verb: &str, target: &str) -> Outcome {
        let Some(verb) = Verb::from_name(verb) else {
            return Outcome::failure(format!("You don't know how to '{verb}' anything."));
        };
        let story = self.story;
        let Some(scene) = story.scene(&self.state.current_scene) else {
            return Outcome::failure("There is nothing here.");
        };
        let Some(hotspot) = resolve_hotspot(scene, target) else {
            return Outcome::failure(format!("You don't see any '{target}' here."));
        };
        let Some(block) = hotspot.block(verb) else {
            let name = hotspot.name.as_deref().unwrap_or(&hotspot.id);
            return Outcome::failure(format!("You can't {verb} the {name}."));
        };
        info!("action: {verb} {} in {}", hotspot.id, scene.id);
        self.execute(block)
    }

    /// Enter a declared dialogue: push it on the dialogue stack and run its
    /// body.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnknownDialogue`] for an undeclared id.
    pub fn enter_dialogue(&mut self, id: &str) -> Result<Outcome, RuntimeError> {
        let story = self.story;
        let dialogue = story
            .dialogue(id)
            .ok_or_else(|| RuntimeError::UnknownDialogue(id.to_string()))?;
        info!("entering dialogue '{id}'");
        self.state.dialogue_stack.push(dialogue.id.clone());
        Ok(self.execute(&dialogue.body))
    }

    /// Pick a pending choice by index. The option's gate is re-checked
    /// against current state (the presented list may be stale); the pending
    /// set is cleared before the body runs, so a body that opens a new
    /// choice block becomes the new pending set.
    ///
    /// # Errors
    /// [`RuntimeError::NoPendingChoices`] when nothing is pending,
    /// [`RuntimeError::ChoiceOutOfRange`] for a bad index; state is
    /// untouched in both cases.
    pub fn select_choice(&mut self, index: usize) -> Result<Outcome, RuntimeError> {
        let Some(pending) = &self.pending else {
            return Err(RuntimeError::NoPendingChoices);
        };
        if index >= pending.len() {
            return Err(RuntimeError::ChoiceOutOfRange {
                index,
                len: pending.len(),
            });
        }
        let option = pending[index];
        if let Some(cond) = &option.condition {
            if !eval::eval(cond, &self.state) {
                return Ok(Outcome::failure("That option is no longer available."));
            }
        }
        self.pending = None;
        Ok(self.execute(&option.body))
    }

    /// Point-in-time scan of every trigger whose requirements currently
    /// hold. Firing is the caller's decision.
    pub fn check_triggers(&self) -> Vec<TriggerHit> {
        let mut hits = Vec::new();
        for trigger in &self.story.triggers {
            let satisfied = trigger.requires.iter().all(|c| eval::eval(c, &self.state))
                && self.after_holds(trigger.after.as_ref());
            if satisfied {
                hits.push(TriggerHit {
                    id: trigger.id.clone(),
                    cutscene: trigger
                        .cutscene
                        .as_ref()
                        .map(|lines| lines.iter().map(format_line).collect())
                        .unwrap_or_default(),
                    goto: trigger.goto.clone(),
                });
            }
        }
        hits
    }

    fn after_holds(&self, after: Option<&After>) -> bool {
        match after {
            None => true,
            Some(After::Threshold { flag, op, value }) => {
                let cond = Condition::Compare {
                    flag: flag.clone(),
                    op: *op,
                    value: Value::Num(*value),
                };
                eval::eval(&cond, &self.state)
            },
            // elapsed-time clauses are recognized but never evaluated
            Some(After::Elapsed { .. }) => true,
        }
    }

    // ---- statement execution -----------------------------------------

    /// Run a statement list in strict declaration order. Execution stops
    /// early when a choice block publishes a pending set.
    fn execute(&mut self, stmts: &'story [Statement]) -> Outcome {
        let mut out = Outcome::new();
        for stmt in stmts {
            match stmt {
                Statement::Narrative { text } => out.lines.push(text.clone()),
                Statement::Spoken { speaker, thought, text } => {
                    out.lines.push(format_line(&TextLine {
                        speaker: Some(speaker.clone()),
                        thought: *thought,
                        text: text.clone(),
                    }));
                },
                Statement::Give { item } => {
                    self.state.inventory.insert(item.clone());
                    out.items_given.push(item.clone());
                },
                Statement::SetFlag { flag, value } => {
                    self.state.flags.insert(flag.clone(), value.clone());
                    out.flags_set.push((flag.clone(), value.clone()));
                },
                Statement::Examine { target } => {
                    let story = self.story;
                    let block = story
                        .scene(&self.state.current_scene)
                        .and_then(|scene| resolve_hotspot(scene, target))
                        .and_then(|h| h.block(Verb::Look));
                    match block {
                        Some(block) => out.merge(self.execute(block)),
                        None => out.lines.push(format!("You see nothing special about the {target}.")),
                    }
                },
                Statement::Goto { target } => {
                    if target == GOTO_END {
                        self.state.dialogue_stack.pop();
                    } else if let Some(dialogue) = self.story.dialogue(target) {
                        self.state.dialogue_stack.push(dialogue.id.clone());
                        out.merge(self.execute(&dialogue.body));
                    } else {
                        // scene transition request; the caller must act on it
                        out.goto = Some(target.clone());
                    }
                },
                Statement::Choice { options } => {
                    let open: Vec<&'story ChoiceOption> = options
                        .iter()
                        .filter(|o| {
                            o.condition
                                .as_ref()
                                .is_none_or(|c| eval::eval(c, &self.state))
                        })
                        .collect();
                    out.choices = Some(open.iter().map(|o| o.text.clone()).collect());
                    self.pending = Some(open);
                },
                Statement::If { branches, else_body } => {
                    let mut taken = false;
                    for branch in branches {
                        if eval::eval(&branch.condition, &self.state) {
                            out.merge(self.execute(&branch.body));
                            taken = true;
                            break;
                        }
                    }
                    if !taken {
                        if let Some(body) = else_body {
                            out.merge(self.execute(body));
                        }
                    }
                },
            }
            // a published choice set suspends the whole list
            if out.choices.is_some() {
                break;
            }
        }
        out
    }
}

fn resolve_hotspot<'a>(scene: &'a Scene, target: &str) -> Option<&'a Hotspot> {
    if let Some(h) = scene.hotspots.iter().find(|h| h.id == target) {
        return Some(h);
    }
    if let Some(h) = scene.hotspots.iter().find(|h| h.name.as_deref() == Some(target)) {
        return Some(h);
    }
    let needle = target.to_lowercase();
    scene
        .hotspots
        .iter()
        .find(|h| h.name.as_ref().is_some_and(|n| n.to_lowercase().contains(&needle)))
}

/// `SPEAKER: "text"`, `SPEAKER (thinks): "text"`, or plain narrative.
pub fn format_line(line: &TextLine) -> String {
    match &line.speaker {
        None => line.text.clone(),
        Some(speaker) if line.thought => format!("{speaker} (thinks): \"{}\"", line.text),
        Some(speaker) => format!("{speaker}: \"{}\"", line.text),
    }
}
