use std::collections::HashSet;
use std::fmt;

use crate::ast::*;

/// Validation finding for malformed or missing references in a StoryFile.
///
/// Findings are advisory: the parser is deliberately tolerant and the engine
/// degrades gracefully, so these exist for authoring tools, not load gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a StoryFile.
///
/// Checks for duplicate scene/dialogue/trigger/puzzle ids, goto targets that
/// name neither a dialogue nor a scene nor `END`, trigger transitions to
/// undeclared scenes, and `AT()` conditions naming undeclared scenes.
pub fn validate_story(story: &StoryFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut scenes = HashSet::new();
    let mut dialogues = HashSet::new();
    let mut triggers = HashSet::new();
    let mut puzzles = HashSet::new();

    track_ids("scene", story.scenes.iter().map(|s| s.id.as_str()), &mut scenes, &mut errors);
    track_ids(
        "dialogue",
        story.dialogues.iter().map(|d| d.id.as_str()),
        &mut dialogues,
        &mut errors,
    );
    track_ids(
        "trigger",
        story.triggers.iter().map(|t| t.id.as_str()),
        &mut triggers,
        &mut errors,
    );
    track_ids("puzzle", story.puzzles.iter().map(|p| p.id.as_str()), &mut puzzles, &mut errors);

    let check = |errors: &mut Vec<ValidationError>, ctx: &str, stmts: &[Statement]| {
        walk_statements(stmts, &mut |stmt| {
            if let Statement::Goto { target } = stmt {
                if target != GOTO_END && !dialogues.contains(target.as_str()) && !scenes.contains(target.as_str()) {
                    errors.push(ValidationError::MissingReference {
                        kind: "goto target",
                        id: target.clone(),
                        context: ctx.to_string(),
                    });
                }
            }
        });
        walk_conditions_in(stmts, &mut |cond| {
            if let Condition::At { scene } = cond {
                if !scenes.contains(scene.as_str()) {
                    errors.push(ValidationError::MissingReference {
                        kind: "scene",
                        id: scene.clone(),
                        context: format!("AT() in {ctx}"),
                    });
                }
            }
        });
    };

    for scene in &story.scenes {
        for hotspot in &scene.hotspots {
            for verb in [Verb::Look, Verb::Talk, Verb::Use] {
                if let Some(block) = hotspot.block(verb) {
                    check(&mut errors, &format!("{} {} in scene {}", verb, hotspot.id, scene.id), block);
                }
            }
        }
    }
    for dialogue in &story.dialogues {
        check(&mut errors, &format!("dialogue {}", dialogue.id), &dialogue.body);
    }
    for trigger in &story.triggers {
        if let Some(target) = &trigger.goto {
            if !scenes.contains(target.as_str()) {
                errors.push(ValidationError::MissingReference {
                    kind: "scene",
                    id: target.clone(),
                    context: format!("trigger {}", trigger.id),
                });
            }
        }
        for cond in &trigger.requires {
            walk_condition(cond, &mut |c| {
                if let Condition::At { scene } = c {
                    if !scenes.contains(scene.as_str()) {
                        errors.push(ValidationError::MissingReference {
                            kind: "scene",
                            id: scene.clone(),
                            context: format!("trigger {}", trigger.id),
                        });
                    }
                }
            });
        }
    }

    errors
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    seen: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::DuplicateId { kind, id: id.to_string() });
        }
    }
}

/// Depth-first statement walk including choice and conditional bodies.
fn walk_statements(stmts: &[Statement], f: &mut impl FnMut(&Statement)) {
    for stmt in stmts {
        f(stmt);
        match stmt {
            Statement::Choice { options } => {
                for opt in options {
                    walk_statements(&opt.body, f);
                }
            },
            Statement::If { branches, else_body } => {
                for branch in branches {
                    walk_statements(&branch.body, f);
                }
                if let Some(body) = else_body {
                    walk_statements(body, f);
                }
            },
            _ => {},
        }
    }
}

fn walk_conditions_in(stmts: &[Statement], f: &mut impl FnMut(&Condition)) {
    walk_statements(stmts, &mut |stmt| match stmt {
        Statement::Choice { options } => {
            for opt in options {
                if let Some(cond) = &opt.condition {
                    walk_condition(cond, f);
                }
            }
        },
        Statement::If { branches, .. } => {
            for branch in branches {
                walk_condition(&branch.condition, f);
            }
        },
        _ => {},
    });
}

fn walk_condition(cond: &Condition, f: &mut impl FnMut(&Condition)) {
    f(cond);
    match cond {
        Condition::Not { inner } => walk_condition(inner, f),
        Condition::And { left, right } | Condition::Or { left, right } => {
            walk_condition(left, f);
            walk_condition(right, f);
        },
        _ => {},
    }
}
