//! End-to-end play scenarios driven through the public interpreter surface.

use storyscript_data::Value;
use storyscript_engine::{Interpreter, RuntimeError};
use storyscript_lang::parse;

const CHEST_STORY: &str = r#"SCENE cell
  HOTSPOT chest "Old Chest"
    LOOK
      "A sturdy chest, banded with iron."
    USE
      IF HAS(key)
        "You unlock the chest."
        GIVE gold
      ELSE
        "The chest is locked."
  HOTSPOT window "Barred Window"
    LOOK
      "Moonlight through iron bars."

SCENE hallway
  DESCRIPTION
    "A long hallway."

TRIGGER escape
  REQUIRE HAS(key) AND AT(hallway)
  CUTSCENE
    "You slip through the door."
  -> cell
"#;

#[test]
fn chest_stays_locked_without_the_key() {
    let story = parse(CHEST_STORY).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    let out = interp.take_action("USE", "chest");
    assert!(out.success);
    assert!(out.lines.iter().any(|l| l.contains("locked")));
    assert!(out.items_given.is_empty());
    assert!(!interp.has_item("gold"));
}

#[test]
fn chest_opens_with_the_key() {
    let story = parse(CHEST_STORY).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    interp.give_item("key");
    let out = interp.take_action("USE", "chest");
    assert!(out.lines.iter().any(|l| l.contains("unlock")));
    assert_eq!(out.items_given, vec!["gold".to_string()]);
    assert!(interp.has_item("gold"));
}

#[test]
fn action_target_resolution_order() {
    let story = parse(CHEST_STORY).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    // exact id
    assert!(interp.take_action("LOOK", "chest").success);
    // exact display name
    assert!(interp.take_action("LOOK", "Old Chest").success);
    // case-insensitive substring of display name
    let out = interp.take_action("LOOK", "window");
    assert!(out.lines[0].contains("Moonlight"));
    let out = interp.take_action("LOOK", "barred");
    assert!(out.lines[0].contains("Moonlight"));
}

#[test]
fn unresolved_target_fails_without_state_change() {
    let story = parse(CHEST_STORY).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    let before = interp.get_state().clone();
    let out = interp.take_action("USE", "dragon");
    assert!(!out.success);
    assert!(out.lines[0].contains("dragon"));
    assert_eq!(interp.get_state(), &before);

    // hotspot exists but has no TALK block
    let out = interp.take_action("TALK", "chest");
    assert!(!out.success);
    assert_eq!(interp.get_state(), &before);
}

#[test]
fn available_actions_list_populated_verbs_only() {
    let story = parse(CHEST_STORY).expect("parse ok");
    let interp = Interpreter::new(&story, None).expect("new ok");
    let actions = interp.get_available_actions();
    let summary: Vec<String> = actions.iter().map(|a| format!("{} {}", a.verb, a.hotspot)).collect();
    assert_eq!(summary, vec!["LOOK chest", "USE chest", "LOOK window"]);
    assert_eq!(actions[0].name, "Old Chest");
}

#[test]
fn examine_reruns_the_look_block() {
    let src = r#"SCENE cell
  HOTSPOT mirror "Cracked Mirror"
    LOOK
      "Your reflection stares back."
    USE
      EXAMINE mirror
      EXAMINE ceiling
"#;
    let story = parse(src).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    let out = interp.take_action("USE", "mirror");
    assert_eq!(
        out.lines,
        vec![
            "Your reflection stares back.".to_string(),
            "You see nothing special about the ceiling.".to_string(),
        ]
    );
}

#[test]
fn escape_trigger_scenario() {
    let story = parse(CHEST_STORY).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    assert!(interp.check_triggers().is_empty());

    interp.transition("hallway").expect("transition ok");
    assert!(interp.check_triggers().is_empty());

    interp.give_item("key");
    let hits = interp.check_triggers();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "escape");
    assert_eq!(hits[0].cutscene, vec!["You slip through the door.".to_string()]);
    assert_eq!(hits[0].goto.as_deref(), Some("cell"));
}

const DIALOGUE_STORY: &str = r#"SCENE bus_station
  DESCRIPTION
    "The station."

DIALOGUE meet_kat
  KAT: "You made it."
  CHOICE
    > "Who are you?"
      SET met_kat = true
      -> kat_intro
    > "Option 2"
      SET counter = 5
    > "Secret option" IF HAS(badge)
      KAT: "How did you get that?"

DIALOGUE kat_intro
  KAT: "A friend. Come on."
  -> hallway
"#;

#[test]
fn dialogue_pauses_at_choices() {
    let story = parse(DIALOGUE_STORY).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    let out = interp.enter_dialogue("meet_kat").expect("enter ok");
    assert!(interp.is_in_dialogue());
    assert_eq!(out.lines, vec!["KAT: \"You made it.\"".to_string()]);
    // gated third option is hidden without the badge
    assert_eq!(
        out.choices,
        Some(vec!["Who are you?".to_string(), "Option 2".to_string()])
    );
    assert_eq!(interp.get_choices(), out.choices);
}

#[test]
fn gated_choice_appears_once_condition_holds() {
    let story = parse(DIALOGUE_STORY).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    interp.give_item("badge");
    let out = interp.enter_dialogue("meet_kat").expect("enter ok");
    assert_eq!(out.choices.map(|c| c.len()), Some(3));
}

#[test]
fn selecting_a_choice_runs_its_body() {
    let story = parse(DIALOGUE_STORY).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    interp.enter_dialogue("meet_kat").expect("enter ok");
    let out = interp.select_choice(1).expect("select ok");
    assert_eq!(interp.get_flag("counter"), Some(&Value::Num(5.0)));
    assert!(out.flags_set.iter().any(|(name, _)| name == "counter"));
    // the pending set is consumed
    assert_eq!(interp.get_choices(), None);
}

#[test]
fn out_of_range_choice_mutates_nothing() {
    let story = parse(DIALOGUE_STORY).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    interp.enter_dialogue("meet_kat").expect("enter ok");
    let before = interp.get_state().clone();
    assert!(matches!(
        interp.select_choice(7),
        Err(RuntimeError::ChoiceOutOfRange { index: 7, len: 2 })
    ));
    assert_eq!(interp.get_state(), &before);
    // the pending set survives a bad index
    assert_eq!(interp.get_choices().map(|c| c.len()), Some(2));
}

#[test]
fn select_without_pending_choices_is_an_error() {
    let story = parse(DIALOGUE_STORY).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    assert!(matches!(
        interp.select_choice(0),
        Err(RuntimeError::NoPendingChoices)
    ));
}

#[test]
fn exit_dialogue_pops_and_clears_pending() {
    let story = parse(DIALOGUE_STORY).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    interp.enter_dialogue("meet_kat").expect("enter ok");
    assert!(interp.is_in_dialogue());
    assert!(interp.get_choices().is_some());
    interp.exit_dialogue();
    assert!(!interp.is_in_dialogue());
    assert_eq!(interp.get_choices(), None);
    assert!(matches!(
        interp.select_choice(0),
        Err(RuntimeError::NoPendingChoices)
    ));
}

#[test]
fn goto_dialogue_executes_inline_and_propagates_goto() {
    let story = parse(DIALOGUE_STORY).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    interp.enter_dialogue("meet_kat").expect("enter ok");
    let out = interp.select_choice(0).expect("select ok");
    // kat_intro's line is merged in declaration order after the SET
    assert_eq!(out.lines, vec!["KAT: \"A friend. Come on.\"".to_string()]);
    assert_eq!(interp.get_flag("met_kat"), Some(&Value::Bool(true)));
    // kat_intro's own goto surfaces; "hallway" is no dialogue, so it is a
    // scene-transition request for the caller
    assert_eq!(out.goto.as_deref(), Some("hallway"));
    // interpreter did not transition on its own
    assert_eq!(interp.current_scene(), "bus_station");
}

#[test]
fn goto_end_closes_the_dialogue() {
    let src = "SCENE a\n  DESCRIPTION\n    \"x\"\n\nDIALOGUE bye\n  KAT: \"See you.\"\n  -> END\n";
    let story = parse(src).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    interp.enter_dialogue("bye").expect("enter ok");
    assert!(!interp.is_in_dialogue());
}

#[test]
fn unknown_dialogue_is_an_error() {
    let story = parse(DIALOGUE_STORY).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    assert!(matches!(
        interp.enter_dialogue("ghost"),
        Err(RuntimeError::UnknownDialogue(_))
    ));
}

#[test]
fn nested_choice_replaces_pending_set() {
    let src = r#"SCENE a
  DESCRIPTION
    "x"

DIALOGUE nested
  CHOICE
    > "Outer"
      CHOICE
        > "Inner one"
          SET inner = 1
        > "Inner two"
          SET inner = 2
"#;
    let story = parse(src).expect("parse ok");
    let mut interp = Interpreter::new(&story, None).expect("new ok");
    let out = interp.enter_dialogue("nested").expect("enter ok");
    assert_eq!(out.choices.map(|c| c.len()), Some(1));
    let out = interp.select_choice(0).expect("select ok");
    assert_eq!(
        out.choices,
        Some(vec!["Inner one".to_string(), "Inner two".to_string()])
    );
    interp.select_choice(1).expect("select inner ok");
    assert_eq!(interp.get_flag("inner"), Some(&Value::Num(2.0)));
}

#[test]
fn replaying_the_same_calls_is_deterministic() {
    let story = parse(DIALOGUE_STORY).expect("parse ok");
    let run = || {
        let mut interp = Interpreter::new(&story, None).expect("new ok");
        let mut transcript = Vec::new();
        transcript.extend(interp.enter_dialogue("meet_kat").expect("enter ok").lines);
        transcript.extend(interp.select_choice(0).expect("select ok").lines);
        (transcript, interp.serialize().expect("serialize ok"))
    };
    assert_eq!(run(), run());
}
