use storyscript_data::{After, CmpOp, Condition, Statement, Value};
use storyscript_lang::parse;

const STORY: &str = r#"GAME "Midnight Bus"
  author: "R. Finch"

CHARACTERS
  KAT: "Kat"
  DRIVER: "The Driver"

INVENTORY
  ticket
  key

SCENE bus_station
  mood: "quiet"
  DESCRIPTION
    "The station is empty at this hour."
    KAT: "We're late."
    KAT (thinks): "Something is wrong."
  ON_ENTER
    "Fluorescent light hums overhead."
  HOTSPOT chest "Old Chest" [10, 20, 30, 40]
    LOOK
      "A sturdy chest."
    USE
      IF HAS(key)
        "You unlock the chest."
        GIVE gold
      ELSE
        "The chest is locked."

SCENE hallway
  DESCRIPTION
    "A long hallway."

DIALOGUE meet_kat
  KAT: "You made it."
  CHOICE
    > "Who are you?"
      SET met_kat = true
      KAT: "A friend."
    > [Leave]
      -> END

TRIGGER escape
  REQUIRE HAS(key) AND AT(hallway)
  AFTER turns > 3
  CUTSCENE
    "You slip through the door."
  -> bus_station

PUZZLE safe_code
  SOLUTION "1879"
    GIVE deed
  HINTS
    "The founding year is carved above the door."

ACT_END
  "The bus pulls away."
  STATE_CHECK
    REQUIRE met_kat = true
    TRACK turns
"#;

#[test]
fn full_story_parses() {
    let story = parse(STORY).expect("parse ok");
    assert_eq!(story.game.as_ref().map(|g| g.title.as_str()), Some("Midnight Bus"));
    assert_eq!(story.game.as_ref().unwrap().props.get("author").map(String::as_str), Some("R. Finch"));
    assert_eq!(story.characters.get("KAT").map(String::as_str), Some("Kat"));
    assert_eq!(story.inventory, vec!["ticket".to_string(), "key".to_string()]);
    assert_eq!(story.scenes.len(), 2);
    assert_eq!(story.dialogues.len(), 1);
    assert_eq!(story.triggers.len(), 1);
    assert_eq!(story.puzzles.len(), 1);
    assert!(story.act_end.is_some());
}

#[test]
fn scene_description_and_speaker_modes() {
    let story = parse(STORY).expect("parse ok");
    let scene = story.scene("bus_station").expect("scene");
    assert_eq!(scene.props.get("mood").map(String::as_str), Some("quiet"));
    let desc = scene.description.as_ref().expect("description");
    assert_eq!(desc.len(), 3);
    assert_eq!(desc[0].speaker, None);
    assert_eq!(desc[1].speaker.as_deref(), Some("KAT"));
    assert!(!desc[1].thought);
    assert!(desc[2].thought);
    assert_eq!(desc[2].text, "Something is wrong.");
    assert_eq!(scene.on_enter.as_ref().map(Vec::len), Some(1));
}

#[test]
fn hotspot_header_decorations() {
    let story = parse(STORY).expect("parse ok");
    let scene = story.scene("bus_station").expect("scene");
    let chest = &scene.hotspots[0];
    assert_eq!(chest.id, "chest");
    assert_eq!(chest.name.as_deref(), Some("Old Chest"));
    assert_eq!(chest.bounds, Some([10.0, 20.0, 30.0, 40.0]));
    assert!(chest.look.is_some());
    assert!(chest.talk.is_none());
    assert!(chest.use_action.is_some());
}

#[test]
fn conditional_block_shape() {
    let story = parse(STORY).expect("parse ok");
    let scene = story.scene("bus_station").expect("scene");
    let use_block = scene.hotspots[0].use_action.as_ref().expect("use block");
    let Statement::If { branches, else_body } = &use_block[0] else {
        panic!("expected If, got {:?}", use_block[0]);
    };
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].condition, Condition::Has { item: "key".into() });
    assert_eq!(branches[0].body.len(), 2);
    assert!(matches!(&branches[0].body[1], Statement::Give { item } if item == "gold"));
    let else_body = else_body.as_ref().expect("else branch");
    assert!(matches!(&else_body[0], Statement::Narrative { text } if text.contains("locked")));
}

#[test]
fn choice_options_and_goto_end() {
    let story = parse(STORY).expect("parse ok");
    let dialogue = story.dialogue("meet_kat").expect("dialogue");
    let Statement::Choice { options } = &dialogue.body[1] else {
        panic!("expected Choice, got {:?}", dialogue.body[1]);
    };
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].text, "Who are you?");
    assert!(matches!(
        &options[0].body[0],
        Statement::SetFlag { flag, value: Value::Bool(true) } if flag == "met_kat"
    ));
    assert_eq!(options[1].text, "Leave");
    assert!(matches!(&options[1].body[0], Statement::Goto { target } if target == "END"));
}

#[test]
fn trigger_requirements_after_and_goto() {
    let story = parse(STORY).expect("parse ok");
    let trigger = &story.triggers[0];
    assert_eq!(trigger.id, "escape");
    assert_eq!(trigger.requires.len(), 1);
    assert!(matches!(&trigger.requires[0], Condition::And { .. }));
    assert_eq!(
        trigger.after,
        Some(After::Threshold {
            flag: "turns".into(),
            op: CmpOp::Gt,
            value: 3.0,
        })
    );
    assert_eq!(trigger.goto.as_deref(), Some("bus_station"));
    assert_eq!(trigger.cutscene.as_ref().map(Vec::len), Some(1));
}

#[test]
fn elapsed_after_clause_is_kept_raw() {
    let src = "TRIGGER nightfall\n  AFTER 5 minutes\n";
    let story = parse(src).expect("parse ok");
    assert!(matches!(
        &story.triggers[0].after,
        Some(After::Elapsed { raw }) if raw.contains("minutes")
    ));
}

#[test]
fn puzzle_and_act_end() {
    let story = parse(STORY).expect("parse ok");
    let puzzle = &story.puzzles[0];
    assert_eq!(puzzle.solution.as_deref(), Some("1879"));
    assert!(matches!(&puzzle.on_solve[0], Statement::Give { item } if item == "deed"));
    assert_eq!(puzzle.hints.len(), 1);

    let act_end = story.act_end.as_ref().expect("act end");
    assert_eq!(act_end.text.len(), 1);
    let check = act_end.state_check.as_ref().expect("state check");
    assert_eq!(check.requires.len(), 1);
    assert_eq!(check.track, vec!["turns".to_string()]);
}

#[test]
fn condition_precedence_or_binds_loosest() {
    // a AND b OR c parses as (a AND b) OR c
    let src = "TRIGGER t\n  REQUIRE HAS(a) AND HAS(b) OR HAS(c)\n";
    let story = parse(src).expect("parse ok");
    let Condition::Or { left, .. } = &story.triggers[0].requires[0] else {
        panic!("expected Or at the top");
    };
    assert!(matches!(**left, Condition::And { .. }));
}

#[test]
fn comparison_and_truthy_conditions() {
    let src = "TRIGGER t\n  REQUIRE NOT met_kat AND coins >= 2.5 AND mood != \"sour\"\n";
    let story = parse(src).expect("parse ok");
    let mut found_not = false;
    let mut found_ge = false;
    let mut found_ne = false;
    let mut stack = vec![&story.triggers[0].requires[0]];
    while let Some(cond) = stack.pop() {
        match cond {
            Condition::Not { inner } => {
                found_not = matches!(**inner, Condition::Truthy { .. });
            },
            Condition::Compare { op: CmpOp::Ge, value, .. } => {
                found_ge = *value == Value::Num(2.5);
            },
            Condition::Compare { op: CmpOp::Ne, value, .. } => {
                found_ne = *value == Value::Str("sour".into());
            },
            Condition::And { left, right } | Condition::Or { left, right } => {
                stack.push(left);
                stack.push(right);
            },
            _ => {},
        }
    }
    assert!(found_not && found_ge && found_ne);
}

#[test]
fn examine_statement_parses() {
    let src = "SCENE cell\n  HOTSPOT desk \"Desk\"\n    USE\n      EXAMINE desk\n      \"Dust everywhere.\"\n";
    let story = parse(src).expect("parse ok");
    let block = story.scenes[0].hotspots[0].use_action.as_ref().expect("use block");
    assert!(matches!(&block[0], Statement::Examine { target } if target == "desk"));
    assert!(matches!(&block[1], Statement::Narrative { .. }));
}

#[test]
fn trailing_end_keywords_are_tolerated() {
    let src = "SCENE a\n  DESCRIPTION\n    \"Text.\"\nEND\n\nSCENE b\nEND\n";
    let story = parse(src).expect("parse ok");
    assert_eq!(story.scenes.len(), 2);
}
