//! Stability of the parse-to-JSON node-type tags.

use storyscript_lang::{parse, story_to_json, story_to_json_string};

#[test]
fn statement_and_condition_tags_are_stable() {
    let src = r#"SCENE cell
  HOTSPOT chest "Old Chest"
    USE
      IF HAS(key)
        "You unlock the chest."
        GIVE gold
        SET opened = true
      ELSE
        "The chest is locked."

DIALOGUE guard
  GUARD: "Halt."
  -> END
"#;
    let story = parse(src).expect("parse ok");
    let json = story_to_json(&story).expect("json ok");

    let use_block = &json["scenes"][0]["hotspots"][0]["use"];
    assert_eq!(use_block[0]["type"], "if");
    let branch = &use_block[0]["branches"][0];
    assert_eq!(branch["condition"]["type"], "has");
    assert_eq!(branch["condition"]["item"], "key");
    assert_eq!(branch["body"][0]["type"], "narrative");
    assert_eq!(branch["body"][1]["type"], "give");
    assert_eq!(branch["body"][2]["type"], "set_flag");
    assert_eq!(branch["body"][2]["value"]["bool"], true);
    assert_eq!(use_block[0]["else_body"][0]["type"], "narrative");

    let dialogue = &json["dialogues"][0];
    assert_eq!(dialogue["id"], "guard");
    assert_eq!(dialogue["body"][0]["type"], "spoken");
    assert_eq!(dialogue["body"][0]["speaker"], "GUARD");
    assert_eq!(dialogue["body"][1]["type"], "goto");
    assert_eq!(dialogue["body"][1]["target"], "END");
}

#[test]
fn pretty_string_matches_the_value_form() {
    let src = "SCENE a\n  DESCRIPTION\n    \"Text.\"\n";
    let story = parse(src).expect("parse ok");
    let pretty = story_to_json_string(&story).expect("to string");
    assert!(pretty.contains('\n'));
    let reparsed: serde_json::Value = serde_json::from_str(&pretty).expect("valid json");
    assert_eq!(reparsed, story_to_json(&story).expect("to json"));
}

#[test]
fn json_round_trips_through_serde() {
    let src = "SCENE a\n  DESCRIPTION\n    \"Text.\"\nTRIGGER t\n  REQUIRE HAS(x) OR NOT AT(a)\n";
    let story = parse(src).expect("parse ok");
    let json = story_to_json(&story).expect("to json");
    let back: storyscript_data::StoryFile = serde_json::from_value(json.clone()).expect("from json");
    let again = story_to_json(&back).expect("to json again");
    assert_eq!(json, again);
}
