use std::fs;

use scriptor_common::tagmap::TagMap;
use scriptor_core::converter::{
    COMBINED_FILE_NAME, DiscussionConverter, parse_fname, write_combined,
};
use scriptor_core::rtf::color_table::ColorTable;
use scriptor_core::rtf::read_rtf;
use scriptor_core::script::extract_script;

use crate::fixtures::{copy_discussions, fixture_dir};

#[test]
fn parse_fname_of_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let (megan, tamara) = copy_discussions(dir.path()).unwrap();

    assert_eq!(
        parse_fname(&megan).unwrap(),
        ("Megan".to_string(), "denial".to_string())
    );
    assert_eq!(
        parse_fname(&tamara).unwrap(),
        ("Tamara".to_string(), "denial".to_string())
    );
}

#[test]
fn fixture_color_tables() {
    let megan = ColorTable::parse(&read_rtf(fixture_dir().join("meganDenial.rtf")).unwrap()).unwrap();
    let tamara = ColorTable::parse(&read_rtf(fixture_dir().join("tamaraDenial.rtf")).unwrap()).unwrap();

    assert_eq!(megan.len(), 5);
    assert_eq!(tamara.len(), 6);
    assert_eq!(megan.get(2), tamara.get(2));
    assert_eq!(megan.get(4), tamara.get(4));
}

#[test]
fn megan_script_alternates_roles() {
    let rtf = read_rtf(fixture_dir().join("meganDenial.rtf")).unwrap();
    let script = extract_script(&rtf, &TagMap::default_discussion(), true).unwrap();

    let roles: Vec<&str> = script.turns.iter().map(|t| t.role.as_str()).collect();
    assert_eq!(roles, vec!["Expert", "AI", "Expert"]);

    assert!(script.turns[0].text.starts_with("You believe this would be confrontational."));
    assert!(script.turns[0].text.ends_with("I am inviting her."));
    assert!(script.turns[1].text.contains("it’s great that you’re thinking critically"));
    assert!(script.turns[2].text.starts_with("I think you may be misunderstanding"));

    for turn in &script.turns {
        assert!(!turn.text.contains('\\'), "control word leaked into {turn:?}");
        assert_eq!(turn.text, turn.text.trim());
    }
}

#[test]
fn tamara_script_keeps_paragraphs_inside_turns() {
    let rtf = read_rtf(fixture_dir().join("tamaraDenial.rtf")).unwrap();
    let script = extract_script(&rtf, &TagMap::default_discussion(), true).unwrap();

    let roles: Vec<&str> = script.turns.iter().map(|t| t.role.as_str()).collect();
    assert_eq!(roles, vec!["Expert", "AI", "Expert", "AI", "Expert"]);
    assert!(script.turns[0].text.starts_with("I wonder what risks"));
    assert!(script.turns[2].text.starts_with("That's why I would ask"));
    assert!(script.turns[4].text.starts_with("Yes. Another option"));
    assert!(script.turns[4].text.ends_with("help feel better?"));
}

#[test]
fn convert_directory_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let rtf_dir = dir.path().join("RtfDir");
    let jsonl_dir = dir.path().join("JsonlDir");
    fs::create_dir(&rtf_dir).unwrap();
    copy_discussions(&rtf_dir).unwrap();

    let converter = DiscussionConverter::new(&rtf_dir, &jsonl_dir, TagMap::default_discussion(), true);
    let report = converter.convert_all(|_, ok| assert!(ok)).unwrap();
    assert_eq!(report.converted.len(), 2);
    assert!(report.failed.is_empty());

    let megan_jsonl = fs::read_to_string(jsonl_dir.join("meganDenial.jsonl")).unwrap();
    assert_eq!(megan_jsonl.lines().count(), 3);

    let discussions = converter.combine().unwrap();
    let outfile = jsonl_dir.join(COMBINED_FILE_NAME);
    write_combined(&discussions, &outfile).unwrap();

    let combined: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&outfile).unwrap()).unwrap();
    let entries = combined.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0]["clientName"], "Megan");
    assert_eq!(entries[0]["defense"], "denial");
    assert_eq!(entries[0]["conversation"].as_array().unwrap().len(), 3);
    assert!(entries[0]["conversation"][1]["AI"].is_string());

    assert_eq!(entries[1]["clientName"], "Tamara");
    assert_eq!(entries[1]["conversation"].as_array().unwrap().len(), 5);
    assert!(entries[1]["conversation"][0]["Expert"]
        .as_str()
        .unwrap()
        .starts_with("I wonder"));
}

#[test]
fn custom_tags_rename_roles() {
    let dir = tempfile::tempdir().unwrap();
    copy_discussions(dir.path()).unwrap();

    let tagmap = TagMap::from_assignments(&["RGB(74,21,148)=Therapist", "#0b5da2=Coach"]).unwrap();
    let converter = DiscussionConverter::new(dir.path(), dir.path().join("out"), tagmap, true);
    converter.convert_all(|_, _| {}).unwrap();

    let discussions = converter.combine().unwrap();
    assert!(discussions
        .iter()
        .flat_map(|d| &d.conversation)
        .all(|turn| turn.role == "Therapist" || turn.role == "Coach"));
}
