use super::*;

fn card(words: Vec<Word>, items: Vec<ContentItem>) -> Card {
    Card {
        id: 1,
        audio_ref: "karte_001.mp3".to_string(),
        words,
        content: Content {
            intro: "intro".to_string(),
            question: "q?".to_string(),
            items,
        },
        duration_in_frames: 90,
    }
}

#[test]
fn single_card_json_uses_pipeline_field_names() {
    let json = r#"{
        "audioUrl": "a.mp3",
        "subtitles": [{"word": "Hallo", "start": 0.0, "end": 0.4}],
        "content": {"question": "Q", "intro": "I", "items": [{"text": "1. x", "startFrame": 12}]},
        "durationInFrames": 120
    }"#;
    let m = Manifest::from_json_str(json).unwrap();
    let Manifest::Single(card) = &m else {
        panic!("expected single card manifest");
    };
    assert_eq!(card.id, 0);
    assert_eq!(card.words[0].text, "Hallo");
    assert_eq!(card.content.items[0].start_frame, 12);
    assert!(card.content.items[0].found);
    assert_eq!(m.into_compilation().cards.len(), 1);
}

#[test]
fn compilation_json_keeps_card_order() {
    let json = r#"{
        "type": "compilation",
        "cards": [
            {"id": 1, "audioUrl": "a.mp3", "subtitles": [], "content": {"question": "", "intro": "", "items": []}, "durationInFrames": 90},
            {"id": 2, "audioUrl": "b.mp3", "subtitles": [], "content": {"question": "", "intro": "", "items": []}, "durationInFrames": 150}
        ]
    }"#;
    let comp = Manifest::from_json_str(json).unwrap().into_compilation();
    assert_eq!(comp.durations(), vec![90, 150]);
    assert_eq!(comp.cards[1].audio_ref, "b.mp3");
    comp.validate().unwrap();
}

#[test]
fn word_accepts_text_alias() {
    let w: Word = serde_json::from_str(r#"{"text": "x", "start": 1, "end": 2}"#).unwrap();
    assert_eq!(w, Word::new("x", 1.0, 2.0));
}

#[test]
fn malformed_json_is_serde_error() {
    let err = Manifest::from_json_str("{").unwrap_err();
    assert!(matches!(err, CardreelError::Serde(_)));
}

#[test]
fn validate_rejects_unsorted_words() {
    let c = card(
        vec![Word::new("b", 1.0, 1.5), Word::new("a", 0.5, 0.9)],
        vec![],
    );
    assert!(c.validate().is_err());
}

#[test]
fn validate_rejects_inverted_word() {
    let c = card(vec![Word::new("a", 1.0, 0.5)], vec![]);
    assert!(c.validate().is_err());
    let c = card(vec![Word::new("a", f64::NAN, 0.5)], vec![]);
    assert!(c.validate().is_err());
}

#[test]
fn validate_rejects_unsorted_items_and_zero_duration() {
    let c = card(
        vec![],
        vec![ContentItem::new("a", 30), ContentItem::new("b", 10)],
    );
    assert!(c.validate().is_err());

    let mut c = card(vec![], vec![]);
    c.duration_in_frames = 0;
    assert!(c.validate().is_err());
}

#[test]
fn validate_accepts_touching_words_and_equal_item_frames() {
    let c = card(
        vec![Word::new("a", 0.0, 0.5), Word::new("b", 0.5, 0.5)],
        vec![ContentItem::new("a", 10), ContentItem::new("b", 10)],
    );
    c.validate().unwrap();
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = Manifest::from_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn malformed_card_in_compilation_names_the_field() {
    let json = r#"{
        "type": "compilation",
        "cards": [
            {"id": 1, "audioUrl": "a.mp3", "content": {}, "durationInFrames": 90},
            {"id": 2, "audioUrl": "b.mp3", "content": {}}
        ]
    }"#;
    let err = Manifest::from_json_str(json).unwrap_err();
    assert!(matches!(err, CardreelError::Serde(_)));
    let msg = err.to_string();
    assert!(msg.contains("durationInFrames"), "{msg}");
    assert!(!msg.contains("untagged"), "{msg}");
}

#[test]
fn unknown_document_type_is_rejected() {
    let err = Manifest::from_json_str(r#"{"type": "playlist", "cards": []}"#).unwrap_err();
    assert!(err.to_string().contains("playlist"), "{err}");
}

#[test]
fn malformed_single_card_names_the_field() {
    let err = Manifest::from_json_str(r#"{"content": {}, "durationInFrames": 30}"#).unwrap_err();
    assert!(err.to_string().contains("audioUrl"), "{err}");
}
