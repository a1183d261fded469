use super::*;
use crate::manifest::model::{Content, ContentItem, Word};

fn card(items: Vec<ContentItem>, words: Vec<Word>, duration: u64) -> Card {
    Card {
        id: 1,
        audio_ref: "karte_001.mp3".to_string(),
        words,
        content: Content {
            intro: "Was gehört zur Bilanz?".to_string(),
            question: "Bilanz".to_string(),
            items,
        },
        duration_in_frames: duration,
    }
}

fn list_card() -> Card {
    card(
        vec![
            ContentItem::new("1. Aktiva", 15),
            ContentItem::new("2. Passiva", 45),
            ContentItem::new("3. Eigenkapital", 75),
            ContentItem::new("4. Fremdkapital", 105),
        ],
        vec![
            Word::new("Aktiva", 0.5, 1.0),
            Word::new("Passiva", 1.5, 2.0),
            Word::new("Eigenkapital", 2.5, 3.0),
            Word::new("und", 3.1, 3.3),
            Word::new("Fremdkapital", 3.5, 4.0),
        ],
        150,
    )
}

#[test]
fn list_card_state_combines_subtitles_and_items() {
    let s = RenderSettings::default();
    // 50 frames = 1.67 s, inside "Passiva".
    let st = compute_frame_state(&list_card(), FrameIndex(50), &s);
    assert_eq!(st.layout, LayoutKind::List);
    assert_eq!(st.active_word_index, Some(1));
    assert_eq!(st.highlighted_word_index, Some(1));
    assert_eq!(
        st.page,
        Some(SubtitlePage {
            index: 0,
            start: 0,
            end: 4
        })
    );
    assert_eq!(st.items.len(), 4);
    assert_eq!(st.scroll_offset_px, 0.0);
}

#[test]
fn second_page_and_scroll_after_fourth_item() {
    let s = RenderSettings::default();
    let st = compute_frame_state(&list_card(), FrameIndex(114), &s);
    assert_eq!(st.active_word_index, Some(4));
    assert_eq!(st.page.unwrap().index, 1);
    assert_eq!(st.page.unwrap().end, 5);
    assert!(st.scroll_offset_px > 0.0);
    assert!(st.scroll_offset_px <= s.item_height_px);
}

#[test]
fn empty_items_degenerate_to_intro() {
    let s = RenderSettings::default();
    let c = card(
        vec![],
        vec![Word::new("Hallo", 0.0, 0.5), Word::new("Welt", 0.6, 1.0)],
        60,
    );
    for f in [0, 10, 59] {
        let st = compute_frame_state(&c, FrameIndex(f), &s);
        assert_eq!(st.layout, LayoutKind::Intro);
        assert!(st.items.is_empty());
        assert_eq!(st.scroll_offset_px, 0.0);
        assert_eq!(st.page, None);
    }
}

#[test]
fn intro_keeps_karaoke_track_without_paging() {
    let s = RenderSettings::default();
    let c = card(
        vec![],
        vec![Word::new("Hallo", 0.0, 0.5), Word::new("Welt", 0.6, 1.0)],
        60,
    );
    // 24 frames = 0.8 s, inside "Welt".
    let st = compute_frame_state(&c, FrameIndex(24), &s);
    assert_eq!(st.active_word_index, Some(1));
    assert_eq!(st.highlighted_word_index, Some(1));
    assert_eq!(st.page, None);
}

#[test]
fn no_words_means_no_subtitle_track() {
    let s = RenderSettings::default();
    let c = card(vec![ContentItem::new("a", 0)], vec![], 60);
    let st = compute_frame_state(&c, FrameIndex(10), &s);
    assert_eq!(st.active_word_index, None);
    assert_eq!(st.highlighted_word_index, None);
    assert_eq!(st.page, None);
}

#[test]
fn frame_state_is_idempotent_and_order_free() {
    let s = RenderSettings::default();
    let c = list_card();
    let a = serde_json::to_vec(&compute_frame_state(&c, FrameIndex(90), &s)).unwrap();
    let _ = compute_frame_state(&c, FrameIndex(3), &s);
    let _ = compute_frame_state(&c, FrameIndex(149), &s);
    let b = serde_json::to_vec(&compute_frame_state(&c, FrameIndex(90), &s)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn compilation_frames_resolve_scene_local_state() {
    let s = RenderSettings::default();
    let cards = vec![
        list_card(),
        card(vec![], vec![Word::new("Ende", 0.0, 0.3)], 60),
    ];
    let durations: Vec<u64> = cards.iter().map(|c| c.duration_in_frames).collect();
    let timeline = Timeline::new(&durations, s.fallback_total_frames).unwrap();

    let sf = eval_compilation_frame(&timeline, &cards, FrameIndex(150), &s).unwrap();
    let pos = sf.scene.unwrap();
    assert_eq!((pos.scene_index, pos.local_frame), (1, FrameIndex(0)));
    let st = sf.state.unwrap();
    assert_eq!(st.layout, LayoutKind::Intro);
    assert_eq!(st, compute_frame_state(&cards[1], FrameIndex(0), &s));

    let sf = eval_compilation_frame(&timeline, &cards, FrameIndex(149), &s).unwrap();
    assert_eq!(
        sf.state.unwrap(),
        compute_frame_state(&cards[0], FrameIndex(149), &s)
    );

    assert!(eval_compilation_frame(&timeline, &cards, FrameIndex(210), &s).is_err());
}

#[test]
fn empty_compilation_yields_blank_frames() {
    let s = RenderSettings::default();
    let timeline = Timeline::new(&[], s.fallback_total_frames).unwrap();
    let sf = eval_compilation_frame(&timeline, &[], FrameIndex(299), &s).unwrap();
    assert_eq!(sf.scene, None);
    assert_eq!(sf.state, None);
    assert!(eval_compilation_frame(&timeline, &[], FrameIndex(300), &s).is_err());
}

#[test]
fn mismatched_cards_are_an_evaluation_error() {
    let s = RenderSettings::default();
    let timeline = Timeline::new(&[10, 10], s.fallback_total_frames).unwrap();
    let cards = vec![list_card()];
    let err = eval_compilation_frame(&timeline, &cards, FrameIndex(15), &s).unwrap_err();
    assert!(matches!(err, CardreelError::Evaluation(_)));
}
