pub(crate) mod align;
pub(crate) mod parse;

use crate::{
    foundation::core::Fps,
    manifest::model::{Card, Content, Word},
    timeline::duration::scene_duration_frames,
};

/// Raw inputs for one card before planning.
#[derive(Clone, Debug)]
pub struct CardDraft {
    pub id: u64,
    pub audio_ref: String,
    pub question: String,
    /// Answer text as exported (may contain `<br>` line breaks).
    pub answer: String,
    /// Transcribed narration.
    pub words: Vec<Word>,
    /// Narration length in seconds.
    pub audio_secs: f64,
    /// Frames appended after the narration.
    pub tail_frames: u64,
}

/// Turn a draft into a renderable card: parse the answer, align items to the
/// narration and size the scene.
pub fn plan_card(draft: CardDraft, fps: Fps) -> Card {
    let parsed = parse::parse_flashcard(&draft.question, &draft.answer);
    let items = align::align_items(&parsed.items, &draft.words, fps);
    Card {
        id: draft.id,
        audio_ref: draft.audio_ref,
        duration_in_frames: scene_duration_frames(draft.audio_secs, fps, draft.tail_frames),
        words: draft.words,
        content: Content {
            intro: parsed.intro,
            question: parsed.question,
            items,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/planning/plan.rs"]
mod tests;
