use crate::{
    foundation::core::FrameIndex,
    foundation::error::{CardreelError, CardreelResult},
    layout::content::{ItemState, layout_items},
    manifest::model::Card,
    render::settings::RenderSettings,
    subtitle::resolver::{
        SubtitlePage, resolve_active_word, resolve_highlighted_word, resolve_subtitles,
    },
    timeline::sequencer::{ScenePosition, Timeline},
};

/// Which layout the presentation layer should draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Centered intro text only; the card has no items.
    Intro,
    /// Scrolling item list under the question.
    List,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Complete visual state of one scene at one scene-local frame.
pub struct FrameState {
    /// Scene-local frame this state was computed for.
    pub frame: FrameIndex,
    /// Layout variant.
    pub layout: LayoutKind,
    /// Word the subtitle track follows; `None` without subtitles.
    pub active_word_index: Option<usize>,
    /// Word drawn highlighted, if any.
    pub highlighted_word_index: Option<usize>,
    /// Visible subtitle page; `None` without subtitles and for intro layouts.
    pub page: Option<SubtitlePage>,
    /// Upward translation of the item list in pixels.
    pub scroll_offset_px: f64,
    /// One entry per content item, empty for intro layouts.
    pub items: Vec<ItemState>,
}

/// Compute the frame state of `card` at `frame`.
///
/// Pure: the result depends only on the arguments, never on previously evaluated frames.
/// A card without items is a static intro: the karaoke track still follows the narration,
/// but neither paging nor scrolling is evaluated.
pub fn compute_frame_state(card: &Card, frame: FrameIndex, settings: &RenderSettings) -> FrameState {
    let t = settings.fps.frames_to_secs(frame.0);

    if card.content.items.is_empty() {
        return FrameState {
            frame,
            layout: LayoutKind::Intro,
            active_word_index: resolve_active_word(&card.words, t),
            highlighted_word_index: resolve_highlighted_word(
                &card.words,
                t,
                settings.highlight_tolerance_secs,
            ),
            page: None,
            scroll_offset_px: 0.0,
            items: Vec::new(),
        };
    }

    let subtitles = resolve_subtitles(
        &card.words,
        t,
        settings.page_size,
        settings.highlight_tolerance_secs,
    );
    let items_layout = layout_items(&card.content.items, frame, settings);

    FrameState {
        frame,
        layout: LayoutKind::List,
        active_word_index: subtitles.map(|s| s.active_word_index),
        highlighted_word_index: subtitles.and_then(|s| s.highlighted_word_index),
        page: subtitles.map(|s| s.page),
        scroll_offset_px: items_layout.scroll_offset_px,
        items: items_layout.items,
    }
}

/// A global compilation frame resolved to its scene and evaluated.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneFrame {
    /// Frame on the global timeline.
    pub global_frame: FrameIndex,
    /// Owning scene; `None` inside the fallback range of an empty compilation.
    pub scene: Option<ScenePosition>,
    /// Scene state; `None` when there is no scene.
    pub state: Option<FrameState>,
}

/// Evaluate global frame `global` of a compilation.
///
/// `cards` must be the cards `timeline` was built from, in the same order.
#[tracing::instrument(skip(timeline, cards, settings))]
pub fn eval_compilation_frame(
    timeline: &Timeline,
    cards: &[Card],
    global: FrameIndex,
    settings: &RenderSettings,
) -> CardreelResult<SceneFrame> {
    let scene = timeline.locate(global)?;
    let state = match scene {
        Some(pos) => {
            let card = cards.get(pos.scene_index).ok_or_else(|| {
                CardreelError::evaluation(format!(
                    "timeline scene {} has no matching card",
                    pos.scene_index
                ))
            })?;
            Some(compute_frame_state(card, pos.local_frame, settings))
        }
        None => None,
    };
    Ok(SceneFrame {
        global_frame: global,
        scene,
        state,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/eval/frame.rs"]
mod tests;
