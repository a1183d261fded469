use crate::{
    animation::spring::spring_progress,
    foundation::core::FrameIndex,
    manifest::model::ContentItem,
    render::settings::RenderSettings,
};

/// Where an item sits relative to the frame being evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemPhase {
    /// Not yet revealed.
    Future,
    /// The most recently revealed item.
    Current,
    /// Revealed earlier and since superseded.
    Past,
}

/// Visual state of one content item.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ItemState {
    pub phase: ItemPhase,
    pub opacity: f64,
    pub scale: f64,
    /// Drawn with emphasized weight.
    pub highlighted: bool,
}

impl ItemState {
    const HIDDEN: Self = Self {
        phase: ItemPhase::Future,
        opacity: 0.0,
        scale: 0.0,
        highlighted: false,
    };
}

/// Per-item states plus the translation applied to the whole list.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsLayout {
    pub items: Vec<ItemState>,
    pub scroll_offset_px: f64,
}

/// Phase of `items[idx]` at `frame`, or `None` if `idx` is out of range.
///
/// Items must be sorted by start frame.
pub fn item_phase(items: &[ContentItem], idx: usize, frame: FrameIndex) -> Option<ItemPhase> {
    let item = items.get(idx)?;
    Some(phase_of(item, items.get(idx + 1), frame))
}

fn phase_of(item: &ContentItem, next: Option<&ContentItem>, frame: FrameIndex) -> ItemPhase {
    if frame.0 < item.start_frame {
        return ItemPhase::Future;
    }
    match next {
        Some(next) if frame.0 >= next.start_frame => ItemPhase::Past,
        _ => ItemPhase::Current,
    }
}

/// Lay out all items for `frame`.
pub fn layout_items(
    items: &[ContentItem],
    frame: FrameIndex,
    settings: &RenderSettings,
) -> ItemsLayout {
    let states = items
        .iter()
        .enumerate()
        .map(|(idx, item)| match phase_of(item, items.get(idx + 1), frame) {
            ItemPhase::Future => ItemState::HIDDEN,
            ItemPhase::Current => ItemState {
                phase: ItemPhase::Current,
                opacity: 1.0,
                scale: spring_progress(
                    elapsed_frames(frame, item.start_frame),
                    settings.fps,
                    settings.pop_in,
                ),
                highlighted: true,
            },
            ItemPhase::Past => ItemState {
                phase: ItemPhase::Past,
                opacity: 1.0,
                scale: 1.0,
                highlighted: false,
            },
        })
        .collect();

    ItemsLayout {
        items: states,
        scroll_offset_px: scroll_offset_px(items, frame, settings),
    }
}

/// Vertical list translation at `frame`.
///
/// Summed afresh over every item past the always-visible head; each contributes its
/// clamped scroll progress times the item height.
pub fn scroll_offset_px(items: &[ContentItem], frame: FrameIndex, settings: &RenderSettings) -> f64 {
    items
        .iter()
        .skip(settings.always_visible_items)
        .fold(0.0, |acc, item| {
            let progress = spring_progress(
                elapsed_frames(frame, item.start_frame),
                settings.fps,
                settings.scroll,
            )
            .clamp(0.0, 1.0);
            acc + progress * settings.item_height_px
        })
}

fn elapsed_frames(frame: FrameIndex, start: u64) -> i64 {
    if frame.0 >= start {
        i64::try_from(frame.0 - start).unwrap_or(i64::MAX)
    } else {
        -i64::try_from(start - frame.0).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/content.rs"]
mod tests;
