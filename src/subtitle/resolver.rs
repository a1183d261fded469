use crate::manifest::model::Word;

/// Contiguous window of subtitle words shown together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitlePage {
    /// Page number (`active / page_size`).
    pub index: usize,
    /// First word index on the page.
    pub start: usize,
    /// One past the last word index on the page.
    pub end: usize,
}

/// Subtitle state of one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleState {
    /// Word the subtitle track is anchored on.
    pub active_word_index: usize,
    /// Word drawn highlighted, if the active word is still within its tolerance window.
    pub highlighted_word_index: Option<usize>,
    /// Visible page.
    pub page: SubtitlePage,
}

/// Index of the word the subtitle track follows at `t` seconds.
///
/// Words are expected sorted by start; with overlapping input the first containing word
/// wins. Before speech starts the first word is active; after it ends the last one is held.
/// Returns `None` when there are no words.
pub fn resolve_active_word(words: &[Word], t: f64) -> Option<usize> {
    let first = words.first()?;

    if let Some(idx) = words.iter().position(|w| w.start <= t && t <= w.end) {
        return Some(idx);
    }
    if t < first.start {
        return Some(0);
    }
    // In a gap or past the end: the most recently finished word.
    Some(words.iter().rposition(|w| w.end <= t).unwrap_or(0))
}

/// Index of the word drawn highlighted at `t` seconds.
///
/// Only the active word can be highlighted, and only while
/// `start <= t <= end + tolerance_secs`.
pub fn resolve_highlighted_word(words: &[Word], t: f64, tolerance_secs: f64) -> Option<usize> {
    let idx = resolve_active_word(words, t)?;
    within_tolerance(&words[idx], t, tolerance_secs).then_some(idx)
}

fn within_tolerance(w: &Word, t: f64, tolerance_secs: f64) -> bool {
    w.start <= t && t <= w.end + tolerance_secs
}

/// Page containing `active` for a list of `len` words.
pub fn page_for(active: usize, len: usize, page_size: usize) -> SubtitlePage {
    let page_size = page_size.max(1);
    let index = active / page_size;
    let start = index * page_size;
    SubtitlePage {
        index,
        start,
        end: (start + page_size).min(len),
    }
}

/// Full subtitle state at `t` seconds, or `None` when there is no subtitle track.
pub fn resolve_subtitles(
    words: &[Word],
    t: f64,
    page_size: usize,
    tolerance_secs: f64,
) -> Option<SubtitleState> {
    let active_word_index = resolve_active_word(words, t)?;
    Some(SubtitleState {
        active_word_index,
        highlighted_word_index: within_tolerance(&words[active_word_index], t, tolerance_secs)
            .then_some(active_word_index),
        page: page_for(active_word_index, words.len(), page_size),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/subtitle/resolver.rs"]
mod tests;
