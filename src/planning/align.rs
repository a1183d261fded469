use crate::{
    foundation::core::Fps,
    manifest::model::{ContentItem, Word},
};

/// Seconds added after the last known position when an item's keyword is not spoken.
pub const MISSING_KEYWORD_GAP_SECS: f64 = 2.0;

/// Assign each item the frame at which its keyword is first spoken.
///
/// The transcript is searched forward from the previous match. Items whose keyword never
/// appears are placed [`MISSING_KEYWORD_GAP_SECS`] after the last placement and marked
/// `found: false`. Start frames never decrease.
#[tracing::instrument(skip_all, fields(items = items.len(), words = words.len()))]
pub fn align_items(items: &[String], words: &[Word], fps: Fps) -> Vec<ContentItem> {
    let normalized: Vec<String> = words.iter().map(|w| normalize(&w.text)).collect();

    let mut search_from = 0usize;
    let mut last_secs = 0.0f64;
    let mut prev_frame = 0u64;
    let mut out = Vec::with_capacity(items.len());

    for item in items {
        let keyword = keyword_of(item);
        let hit = if keyword.is_empty() {
            None
        } else {
            normalized[search_from..]
                .iter()
                .position(|t| !t.is_empty() && (t.contains(&keyword) || keyword.contains(t)))
                .map(|offset| search_from + offset)
        };

        let (secs, found) = match hit {
            Some(idx) => {
                tracing::debug!(
                    %keyword,
                    word = %words[idx].text,
                    start = words[idx].start,
                    "keyword aligned"
                );
                search_from = idx + 1;
                last_secs = words[idx].start;
                (last_secs, true)
            }
            None => {
                tracing::warn!(%keyword, "keyword not spoken, placing after previous item");
                last_secs += MISSING_KEYWORD_GAP_SECS;
                (last_secs, false)
            }
        };

        let start_frame = fps.secs_to_frames_floor(secs).max(prev_frame);
        prev_frame = start_frame;
        out.push(ContentItem {
            text: item.clone(),
            start_frame,
            found,
        });
    }
    out
}

/// Lowercased alphanumeric form of the first word longer than three characters
/// (or of the first word), ignoring a leading `1.`-style numbering token.
pub fn keyword_of(item: &str) -> String {
    let body = match item.split_once(' ') {
        Some((_, rest)) if item.starts_with(|c: char| c.is_numeric()) => rest,
        _ => item,
    };
    let mut tokens = body.split_whitespace();
    let first = tokens.clone().next().unwrap_or("");
    let word = tokens.find(|w| w.chars().count() > 3).unwrap_or(first);
    normalize(word)
}

fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/planning/align.rs"]
mod tests;
