use crate::{foundation::core::Fps, render::settings::FALLBACK_TOTAL_FRAMES};

/// Tail appended after the narration of a compilation scene (2 s).
pub const COMPILATION_TAIL_FRAMES: u64 = 60;
/// Tail appended after the narration of a standalone card video (3 s).
pub const SINGLE_TAIL_FRAMES: u64 = 90;

/// Total compilation length: the sum of scene durations, or
/// [`FALLBACK_TOTAL_FRAMES`] when that sum is zero.
pub fn total_frames<I>(durations: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    total_frames_or(durations, FALLBACK_TOTAL_FRAMES)
}

/// [`total_frames`] with an explicit fallback.
pub fn total_frames_or<I>(durations: I, fallback: u64) -> u64
where
    I: IntoIterator<Item = u64>,
{
    match durations
        .into_iter()
        .fold(0u64, |acc, d| acc.saturating_add(d))
    {
        0 => fallback,
        sum => sum,
    }
}

/// Scene length for narration of `audio_secs` seconds followed by `tail_frames`.
pub fn scene_duration_frames(audio_secs: f64, fps: Fps, tail_frames: u64) -> u64 {
    let audio = if audio_secs.is_finite() {
        fps.secs_to_frames_floor(audio_secs)
    } else {
        0
    };
    audio.saturating_add(tail_frames)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/duration.rs"]
mod tests;
