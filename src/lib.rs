//! cardreel computes the per-frame visual state of karaoke-subtitled flashcard videos.
//!
//! A card is one scene: narration word timings, a question, intro text and a list of items
//! revealed at fixed frames. A compilation plays many cards back to back.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `Manifest` JSON -> `Compilation` (validated cards)
//! 2. **Sequence**: global frame -> `(scene, local frame)` via [`Timeline`]
//! 3. **Evaluate**: `Card + local frame -> FrameState` ([`compute_frame_state`])
//! 4. **Emit**: frames stream into a [`FrameSink`], sequentially or on a rayon pool
//!
//! Every evaluation step is a pure function of the frame index and immutable card data:
//! frames can be computed in any order, on any thread, and recomputed at will. Drawing
//! pixels, decoding audio and encoding video belong to the presentation layer.
#![forbid(unsafe_code)]

mod animation;
mod eval;
mod foundation;
mod layout;
mod manifest;
mod planning;
mod render;
mod subtitle;
mod timeline;

pub use animation::spring::{SpringConfig, spring_progress};
pub use eval::fingerprint::{FrameFingerprint, fingerprint_state};
pub use eval::frame::{
    FrameState, LayoutKind, SceneFrame, compute_frame_state, eval_compilation_frame,
};
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
pub use foundation::error::{CardreelError, CardreelResult};
pub use layout::content::{
    ItemPhase, ItemState, ItemsLayout, item_phase, layout_items, scroll_offset_px,
};
pub use manifest::model::{Card, Compilation, Content, ContentItem, Manifest, ManifestKind, Word};
pub use planning::align::{MISSING_KEYWORD_GAP_SECS, align_items, keyword_of};
pub use planning::parse::{ParsedCard, parse_flashcard};
pub use planning::{CardDraft, plan_card};
pub use render::pipeline::{RenderSession, RenderStats, RenderThreading, TimelineFrame};
pub use render::settings::{FALLBACK_TOTAL_FRAMES, RenderSettings};
pub use render::sink::{FrameSink, InMemorySink, JsonLinesSink, SinkConfig};
pub use subtitle::resolver::{
    SubtitlePage, SubtitleState, page_for, resolve_active_word, resolve_highlighted_word,
    resolve_subtitles,
};
pub use timeline::duration::{
    COMPILATION_TAIL_FRAMES, SINGLE_TAIL_FRAMES, scene_duration_frames, total_frames,
    total_frames_or,
};
pub use timeline::sequencer::{ScenePosition, Sequencer, Timeline};
