use rayon::prelude::*;

use crate::{
    eval::fingerprint::{FrameFingerprint, fingerprint_state},
    eval::frame::{SceneFrame, eval_compilation_frame},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{CardreelError, CardreelResult},
    manifest::model::{Card, Compilation},
    render::settings::RenderSettings,
    render::sink::{FrameSink, SinkConfig},
    timeline::sequencer::Timeline,
};

/// One evaluated frame of the global timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineFrame {
    #[serde(flatten)]
    pub frame: SceneFrame,
    /// Fingerprint of the scene state; `None` for blank frames.
    pub fingerprint: Option<FrameFingerprint>,
}

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame evaluation.
pub struct RenderThreading {
    /// Enable parallel evaluation when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated evaluation counters.
pub struct RenderStats {
    /// Total evaluated frames.
    pub frames_total: u64,
    /// Frames whose fingerprint differs from the preceding frame.
    pub frames_changed: u64,
}

/// A validated compilation ready for frame evaluation.
///
/// The session holds only immutable data; evaluating a frame never changes it, so frames can
/// be requested in any order and from any number of threads.
pub struct RenderSession<'a> {
    cards: &'a [Card],
    timeline: Timeline,
    settings: RenderSettings,
}

impl<'a> RenderSession<'a> {
    pub fn new(comp: &'a Compilation, settings: RenderSettings) -> CardreelResult<Self> {
        settings.validate()?;
        comp.validate()?;
        let timeline = Timeline::new(&comp.durations(), settings.fallback_total_frames)?;
        tracing::debug!(
            scenes = comp.cards.len(),
            total_frames = timeline.total_frames(),
            "render session ready"
        );
        Ok(Self {
            cards: &comp.cards,
            timeline,
            settings,
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn total_frames(&self) -> u64 {
        self.timeline.total_frames()
    }

    /// Full timeline range `[0, total_frames)`.
    pub fn full_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.total_frames()),
        }
    }

    /// Evaluate one global frame.
    pub fn render_frame(&self, global: FrameIndex) -> CardreelResult<TimelineFrame> {
        let frame = eval_compilation_frame(&self.timeline, self.cards, global, &self.settings)?;
        let fingerprint = frame.state.as_ref().map(fingerprint_state);
        Ok(TimelineFrame { frame, fingerprint })
    }

    /// Evaluate `[range.start, range.end)` and collect the frames in order.
    pub fn render_frames(
        &self,
        range: FrameRange,
        threading: &RenderThreading,
    ) -> CardreelResult<(Vec<TimelineFrame>, RenderStats)> {
        let mut sink = crate::render::sink::InMemorySink::new();
        let stats = self.render_range(range, threading, &mut sink)?;
        Ok((sink.frames, stats))
    }

    /// Evaluate `[range.start, range.end)` into `sink` in frame order.
    ///
    /// In parallel mode each chunk is evaluated on a rayon pool and handed to the sink once
    /// complete; output is identical to sequential mode.
    #[tracing::instrument(skip(self, threading, sink))]
    pub fn render_range(
        &self,
        range: FrameRange,
        threading: &RenderThreading,
        sink: &mut dyn FrameSink,
    ) -> CardreelResult<RenderStats> {
        if range.is_empty() {
            return Err(CardreelError::validation("render range must be non-empty"));
        }
        if range.end.0 > self.total_frames() {
            return Err(CardreelError::FrameOutOfRange {
                frame: i64::try_from(range.end.0 - 1).unwrap_or(i64::MAX),
                total: self.total_frames(),
            });
        }

        let pool = if threading.parallel {
            Some(build_thread_pool(threading.threads)?)
        } else {
            None
        };
        let chunk_size = normalized_chunk_size(threading.chunk_size);

        sink.begin(SinkConfig {
            fps: self.settings.fps,
            canvas: self.settings.canvas,
            frames: range.len_frames(),
        })?;

        let mut stats = RenderStats::default();
        let mut prev_fingerprint: Option<Option<FrameFingerprint>> = None;
        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            tracing::debug!(chunk_start, chunk_end, "evaluating chunk");

            let frames = match &pool {
                Some(pool) => pool.install(|| {
                    (chunk_start..chunk_end)
                        .into_par_iter()
                        .map(|f| self.render_frame(FrameIndex(f)))
                        .collect::<CardreelResult<Vec<_>>>()
                })?,
                None => (chunk_start..chunk_end)
                    .map(|f| self.render_frame(FrameIndex(f)))
                    .collect::<CardreelResult<Vec<_>>>()?,
            };

            for frame in &frames {
                stats.frames_total += 1;
                if prev_fingerprint != Some(frame.fingerprint) {
                    stats.frames_changed += 1;
                }
                prev_fingerprint = Some(frame.fingerprint);
                sink.push_frame(frame)?;
            }
            chunk_start = chunk_end;
        }

        sink.end()?;
        Ok(stats)
    }
}

fn build_thread_pool(threads: Option<usize>) -> CardreelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CardreelError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CardreelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
