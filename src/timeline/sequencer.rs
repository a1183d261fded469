use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{CardreelError, CardreelResult},
    timeline::duration::total_frames_or,
};

/// A global frame resolved to its scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenePosition {
    pub scene_index: usize,
    pub local_frame: FrameIndex,
}

/// Back-to-back placement of scenes on one global timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequencer {
    // starts[i] is the first global frame of scene i; the last entry is the total.
    starts: Vec<u64>,
}

impl Sequencer {
    pub fn new(durations: &[u64]) -> CardreelResult<Self> {
        let mut starts = Vec::with_capacity(durations.len() + 1);
        let mut acc = 0u64;
        starts.push(acc);
        for (idx, &d) in durations.iter().enumerate() {
            if d == 0 {
                return Err(CardreelError::validation(format!(
                    "scene {idx} must last at least one frame"
                )));
            }
            acc = acc.checked_add(d).ok_or_else(|| {
                CardreelError::validation("scene durations overflow the timeline")
            })?;
            starts.push(acc);
        }
        Ok(Self { starts })
    }

    pub fn scene_count(&self) -> usize {
        self.starts.len() - 1
    }

    /// Sum of all scene durations.
    pub fn total_frames(&self) -> u64 {
        self.starts[self.starts.len() - 1]
    }

    /// Global `[start, end)` range occupied by scene `idx`.
    pub fn scene_range(&self, idx: usize) -> Option<FrameRange> {
        let start = *self.starts.get(idx)?;
        let end = *self.starts.get(idx + 1)?;
        Some(FrameRange {
            start: FrameIndex(start),
            end: FrameIndex(end),
        })
    }

    /// Resolve a global frame. Frames at a boundary belong to the later scene.
    pub fn locate(&self, global: FrameIndex) -> CardreelResult<ScenePosition> {
        let total = self.total_frames();
        if global.0 >= total {
            return Err(CardreelError::FrameOutOfRange {
                frame: i64::try_from(global.0).unwrap_or(i64::MAX),
                total,
            });
        }
        // Number of scene starts <= global, minus one, is the owning scene.
        let scene_index = self.starts.partition_point(|&s| s <= global.0) - 1;
        Ok(ScenePosition {
            scene_index,
            local_frame: FrameIndex(global.0 - self.starts[scene_index]),
        })
    }

    /// [`Sequencer::locate`] for callers holding signed frame numbers.
    pub fn locate_signed(&self, global: i64) -> CardreelResult<ScenePosition> {
        self.locate(FrameIndex::from_signed(global, self.total_frames())?)
    }
}

/// Sequencer plus the duration fallback: the full addressable length of a compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timeline {
    sequencer: Sequencer,
    total_frames: u64,
}

impl Timeline {
    pub fn new(durations: &[u64], fallback_total_frames: u64) -> CardreelResult<Self> {
        let sequencer = Sequencer::new(durations)?;
        let total_frames = total_frames_or(durations.iter().copied(), fallback_total_frames);
        Ok(Self {
            sequencer,
            total_frames,
        })
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Resolve a global frame.
    ///
    /// `Ok(None)` is only returned for an empty compilation, whose whole fallback range
    /// has no scene behind it.
    pub fn locate(&self, global: FrameIndex) -> CardreelResult<Option<ScenePosition>> {
        if global.0 >= self.total_frames {
            return Err(CardreelError::FrameOutOfRange {
                frame: i64::try_from(global.0).unwrap_or(i64::MAX),
                total: self.total_frames,
            });
        }
        if self.sequencer.scene_count() == 0 {
            return Ok(None);
        }
        self.sequencer.locate(global).map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequencer.rs"]
mod tests;
