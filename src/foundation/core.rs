use crate::foundation::error::{CardreelError, CardreelResult};

/// Frame index on a scene-local or global timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Convert a signed frame number, rejecting negative values as out of range.
    ///
    /// `total` is only used to describe the valid range in the error.
    pub fn from_signed(frame: i64, total: u64) -> CardreelResult<Self> {
        u64::try_from(frame)
            .map(Self)
            .map_err(|_| CardreelError::FrameOutOfRange { frame, total })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> CardreelResult<Self> {
        if start.0 > end.0 {
            return Err(CardreelError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Rational frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    /// The frame rate every card timeline is authored against.
    pub const DEFAULT: Self = Self { num: 30, den: 1 };

    pub fn new(num: u32, den: u32) -> CardreelResult<Self> {
        if den == 0 {
            return Err(CardreelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(CardreelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Signed variant used for elapsed-time math where the trigger may lie in the future.
    pub fn signed_frames_to_secs(self, frames: i64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Output canvas in pixels. Cards are laid out for a portrait canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const PORTRAIT: Self = Self {
        width: 1080,
        height: 1920,
    };
}

impl Default for Canvas {
    fn default() -> Self {
        Self::PORTRAIT
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
