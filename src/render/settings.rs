use crate::{
    animation::spring::SpringConfig,
    foundation::core::{Canvas, Fps},
    foundation::error::{CardreelError, CardreelResult},
};

/// Frames rendered for a compilation whose scenes sum to nothing (10 s at 30 fps).
pub const FALLBACK_TOTAL_FRAMES: u64 = 300;

/// Layout and timing knobs shared by every frame of a render job.
///
/// Every field has a default, so a partial JSON object is a valid settings file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output canvas (portrait).
    pub canvas: Canvas,
    /// Number of subtitle words shown together.
    pub page_size: usize,
    /// Extra seconds a word stays highlighted after it ends.
    pub highlight_tolerance_secs: f64,
    /// Leading items that never contribute to scrolling.
    pub always_visible_items: usize,
    /// Vertical pixels one item adds to the scroll offset.
    pub item_height_px: f64,
    /// Spring used for item appearance.
    pub pop_in: SpringConfig,
    /// Spring used for scroll contribution.
    pub scroll: SpringConfig,
    /// Timeline length used when the scene durations sum to zero.
    pub fallback_total_frames: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fps: Fps::DEFAULT,
            canvas: Canvas::PORTRAIT,
            page_size: 4,
            highlight_tolerance_secs: 0.1,
            always_visible_items: 3,
            item_height_px: 160.0,
            pop_in: SpringConfig::POP_IN,
            scroll: SpringConfig::SCROLL,
            fallback_total_frames: FALLBACK_TOTAL_FRAMES,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> CardreelResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(CardreelError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(CardreelError::validation("canvas width/height must be > 0"));
        }
        if self.page_size == 0 {
            return Err(CardreelError::validation("page_size must be > 0"));
        }
        if !self.highlight_tolerance_secs.is_finite() || self.highlight_tolerance_secs < 0.0 {
            return Err(CardreelError::validation(
                "highlight_tolerance_secs must be finite and >= 0",
            ));
        }
        if !self.item_height_px.is_finite() || self.item_height_px < 0.0 {
            return Err(CardreelError::validation(
                "item_height_px must be finite and >= 0",
            ));
        }
        for (name, spring) in [("pop_in", self.pop_in), ("scroll", self.scroll)] {
            if !spring.is_valid() {
                return Err(CardreelError::validation(format!(
                    "{name} spring needs finite stiffness>0, damping>=0 and mass>0"
                )));
            }
        }
        if self.fallback_total_frames == 0 {
            return Err(CardreelError::validation(
                "fallback_total_frames must be > 0",
            ));
        }
        Ok(())
    }

    /// Read settings from a JSON file.
    pub fn from_path(path: &std::path::Path) -> CardreelResult<Self> {
        use anyhow::Context as _;

        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        let settings: Self = serde_json::from_str(&s)?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/settings.rs"]
mod tests;
