use std::io::Write;

use anyhow::Context as _;

use crate::{
    foundation::core::{Canvas, Fps},
    foundation::error::CardreelResult,
    render::pipeline::TimelineFrame,
};

/// Output description handed to a sink before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    pub fps: Fps,
    pub canvas: Canvas,
    /// Frames the sink will receive.
    pub frames: u64,
}

/// Consumer of evaluated frames in timeline order.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> CardreelResult<()>;
    fn push_frame(&mut self, frame: &TimelineFrame) -> CardreelResult<()>;
    fn end(&mut self) -> CardreelResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Frames in timeline order.
    pub frames: Vec<TimelineFrame>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> CardreelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, frame: &TimelineFrame) -> CardreelResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> CardreelResult<()> {
        Ok(())
    }
}

/// Writes one JSON document per frame, newline separated.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn begin(&mut self, _cfg: SinkConfig) -> CardreelResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, frame: &TimelineFrame) -> CardreelResult<()> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out
            .write_all(b"\n")
            .context("write frame state line")?;
        Ok(())
    }

    fn end(&mut self) -> CardreelResult<()> {
        self.out.flush().context("flush frame states")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
