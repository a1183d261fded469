use super::*;
use crate::{eval::frame::SceneFrame, foundation::core::FrameIndex};

fn blank(global: u64) -> TimelineFrame {
    TimelineFrame {
        frame: SceneFrame {
            global_frame: FrameIndex(global),
            scene: None,
            state: None,
        },
        fingerprint: None,
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        fps: Fps::DEFAULT,
        canvas: Canvas::PORTRAIT,
        frames: 2,
    }
}

#[test]
fn in_memory_sink_keeps_order_and_config() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(&blank(0)).unwrap();
    sink.push_frame(&blank(1)).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.config(), Some(cfg()));
    assert_eq!(sink.frames.len(), 2);
    assert_eq!(sink.frames[1].frame.global_frame, FrameIndex(1));
}

#[test]
fn json_lines_sink_writes_one_document_per_frame() {
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.begin(cfg()).unwrap();
    sink.push_frame(&blank(0)).unwrap();
    sink.push_frame(&blank(1)).unwrap();
    sink.end().unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let v: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(v["globalFrame"], 1);
    assert!(v["scene"].is_null());
}
