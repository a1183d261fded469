use xxhash_rust::xxh3::Xxh3;

use crate::{
    eval::frame::{FrameState, LayoutKind},
    layout::content::ItemPhase,
};

const XXH3_SEED: u64 = 0x5c3e_a1d0_77b2_9f41;

/// Stable fingerprint of a frame state.
///
/// The frame index itself is not hashed, so still frames fingerprint equal across time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

pub fn fingerprint_state(state: &FrameState) -> FrameFingerprint {
    let mut h = StableHasher::new();
    h.write_u8(match state.layout {
        LayoutKind::Intro => 0,
        LayoutKind::List => 1,
    });
    h.write_opt_usize(state.active_word_index);
    h.write_opt_usize(state.highlighted_word_index);
    match state.page {
        Some(page) => {
            h.write_u8(1);
            h.write_usize(page.index);
            h.write_usize(page.start);
            h.write_usize(page.end);
        }
        None => h.write_u8(0),
    }
    h.write_f64(state.scroll_offset_px);
    h.write_usize(state.items.len());
    for item in &state.items {
        h.write_u8(match item.phase {
            ItemPhase::Future => 0,
            ItemPhase::Current => 1,
            ItemPhase::Past => 2,
        });
        h.write_f64(item.opacity);
        h.write_f64(item.scale);
        h.write_bool(item.highlighted);
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_usize(&mut self, v: usize) {
        self.write_u64(v as u64);
    }

    fn write_opt_usize(&mut self, v: Option<usize>) {
        match v {
            Some(v) => {
                self.write_u8(1);
                self.write_usize(v);
            }
            None => self.write_u8(0),
        }
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
