use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{CardreelError, CardreelResult};

/// One transcribed word with its spoken interval in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Word {
    /// Spoken text as returned by transcription.
    #[serde(rename = "word", alias = "text")]
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds (`>= start`).
    pub end: f64,
}

impl Word {
    /// Build a word from its text and interval.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// A list entry revealed at a fixed scene-local frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Display text.
    pub text: String,
    /// First frame at which the item is current.
    pub start_frame: u64,
    /// Whether the start frame came from a transcript match rather than a fallback.
    #[serde(default = "default_found")]
    pub found: bool,
}

fn default_found() -> bool {
    true
}

impl ContentItem {
    /// Build an item aligned at `start_frame`.
    pub fn new(text: impl Into<String>, start_frame: u64) -> Self {
        Self {
            text: text.into(),
            start_frame,
            found: true,
        }
    }
}

/// Visual content of a card.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Content {
    /// Lead-in text; the only thing shown when `items` is empty.
    #[serde(default)]
    pub intro: String,
    /// Flashcard question shown as the heading.
    #[serde(default)]
    pub question: String,
    /// Items ordered by non-decreasing `start_frame`.
    #[serde(default)]
    pub items: Vec<ContentItem>,
}

/// One scene: narration, word timings and list content.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Card identifier (1-based row number in compilations).
    #[serde(default)]
    pub id: u64,
    /// Reference to the narration audio, resolved by the presentation layer.
    #[serde(rename = "audioUrl")]
    pub audio_ref: String,
    /// Word-level timestamps of the narration.
    #[serde(rename = "subtitles", default)]
    pub words: Vec<Word>,
    /// List content.
    pub content: Content,
    /// Scene length in frames (`> 0`).
    pub duration_in_frames: u64,
}

impl Card {
    /// Check the timing preconditions the frame evaluator relies on.
    pub fn validate(&self) -> CardreelResult<()> {
        if self.duration_in_frames == 0 {
            return Err(CardreelError::validation(format!(
                "card {}: durationInFrames must be > 0",
                self.id
            )));
        }

        let mut prev_start = f64::NEG_INFINITY;
        for (idx, w) in self.words.iter().enumerate() {
            if !w.start.is_finite() || !w.end.is_finite() || w.start < 0.0 {
                return Err(CardreelError::validation(format!(
                    "card {}: word {idx} must have finite, non-negative times",
                    self.id
                )));
            }
            if w.end < w.start {
                return Err(CardreelError::validation(format!(
                    "card {}: word {idx} ends before it starts",
                    self.id
                )));
            }
            if w.start < prev_start {
                return Err(CardreelError::validation(format!(
                    "card {}: word {idx} starts before the previous word",
                    self.id
                )));
            }
            prev_start = w.start;
        }

        if let Some(idx) = self
            .content
            .items
            .windows(2)
            .position(|pair| pair[1].start_frame < pair[0].start_frame)
        {
            return Err(CardreelError::validation(format!(
                "card {}: item {} starts before the previous item",
                self.id,
                idx + 1
            )));
        }
        Ok(())
    }
}

/// Ordered list of scenes rendered back to back.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Compilation {
    /// Scenes in playback order.
    pub cards: Vec<Card>,
}

impl Compilation {
    /// Validate every card.
    pub fn validate(&self) -> CardreelResult<()> {
        self.cards.iter().try_for_each(Card::validate)
    }

    /// Per-scene durations in playback order.
    pub fn durations(&self) -> Vec<u64> {
        self.cards.iter().map(|c| c.duration_in_frames).collect()
    }
}

/// On-disk document: a full compilation or a single card.
///
/// A document carrying a `type` field is read as a compilation; anything else as a bare
/// card. Field errors are reported against the chosen shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Manifest {
    /// `{ "type": "compilation", "cards": [...] }`
    Compilation {
        /// Document tag.
        #[serde(rename = "type")]
        kind: ManifestKind,
        /// Scenes in playback order.
        cards: Vec<Card>,
    },
    /// A bare card document.
    Single(Card),
}

/// Tag of a compilation manifest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestKind {
    /// Multi-card compilation.
    Compilation,
}

#[derive(serde::Deserialize)]
struct CompilationDoc {
    #[serde(rename = "type")]
    kind: ManifestKind,
    cards: Vec<Card>,
}

impl<'de> serde::Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
        if value.get("type").is_some() {
            let doc: CompilationDoc = serde_json::from_value(value).map_err(D::Error::custom)?;
            Ok(Self::Compilation {
                kind: doc.kind,
                cards: doc.cards,
            })
        } else {
            serde_json::from_value(value)
                .map(Self::Single)
                .map_err(D::Error::custom)
        }
    }
}

impl Manifest {
    /// Parse a manifest from JSON text.
    pub fn from_json_str(s: &str) -> CardreelResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a manifest file.
    pub fn from_path(path: &Path) -> CardreelResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read manifest '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// View the manifest as a compilation; a single card becomes a one-scene compilation.
    pub fn into_compilation(self) -> Compilation {
        match self {
            Self::Compilation { cards, .. } => Compilation { cards },
            Self::Single(card) => Compilation { cards: vec![card] },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/model.rs"]
mod tests;
