use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fixed name for exported transcripts.
pub const EXPORT_FILENAME: &str = "file.txt";

/// One transcribed fragment in arrival order.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptFragment {
    pub text: String,
    pub received_at: DateTime<Utc>,
}

/// Accumulates transcribed text between explicit clears.
///
/// Fragments are append-only; the rendered transcript is their space-joined
/// concatenation in append order, and export is available only while the
/// sink holds content.
#[derive(Debug, Default)]
pub struct TranscriptSink {
    fragments: Vec<TranscriptFragment>,
}

impl TranscriptSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: impl Into<String>) {
        self.fragments.push(TranscriptFragment {
            text: text.into(),
            received_at: Utc::now(),
        });
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn can_export(&self) -> bool {
        !self.is_empty()
    }

    pub fn fragments(&self) -> &[TranscriptFragment] {
        &self.fragments
    }

    /// Space-joined concatenation of every fragment since the last clear.
    pub fn render(&self) -> String {
        self.fragments
            .iter()
            .map(|fragment| fragment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Write the rendered transcript as UTF-8 plain text.
    pub fn export_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.render())
    }
}
