use super::backend::AudioChunk;

/// A named, typed binary payload ready for transmission.
///
/// Produced by exactly one acquisition path (file upload, link fetch, or
/// capture finalization) and moved into the transfer client; never retained
/// after the call.
#[derive(Debug, Clone)]
pub struct AudioAsset {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub name: String,
}

impl AudioAsset {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            name: name.into(),
        }
    }

    /// Concatenate buffered capture chunks, in arrival order, into one asset.
    ///
    /// The resulting byte length equals the sum of the chunk lengths.
    pub fn from_chunks(
        chunks: &[AudioChunk],
        mime_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let total: usize = chunks.iter().map(|chunk| chunk.data.len()).sum();
        let mut bytes = Vec::with_capacity(total);
        for chunk in chunks {
            bytes.extend_from_slice(&chunk.data);
        }
        Self::new(bytes, mime_type, name)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_chunks_preserves_order_and_length() {
        let chunks = vec![
            AudioChunk { data: vec![1, 2, 3] },
            AudioChunk { data: vec![4] },
            AudioChunk { data: vec![5, 6] },
        ];

        let asset = AudioAsset::from_chunks(&chunks, "audio/wav", "recording.wav");

        assert_eq!(asset.bytes, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(asset.len(), 6);
        assert_eq!(asset.mime_type, "audio/wav");
        assert_eq!(asset.name, "recording.wav");
    }

    #[test]
    fn test_from_no_chunks_is_empty() {
        let asset = AudioAsset::from_chunks(&[], "audio/wav", "recording.wav");
        assert!(asset.is_empty());
    }
}
