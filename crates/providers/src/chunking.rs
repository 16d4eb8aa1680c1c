//! Client-side partition of a complete reply into ordered, size-bounded
//! pieces.
//!
//! This exists to emulate incremental delivery over a single synchronous
//! backend call: the pieces cover the input exactly once, in order, with
//! no gaps or overlaps, so their concatenation is byte-identical to the
//! original text.

use crate::error::{ProviderError, Result};

/// Reject non-positive chunk sizes before any backend work happens.
pub fn validate_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(ProviderError::Configuration(
            "chunk size must be positive".into(),
        ));
    }
    Ok(())
}

/// Split `text` into contiguous pieces of at most `chunk_size` characters.
///
/// Boundaries fall on character (not byte) edges, so multi-byte text is
/// never split mid-scalar. An empty input yields zero chunks.
pub fn chunk_text(text: &str, chunk_size: usize) -> Result<Vec<&str>> {
    validate_chunk_size(chunk_size)?;

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == chunk_size {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    Ok(chunks)
}
