//! Fixed-size character chunking.
//!
//! Boundaries are pure character arithmetic: no overlap, no attempt to
//! respect words or sentences. Sizes count Unicode scalar values, so a
//! multi-byte character is never split.

/// A contiguous slice of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 0-based index within the document.
    pub index: usize,
    /// The chunk text content.
    pub content: String,
    /// Character (not byte) offset in the original text.
    pub char_offset: usize,
}

/// Number of chunks `chunk_text` produces for `char_count` characters.
pub fn chunk_count(char_count: usize, chunk_size: usize) -> usize {
    if chunk_size == 0 {
        return 0;
    }
    char_count.div_ceil(chunk_size)
}

/// Split `text` into consecutive chunks of `chunk_size` characters; the last
/// one may be shorter. Empty text, or a zero `chunk_size`, gives no chunks.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<Chunk> {
    if chunk_size == 0 {
        return Vec::new();
    }
    let mut chunks = Vec::with_capacity(chunk_count(text.chars().count(), chunk_size));

    let mut start_byte = 0usize;
    let mut char_offset = 0usize;
    let mut in_chunk = 0usize;

    for (byte_idx, _) in text.char_indices() {
        if in_chunk == chunk_size {
            chunks.push(Chunk {
                index: chunks.len(),
                content: text[start_byte..byte_idx].to_string(),
                char_offset,
            });
            start_byte = byte_idx;
            char_offset += in_chunk;
            in_chunk = 0;
        }
        in_chunk += 1;
    }

    if in_chunk > 0 {
        chunks.push(Chunk {
            index: chunks.len(),
            content: text[start_byte..].to_string(),
            char_offset,
        });
    }

    chunks
}
