//! Paragraph-based chunking of source documents

/// Splits text on blank lines and packs consecutive paragraphs into chunks
/// of at most `chunk_size` characters. A paragraph longer than
/// `chunk_size` becomes a chunk of its own.
#[derive(Debug, Clone)]
pub struct ParagraphChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl ParagraphChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunk_overlap: chunk_overlap.min(chunk_size),
        }
    }

    fn split_paragraphs(text: &str) -> Vec<&str> {
        text.split("\n\n")
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect()
    }

    fn char_len(text: &str) -> usize {
        text.chars().count()
    }

    fn overlap_tail(&self, chunk: &str) -> String {
        let len = Self::char_len(chunk);
        chunk
            .chars()
            .skip(len.saturating_sub(self.chunk_overlap))
            .collect()
    }

    pub fn chunk(&self, content: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for paragraph in Self::split_paragraphs(content) {
            if current.is_empty() {
                current.push_str(paragraph);
            } else if Self::char_len(&current) + 2 + Self::char_len(paragraph) <= self.chunk_size {
                current.push_str("\n\n");
                current.push_str(paragraph);
            } else {
                let next = if self.chunk_overlap > 0 {
                    format!("{}\n\n{}", self.overlap_tail(&current), paragraph)
                } else {
                    paragraph.to_string()
                };
                chunks.push(std::mem::replace(&mut current, next));
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}
