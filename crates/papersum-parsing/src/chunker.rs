use papersum_core::Chunk;

/// Running character length at which a chunk is closed.
pub const DEFAULT_TARGET_SIZE: usize = 2048;

/// Chunks with this many words or fewer are not worth summarizing.
pub const DEFAULT_MIN_WORDS: usize = 100;

/// Word-bounded splitter that sizes text for a summarization model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    pub target_size: usize,
    pub min_words: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            min_words: DEFAULT_MIN_WORDS,
        }
    }
}

impl Chunker {
    pub fn new(target_size: usize, min_words: usize) -> Self {
        Self {
            target_size,
            min_words,
        }
    }

    /// Split `text` into contiguous chunks without filtering.
    ///
    /// Each word adds its character count plus one to the running length;
    /// the chunk closes as soon as that reaches `target_size`. The trailing
    /// partial chunk is kept.
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut length = 0;

        for word in text.split_whitespace() {
            current.push(word);
            length += word.chars().count() + 1;

            if length >= self.target_size {
                chunks.push(make_chunk(&current));
                current.clear();
                length = 0;
            }
        }

        if !current.is_empty() {
            chunks.push(make_chunk(&current));
        }

        chunks
    }

    /// Split `text` and drop chunks with `min_words` words or fewer.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let all = self.split(text);
        let total = all.len();
        let kept: Vec<Chunk> = all
            .into_iter()
            .filter(|c| c.word_count > self.min_words)
            .collect();

        if kept.len() < total {
            tracing::debug!(
                dropped = total - kept.len(),
                kept = kept.len(),
                min_words = self.min_words,
                "dropped short chunks"
            );
        }

        kept
    }
}

fn make_chunk(words: &[&str]) -> Chunk {
    Chunk {
        text: words.join(" "),
        word_count: words.len(),
    }
}

/// Chunk `text` with explicit bounds. See [`Chunker::chunk`].
pub fn chunk_text(text: &str, target_size: usize, min_words: usize) -> Vec<Chunk> {
    Chunker::new(target_size, min_words).chunk(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize, w: &str) -> String {
        vec![w; n].join(" ")
    }

    #[test]
    fn defaults() {
        let c = Chunker::default();
        assert_eq!(c.target_size, 2048);
        assert_eq!(c.min_words, 100);
    }

    #[test]
    fn long_chunk_kept_and_short_tail_dropped() {
        // "word" counts 5 toward the running length: 150 words = 750.
        let text = format!("{} {}", words(150, "word"), words(5, "tail"));
        let chunker = Chunker::new(750, 100);

        let all = chunker.split(&text);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].word_count, 150);
        assert_eq!(all[1].word_count, 5);
        assert_eq!(all[1].text, "tail tail tail tail tail");

        let kept = chunker.chunk(&text);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].word_count, 150);
    }

    #[test]
    fn exactly_min_words_is_dropped() {
        let text = words(100, "alpha");
        assert!(chunk_text(&text, 10_000, 100).is_empty());
        assert_eq!(chunk_text(&text, 10_000, 99).len(), 1);
    }

    #[test]
    fn closes_when_length_reaches_target() {
        // Each "ab" adds 3; target 6 closes after two words.
        let chunks = chunk_text("ab ab ab ab ab", 6, 0);
        let counts: Vec<usize> = chunks.iter().map(|c| c.word_count).collect();
        assert_eq!(counts, vec![2, 2, 1]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // "é" is two bytes but one character: each word adds 2.
        let chunks = chunk_text("é é é é", 4, 0);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "é é");
    }

    #[test]
    fn whitespace_is_normalized() {
        let chunks = chunk_text("  one\n\ntwo\tthree  ", 1000, 0);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "one two three");
        assert_eq!(chunks[0].word_count, 3);
    }

    #[test]
    fn empty_text_gives_no_chunks() {
        assert!(Chunker::default().split("").is_empty());
        assert!(Chunker::default().chunk("   \n ").is_empty());
    }

    mod proptest_chunker {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn split_covers_every_word_in_order(
                content in "[a-zA-Z ]{0,800}",
                target_size in 1usize..200,
            ) {
                let chunks = Chunker::new(target_size, 0).split(&content);
                let rejoined: Vec<&str> = chunks
                    .iter()
                    .flat_map(|c| c.text.split_whitespace())
                    .collect();
                let source: Vec<&str> = content.split_whitespace().collect();
                prop_assert_eq!(rejoined, source);
            }

            #[test]
            fn kept_chunks_are_an_ordered_subsequence(
                content in "[a-z]{1,8}( [a-z]{1,8}){0,300}",
                target_size in 10usize..300,
                min_words in 0usize..30,
            ) {
                let chunker = Chunker::new(target_size, min_words);
                let all = chunker.split(&content);
                let kept = chunker.chunk(&content);

                // Every kept chunk appears in the unfiltered split, in order.
                let mut cursor = all.iter();
                for chunk in &kept {
                    prop_assert!(chunk.word_count > min_words);
                    prop_assert!(cursor.any(|c| c == chunk));
                }
            }

            #[test]
            fn word_count_matches_text(
                content in "[a-z ]{0,500}",
                target_size in 1usize..100,
            ) {
                for chunk in Chunker::new(target_size, 0).split(&content) {
                    prop_assert_eq!(chunk.word_count, chunk.text.split_whitespace().count());
                    prop_assert!(chunk.word_count > 0);
                }
            }
        }
    }
}
