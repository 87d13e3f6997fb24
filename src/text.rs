//! Reading-time statistics for submitted text.

/// Typical synthesized narration pace.
pub const WORDS_PER_MINUTE: usize = 200;

/// Word count and estimated listening time of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
    /// Rounded up; zero for empty text.
    pub estimated_minutes: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let words = text.split_whitespace().count();
        Self {
            words,
            characters: text.chars().count(),
            estimated_minutes: words.div_ceil(WORDS_PER_MINUTE),
        }
    }
}
