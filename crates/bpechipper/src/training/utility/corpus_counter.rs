//! # Corpus Counter

use crate::training::utility::word_span::{DEFAULT_BOUNDARY_MARKER, WordSpan};
use crate::training::{Alphabet, CountType, Tokens, Vocabulary};

/// Is `c` a word separator?
///
/// Unicode ``White_Space``, plus the ASCII information separators
/// ``U+001C..=U+001F`` (file, group, record, unit), which are
/// conventionally treated as whitespace by text splitting.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Collapse every run of separators (see [`is_separator`]) into a single ``' '``.
///
/// Leading and trailing runs are collapsed, not stripped.
pub fn normalize_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if is_separator(c) {
            if !in_space {
                normalized.push(' ');
            }
            in_space = true;
        } else {
            normalized.push(c);
            in_space = false;
        }
    }
    normalized
}

/// The initial training state counted from a corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusCounts<C: CountType> {
    /// The formatted-word counts.
    pub vocabulary: Vocabulary<C>,

    /// Per-character counts over the normalized text.
    pub tokens: Tokens<C>,

    /// The distinct characters of the normalized text.
    pub alphabet: Alphabet,
}

impl<C: CountType> CorpusCounts<C> {
    /// Count a corpus.
    ///
    /// The vocabulary is built from whitespace separated words;
    /// the tokens and alphabet from every character of the normalized text,
    /// including the single space separators.
    ///
    /// # Arguments
    /// * `text` - the raw corpus.
    /// * `boundary_marker` - the end-of-word symbol for formatted words.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(text)))]
    pub fn from_text(
        text: &str,
        boundary_marker: &str,
    ) -> Self {
        let normalized = normalize_whitespace(text);

        let mut vocabulary = Vocabulary::new();
        for word in normalized.split(' ').filter(|w| !w.is_empty()) {
            vocabulary.add(WordSpan::format_word(word, boundary_marker), C::one());
        }

        let mut tokens = Tokens::new();
        for c in normalized.chars() {
            tokens.increment_char(c);
        }

        let alphabet: Alphabet = normalized.chars().collect();

        Self {
            vocabulary,
            tokens,
            alphabet,
        }
    }

    /// Release the counts as a ``(vocabulary, tokens, alphabet)`` tuple.
    pub fn release(self) -> (Vocabulary<C>, Tokens<C>, Alphabet) {
        (self.vocabulary, self.tokens, self.alphabet)
    }
}

/// Count a corpus using [`DEFAULT_BOUNDARY_MARKER`].
///
/// See [`CorpusCounts::from_text`].
pub fn preprocess<C: CountType>(text: &str) -> (Vocabulary<C>, Tokens<C>, Alphabet) {
    CorpusCounts::from_text(text, DEFAULT_BOUNDARY_MARKER).release()
}
