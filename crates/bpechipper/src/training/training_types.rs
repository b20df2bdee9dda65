//! # Training Types
use core::{
    fmt::{Debug, Display},
    hash::Hash,
    ops::AddAssign,
};
use std::collections::BTreeSet;

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

use crate::errors::{BpeError, BpeResult};
use crate::training::utility::WordSpan;
use crate::types::{CommonHashMap, Symbol, hash_map_new, hash_map_with_capacity};

/// A type that can be used as a word or symbol count.
pub trait CountType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Unsigned
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
    + AddAssign
{
}

impl<T> CountType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
        + AddAssign
{
}

/// The set of distinct characters in the whitespace-normalized corpus.
pub type Alphabet = BTreeSet<char>;

/// A map from [`WordSpan`] to its occurrence count in the corpus.
///
/// Keys are unique, counts are ``>= 1``.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary<C: CountType> {
    word_counts: CommonHashMap<WordSpan, C>,
}

impl<C: CountType> PartialEq for Vocabulary<C> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.len() == other.len() && self.iter().all(|(word, count)| other.get(word) == Some(count))
    }
}

impl<C: CountType> Eq for Vocabulary<C> {}

impl<C: CountType> Vocabulary<C> {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self {
            word_counts: hash_map_new(),
        }
    }

    /// Create a new empty vocabulary with room for `capacity` words.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            word_counts: hash_map_with_capacity(capacity),
        }
    }

    /// Build a vocabulary from explicit ``(word, count)`` entries.
    ///
    /// Repeated words have their counts summed.
    ///
    /// # Arguments
    /// * `entries` - the ``(word, count)`` entries.
    /// * `boundary_marker` - the marker every word must end with.
    ///
    /// # Errors
    /// * [`BpeError::MissingBoundaryMarker`] - if a word does not end in the marker.
    /// * [`BpeError::ZeroCount`] - if a count is zero.
    pub fn from_counts<I>(
        entries: I,
        boundary_marker: &str,
    ) -> BpeResult<Self>
    where
        I: IntoIterator<Item = (WordSpan, C)>,
    {
        let mut vocab = Self::new();
        for (word, count) in entries {
            if !word.ends_with_marker(boundary_marker) {
                return Err(BpeError::MissingBoundaryMarker {
                    word: word.to_string(),
                    marker: boundary_marker.to_string(),
                });
            }
            if count.is_zero() {
                return Err(BpeError::ZeroCount {
                    word: word.to_string(),
                });
            }
            vocab.add(word, count);
        }
        Ok(vocab)
    }

    /// Add `count` occurrences of `word`.
    ///
    /// Counts saturate at ``C::max_value()``.
    pub(crate) fn add(
        &mut self,
        word: WordSpan,
        count: C,
    ) {
        let total = self.word_counts.entry(word).or_default();
        *total = total.saturating_add(count);
    }

    /// The number of distinct words.
    pub fn len(&self) -> usize {
        self.word_counts.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.word_counts.is_empty()
    }

    /// Get the count of `word`, if present.
    pub fn get(
        &self,
        word: &WordSpan,
    ) -> Option<C> {
        self.word_counts.get(word).copied()
    }

    /// Iterate over ``(word, count)`` entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&WordSpan, C)> + '_ {
        self.word_counts.iter().map(|(word, &count)| (word, count))
    }

    /// The entries, sorted by word.
    pub fn sorted_entries(&self) -> Vec<(&WordSpan, C)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort();
        entries
    }

    /// The total corpus mass; the sum of all word counts.
    ///
    /// Saturates at ``C::max_value()``.
    pub fn total_count(&self) -> C {
        self.word_counts
            .values()
            .fold(C::zero(), |total, &count| total.saturating_add(count))
    }
}

/// A map from [`Symbol`] to its frequency.
///
/// Seeded with per-character counts; each merge adds its merged symbol.
#[derive(Debug, Clone, Default)]
pub struct Tokens<C: CountType> {
    symbol_counts: CommonHashMap<Symbol, C>,
}

impl<C: CountType> PartialEq for Tokens<C> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(symbol, count)| other.get(symbol) == Some(count))
    }
}

impl<C: CountType> Eq for Tokens<C> {}

impl<C: CountType> Tokens<C> {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            symbol_counts: hash_map_new(),
        }
    }

    /// Count one occurrence of `c`; saturating.
    pub(crate) fn increment_char(
        &mut self,
        c: char,
    ) {
        let mut buf = [0u8; 4];
        let key: &str = c.encode_utf8(&mut buf);
        if let Some(count) = self.symbol_counts.get_mut(key) {
            *count = count.saturating_add(C::one());
        } else {
            self.symbol_counts.insert(key.into(), C::one());
        }
    }

    /// Set the frequency of `symbol`.
    pub(crate) fn insert(
        &mut self,
        symbol: Symbol,
        count: C,
    ) {
        self.symbol_counts.insert(symbol, count);
    }

    /// The number of symbols.
    pub fn len(&self) -> usize {
        self.symbol_counts.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.symbol_counts.is_empty()
    }

    /// Get the frequency of `symbol`, if present.
    pub fn get(
        &self,
        symbol: &str,
    ) -> Option<C> {
        self.symbol_counts.get(symbol).copied()
    }

    /// Iterate over ``(symbol, count)`` entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, C)> + '_ {
        self.symbol_counts
            .iter()
            .map(|(symbol, &count)| (symbol.as_str(), count))
    }
}

#[cfg(test)]
mod tests {
    use core::marker::PhantomData;

    use super::*;

    #[test]
    fn test_common_count_types() {
        struct IsCount<T: CountType>(PhantomData<T>);

        let _: IsCount<u16>;
        let _: IsCount<u32>;
        let _: IsCount<u64>;
        let _: IsCount<usize>;
    }

    #[test]
    fn test_vocabulary_from_counts() {
        let vocab: Vocabulary<u32> = Vocabulary::from_counts(
            [
                (WordSpan::from_spaced("l o w _"), 2),
                (WordSpan::from_spaced("n e w _"), 1),
                (WordSpan::from_spaced("l o w _"), 3),
            ],
            "_",
        )
        .unwrap();

        assert_eq!(vocab.len(), 2);
        assert!(!vocab.is_empty());
        assert_eq!(vocab.get(&WordSpan::from_spaced("l o w _")), Some(5));
        assert_eq!(vocab.get(&WordSpan::from_spaced("n e w _")), Some(1));
        assert_eq!(vocab.get(&WordSpan::from_spaced("n e w")), None);
        assert_eq!(vocab.total_count(), 6);

        let sorted: Vec<(String, u32)> = vocab
            .sorted_entries()
            .into_iter()
            .map(|(w, c)| (w.to_string(), c))
            .collect();
        assert_eq!(
            sorted,
            vec![("l o w _".to_string(), 5), ("n e w _".to_string(), 1)]
        );
    }

    #[test]
    fn test_vocabulary_from_counts_errors() {
        let err = Vocabulary::<u32>::from_counts([(WordSpan::from_spaced("l o w"), 1)], "_")
            .unwrap_err();
        assert_eq!(
            err,
            BpeError::MissingBoundaryMarker {
                word: "l o w".to_string(),
                marker: "_".to_string(),
            }
        );

        let err = Vocabulary::<u32>::from_counts([(WordSpan::from_spaced("l o w _"), 0)], "_")
            .unwrap_err();
        assert_eq!(
            err,
            BpeError::ZeroCount {
                word: "l o w _".to_string()
            }
        );
        assert_eq!(err.to_string(), "word (l o w _) has a zero count");
    }

    #[test]
    fn test_vocabulary_from_counts_merged_marker() {
        let vocab: Vocabulary<u32> = Vocabulary::from_counts(
            [
                (WordSpan::from_spaced("lo w_"), 2),
                (WordSpan::from_spaced("low_"), 5),
            ],
            "_",
        )
        .unwrap();
        assert_eq!(vocab.get(&WordSpan::from_spaced("lo w_")), Some(2));
        assert_eq!(vocab.get(&WordSpan::from_spaced("low_")), Some(5));

        let err = Vocabulary::<u32>::from_counts([(WordSpan::from_spaced("lo_ w"), 1)], "_")
            .unwrap_err();
        assert_eq!(
            err,
            BpeError::MissingBoundaryMarker {
                word: "lo_ w".to_string(),
                marker: "_".to_string(),
            }
        );
    }

    #[test]
    fn test_counts_saturate() {
        let vocab: Vocabulary<u16> = Vocabulary::from_counts(
            [
                (WordSpan::from_spaced("a _"), 40_000),
                (WordSpan::from_spaced("a _"), 40_000),
                (WordSpan::from_spaced("b _"), 10),
            ],
            "_",
        )
        .unwrap();
        assert_eq!(vocab.get(&WordSpan::from_spaced("a _")), Some(u16::MAX));
        assert_eq!(vocab.total_count(), u16::MAX);

        let mut tokens: Tokens<u8> = Tokens::new();
        for _ in 0..300 {
            tokens.increment_char('a');
        }
        assert_eq!(tokens.get("a"), Some(u8::MAX));
    }

    #[test]
    fn test_vocabulary_eq_ignores_order() {
        let a: Vocabulary<u64> = Vocabulary::from_counts(
            [
                (WordSpan::from_spaced("a _"), 1),
                (WordSpan::from_spaced("b _"), 2),
            ],
            "_",
        )
        .unwrap();
        let b: Vocabulary<u64> = Vocabulary::from_counts(
            [
                (WordSpan::from_spaced("b _"), 2),
                (WordSpan::from_spaced("a _"), 1),
            ],
            "_",
        )
        .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Vocabulary::new());
        assert_eq!(Vocabulary::<u64>::new().total_count(), 0);
    }

    #[test]
    fn test_tokens() {
        let mut tokens: Tokens<u32> = Tokens::new();
        assert!(tokens.is_empty());

        for c in "hello".chars() {
            tokens.increment_char(c);
        }
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens.get("l"), Some(2));
        assert_eq!(tokens.get("h"), Some(1));
        assert_eq!(tokens.get("z"), None);

        tokens.insert("ll".into(), 1);
        assert_eq!(tokens.get("ll"), Some(1));
        assert_eq!(tokens.len(), 5);

        let mut entries: Vec<(&str, u32)> = tokens.iter().collect();
        entries.sort();
        assert_eq!(
            entries,
            vec![("e", 1), ("h", 1), ("l", 2), ("ll", 1), ("o", 1)]
        );
    }
}
