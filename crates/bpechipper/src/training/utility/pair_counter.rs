//! # Pair Counter

use core::cmp::{Ordering, Reverse};

use crate::training::{CountType, Vocabulary};
use crate::types::{CommonHashMap, SymbolPair, hash_map_with_capacity};

/// A map from [`SymbolPair`] to its frequency-weighted occurrence count.
pub type PairCountMap<C> = CommonHashMap<SymbolPair, C>;

/// Count every adjacent symbol pair in `vocabulary`.
///
/// Each occurrence contributes the count of the word it occurs in;
/// ``sum(windows(word).count(pair) * vocabulary[word]) for all words``.
///
/// The map is empty when no word has two or more symbols.
/// Counts saturate at ``C::max_value()``.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(vocabulary)))]
pub fn count_pairs<C: CountType>(vocabulary: &Vocabulary<C>) -> PairCountMap<C> {
    let mut pair_counts: PairCountMap<C> = hash_map_with_capacity(vocabulary.len());

    for (word, count) in vocabulary.iter() {
        if count.is_zero() || word.len() < 2 {
            continue;
        }
        for (a, b) in word.pairs() {
            let total = pair_counts.entry((a.clone(), b.clone())).or_default();
            *total = total.saturating_add(count);
        }
    }

    pair_counts
}

/// A [`SymbolPair`] that could be merged, and its count.
#[derive(Debug, Clone, Eq)]
pub struct MergeCandidate<C: CountType> {
    /// The number of instances of this pair in the corpus.
    pub count: C,

    /// The pair to merge.
    pub pair: SymbolPair,
}

impl<C: CountType> MergeCandidate<C> {
    /// The ranking key.
    ///
    /// Max by count; ties go to the lexicographically smallest pair.
    pub fn rank_key(&self) -> (C, Reverse<&SymbolPair>) {
        (self.count, Reverse(&self.pair))
    }
}

impl<C: CountType> PartialEq for MergeCandidate<C> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.rank_key() == other.rank_key()
    }
}

impl<C: CountType> PartialOrd for MergeCandidate<C> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: CountType> Ord for MergeCandidate<C> {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.rank_key().cmp(&other.rank_key())
    }
}

/// Select the pair to merge next.
///
/// The pair with the highest count wins; among equal counts, the
/// lexicographically smallest pair (by left symbol, then right symbol).
///
/// # Returns
/// `None` when `pair_counts` has no positive count.
pub fn select_best_pair<C: CountType>(pair_counts: &PairCountMap<C>) -> Option<MergeCandidate<C>> {
    pair_counts
        .iter()
        .filter(|(_, count)| !count.is_zero())
        .max_by_key(|&(pair, &count)| (count, Reverse(pair)))
        .map(|(pair, &count)| MergeCandidate {
            count,
            pair: pair.clone(),
        })
}
