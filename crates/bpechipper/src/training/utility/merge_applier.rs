//! # Merge Application
//!
//! A learned merge is recorded as a [`MergeRule`]: a boundary-safe
//! [`MergePattern`] plus the merged symbol it produces.
//!
//! Patterns match by exact symbol equality over a word's symbol sequence,
//! never over the rendered text; so a pattern ``(e, s)`` cannot match
//! inside an already merged ``es`` or ``ew`` symbol, and symbol content
//! never needs escaping.

use core::fmt;

use crate::training::CountType;
use crate::training::Vocabulary;
use crate::types::{Symbol, SymbolPair};

/// A boundary-safe match rule for an adjacent symbol pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MergePattern {
    left: Symbol,
    right: Symbol,
}

impl From<SymbolPair> for MergePattern {
    fn from((left, right): SymbolPair) -> Self {
        Self { left, right }
    }
}

impl From<&SymbolPair> for MergePattern {
    fn from(pair: &SymbolPair) -> Self {
        pair.clone().into()
    }
}

impl fmt::Display for MergePattern {
    /// Renders as ``left right``.
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} {}", self.left, self.right)
    }
}

impl MergePattern {
    /// Create a new pattern.
    pub fn new<L, R>(
        left: L,
        right: R,
    ) -> Self
    where
        L: AsRef<str>,
        R: AsRef<str>,
    {
        Self {
            left: left.as_ref().into(),
            right: right.as_ref().into(),
        }
    }

    /// The left symbol.
    pub fn left(&self) -> &Symbol {
        &self.left
    }

    /// The right symbol.
    pub fn right(&self) -> &Symbol {
        &self.right
    }

    /// The matched pair.
    pub fn pair(&self) -> SymbolPair {
        (self.left.clone(), self.right.clone())
    }

    /// The concatenation of the pair; the symbol a match is replaced with.
    pub fn merged_symbol(&self) -> Symbol {
        let mut merged = Symbol::with_capacity(self.left.len() + self.right.len());
        merged.push_str(&self.left);
        merged.push_str(&self.right);
        merged
    }

    /// Does the pattern match ``symbols[index..index + 2]``?
    pub fn matches_at(
        &self,
        symbols: &[Symbol],
        index: usize,
    ) -> bool {
        index + 1 < symbols.len() && symbols[index] == self.left && symbols[index + 1] == self.right
    }

    /// Rewrite every word in `vocabulary`, replacing matches with `merged`.
    ///
    /// Counts are carried over unchanged per word.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, vocabulary, merged)))]
    pub fn rewrite<C: CountType>(
        &self,
        vocabulary: &Vocabulary<C>,
        merged: &Symbol,
    ) -> Vocabulary<C> {
        let mut rewritten = Vocabulary::with_capacity(vocabulary.len());
        let mut replaced = 0;
        for (word, count) in vocabulary.iter() {
            let (word, n) = word.merge_pair(self, merged);
            replaced += n;
            rewritten.add(word, count);
        }
        log::trace!(
            "merge ({}) -> {:?}: {} word-level replacements",
            self,
            merged,
            replaced
        );
        rewritten
    }
}

/// A recorded merge: the pattern to match, and the symbol it produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeRule {
    pattern: MergePattern,
    merged: Symbol,
}

impl fmt::Display for MergeRule {
    /// Renders as ``left right -> merged``.
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} -> {}", self.pattern, self.merged)
    }
}

impl MergeRule {
    /// Create a new rule.
    pub fn new(
        pattern: MergePattern,
        merged: Symbol,
    ) -> Self {
        Self { pattern, merged }
    }

    /// The match pattern.
    pub fn pattern(&self) -> &MergePattern {
        &self.pattern
    }

    /// The merged symbol.
    pub fn merged(&self) -> &Symbol {
        &self.merged
    }

    /// Replay this rule against a vocabulary.
    pub fn apply_to<C: CountType>(
        &self,
        vocabulary: &Vocabulary<C>,
    ) -> Vocabulary<C> {
        self.pattern.rewrite(vocabulary, &self.merged)
    }
}

/// The result of [`apply_merge`].
#[derive(Debug, Clone)]
pub struct MergeOutcome<C: CountType> {
    /// The rewritten vocabulary.
    pub vocabulary: Vocabulary<C>,

    /// The merged symbol.
    pub merged: Symbol,

    /// The reusable match pattern.
    pub pattern: MergePattern,
}

impl<C: CountType> MergeOutcome<C> {
    /// Build the [`MergeRule`] this outcome records.
    pub fn rule(&self) -> MergeRule {
        MergeRule::new(self.pattern.clone(), self.merged.clone())
    }
}

/// Merge `pair` everywhere it occurs in `vocabulary`.
///
/// # Arguments
/// * `pair` - the adjacent pair to merge.
/// * `vocabulary` - the source vocabulary; left untouched.
///
/// # Returns
/// The new vocabulary, the merged symbol, and the match pattern.
pub fn apply_merge<C: CountType>(
    pair: &SymbolPair,
    vocabulary: &Vocabulary<C>,
) -> MergeOutcome<C> {
    let pattern = MergePattern::from(pair);
    let merged = pattern.merged_symbol();
    let vocabulary = pattern.rewrite(vocabulary, &merged);
    MergeOutcome {
        vocabulary,
        merged,
        pattern,
    }
}

/// Replay `merges`, in order, against `vocabulary`.
pub fn replay_merges<C: CountType>(
    vocabulary: &Vocabulary<C>,
    merges: &[MergeRule],
) -> Vocabulary<C> {
    merges
        .iter()
        .fold(vocabulary.clone(), |vocab, rule| rule.apply_to(&vocab))
}
