//! # Learned Model

use crate::training::utility::{MergeRule, replay_merges};
use crate::training::{Alphabet, CountType, StopReason, Tokens, Vocabulary};

/// The immutable result of a training run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnedModel<C: CountType> {
    pub(crate) vocabulary: Vocabulary<C>,
    pub(crate) tokens: Tokens<C>,
    pub(crate) alphabet: Alphabet,
    pub(crate) merges: Vec<MergeRule>,
    pub(crate) stop_reason: StopReason,
}

impl<C: CountType> LearnedModel<C> {
    /// The vocabulary, after all merges.
    pub fn vocabulary(&self) -> &Vocabulary<C> {
        &self.vocabulary
    }

    /// The symbol frequency table.
    ///
    /// Holds every character of the normalized corpus, plus every merged symbol.
    pub fn tokens(&self) -> &Tokens<C> {
        &self.tokens
    }

    /// The distinct characters of the normalized corpus.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The learned merges, in priority order.
    pub fn merges(&self) -> &[MergeRule] {
        &self.merges
    }

    /// Why training stopped.
    pub fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    /// Replay the learned merges, in order, against `vocabulary`.
    pub fn replay(
        &self,
        vocabulary: &Vocabulary<C>,
    ) -> Vocabulary<C> {
        replay_merges(vocabulary, &self.merges)
    }

    /// Release the model as ``(vocabulary, tokens, alphabet, merges)``.
    pub fn into_parts(self) -> (Vocabulary<C>, Tokens<C>, Alphabet, Vec<MergeRule>) {
        (self.vocabulary, self.tokens, self.alphabet, self.merges)
    }
}
