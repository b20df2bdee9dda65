//! # Vocab Trainer

use crate::errors::BpeResult;
use crate::training::utility::{
    CorpusCounts, DEFAULT_BOUNDARY_MARKER, MergeOutcome, MergeRule, apply_merge, count_pairs,
    select_best_pair, try_boundary_marker,
};
use crate::training::{Alphabet, CountType, LearnedModel, Tokens, Vocabulary};
use crate::types::Symbol;

/// Options for [`BpeTrainer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BpeTrainerOptions {
    /// The maximum number of merges to learn.
    pub num_merges: usize,

    /// The end-of-word symbol appended to every formatted word.
    pub boundary_marker: Symbol,
}

impl Default for BpeTrainerOptions {
    fn default() -> Self {
        Self::new(0)
    }
}

impl BpeTrainerOptions {
    /// Create new options.
    ///
    /// ## Arguments
    /// * `num_merges` - The maximum number of merges to learn.
    ///
    /// ## Returns
    /// A new `BpeTrainerOptions` instance, using [`DEFAULT_BOUNDARY_MARKER`].
    pub fn new(num_merges: usize) -> Self {
        Self {
            num_merges,
            boundary_marker: DEFAULT_BOUNDARY_MARKER.into(),
        }
    }

    /// Sets the maximum number of merges.
    ///
    /// ## Arguments
    /// * `num_merges` - The maximum number of merges to learn.
    ///
    /// ## Returns
    /// The updated `BpeTrainerOptions` instance.
    pub fn with_num_merges(
        self,
        num_merges: usize,
    ) -> Self {
        Self { num_merges, ..self }
    }

    /// Sets the boundary marker.
    ///
    /// ## Arguments
    /// * `boundary_marker` - The new end-of-word symbol.
    ///
    /// ## Returns
    /// The updated `BpeTrainerOptions` instance.
    ///
    /// ## Errors
    /// If the marker is empty or contains whitespace.
    pub fn with_boundary_marker<S: AsRef<str>>(
        self,
        boundary_marker: S,
    ) -> BpeResult<Self> {
        let boundary_marker = try_boundary_marker(boundary_marker.as_ref())?.into();
        Ok(Self {
            boundary_marker,
            ..self
        })
    }

    /// Check the options.
    pub fn validate(&self) -> BpeResult<()> {
        try_boundary_marker(&self.boundary_marker)?;
        Ok(())
    }

    /// Initializes a [`BpeTrainer`] over `text` from these options.
    ///
    /// ## Returns
    /// A new `BpeTrainer` instance, or an error if the options are invalid.
    pub fn init<C: CountType>(
        self,
        text: &str,
    ) -> BpeResult<BpeTrainer<C>> {
        BpeTrainer::new(self, text)
    }
}

/// Why a training run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The requested number of merges were learned.
    MergeLimitReached,

    /// No adjacent pair was left to merge.
    PairsExhausted,
}

/// The state of a [`BpeTrainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainState {
    /// More merges may be learned.
    Iterating {
        /// The number of merges learned so far.
        merges_done: usize,
    },

    /// Training is finished.
    Done(StopReason),
}

/// Trainer for learning byte pair merges over a word vocabulary.
///
/// Construction counts the corpus; each [`BpeTrainer::step`] learns one merge.
///
/// # Parameters
/// * `C` - the type used to store word and symbol counts.
#[derive(Debug, Clone)]
pub struct BpeTrainer<C: CountType = u64> {
    options: BpeTrainerOptions,
    vocabulary: Vocabulary<C>,
    tokens: Tokens<C>,
    alphabet: Alphabet,
    merges: Vec<MergeRule>,
    state: TrainState,
    last_log_percent: usize,
}

impl<C: CountType> BpeTrainer<C> {
    /// Initializes a [`BpeTrainer`].
    ///
    /// ## Arguments
    /// * `options` - The trainer options.
    /// * `text` - The training corpus.
    ///
    /// ## Returns
    /// A new `BpeTrainer` instance, or an error if the options are invalid.
    pub fn new(
        options: BpeTrainerOptions,
        text: &str,
    ) -> BpeResult<Self> {
        options.validate()?;
        Ok(Self::start(options, text))
    }

    /// Count the corpus and enter the first state; `options` are already valid.
    pub(crate) fn start(
        options: BpeTrainerOptions,
        text: &str,
    ) -> Self {
        log::info!("Counting corpus: {} bytes", text.len());

        let CorpusCounts {
            vocabulary,
            tokens,
            alphabet,
        } = CorpusCounts::from_text(text, &options.boundary_marker);

        log::info!(
            "Corpus has {} distinct words ({} total), {} distinct characters",
            vocabulary.len(),
            vocabulary.total_count(),
            alphabet.len()
        );

        let state = if options.num_merges == 0 {
            TrainState::Done(StopReason::MergeLimitReached)
        } else {
            TrainState::Iterating { merges_done: 0 }
        };

        Self {
            merges: Vec::with_capacity(options.num_merges.min(4096)),
            options,
            vocabulary,
            tokens,
            alphabet,
            state,
            last_log_percent: 0,
        }
    }

    /// The trainer options.
    pub fn options(&self) -> &BpeTrainerOptions {
        &self.options
    }

    /// The current state.
    pub fn state(&self) -> TrainState {
        self.state
    }

    /// Has training finished?
    pub fn is_done(&self) -> bool {
        matches!(self.state, TrainState::Done(_))
    }

    /// The current vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary<C> {
        &self.vocabulary
    }

    /// The current symbol frequency table.
    pub fn tokens(&self) -> &Tokens<C> {
        &self.tokens
    }

    /// The corpus alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The merges learned so far.
    pub fn merges(&self) -> &[MergeRule] {
        &self.merges
    }

    /// Learn one merge.
    ///
    /// ## Returns
    /// The learned rule; or `None` if training is (now) done without one.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn step(&mut self) -> Option<&MergeRule> {
        let TrainState::Iterating { merges_done } = self.state else {
            return None;
        };

        let pair_counts = count_pairs(&self.vocabulary);
        let Some(best) = select_best_pair(&pair_counts) else {
            log::info!("No mergeable pairs remain after {} merges", merges_done);
            self.state = TrainState::Done(StopReason::PairsExhausted);
            return None;
        };

        let MergeOutcome {
            vocabulary,
            merged,
            pattern,
        } = apply_merge(&best.pair, &self.vocabulary);

        log::debug!(
            "Merge {}: ({}) -> {:?} (frequency: {})",
            merges_done + 1,
            pattern,
            merged,
            best.count
        );

        self.vocabulary = vocabulary;
        self.tokens.insert(merged.clone(), best.count);
        self.merges.push(MergeRule::new(pattern, merged));

        let merges_done = merges_done + 1;
        self.log_progress(merges_done);

        self.state = if merges_done >= self.options.num_merges {
            TrainState::Done(StopReason::MergeLimitReached)
        } else {
            TrainState::Iterating { merges_done }
        };

        self.merges.last()
    }

    fn log_progress(
        &mut self,
        merges_done: usize,
    ) {
        let num_merges = self.options.num_merges;
        let current_percent = (merges_done * 100) / num_merges;
        if current_percent > self.last_log_percent {
            if let Some(last) = self.merges.last() {
                log::info!(
                    "Progress: {}% ({}/{} merges) - Last merge: {}",
                    current_percent,
                    merges_done,
                    num_merges,
                    last
                );
            }
            self.last_log_percent = current_percent;
        }
    }

    /// Run training to completion.
    ///
    /// ## Returns
    /// The [`LearnedModel`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn run(mut self) -> LearnedModel<C> {
        log::info!(
            "Starting BPE training: up to {} merges to compute",
            self.options.num_merges
        );

        let stop_reason = loop {
            if let TrainState::Done(reason) = self.state {
                break reason;
            }
            self.step();
        };

        log::info!(
            "Finished training: {} merges completed ({:?})",
            self.merges.len(),
            stop_reason
        );

        LearnedModel {
            vocabulary: self.vocabulary,
            tokens: self.tokens,
            alphabet: self.alphabet,
            merges: self.merges,
            stop_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BpeError;
    use crate::training::utility::{MergePattern, WordSpan, preprocess};

    #[test]
    fn test_trainer_options() {
        let options = BpeTrainerOptions::new(10);

        assert_eq!(options.num_merges, 10);
        assert_eq!(options.boundary_marker, DEFAULT_BOUNDARY_MARKER);
        assert_eq!(BpeTrainerOptions::default().num_merges, 0);

        let options = options
            .with_num_merges(20)
            .with_boundary_marker("</w>")
            .unwrap();

        assert_eq!(options.num_merges, 20);
        assert_eq!(options.boundary_marker, "</w>");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_trainer_options_bad_marker() {
        assert_eq!(
            BpeTrainerOptions::new(10).with_boundary_marker(""),
            Err(BpeError::EmptyBoundaryMarker)
        );

        let options = BpeTrainerOptions {
            num_merges: 10,
            boundary_marker: "a b".into(),
        };
        assert!(options.validate().is_err());
        assert!(options.init::<u32>("some text").is_err());
    }

    #[test]
    fn test_step_state_machine() {
        let mut trainer: BpeTrainer<u32> = BpeTrainerOptions::new(2).init("ab ab abc").unwrap();
        assert_eq!(trainer.state(), TrainState::Iterating { merges_done: 0 });
        assert!(!trainer.is_done());
        assert!(trainer.merges().is_empty());

        let rule = trainer.step().cloned().unwrap();
        assert_eq!(rule, MergeRule::new(MergePattern::new("a", "b"), "ab".into()));
        assert_eq!(trainer.state(), TrainState::Iterating { merges_done: 1 });
        assert_eq!(trainer.tokens().get("ab"), Some(3));

        // (ab, _) = 2 beats (ab, c) = 1 and (c, _) = 1.
        let rule = trainer.step().cloned().unwrap();
        assert_eq!(rule.merged(), "ab_");
        assert_eq!(
            trainer.state(),
            TrainState::Done(StopReason::MergeLimitReached)
        );
        assert!(trainer.is_done());

        assert!(trainer.step().is_none());
        assert_eq!(trainer.merges().len(), 2);
        assert_eq!(
            trainer.vocabulary().get(&WordSpan::from_spaced("ab_")),
            Some(2)
        );
        assert_eq!(
            trainer.vocabulary().get(&WordSpan::from_spaced("ab c _")),
            Some(1)
        );
    }

    #[test]
    fn test_pair_exhaustion() {
        let model = BpeTrainerOptions::new(100).init::<u32>("ab").unwrap().run();

        // a b _ -> ab _ -> ab_
        assert_eq!(model.merges().len(), 2);
        assert_eq!(model.stop_reason(), StopReason::PairsExhausted);
        assert_eq!(
            model.vocabulary().get(&WordSpan::from_spaced("ab_")),
            Some(1)
        );
    }

    #[test]
    fn test_zero_merges() {
        let trainer: BpeTrainer<u32> = BpeTrainerOptions::new(0).init("low lower").unwrap();
        assert_eq!(
            trainer.state(),
            TrainState::Done(StopReason::MergeLimitReached)
        );

        let model = trainer.run();
        assert!(model.merges().is_empty());

        let (initial, tokens, alphabet) = preprocess::<u32>("low lower");
        assert_eq!(model.vocabulary(), &initial);
        assert_eq!(model.tokens(), &tokens);
        assert_eq!(model.alphabet(), &alphabet);
    }

    #[test]
    fn test_empty_corpus() {
        let model = BpeTrainerOptions::new(5).init::<u64>("").unwrap().run();
        assert!(model.merges().is_empty());
        assert!(model.vocabulary().is_empty());
        assert!(model.alphabet().is_empty());
        assert!(model.tokens().is_empty());
        assert_eq!(model.stop_reason(), StopReason::PairsExhausted);
    }

    #[test]
    fn test_custom_marker_training() {
        let model = BpeTrainerOptions::new(3)
            .with_boundary_marker("</w>")
            .unwrap()
            .init::<u32>("hug hug pug")
            .unwrap()
            .run();

        let merged: Vec<&str> = model.merges().iter().map(|r| r.merged().as_str()).collect();
        // (g,</w>) and (u,g) tie at 3; then (u,g</w>) = 3; then (h,ug</w>) = 2.
        assert_eq!(merged, vec!["g</w>", "ug</w>", "hug</w>"]);
        assert_eq!(model.tokens().get("ug</w>"), Some(3));
        assert_eq!(
            model.vocabulary().get(&WordSpan::from_spaced("p ug</w>")),
            Some(1)
        );
    }
}
