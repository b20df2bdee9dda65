//! # Vocabulary Training
//!
//! Support for learning byte pair merges from a text corpus.
//!
//! Training proceeds as:
//! * count the corpus into a [`Vocabulary`] of formatted words, each a
//!   [`utility::WordSpan`] of single character symbols plus a boundary marker;
//! * repeatedly count adjacent symbol pairs, weighted by word count;
//! * merge the most frequent pair everywhere it occurs, recording a
//!   [`utility::MergeRule`];
//! * stop after the requested number of merges, or when no pair is left.
//!
//! Ties between equally frequent pairs go to the lexicographically smallest
//! pair, so training output is reproducible.
//!
//! ## Training Example
//!
//! ```rust
//! use bpechipper::training::{BpeTrainerOptions, StopReason, train};
//!
//! // The one-call form; negative merge counts learn nothing.
//! let model = train("low lower newest widest", 1);
//! assert_eq!(model.merges()[0].merged(), "es");
//!
//! // The configurable form.
//! let model = BpeTrainerOptions::new(1_000)
//!     .with_boundary_marker("</w>")
//!     .expect("valid marker")
//!     .init::<u32>("hug pug hugs")
//!     .expect("valid options")
//!     .run();
//! assert_eq!(model.stop_reason(), StopReason::PairsExhausted);
//! ```

pub mod utility;

mod bpe_trainer;
mod learned_model;
mod training_types;

#[doc(inline)]
pub use bpe_trainer::{BpeTrainer, BpeTrainerOptions, StopReason, TrainState};
#[doc(inline)]
pub use learned_model::LearnedModel;
#[doc(inline)]
pub use training_types::{Alphabet, CountType, Tokens, Vocabulary};

use crate::errors::BpeResult;

/// Learn up to `num_merges` merges from `text`.
///
/// Uses the default boundary marker; a `num_merges <= 0` learns no merges.
/// Every call is independent.
pub fn train(
    text: &str,
    num_merges: i64,
) -> LearnedModel<u64> {
    let num_merges = if num_merges <= 0 {
        0
    } else {
        usize::try_from(num_merges).unwrap_or(usize::MAX)
    };
    BpeTrainer::start(BpeTrainerOptions::new(num_merges), text).run()
}

/// Learn merges from `text` with explicit options.
///
/// ## Errors
/// If the options are invalid.
pub fn train_with_options<C: CountType>(
    text: &str,
    options: BpeTrainerOptions,
) -> BpeResult<LearnedModel<C>> {
    Ok(options.init::<C>(text)?.run())
}
