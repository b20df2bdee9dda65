//! # `bpechipper` BPE Subword Vocabulary Learner
//!
//! This learns a byte pair encoding (BPE) subword vocabulary from a corpus.
//!
//! Each corpus word is represented as a sequence of symbols, one per character,
//! terminated by a boundary marker. The most frequent adjacent symbol pair is
//! merged into a new symbol everywhere it occurs, and the merge is recorded;
//! this repeats for the requested number of merges, or until no pair is left.
//!
//! The learned state is:
//! * the final [`training::Vocabulary`] of formatted words,
//! * the [`training::Tokens`] symbol frequency table,
//! * the [`training::Alphabet`] of corpus characters,
//! * the ordered [`training::utility::MergeRule`] list.
//!
//! See:
//! * [`training`] to learn merges.
//! * [`training::utility`] for the formatting, counting, and merge primitives.
//!
//! ## Crate Features
//!
//! #### feature: ``ahash`` (default)
//!
//! This swaps all HashMap implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::CommonHashMap`` type alias machinery.
//!
//! #### feature: ``foldhash``
//!
//! As ``ahash``, using ``foldhash``. If both are enabled, ``ahash`` wins;
//! if neither is, the ``std`` hasher is used.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! ## Example
//!
//! ```rust
//! use bpechipper::training::{train, utility::WordSpan};
//!
//! let model = train("low lower newest widest", 1);
//!
//! let rule = &model.merges()[0];
//! assert_eq!(rule.to_string(), "e s -> es");
//!
//! let newest = WordSpan::from_spaced("n e w es t _");
//! assert_eq!(model.vocabulary().get(&newest), Some(1));
//! ```
#![warn(missing_docs, unused)]

pub mod errors;
pub mod training;
pub mod types;

#[doc(inline)]
pub use errors::{BpeError, BpeResult};
#[doc(inline)]
pub use training::{BpeTrainer, BpeTrainerOptions, LearnedModel, train};
