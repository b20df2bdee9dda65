//! # Trainer Implementation Utilities

mod corpus_counter;
mod merge_applier;
mod pair_counter;
mod validators;
mod word_span;

#[doc(inline)]
pub use corpus_counter::{CorpusCounts, is_separator, normalize_whitespace, preprocess};
#[doc(inline)]
pub use merge_applier::{MergeOutcome, MergePattern, MergeRule, apply_merge, replay_merges};
#[doc(inline)]
pub use pair_counter::{MergeCandidate, PairCountMap, count_pairs, select_best_pair};
#[doc(inline)]
pub use validators::try_boundary_marker;
#[doc(inline)]
pub use word_span::{DEFAULT_BOUNDARY_MARKER, WordSpan};
