//! # Word Span

use core::fmt;

use crate::training::utility::MergePattern;
use crate::types::Symbol;

/// The boundary marker used when none is configured.
pub const DEFAULT_BOUNDARY_MARKER: &str = "_";

/// The symbol sequence of a single corpus word (a "word span").
///
/// Every span produced by [`WordSpan::format_word`] ends in the boundary marker;
/// merges rewrite the span but never touch that final marker's position
/// relative to the word's characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordSpan {
    symbols: Vec<Symbol>,
}

impl<S: AsRef<str>> FromIterator<S> for WordSpan {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_symbols(iter)
    }
}

impl fmt::Display for WordSpan {
    /// Renders the symbols joined by single spaces, e.g. ``l o w _``.
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (idx, symbol) in self.symbols.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            f.write_str(symbol)?;
        }
        Ok(())
    }
}

impl WordSpan {
    /// Create a new span from symbols.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            symbols: symbols
                .into_iter()
                .map(|s| Symbol::from(s.as_ref()))
                .collect(),
        }
    }

    /// Create a new span from whitespace separated symbols.
    ///
    /// This is the inverse of the [`fmt::Display`] rendering.
    pub fn from_spaced(text: &str) -> Self {
        Self::from_symbols(text.split_whitespace())
    }

    /// Format a raw word into its initial representation.
    ///
    /// One symbol per character, followed by the boundary marker.
    /// The empty word yields a span holding only the marker.
    ///
    /// # Arguments
    /// * `word` - the raw word.
    /// * `boundary_marker` - the end-of-word symbol.
    pub fn format_word(
        word: &str,
        boundary_marker: &str,
    ) -> Self {
        let mut symbols: Vec<Symbol> = Vec::with_capacity(word.len() + 1);
        let mut buf = [0u8; 4];
        symbols.extend(word.chars().map(|c| Symbol::from(&*c.encode_utf8(&mut buf))));
        symbols.push(boundary_marker.into());
        Self { symbols }
    }

    /// View the symbols as a slice.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Get the number of symbols in the span.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Is this span empty?
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Does the span end in `boundary_marker`?
    ///
    /// Merges can fold the marker into the final symbol, so this checks
    /// the text of the last symbol; ``lo w_`` ends in ``_``.
    pub fn ends_with_marker(
        &self,
        boundary_marker: &str,
    ) -> bool {
        self.symbols
            .last()
            .is_some_and(|last| last.ends_with(boundary_marker))
    }

    /// Get an iterator over adjacent symbol windows of this span.
    pub fn pairs(&self) -> impl Iterator<Item = (&Symbol, &Symbol)> + '_ {
        self.symbols.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// The concatenation of all symbols; the word text plus its marker.
    pub fn concat(&self) -> String {
        self.symbols.iter().map(Symbol::as_str).collect()
    }

    /// Merge all non-overlapping occurrences of `pattern -> replacement`.
    ///
    /// Scans left to right; a matched pair is consumed whole,
    /// so ``a a a`` merging ``(a, a)`` becomes ``aa a``.
    ///
    /// # Arguments
    /// * `pattern` - the pair to merge.
    /// * `replacement` - the symbol to replace the pair with.
    ///
    /// # Returns
    /// The rewritten span, and the number of replaced occurrences.
    pub fn merge_pair(
        &self,
        pattern: &MergePattern,
        replacement: &Symbol,
    ) -> (Self, usize) {
        let n = self.symbols.len();
        let mut symbols: Vec<Symbol> = Vec::with_capacity(n);
        let mut replaced = 0;

        let mut i = 0;
        while i < n {
            if pattern.matches_at(&self.symbols, i) {
                symbols.push(replacement.clone());
                replaced += 1;

                // Skip both halves.
                i += 2;
            } else {
                symbols.push(self.symbols[i].clone());
                i += 1;
            }
        }

        (Self { symbols }, replaced)
    }
}
