//! Three-level grouping of tokens: path segment → sub-run → token.
//!
//! Tokens live in a flat arena in template order; the grouping is a set of
//! `(segment, run)` spans into that arena. Traversal is index-based, so
//! flattening is simply the arena itself.

use std::ops::Range;

use crate::error::SchemaError;
use crate::style::Style;
use crate::token::Token;

/// Compiled grouping of a schema's tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenGrouping {
    tokens: Vec<Token>,
    /// Per path segment, the arena range of each sub-run.
    segments: Vec<Vec<Range<usize>>>,
}

impl TokenGrouping {
    /// Number of path segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of sub-runs within a segment.
    pub fn run_count(&self, segment: usize) -> usize {
        self.segments[segment].len()
    }

    /// The tokens of one sub-run, in template order.
    pub fn run(&self, segment: usize, run: usize) -> &[Token] {
        &self.tokens[self.segments[segment][run].clone()]
    }

    /// All tokens in template order (the flattened view).
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The token opening a segment (always the first of its first run).
    pub fn opening_token(&self, segment: usize) -> Option<&Token> {
        let first = self.segments.get(segment)?.first()?;
        self.tokens.get(first.start)
    }

    /// Index of the first segment opened by an optional token, if any.
    pub fn optional_segment_index(&self) -> Option<usize> {
        (0..self.segment_count())
            .find(|&i| self.opening_token(i).is_some_and(Token::is_optional))
    }

    /// Run lengths per segment; two groupings with equal shapes structure
    /// paths identically.
    pub fn shape(&self) -> Vec<Vec<usize>> {
        self.segments
            .iter()
            .map(|runs| runs.iter().map(|run| run.len()).collect())
            .collect()
    }

}

/// Arrange a flat token sequence into its grouping.
///
/// Single forward pass: a primary-delimited token closes the current run
/// and segment and opens a new segment; a tertiary-delimited token whose
/// predecessor is not tertiary-delimited closes the current run and opens
/// the extension run. On a structural error the grouping built so far is
/// returned alongside the error; callers keep it as partial state.
pub(crate) fn group_tokens(
    tokens: Vec<Token>,
    style: &Style,
) -> (TokenGrouping, Option<SchemaError>) {
    let primary = style.primary();
    let tertiary = style.tertiary();

    let mut segments: Vec<Vec<Range<usize>>> = Vec::new();
    let mut runs: Vec<Range<usize>> = Vec::new();
    let mut run_start = 0;
    let mut run_optionals = 0;
    let mut run_is_extension = false;
    let mut error = None;

    let check_run = |optionals: usize, is_extension: bool| -> Option<SchemaError> {
        let level = if is_extension {
            tertiary
        } else {
            style.secondary()
        };
        if optionals > 1 {
            return Some(SchemaError::TooManyOptionalTokens { delimiter: level });
        }
        if optionals > 0 && style.allow_multidelimited() && !is_extension {
            return Some(SchemaError::TooManyOptionalTokens { delimiter: level });
        }
        None
    };

    let mut prev_delimiter = None;
    for index in 0..tokens.len() {
        let delimiter = tokens[index].delimiter();
        let is_primary = delimiter == Some(primary);
        if index == 0 {
            run_is_extension = delimiter == Some(tertiary);
        } else if is_primary {
            error = check_run(run_optionals, run_is_extension);
            runs.push(run_start..index);
            segments.push(std::mem::take(&mut runs));
            run_start = index;
            run_optionals = 0;
            run_is_extension = false;
        } else if delimiter == Some(tertiary) && prev_delimiter != Some(tertiary) {
            error = check_run(run_optionals, run_is_extension);
            runs.push(run_start..index);
            run_start = index;
            run_optionals = 0;
            run_is_extension = true;
        }
        if error.is_some() {
            // Keep what was grouped before the violation.
            return (TokenGrouping { tokens, segments }, error);
        }
        if tokens[index].is_optional() && !is_primary {
            run_optionals += 1;
        }
        prev_delimiter = delimiter;
    }

    if run_start < tokens.len() {
        error = check_run(run_optionals, run_is_extension);
        if error.is_none() {
            runs.push(run_start..tokens.len());
            segments.push(runs);
        }
    }
    (TokenGrouping { tokens, segments }, error)
}
