//! Error types for schema compilation and path conversion.

use thiserror::Error;

/// Why a single pre-token failed to become a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenDefect {
    /// The hidden and editable markers are mutually exclusive.
    #[error("hidden and editable markers are mutually exclusive")]
    ConflictingMarkers,

    /// The key text left after stripping markers is not a legal key.
    #[error("key '{0}' does not match the style's key pattern")]
    InvalidKey(String),

    /// No key text remains once markers and delimiter are stripped.
    #[error("no key text remains")]
    EmptyKey,

    /// An opening brace with no matching closing brace.
    #[error("unterminated token group")]
    UnterminatedGroup,

    /// Under multi-delimited styles only extension tokens may be optional.
    #[error("optional marker is only allowed on extension tokens under this style")]
    OptionalNotAllowed,
}

/// Errors produced while compiling a template or converting a path.
///
/// Token-level malformation is recovered per token and accumulated on the
/// [`Schema`](crate::schema::Schema); grouping and conversion errors are
/// returned from the operation that detected them. Nothing in the engine
/// panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A pre-token could not be parsed into a token.
    #[error("malformed token '{pretoken}': {defect}")]
    MalformedToken {
        /// The offending pre-token text.
        pretoken: String,
        /// What was wrong with it.
        defect: TokenDefect,
    },

    /// More than one optional token within a single grouping level.
    #[error("too many optional tokens at delimiter level '{delimiter}'")]
    TooManyOptionalTokens {
        /// Delimiter of the violated level.
        delimiter: char,
    },

    /// Path component counts do not line up with the compiled schema.
    #[error("component count mismatch: schema expects {expected}, path has {found}")]
    SegmentCountMismatch {
        /// Component count the schema requires.
        expected: usize,
        /// Component count the path supplied.
        found: usize,
    },

    /// The same key resolved to two different values within one path.
    #[error("conflicting values for token key '{key}': '{first}' vs '{second}'")]
    ConflictingTokenValue {
        /// The repeated key.
        key: String,
        /// Value recorded first.
        first: String,
        /// Value that disagreed with it.
        second: String,
    },

    /// Required keys absent from a decomposed path.
    #[error("missing required keys {missing:?}, found {found:?}")]
    MissingRequiredKey {
        /// Keys the schema requires but the path did not supply.
        missing: Vec<String>,
        /// Keys the path did supply.
        found: Vec<String>,
    },

    /// Keys needed to build a path that the supplied mapping did not contain.
    #[error("cannot build path, unresolved keys {missing:?}")]
    UnresolvedKeyOnSynthesis {
        /// Every key the mapping failed to supply, aggregated.
        missing: Vec<String>,
    },
}

/// Result alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
