//! The atomic unit of a compiled template.

use std::fmt;

use serde::Serialize;

use crate::style::{EDITABLE_MARKER, HIDDEN_MARKER, OPTIONAL_MARKER};

/// How a token's value is sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Literal template text; the key is the value.
    Constant,
    /// Value supplied by the user.
    Editable,
    /// Named but not user-editable.
    Hidden,
}

/// One parsed component of a path template.
///
/// Tokens are immutable once constructed and owned exclusively by the
/// [`Schema`](crate::schema::Schema) that parsed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    key: String,
    delimiter: Option<char>,
    kind: TokenKind,
    is_optional: bool,
    version_syntax: Option<String>,
}

impl Token {
    pub(crate) fn new(
        key: String,
        delimiter: Option<char>,
        kind: TokenKind,
        is_optional: bool,
        version_syntax: Option<String>,
    ) -> Self {
        Self {
            key,
            delimiter,
            kind,
            is_optional,
            version_syntax,
        }
    }

    /// Logical name; for constant tokens the key is the literal text.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Separator character preceding this token within its group.
    pub fn delimiter(&self) -> Option<char> {
        self.delimiter
    }

    /// The token's classification.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Whether this token is literal template text.
    pub fn is_constant(&self) -> bool {
        self.kind == TokenKind::Constant
    }

    /// Whether a user supplies this token's value.
    pub fn is_editable(&self) -> bool {
        self.kind == TokenKind::Editable
    }

    /// Constant tokens are implicitly hidden.
    pub fn is_hidden(&self) -> bool {
        matches!(self.kind, TokenKind::Hidden | TokenKind::Constant)
    }

    /// Whether the token may be entirely absent from a concrete path.
    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    /// Whether the token carries a version-format annotation.
    pub fn is_version(&self) -> bool {
        self.version_syntax.is_some()
    }

    /// The bracketed format annotation, e.g. `v3`.
    pub fn version_syntax(&self) -> Option<&str> {
        self.version_syntax.as_deref()
    }

    /// Render this token's contribution to a path for the given value.
    pub fn path_component(&self, value: &str) -> String {
        match self.delimiter {
            Some(d) => format!("{d}{value}"),
            None => value.to_string(),
        }
    }
}

impl fmt::Display for Token {
    /// Renders the token back in template syntax, without braces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(d) = self.delimiter {
            write!(f, "{d}")?;
        }
        match self.kind {
            TokenKind::Hidden => write!(f, "{HIDDEN_MARKER}")?,
            TokenKind::Editable => write!(f, "{EDITABLE_MARKER}")?,
            TokenKind::Constant => {}
        }
        write!(f, "{}", self.key)?;
        if let Some(syntax) = &self.version_syntax {
            write!(f, "[{syntax}]")?;
        }
        if self.is_optional {
            write!(f, "{OPTIONAL_MARKER}")?;
        }
        Ok(())
    }
}
