//! Template scanning and token construction.
//!
//! The scanner works in two stages: a normalized template is split into
//! pre-token strings (brace groups and the literal runs between them, with
//! directory delimiters redistributed onto the tokens they belong to), then
//! each pre-token is parsed into a [`Token`]. A malformed pre-token is
//! recorded as an error and skipped; the rest of the template still
//! compiles.

use regex::Regex;
use tracing::warn;

use crate::error::{SchemaError, TokenDefect};
use crate::style::{Style, EDITABLE_MARKER, HIDDEN_MARKER, OPTIONAL_MARKER};
use crate::token::{Token, TokenKind};

pub(crate) struct Tokenizer<'a> {
    style: &'a Style,
    /// Captures `name[syntax]` with an optional trailing optional-marker.
    version: Regex,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(style: &'a Style) -> Self {
        Self {
            style,
            version: Regex::new(r"^([^\[\]]+)\[([^\]]+)\](\?)?$").unwrap(),
        }
    }

    /// Split a template body into tokens, accumulating per-token errors.
    pub(crate) fn tokenize(&self, template: &str) -> (Vec<Token>, Vec<SchemaError>) {
        let (pretokens, mut errors) = self.pretokenize(template);
        let mut tokens = Vec::with_capacity(pretokens.len());
        for pretoken in pretokens {
            match self.parse_token(&pretoken) {
                Ok(token) => tokens.push(token),
                Err(defect) => {
                    warn!(pretoken = %pretoken, %defect, "skipping malformed token");
                    errors.push(SchemaError::MalformedToken { pretoken, defect });
                }
            }
        }
        (tokens, errors)
    }

    /// Extract pre-token strings from a normalized template body.
    ///
    /// Brace groups become pre-tokens as-is; literal runs between them
    /// become constant pre-tokens. Optional markers are normalized to a
    /// single trailing marker, and directory delimiters are pushed onto
    /// the pre-token that opens each path segment.
    fn pretokenize(&self, template: &str) -> (Vec<String>, Vec<SchemaError>) {
        let mut errors = Vec::new();
        let mut components = Vec::new();
        let mut rest = template;
        while !rest.is_empty() {
            if let Some(inner) = rest.strip_prefix('{') {
                match inner.find('}') {
                    Some(end) => {
                        components.push(inner[..end].to_string());
                        rest = &inner[end + 1..];
                    }
                    None => {
                        errors.push(SchemaError::MalformedToken {
                            pretoken: rest.to_string(),
                            defect: TokenDefect::UnterminatedGroup,
                        });
                        break;
                    }
                }
            } else {
                let end = rest.find('{').unwrap_or(rest.len());
                components.push(rest[..end].to_string());
                rest = &rest[end..];
            }
        }

        // A marker anywhere in the group means optional; keep exactly one,
        // trailing, so token parsing sees a canonical form.
        for component in &mut components {
            if component.contains(OPTIONAL_MARKER) {
                component.retain(|c| c != OPTIONAL_MARKER);
                component.push(OPTIONAL_MARKER);
            }
        }

        (self.redistribute_directories(components), errors)
    }

    /// The directory-prepend pass.
    ///
    /// A component holding more than one primary delimiter is split into
    /// one segment-opening pre-token per part; a bare delimiter only arms
    /// the prepend flag; a component containing the delimiter is rewritten
    /// with a single leading one. The flag starts armed so the first
    /// component always opens a path segment.
    fn redistribute_directories(&self, components: Vec<String>) -> Vec<String> {
        let primary = self.style.primary();
        let mut out = Vec::with_capacity(components.len());
        let mut prepend = true;
        for component in components {
            if component.matches(primary).count() > 1 {
                for part in component.split(primary).filter(|p| !p.is_empty()) {
                    out.push(format!("{primary}{part}"));
                }
                prepend = true;
            } else if component.chars().eq([primary]) {
                prepend = true;
            } else {
                let repaired = if component.contains(primary) {
                    format!("{primary}{}", component.replace(primary, ""))
                } else if prepend {
                    format!("{primary}{component}")
                } else {
                    component
                };
                out.push(repaired);
                prepend = false;
            }
        }
        out
    }

    /// Parse one pre-token into a token.
    fn parse_token(&self, pretoken: &str) -> Result<Token, TokenDefect> {
        // Version annotation first; a trailing optional marker survives it.
        let (mut rest, version_syntax) = match self.version.captures(pretoken) {
            Some(caps) => {
                let mut kept = caps[1].to_string();
                if caps.get(3).is_some() {
                    kept.push(OPTIONAL_MARKER);
                }
                (kept, Some(caps[2].to_string()))
            }
            None => (pretoken.to_string(), None),
        };

        let mut is_optional = false;
        if rest.contains(OPTIONAL_MARKER) {
            if self.style.allow_multidelimited() && !rest.contains(self.style.tertiary()) {
                return Err(TokenDefect::OptionalNotAllowed);
            }
            is_optional = true;
            rest.retain(|c| c != OPTIONAL_MARKER);
        }

        let mut delimiter = None;
        match rest.chars().next() {
            Some(first) if self.style.is_delimiter(first) => {
                delimiter = Some(first);
                rest.remove(0);
            }
            Some(_) => {}
            None => return Err(TokenDefect::EmptyKey),
        }

        let has_hidden = rest.contains(HIDDEN_MARKER);
        let has_editable = rest.contains(EDITABLE_MARKER);
        let kind = match (has_hidden, has_editable) {
            (true, true) => return Err(TokenDefect::ConflictingMarkers),
            (true, false) => TokenKind::Hidden,
            (false, true) => TokenKind::Editable,
            (false, false) => TokenKind::Constant,
        };
        rest.retain(|c| c != HIDDEN_MARKER && c != EDITABLE_MARKER);

        if rest.is_empty() {
            return Err(TokenDefect::EmptyKey);
        }
        if !self.style.is_valid_key(&rest) {
            return Err(TokenDefect::InvalidKey(rest));
        }
        Ok(Token::new(rest, delimiter, kind, is_optional, version_syntax))
    }
}
