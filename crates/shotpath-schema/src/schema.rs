//! Compiled schema: owns the token grouping for one template.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::codec;
use crate::error::{Result, SchemaError};
use crate::grouping::{group_tokens, TokenGrouping};
use crate::style::Style;
use crate::token::Token;

/// A compiled path template.
///
/// Schemas are immutable: changing the template means compiling a new
/// `Schema` and replacing the old one wholesale. That is what makes
/// instances freely shareable across threads without coordination.
#[derive(Debug, Clone)]
pub struct Schema {
    template: String,
    style: Style,
    anchor: String,
    grouping: TokenGrouping,
    errors: Vec<SchemaError>,
}

impl Schema {
    /// Compile a template, failing on any accumulated error.
    pub fn compile(template: &str, style: Style) -> std::result::Result<Self, Vec<SchemaError>> {
        let schema = Self::compile_lenient(template, style);
        if schema.is_valid() {
            Ok(schema)
        } else {
            Err(schema.errors)
        }
    }

    /// Compile a template, keeping whatever could be built.
    ///
    /// Malformed tokens are skipped and recorded; a grouping-level error
    /// leaves the grouping in its partial state. Check [`Schema::is_valid`]
    /// before converting paths with a schema obtained this way.
    pub fn compile_lenient(template: &str, style: Style) -> Self {
        // Anchor extraction sees the path before delimiter migration;
        // migration can swallow the separator right after the share root.
        let with_slashes = template.replace('\\', &style.primary().to_string());
        let anchor = anchor_of(&with_slashes);
        let normalized = migrate_delimiters(&with_slashes, &style);
        let body = normalized.strip_prefix(&anchor).unwrap_or(&normalized);

        let tokenizer = crate::tokenizer::Tokenizer::new(&style);
        let (tokens, mut errors) = tokenizer.tokenize(body);
        let (grouping, grouping_error) = group_tokens(tokens, &style);
        if let Some(error) = grouping_error {
            warn!(%error, template, "template failed to group");
            errors.push(error);
        }
        debug!(
            template,
            segments = grouping.segment_count(),
            tokens = grouping.tokens().len(),
            errors = errors.len(),
            "compiled schema"
        );
        Self {
            template: template.to_string(),
            style,
            anchor,
            grouping,
            errors,
        }
    }

    /// The template string this schema was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The naming style this schema was compiled under.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Root/share prefix handled outside the token grammar.
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// The compiled grouping.
    pub fn grouping(&self) -> &TokenGrouping {
        &self.grouping
    }

    /// Errors accumulated during compilation.
    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    /// A schema is valid when compilation accumulated no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Every token key, deduplicated.
    pub fn keys(&self) -> Vec<String> {
        self.collect_keys(|_| true)
    }

    /// Keys of editable tokens.
    pub fn keys_editable(&self) -> Vec<String> {
        self.collect_keys(Token::is_editable)
    }

    /// Keys of hidden tokens (constants included).
    pub fn keys_hidden(&self) -> Vec<String> {
        self.collect_keys(Token::is_hidden)
    }

    /// Keys of optional tokens.
    pub fn keys_optional(&self) -> Vec<String> {
        self.collect_keys(Token::is_optional)
    }

    /// Keys of tokens that must appear in every concrete path.
    pub fn keys_non_optional(&self) -> Vec<String> {
        self.collect_keys(|t| !t.is_optional())
    }

    /// Keys of tokens a user cannot edit.
    pub fn keys_non_editable(&self) -> Vec<String> {
        self.collect_keys(|t| !t.is_editable())
    }

    /// Keys a decomposed path must yield: non-optional tokens, minus
    /// constants, which never produce mapping entries.
    pub(crate) fn required_keys(&self) -> Vec<String> {
        self.collect_keys(|t| !t.is_optional() && !t.is_constant())
    }

    fn collect_keys(&self, predicate: impl Fn(&Token) -> bool) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .grouping
            .tokens()
            .iter()
            .filter(|t| predicate(t))
            .map(Token::key)
            .collect();
        set.into_iter().map(String::from).collect()
    }

    /// The token opening the schema's optional leading segment, if any.
    pub fn optional_directory_token(&self) -> Option<&Token> {
        let index = self.grouping.optional_segment_index()?;
        self.grouping.opening_token(index)
    }

    /// Decompose a concrete path into a key → value mapping.
    pub fn dict_from_path(&self, path: &str) -> Result<HashMap<String, String>> {
        codec::dict_from_path(self, path)
    }

    /// Synthesize a concrete path from a key → value mapping.
    pub fn path_from_dict(&self, values: &HashMap<String, String>) -> Result<String> {
        codec::path_from_dict(self, values)
    }
}

/// Repair a template the way paths arrive from mixed sources: a delimiter
/// immediately before an opening brace migrates inside the braces so
/// literal separators between groups become token delimiters.
fn migrate_delimiters(template: &str, style: &Style) -> String {
    let mut path = template.to_string();
    for &delimiter in style.delimiters() {
        path = path.replace(&format!("{delimiter}{{"), &format!("{{{delimiter}"));
    }
    path
}

/// Extract the root/share prefix of a path string: a UNC-style
/// `//host/share` or a drive-style `X:`; empty for plainly-rooted or
/// relative paths. Handled outside the token grammar.
fn anchor_of(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("//") {
        let mut parts = rest.splitn(3, '/');
        if let (Some(host), Some(share)) = (parts.next(), parts.next()) {
            if !host.is_empty() && !share.is_empty() {
                return format!("//{host}/{share}");
            }
        }
        return String::new();
    }
    let mut chars = path.chars();
    match (chars.next(), chars.next()) {
        (Some(drive), Some(':')) if drive.is_ascii_alphabetic() => format!("{drive}:"),
        _ => String::new(),
    }
}
