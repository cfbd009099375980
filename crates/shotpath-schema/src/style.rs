//! Naming-style configuration for the template grammar.
//!
//! A [`Style`] fixes the three delimiters, the key and value alphabets and
//! whether one token's value may span several secondary-delimited parts.
//! The engine never reads styles from the environment; collaborators pass
//! one in explicitly (see the `shotpath-config` crate).

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Marks a hidden (non-editable) token inside a brace group.
pub const HIDDEN_MARKER: char = '#';
/// Marks an editable token inside a brace group.
pub const EDITABLE_MARKER: char = '@';
/// Marks an optional token; normalized to a single trailing marker.
pub const OPTIONAL_MARKER: char = '?';

/// Built-in naming styles, named after the value alphabet they permit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StylePreset {
    /// Mixed-case values, `-` allowed in values, `_` as the component delimiter.
    #[default]
    MixedDash,
    /// Lowercase values, `-` allowed in values, `_` as the component delimiter.
    LowerDash,
    /// Mixed-case values, `_` allowed in values, `-` as the component delimiter.
    MixedUnderscore,
    /// Lowercase values, `_` allowed in values, `-` as the component delimiter.
    LowerUnderscore,
}

impl StylePreset {
    /// Parse a preset name as it appears in configuration.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mixed_dash" | "mixed-dash" => Some(Self::MixedDash),
            "lower_dash" | "lower-dash" => Some(Self::LowerDash),
            "mixed_underscore" | "mixed-underscore" => Some(Self::MixedUnderscore),
            "lower_underscore" | "lower-underscore" => Some(Self::LowerUnderscore),
            _ => None,
        }
    }

    /// Name under which this preset serializes.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MixedDash => "mixed_dash",
            Self::LowerDash => "lower_dash",
            Self::MixedUnderscore => "mixed_underscore",
            Self::LowerUnderscore => "lower_underscore",
        }
    }
}

/// Delimiters, key/value patterns and optionality rules for one schema.
#[derive(Debug, Clone)]
pub struct Style {
    delimiters: [char; 3],
    key_pattern: Regex,
    value_pattern: Regex,
    allow_multidelimited: bool,
}

impl Style {
    /// Build a style from one of the built-in presets.
    pub fn preset(preset: StylePreset) -> Self {
        let key_pattern = Regex::new(r"^[a-zA-Z0-9.]+$").unwrap();
        let (delimiters, value_pattern) = match preset {
            StylePreset::MixedDash => (['/', '_', '.'], r"^[a-zA-Z0-9-]+$"),
            StylePreset::LowerDash => (['/', '_', '.'], r"^[a-z0-9-]+$"),
            StylePreset::MixedUnderscore => (['/', '-', '.'], r"^[a-zA-Z0-9_]+$"),
            StylePreset::LowerUnderscore => (['/', '-', '.'], r"^[a-z0-9_]+$"),
        };
        Self {
            delimiters,
            key_pattern,
            value_pattern: Regex::new(value_pattern).unwrap(),
            allow_multidelimited: false,
        }
    }

    /// Allow one token's value to span several secondary-delimited parts.
    pub fn with_multidelimited(mut self, allow: bool) -> Self {
        self.allow_multidelimited = allow;
        self
    }

    /// The primary (directory) delimiter.
    pub fn primary(&self) -> char {
        self.delimiters[0]
    }

    /// The secondary (component) delimiter.
    pub fn secondary(&self) -> char {
        self.delimiters[1]
    }

    /// The tertiary (extension) delimiter.
    pub fn tertiary(&self) -> char {
        self.delimiters[2]
    }

    /// All three delimiters, primary first.
    pub fn delimiters(&self) -> &[char; 3] {
        &self.delimiters
    }

    /// Whether `c` is one of this style's delimiters.
    pub fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(&c)
    }

    /// Whether `key` is a legal token key under this style.
    pub fn is_valid_key(&self, key: &str) -> bool {
        self.key_pattern.is_match(key)
    }

    /// Whether `value` is a legal path component value under this style.
    pub fn is_valid_value(&self, value: &str) -> bool {
        self.value_pattern.is_match(value)
    }

    /// Whether multi-delimited token values are allowed.
    pub fn allow_multidelimited(&self) -> bool {
        self.allow_multidelimited
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::preset(StylePreset::default())
    }
}

impl From<StylePreset> for Style {
    fn from(preset: StylePreset) -> Self {
        Self::preset(preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_style_delimiters() {
        let style = Style::default();
        assert_eq!(style.primary(), '/');
        assert_eq!(style.secondary(), '_');
        assert_eq!(style.tertiary(), '.');
        assert!(!style.allow_multidelimited());
    }

    #[test_case("shot" => true)]
    #[test_case("Shot01" => true)]
    #[test_case("file.ext" => true)]
    #[test_case("" => false)]
    #[test_case("bad key" => false)]
    #[test_case("under_score" => false)]
    fn test_key_pattern(key: &str) -> bool {
        Style::default().is_valid_key(key)
    }

    #[test]
    fn test_value_alphabet_follows_preset() {
        let dash = Style::preset(StylePreset::MixedDash);
        assert!(dash.is_valid_value("Asset-01"));
        assert!(!dash.is_valid_value("asset_01"));

        let underscore = Style::preset(StylePreset::MixedUnderscore);
        assert!(underscore.is_valid_value("asset_01"));
        assert!(!underscore.is_valid_value("Asset-01"));
        assert_eq!(underscore.secondary(), '-');
    }

    #[test]
    fn test_lowercase_presets_reject_mixed_case() {
        let style = Style::preset(StylePreset::LowerDash);
        assert!(style.is_valid_value("shot-010"));
        assert!(!style.is_valid_value("Shot-010"));
    }

    #[test]
    fn test_preset_parse_round_trip() {
        for preset in [
            StylePreset::MixedDash,
            StylePreset::LowerDash,
            StylePreset::MixedUnderscore,
            StylePreset::LowerUnderscore,
        ] {
            assert_eq!(StylePreset::parse(preset.name()), Some(preset));
        }
        assert_eq!(StylePreset::parse("nonsense"), None);
    }
}
