//! Configuration types.

use serde::{Deserialize, Serialize};
use shotpath_schema::{Style, StylePreset};

/// Default path template: a show tree, a product/role split, then a fully
/// delimited filename. Deployments override this via `.shotpath/config.yaml`
/// or `SHOTPATH_TEMPLATE`.
pub const DEFAULT_TEMPLATE: &str = "/shows/{@show}/{@sequence}/{@shot}/{#product}/{@role}\
/{@show}{_@sequence}{_@shot}{_@role}{_@version[v3]}{_@resolution}.{#extension}";

/// Root configuration, read from `.shotpath/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotpathConfig {
    /// The path template handed to the schema compiler.
    pub template: String,
    /// Naming style the template is compiled under.
    pub style: StyleConfig,
}

impl Default for ShotpathConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            style: StyleConfig::default(),
        }
    }
}

/// Naming style selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// One of the built-in presets.
    pub preset: StylePreset,
    /// Let one token's value span several secondary-delimited parts.
    pub allow_multidelimited: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            preset: StylePreset::default(),
            allow_multidelimited: false,
        }
    }
}

impl StyleConfig {
    /// Resolve to an engine [`Style`].
    pub fn to_style(&self) -> Style {
        Style::preset(self.preset).with_multidelimited(self.allow_multidelimited)
    }
}
