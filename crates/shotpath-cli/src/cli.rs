//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand, ValueEnum};

/// Shotpath - schema-driven path templates
///
/// Compile a path template, inspect its keys, and convert concrete paths
/// to and from key/value mappings.
#[derive(Debug, Parser)]
#[command(
    name = "shotpath",
    author,
    version,
    about,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path template; falls back to the project config's template
    #[arg(short, long, global = true, env = "SHOTPATH_TEMPLATE")]
    pub template: Option<String>,

    /// Naming style preset (e.g. mixed_dash, lower_underscore)
    #[arg(long, global = true, env = "SHOTPATH_STYLE")]
    pub style: Option<String>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile the template and report diagnostics
    Check,

    /// Print a key view of the compiled template
    Keys(KeysArgs),

    /// Decompose a concrete path into key/value pairs
    Parse(ParseArgs),

    /// Build a concrete path from key=value pairs
    Build(BuildArgs),
}

#[derive(Debug, clap::Args)]
pub struct KeysArgs {
    /// Which key view to print
    #[arg(long, value_enum, default_value_t = KeyView::All)]
    pub view: KeyView,
}

#[derive(Debug, clap::Args)]
pub struct ParseArgs {
    /// The concrete path to decompose
    pub path: String,
}

#[derive(Debug, clap::Args)]
pub struct BuildArgs {
    /// Token values as key=value pairs
    #[arg(required = true)]
    pub pairs: Vec<String>,
}

/// Key views exposed by the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyView {
    All,
    Editable,
    Hidden,
    Optional,
    NonOptional,
    NonEditable,
}
