//! Shotpath schema engine.
//!
//! Compiles a compact token-template string describing a file-system path
//! into a grouped token grammar, then converts concrete paths to and from
//! key → value mappings against that grammar. Purely synchronous; a
//! [`Schema`] is immutable once compiled and freely shareable across
//! threads.
//!
//! ```
//! use shotpath_schema::{Schema, Style};
//! use std::collections::HashMap;
//!
//! let schema = Schema::compile(
//!     "/{@show}/{@sequence}/{#product}/{@show}{_@sequence}{_@version}.{#extension}",
//!     Style::default(),
//! )
//! .expect("template compiles");
//!
//! let mapping: HashMap<String, String> = schema
//!     .dict_from_path("/rrr/fb2/renders/rrr_fb2_v001.exr")
//!     .unwrap();
//! assert_eq!(mapping["version"], "v001");
//! assert_eq!(schema.path_from_dict(&mapping).unwrap(), "/rrr/fb2/renders/rrr_fb2_v001.exr");
//! ```

pub mod error;
pub mod grouping;
pub mod schema;
pub mod style;
pub mod token;

mod codec;
mod tokenizer;

pub use error::{Result, SchemaError, TokenDefect};
pub use grouping::TokenGrouping;
pub use schema::Schema;
pub use style::{Style, StylePreset};
pub use token::{Token, TokenKind};
