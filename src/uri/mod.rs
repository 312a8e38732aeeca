//! URI text form of names.
//!
//! This module contains the text-side functionality:
//! - Percent-escaping and un-escaping of single components
//! - Normalization of a URI string (scheme, authority, slashes)
//! - Splitting a URI into components

pub mod escape;
pub mod parser;

// Re-export main functionality
pub use escape::{component_from_escaped, escape_value, unescape_segment};
pub use parser::{normalize_uri, parse_components};
