//! ndn-name - Hierarchical TLV names for name-based networking
//!
//! A name is an ordered sequence of opaque binary components. It is the
//! addressing unit of a name-based network: routes are looked up by longest
//! matching prefix, tables are ordered by the canonical name order, and
//! names are built incrementally from a prefix plus typed components.
//!
//! # Features
//!
//! - **Canonical**: decoding then re-encoding is byte-identical; non-minimal
//!   encodings are rejected
//! - **Zero-copy**: decoded components and sub-names share the wire buffer
//! - **Totally ordered**: components order by type, then length, then bytes;
//!   names order component by component with prefixes first
//! - **Typed components**: numbers, versions, segments, timestamps,
//!   sequence numbers and implicit SHA-256 digests, all order-preserving
//! - **URI form**: `/a/b/%00%01`, parsed and printed through `FromStr`/`Display`
//!
//! # Quick Start
//!
//! ```
//! use ndn_name::Name;
//!
//! // Build a name from a URI and typed components
//! let mut name: Name = "/example/data".parse()?;
//! name.append_version(2).append_segment(10);
//!
//! // Encode and decode
//! let wire = name.wire_encode();
//! let decoded = Name::from_wire(wire.clone())?;
//! assert_eq!(decoded, name);
//!
//! // Prefixes and ordering
//! assert_eq!(name.prefix(-2).to_uri(), "/example/data");
//! assert!(name.prefix(2).is_prefix_of(&name));
//! assert!(name < name.successor());
//!
//! // Typed accessors
//! assert_eq!(name[-1].to_segment()?, 10);
//! assert_eq!(name.get(-2).to_version()?, 2);
//! # Ok::<(), ndn_name::NameError>(())
//! ```
//!
//! # Wire Format
//!
//! | Block     | Type | Value                              |
//! |-----------|------|------------------------------------|
//! | Name      | 7    | concatenated component blocks      |
//! | Component | 8    | opaque bytes                       |
//! | Digest    | 1    | 32-byte SHA-256 digest             |
//!
//! Types and lengths are VAR-NUMBERs in their shortest form.
//!
//! # Error Handling
//!
//! All fallible functions return `Result<T, NameError>`. Common error cases:
//!
//! - Malformed wire input (wrong type, truncation, length overrun)
//! - Malformed URI segments (`.` or `..`, bad digest hex)
//! - Out-of-range checked access through [`Name::at`]

// Re-export main name types
pub use crate::core::{Block, Component, Elements, Name, PartialName};

// Re-export matching and digest helpers
pub use crate::core::{longest_prefix_match, matching_prefixes, name_has_prefix, sha256_digest};

// Re-export public types
pub use error::NameError;
pub use types::Marker;

// Module declarations
pub mod error;
pub mod types;
pub mod core;
pub mod uri;
