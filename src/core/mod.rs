//! Core name encoding, decoding and ordering functionality.
//!
//! This module contains the main name operations:
//! - TLV block encoding and decoding
//! - Components, their order and naming conventions
//! - Names: access, construction, comparison, prefixes and successors
//! - Prefix matching
//! - SHA-256 digests for implicit digest components

pub mod block;
pub mod component;
pub mod hasher;
pub mod matcher;
pub mod name;

// Re-export main functionality
pub use block::{Block, Elements};
pub use component::Component;
pub use hasher::sha256_digest;
pub use matcher::{longest_prefix_match, matching_prefixes, name_has_prefix};
pub use name::{Name, PartialName};
