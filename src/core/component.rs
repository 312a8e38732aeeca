//! Name components: typed, immutable TLV values.
//!
//! A component is ordered by type number first, then by value length, then
//! by value bytes. Length dominates byte values: `[0xFF]` sorts before
//! `[0x00, 0x00]`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use tracing::trace;

use crate::core::block::{read_non_negative_integer, write_non_negative_integer, Block};
use crate::core::hasher::sha256_digest;
use crate::error::NameError;
use crate::types::{
    Marker, GENERIC_NAME_COMPONENT, IMPLICIT_SHA256_DIGEST_COMPONENT, SHA256_DIGEST_SIZE,
};
use crate::uri::escape::{component_from_escaped, write_component_uri};

/// One component of a [`Name`](crate::Name).
///
/// Holds its own TLV encoding. Components decoded from a name share the
/// name's buffer.
#[derive(Clone)]
pub struct Component {
    block: Block,
}

impl Component {
    /// Generic component holding `value`.
    pub fn new(value: &[u8]) -> Self {
        Self {
            block: Block::new(GENERIC_NAME_COMPONENT, value),
        }
    }

    /// Component of the given type, validated.
    pub fn with_type(type_number: u64, value: &[u8]) -> Result<Self, NameError> {
        check_component(type_number, value.len())?;
        Ok(Self {
            block: Block::new(type_number, value),
        })
    }

    /// Wrap a decoded block after checking it is a valid component.
    pub fn from_block(block: Block) -> Result<Self, NameError> {
        check_component(block.type_number(), block.value().len())?;
        Ok(Self { block })
    }

    /// Wrap a block already known to be of generic type.
    pub(crate) fn from_generic_block(block: Block) -> Self {
        debug_assert_eq!(block.type_number(), GENERIC_NAME_COMPONENT);
        Self { block }
    }

    /// Decode a buffer holding exactly one component TLV.
    pub fn from_wire(wire: Bytes) -> Result<Self, NameError> {
        Self::from_block(Block::decode(wire)?)
    }

    /// Parse one escaped URI segment.
    pub fn from_escaped_str(segment: &str) -> Result<Self, NameError> {
        component_from_escaped(segment)
    }

    /// Generic component holding a nonNegativeInteger.
    pub fn from_number(number: u64) -> Self {
        let mut value = Vec::with_capacity(8);
        write_non_negative_integer(number, &mut value);
        Self::new(&value)
    }

    /// Generic component holding `marker` followed by a nonNegativeInteger.
    pub fn from_number_with_marker(marker: u8, number: u64) -> Self {
        let mut value = Vec::with_capacity(9);
        value.push(marker);
        write_non_negative_integer(number, &mut value);
        Self::new(&value)
    }

    /// Version component.
    pub fn from_version(version: u64) -> Self {
        Self::from_number_with_marker(Marker::Version.byte(), version)
    }

    /// Segment number component.
    pub fn from_segment(segment: u64) -> Self {
        Self::from_number_with_marker(Marker::Segment.byte(), segment)
    }

    /// Segment byte-offset component.
    pub fn from_segment_offset(offset: u64) -> Self {
        Self::from_number_with_marker(Marker::SegmentOffset.byte(), offset)
    }

    /// Timestamp component, in microseconds since the UNIX epoch.
    ///
    /// Times before the epoch are clamped to the epoch.
    pub fn from_timestamp(time: SystemTime) -> Self {
        let micros = time
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Self::from_number_with_marker(Marker::Timestamp.byte(), micros)
    }

    /// Sequence number component.
    pub fn from_sequence_number(seq_no: u64) -> Self {
        Self::from_number_with_marker(Marker::SequenceNumber.byte(), seq_no)
    }

    /// Implicit SHA-256 digest component from a 32-byte digest.
    pub fn from_implicit_sha256_digest(digest: &[u8]) -> Result<Self, NameError> {
        Self::with_type(IMPLICIT_SHA256_DIGEST_COMPONENT, digest)
    }

    /// Implicit SHA-256 digest component computed over `wire`.
    pub fn implicit_sha256_digest_of(wire: &[u8]) -> Self {
        let digest = sha256_digest(wire);
        Self {
            block: Block::new(IMPLICIT_SHA256_DIGEST_COMPONENT, &digest),
        }
    }

    /// TLV type number.
    pub fn type_number(&self) -> u64 {
        self.block.type_number()
    }

    /// Value bytes.
    pub fn value(&self) -> &[u8] {
        self.block.value()
    }

    /// Value bytes as a shared buffer.
    pub fn value_bytes(&self) -> Bytes {
        self.block.value_bytes()
    }

    /// Length of the value in bytes.
    pub fn value_len(&self) -> usize {
        self.block.value().len()
    }

    /// Complete TLV encoding of this component.
    pub fn wire(&self) -> &Bytes {
        self.block.wire()
    }

    /// The underlying block.
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// True for a generic (type 8) component.
    pub fn is_generic(&self) -> bool {
        self.type_number() == GENERIC_NAME_COMPONENT
    }

    /// True for an implicit SHA-256 digest (type 1) component.
    pub fn is_implicit_sha256_digest(&self) -> bool {
        self.type_number() == IMPLICIT_SHA256_DIGEST_COMPONENT
    }

    /// True if the value is a 1, 2, 4 or 8 byte nonNegativeInteger.
    pub fn is_number(&self) -> bool {
        self.is_generic() && matches!(self.value_len(), 1 | 2 | 4 | 8)
    }

    /// True if the value is `marker` followed by a nonNegativeInteger.
    pub fn is_number_with_marker(&self, marker: u8) -> bool {
        let value = self.value();
        self.is_generic()
            && value.first() == Some(&marker)
            && matches!(value.len() - 1, 1 | 2 | 4 | 8)
    }

    /// Interpret the value as a nonNegativeInteger.
    pub fn to_number(&self) -> Result<u64, NameError> {
        if !self.is_generic() {
            return Err(NameError::NotNumber);
        }
        read_non_negative_integer(self.value())
    }

    /// Interpret the value as `marker` followed by a nonNegativeInteger.
    pub fn to_number_with_marker(&self, marker: u8) -> Result<u64, NameError> {
        let value = self.value();
        match value.first() {
            Some(&first) if first == marker && self.is_generic() => {
                read_non_negative_integer(&value[1..])
            }
            first => Err(NameError::MarkerMismatch {
                expected: marker,
                actual: first.copied(),
            }),
        }
    }

    /// The naming-convention marker of a marker-prefixed number, if any.
    ///
    /// A two-byte value starting with `0x00` is also a plain number; it is
    /// reported as a segment.
    pub fn marker(&self) -> Option<Marker> {
        let marker = Marker::from_byte(*self.value().first()?)?;
        self.is_number_with_marker(marker.byte()).then_some(marker)
    }

    /// True if this is a version component.
    pub fn is_version(&self) -> bool {
        self.is_number_with_marker(Marker::Version.byte())
    }

    /// The version carried by this component.
    pub fn to_version(&self) -> Result<u64, NameError> {
        self.to_number_with_marker(Marker::Version.byte())
    }

    /// True if this is a segment number component.
    pub fn is_segment(&self) -> bool {
        self.is_number_with_marker(Marker::Segment.byte())
    }

    /// The segment number carried by this component.
    pub fn to_segment(&self) -> Result<u64, NameError> {
        self.to_number_with_marker(Marker::Segment.byte())
    }

    /// True if this is a segment byte offset component.
    pub fn is_segment_offset(&self) -> bool {
        self.is_number_with_marker(Marker::SegmentOffset.byte())
    }

    /// The segment byte offset carried by this component.
    pub fn to_segment_offset(&self) -> Result<u64, NameError> {
        self.to_number_with_marker(Marker::SegmentOffset.byte())
    }

    /// True if this is a timestamp component.
    pub fn is_timestamp(&self) -> bool {
        self.is_number_with_marker(Marker::Timestamp.byte())
    }

    /// Timestamp as wall-clock time.
    pub fn to_timestamp(&self) -> Result<SystemTime, NameError> {
        let micros = self.to_number_with_marker(Marker::Timestamp.byte())?;
        Ok(UNIX_EPOCH + Duration::from_micros(micros))
    }

    /// True if this is a sequence number component.
    pub fn is_sequence_number(&self) -> bool {
        self.is_number_with_marker(Marker::SequenceNumber.byte())
    }

    /// The sequence number carried by this component.
    pub fn to_sequence_number(&self) -> Result<u64, NameError> {
        self.to_number_with_marker(Marker::SequenceNumber.byte())
    }

    /// Next component in canonical order at the same value width.
    ///
    /// The value is incremented as a big-endian integer. When every byte
    /// carries over (all `0xFF`, or an empty value) the result is `len + 1`
    /// zero bytes, which is greater because it is longer. The one exception
    /// is an all-`0xFF` digest: nothing of digest type follows it, so the
    /// successor is the empty generic component, the smallest of the next type.
    pub fn successor(&self) -> Self {
        let mut next = self.value().to_vec();
        let mut overflow = true;
        for byte in next.iter_mut().rev() {
            *byte = byte.wrapping_add(1);
            if *byte != 0 {
                overflow = false;
                break;
            }
        }

        if !overflow {
            return Self {
                block: Block::new(self.type_number(), &next),
            };
        }

        trace!(
            type_number = self.type_number(),
            len = self.value_len(),
            "component successor overflowed"
        );
        if self.is_implicit_sha256_digest() {
            return Self::new(&[]);
        }
        Self {
            block: Block::new(self.type_number(), &vec![0u8; next.len() + 1]),
        }
    }

    /// Compare in canonical component order.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.type_number()
            .cmp(&other.type_number())
            .then_with(|| self.value_len().cmp(&other.value_len()))
            .then_with(|| self.value().cmp(other.value()))
    }

    /// Escaped URI form of this component.
    pub fn to_uri(&self) -> String {
        let mut out = String::with_capacity(self.value_len() * 3);
        write_component_uri(self, &mut out);
        out
    }

    /// Append this component's TLV to `out`.
    pub fn encode_to(&self, out: &mut Vec<u8>) -> usize {
        out.extend_from_slice(self.wire());
        self.wire().len()
    }

    /// Copy into a fresh buffer shared with nothing else.
    pub fn deep_copy(&self) -> Self {
        Self {
            block: Block::new(self.type_number(), self.value()),
        }
    }
}

fn check_component(type_number: u64, value_len: usize) -> Result<(), NameError> {
    match type_number {
        GENERIC_NAME_COMPONENT => Ok(()),
        IMPLICIT_SHA256_DIGEST_COMPONENT if value_len == SHA256_DIGEST_SIZE => Ok(()),
        IMPLICIT_SHA256_DIGEST_COMPONENT => Err(NameError::InvalidDigestLength(value_len)),
        other => Err(NameError::InvalidComponentType(other)),
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.type_number() == other.type_number() && self.value() == other.value()
    }
}

impl Eq for Component {}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for Component {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.wire()[..].hash(state);
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component({})", self.to_uri())
    }
}

impl FromStr for Component {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_escaped_str(s)
    }
}

impl From<&[u8]> for Component {
    fn from(value: &[u8]) -> Self {
        Self::new(value)
    }
}

impl From<Vec<u8>> for Component {
    fn from(value: Vec<u8>) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for Component {
    /// Generic component holding the raw UTF-8 bytes (no un-escaping).
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Component {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Component {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
