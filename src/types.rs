//! TLV type numbers and naming-convention markers shared by the codec.

/// Outer block type of an encoded name.
pub const NAME: u64 = 7;

/// Type of a generic (opaque bytes) name component.
pub const GENERIC_NAME_COMPONENT: u64 = 8;

/// Type of a component carrying the SHA-256 digest of a packet.
pub const IMPLICIT_SHA256_DIGEST_COMPONENT: u64 = 1;

/// Size in bytes of an implicit SHA-256 digest component value.
pub const SHA256_DIGEST_SIZE: usize = 32;

/// One-byte prefixes that tag a numeric component with its meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Segment number (`0x00`)
    Segment,
    /// Byte offset of a segment (`0xFB`)
    SegmentOffset,
    /// Timestamp in microseconds since the UNIX epoch (`0xFC`)
    Timestamp,
    /// Version number (`0xFD`)
    Version,
    /// Sequence number (`0xFE`)
    SequenceNumber,
}

impl Marker {
    /// The marker byte written in front of the number.
    pub fn byte(self) -> u8 {
        match self {
            Marker::Segment => 0x00,
            Marker::SegmentOffset => 0xFB,
            Marker::Timestamp => 0xFC,
            Marker::Version => 0xFD,
            Marker::SequenceNumber => 0xFE,
        }
    }

    /// Map a marker byte back to its convention.
    pub fn from_byte(byte: u8) -> Option<Marker> {
        match byte {
            0x00 => Some(Marker::Segment),
            0xFB => Some(Marker::SegmentOffset),
            0xFC => Some(Marker::Timestamp),
            0xFD => Some(Marker::Version),
            0xFE => Some(Marker::SequenceNumber),
            _ => None,
        }
    }
}
