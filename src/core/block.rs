//! TLV block codec: VAR-NUMBER, nonNegativeInteger and the `Block` view.
//!
//! Every block is `TYPE LENGTH VALUE`, where TYPE and LENGTH are VAR-NUMBERs:
//! - `0..=252`: one byte
//! - `253..=0xFFFF`: `0xFD` followed by 2 bytes big-endian
//! - `0x1_0000..=0xFFFF_FFFF`: `0xFE` followed by 4 bytes big-endian
//! - larger: `0xFF` followed by 8 bytes big-endian
//!
//! Only the shortest form is produced, and only the shortest form is accepted.

use bytes::Bytes;

use crate::error::NameError;

/// Number of bytes `write_var_number` emits for `n`.
pub fn var_number_len(n: u64) -> usize {
    match n {
        0..=252 => 1,
        253..=0xFFFF => 3,
        0x1_0000..=0xFFFF_FFFF => 5,
        _ => 9,
    }
}

/// Append the shortest VAR-NUMBER encoding of `n`, returning the bytes written.
pub fn write_var_number(n: u64, out: &mut Vec<u8>) -> usize {
    match n {
        0..=252 => out.push(n as u8),
        253..=0xFFFF => {
            out.push(253);
            out.extend_from_slice(&(n as u16).to_be_bytes());
        }
        0x1_0000..=0xFFFF_FFFF => {
            out.push(254);
            out.extend_from_slice(&(n as u32).to_be_bytes());
        }
        _ => {
            out.push(255);
            out.extend_from_slice(&n.to_be_bytes());
        }
    }
    var_number_len(n)
}

/// Read a VAR-NUMBER at `*idx`, advancing `idx` past it.
pub fn read_var_number(buf: &[u8], idx: &mut usize) -> Result<u64, NameError> {
    let first = *buf.get(*idx).ok_or(NameError::Truncated)?;
    *idx += 1;

    let (width, min) = match first {
        0..=252 => return Ok(u64::from(first)),
        253 => (2, 253u64),
        254 => (4, 0x1_0000),
        255 => (8, 0x1_0000_0000),
    };

    let bytes = buf.get(*idx..*idx + width).ok_or(NameError::Truncated)?;
    let n = bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
    *idx += width;

    if n < min {
        return Err(NameError::NonMinimalVarNumber);
    }
    Ok(n)
}

/// Number of bytes `write_non_negative_integer` emits for `n` (1, 2, 4 or 8).
pub fn non_negative_integer_len(n: u64) -> usize {
    match n {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x1_0000..=0xFFFF_FFFF => 4,
        _ => 8,
    }
}

/// Append `n` big-endian in the smallest of 1, 2, 4 or 8 bytes.
///
/// Larger values always get at least as many bytes as smaller ones, so the
/// encoding sorts numerically under length-then-bytes ordering.
pub fn write_non_negative_integer(n: u64, out: &mut Vec<u8>) -> usize {
    let len = non_negative_integer_len(n);
    out.extend_from_slice(&n.to_be_bytes()[8 - len..]);
    len
}

/// Interpret a whole value as a nonNegativeInteger.
pub fn read_non_negative_integer(value: &[u8]) -> Result<u64, NameError> {
    match value.len() {
        1 | 2 | 4 | 8 => Ok(value.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))),
        _ => Err(NameError::NotNumber),
    }
}

/// Size of a complete TLV with the given type and value length.
pub fn tlv_len(type_number: u64, value_len: usize) -> usize {
    var_number_len(type_number) + var_number_len(value_len as u64) + value_len
}

/// Append a complete TLV, returning the bytes written.
pub fn write_tlv(type_number: u64, value: &[u8], out: &mut Vec<u8>) -> usize {
    let mut written = write_var_number(type_number, out);
    written += write_var_number(value.len() as u64, out);
    out.extend_from_slice(value);
    written + value.len()
}

/// One TLV block backed by a shared buffer.
///
/// `wire` covers the whole block (header and value). Blocks read out of a
/// larger buffer share it instead of copying.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Block {
    type_number: u64,
    wire: Bytes,
    value_offset: usize,
}

impl Block {
    /// Encode a new block into its own buffer.
    pub fn new(type_number: u64, value: &[u8]) -> Self {
        let mut out = Vec::with_capacity(tlv_len(type_number, value.len()));
        write_tlv(type_number, value, &mut out);
        Self {
            type_number,
            value_offset: out.len() - value.len(),
            wire: Bytes::from(out),
        }
    }

    /// Parse a buffer holding exactly one block.
    pub fn decode(wire: Bytes) -> Result<Self, NameError> {
        let mut idx = 0usize;
        let block = Self::read_from(&wire, &mut idx)?;
        if idx != wire.len() {
            return Err(NameError::TrailingBytes(wire.len() - idx));
        }
        Ok(block)
    }

    /// Parse the block starting at `*idx`, advancing `idx` past it.
    ///
    /// The returned block's wire is a slice of `buf`.
    pub fn read_from(buf: &Bytes, idx: &mut usize) -> Result<Self, NameError> {
        let start = *idx;
        let type_number = read_var_number(buf, idx)?;
        let declared = read_var_number(buf, idx)?;

        let remaining = buf.len() - *idx;
        if declared > remaining as u64 {
            return Err(NameError::LengthOverrun { declared, remaining });
        }

        let value_offset = *idx - start;
        *idx += declared as usize;

        Ok(Self {
            type_number,
            wire: buf.slice(start..*idx),
            value_offset,
        })
    }

    /// TLV type number.
    pub fn type_number(&self) -> u64 {
        self.type_number
    }

    /// Complete encoding, header included.
    pub fn wire(&self) -> &Bytes {
        &self.wire
    }

    /// Value bytes.
    pub fn value(&self) -> &[u8] {
        &self.wire[self.value_offset..]
    }

    /// Value bytes as a shared slice of the wire.
    pub fn value_bytes(&self) -> Bytes {
        self.wire.slice(self.value_offset..)
    }

    /// Fail unless this block has the given type.
    pub fn expect_type(&self, expected: u64) -> Result<(), NameError> {
        if self.type_number != expected {
            return Err(NameError::UnexpectedType {
                expected,
                actual: self.type_number,
            });
        }
        Ok(())
    }

    /// Iterate over the immediate sub-blocks of the value.
    ///
    /// The iterator yields an error once and then stops if the value is malformed.
    pub fn elements(&self) -> Elements<'_> {
        Elements {
            wire: &self.wire,
            idx: self.value_offset,
            failed: false,
        }
    }
}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Block")
            .field("type", &self.type_number)
            .field("value", &hex::encode(self.value()))
            .finish()
    }
}

/// Iterator over the sub-blocks of a [`Block`].
pub struct Elements<'a> {
    wire: &'a Bytes,
    idx: usize,
    failed: bool,
}

impl Iterator for Elements<'_> {
    type Item = Result<Block, NameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.idx >= self.wire.len() {
            return None;
        }
        let result = Block::read_from(self.wire, &mut self.idx);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}
