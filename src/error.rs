//! Error types for name encoding, decoding and parsing.

use thiserror::Error;

/// Errors that can occur while decoding, parsing or accessing a name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The TLV type of a block is not the one the caller expected.
    #[error("Unexpected TLV type {actual}, expected {expected}")]
    UnexpectedType {
        /// Type number the decoder was looking for
        expected: u64,
        /// Type number found on the wire
        actual: u64,
    },

    /// The buffer ended inside a type or length field.
    #[error("Truncated TLV: buffer ended inside a type or length field")]
    Truncated,

    /// A declared length runs past the end of the buffer.
    #[error("TLV length {declared} exceeds the {remaining} remaining bytes")]
    LengthOverrun {
        /// Length declared by the block header
        declared: u64,
        /// Bytes actually left in the buffer
        remaining: usize,
    },

    /// A VAR-NUMBER was not written in its shortest form.
    #[error("Non-minimal VAR-NUMBER encoding")]
    NonMinimalVarNumber,

    /// Bytes follow the outer block.
    #[error("{0} trailing bytes after TLV block")]
    TrailingBytes(usize),

    /// A block inside a name is not a name component.
    #[error("Invalid name component type: {0}")]
    InvalidComponentType(u64),

    /// An implicit SHA-256 digest component does not hold exactly 32 bytes.
    #[error("Implicit SHA-256 digest must be 32 bytes, got {0}")]
    InvalidDigestLength(usize),

    /// Bounds-checked access outside `[0, len)`.
    #[error("Component index {index} out of range for name of {len} components")]
    OutOfRange {
        /// Index as supplied by the caller (before wraparound)
        index: isize,
        /// Number of components in the name
        len: usize,
    },

    /// The URI string cannot be interpreted as a name.
    #[error("Invalid name URI: {0}")]
    InvalidUri(String),

    /// A URI segment cannot be interpreted as a component.
    #[error("Invalid name component: {0}")]
    InvalidComponent(String),

    /// The component value is not a valid nonNegativeInteger.
    #[error("Component is not a nonNegativeInteger")]
    NotNumber,

    /// The component does not start with the expected naming-convention marker.
    #[error("Component marker mismatch: expected 0x{expected:02X}, got {actual:?}")]
    MarkerMismatch {
        /// Marker byte the accessor expects
        expected: u8,
        /// First byte of the component, if any
        actual: Option<u8>,
    },
}

impl NameError {
    /// True for errors raised while interpreting the binary wire format.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            NameError::UnexpectedType { .. }
                | NameError::Truncated
                | NameError::LengthOverrun { .. }
                | NameError::NonMinimalVarNumber
                | NameError::TrailingBytes(_)
                | NameError::InvalidComponentType(_)
                | NameError::InvalidDigestLength(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NameError::UnexpectedType { expected: 7, actual: 6 }.to_string(),
            "Unexpected TLV type 6, expected 7"
        );

        assert_eq!(
            NameError::OutOfRange { index: -4, len: 3 }.to_string(),
            "Component index -4 out of range for name of 3 components"
        );

        assert_eq!(
            NameError::MarkerMismatch { expected: 0xFD, actual: Some(0x00) }.to_string(),
            "Component marker mismatch: expected 0xFD, got Some(0)"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NameError::Truncated, NameError::Truncated);
        assert_ne!(NameError::Truncated, NameError::NonMinimalVarNumber);
    }

    #[test]
    fn test_decode_error_classification() {
        assert!(NameError::Truncated.is_decode_error());
        assert!(NameError::InvalidDigestLength(31).is_decode_error());
        assert!(!NameError::InvalidUri("x".to_string()).is_decode_error());
        assert!(!NameError::OutOfRange { index: 0, len: 0 }.is_decode_error());
    }
}
