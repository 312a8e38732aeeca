//! Percent-escaping of individual name components.

use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;

use crate::core::component::Component;
use crate::core::hasher::{digest_from_hex, digest_to_hex};
use crate::error::NameError;

/// Bytes escaped in a component: everything except ASCII alphanumerics and `+ - . _ ~`.
const COMPONENT_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// URI prefix of an implicit SHA-256 digest component.
pub const DIGEST_PREFIX: &str = "sha256digest=";

/// Append `value` percent-escaped to `out`. Escapes use upper-case hex.
pub fn escape_value(value: &[u8], out: &mut String) {
    out.extend(percent_encode(value, COMPONENT_ESCAPE));
}

/// Decode `%XX` sequences. Malformed sequences are kept literally.
pub fn unescape_segment(segment: &str) -> Vec<u8> {
    percent_decode_str(segment).collect()
}

/// Append the URI form of `component` to `out`.
///
/// A value made only of periods (the empty value included) gets three extra
/// periods so that it cannot be confused with `.`/`..` path segments.
pub fn write_component_uri(component: &Component, out: &mut String) {
    let value = component.value();

    if component.is_implicit_sha256_digest() {
        out.push_str(DIGEST_PREFIX);
        out.push_str(&digest_to_hex(value));
        return;
    }

    if value.iter().all(|&b| b == b'.') {
        out.push_str("...");
    }
    escape_value(value, out);
}

/// Parse one URI segment into a component.
///
/// # Examples
///
/// ```
/// use ndn_name::Component;
///
/// let component = Component::from_escaped_str("hello%20world").unwrap();
/// assert_eq!(component.value(), b"hello world");
///
/// let empty = Component::from_escaped_str("...").unwrap();
/// assert!(empty.value().is_empty());
///
/// assert!(Component::from_escaped_str("..").is_err());
/// ```
pub fn component_from_escaped(segment: &str) -> Result<Component, NameError> {
    if let Some(hex_str) = segment.strip_prefix(DIGEST_PREFIX) {
        let digest = digest_from_hex(hex_str).ok_or_else(|| {
            debug!(segment, "rejecting digest component with invalid hex");
            NameError::InvalidComponent(format!("invalid hex in '{}'", segment))
        })?;
        return Component::from_implicit_sha256_digest(&digest);
    }

    if segment.bytes().all(|b| b == b'.') {
        if segment.len() < 3 {
            debug!(segment, "rejecting dot-only component");
            return Err(NameError::InvalidComponent(format!(
                "'{}' must have at least three periods",
                segment
            )));
        }
        return Ok(Component::new(segment[3..].as_bytes()));
    }

    Ok(Component::new(&unescape_segment(segment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri_of(value: &[u8]) -> String {
        Component::new(value).to_uri()
    }

    #[test]
    fn test_unreserved_pass_through() {
        assert_eq!(uri_of(b"azAZ09+-._~"), "azAZ09+-._~");
    }

    #[test]
    fn test_reserved_escaped_upper_case() {
        assert_eq!(uri_of(b"a/b"), "a%2Fb");
        assert_eq!(uri_of(b"a b"), "a%20b");
        assert_eq!(uri_of(&[0x00, 0xFF]), "%00%FF");
        assert_eq!(uri_of(b"%"), "%25");
    }

    #[test]
    fn test_period_components() {
        assert_eq!(uri_of(b""), "...");
        assert_eq!(uri_of(b"."), "....");
        assert_eq!(uri_of(b".."), ".....");
        assert_eq!(uri_of(b"a."), "a.");

        assert_eq!(component_from_escaped("....").unwrap().value(), b".");
        assert_eq!(component_from_escaped(".....").unwrap().value(), b"..");
    }

    #[test]
    fn test_rejects_short_period_segments() {
        assert!(component_from_escaped("").is_err());
        assert!(component_from_escaped(".").is_err());
        assert!(component_from_escaped("..").is_err());
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape_segment("a%2Fb"), b"a/b".to_vec());
        assert_eq!(unescape_segment("%ff%FF"), vec![0xFF, 0xFF]);
        assert_eq!(unescape_segment("%zz"), b"%zz".to_vec());
    }

    #[test]
    fn test_digest_component_uri() {
        let digest = [0xABu8; 32];
        let component = Component::from_implicit_sha256_digest(&digest).unwrap();
        let uri = component.to_uri();
        assert_eq!(uri, format!("sha256digest={}", "ab".repeat(32)));
        assert_eq!(component_from_escaped(&uri).unwrap(), component);
    }

    #[test]
    fn test_digest_component_errors() {
        assert!(matches!(
            component_from_escaped("sha256digest=xyz"),
            Err(NameError::InvalidComponent(_))
        ));
        assert_eq!(
            component_from_escaped("sha256digest=abcd"),
            Err(NameError::InvalidDigestLength(2))
        );
    }

    #[test]
    fn test_escaped_equals_sign_is_generic() {
        let component = Component::new(b"sha256digest=ab");
        let uri = component.to_uri();
        assert_eq!(uri, "sha256digest%3Dab");
        assert_eq!(component_from_escaped(&uri).unwrap(), component);
    }
}
