//! URI normalization and splitting for names.

use tracing::debug;

use crate::core::component::Component;
use crate::error::NameError;
use crate::uri::escape::component_from_escaped;

/// The only scheme accepted in front of a name URI.
pub const SCHEME: &str = "ndn";

/// Reduce a name URI to its slash-separated component list.
///
/// This function:
/// 1. Trims surrounding whitespace
/// 2. Strips an `ndn:` scheme (a colon before the first slash marks a scheme)
/// 3. Strips a `//authority` part
/// 4. Strips one leading slash
///
/// # Examples
///
/// ```
/// use ndn_name::uri::normalize_uri;
///
/// assert_eq!(normalize_uri(" ndn:/a/b ").unwrap(), "a/b");
/// assert_eq!(normalize_uri("ndn://host/a/b").unwrap(), "a/b");
/// assert_eq!(normalize_uri("/").unwrap(), "");
/// assert!(normalize_uri("http:/a").is_err());
/// ```
pub fn normalize_uri(uri: &str) -> Result<&str, NameError> {
    let mut rest = uri.trim();

    if let Some(colon) = rest.find(':') {
        let before_slash = rest.find('/').map_or(true, |slash| colon < slash);
        if before_slash {
            let scheme = &rest[..colon];
            if !scheme.eq_ignore_ascii_case(SCHEME) {
                debug!(uri, scheme, "rejecting name URI with unsupported scheme");
                return Err(NameError::InvalidUri(format!(
                    "unsupported scheme '{}'",
                    scheme
                )));
            }
            rest = rest[colon + 1..].trim();
        }
    }

    if let Some(after_authority) = rest.strip_prefix("//") {
        // An authority with no path is the empty name.
        rest = match after_authority.find('/') {
            Some(slash) => after_authority[slash + 1..].trim(),
            None => "",
        };
    } else if let Some(stripped) = rest.strip_prefix('/') {
        rest = stripped.trim();
    }

    Ok(rest)
}

/// Parse a name URI into its components.
///
/// A trailing slash is ignored; an empty segment between two slashes is an
/// error because an empty component is written `...`.
pub fn parse_components(uri: &str) -> Result<Vec<Component>, NameError> {
    let path = normalize_uri(uri)?;
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        return Ok(Vec::new());
    }

    path.split('/')
        .map(component_from_escaped)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| {
            debug!(uri, error = %err, "failed to parse name URI");
            err
        })
}
