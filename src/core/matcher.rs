//! Prefix matching over names.
//!
//! These helpers answer "which of these names covers that one" without
//! building any index; callers that need a table build it on top.

use crate::core::name::Name;

/// Check if `prefix` is a prefix of `name`.
///
/// This is a convenience wrapper over [`Name::is_prefix_of`].
pub fn name_has_prefix(name: &Name, prefix: &Name) -> bool {
    prefix.is_prefix_of(name)
}

/// Find the longest candidate that is a prefix of `query`.
///
/// Ties between equal candidates resolve to the first one seen.
///
/// # Examples
///
/// ```
/// use ndn_name::{longest_prefix_match, Name};
///
/// let routes: Vec<Name> = ["/", "/video", "/video/clip", "/audio"]
///     .iter()
///     .map(|uri| uri.parse().unwrap())
///     .collect();
/// let query: Name = "/video/clip/%FD%01".parse().unwrap();
///
/// let best = longest_prefix_match(&routes, &query).unwrap();
/// assert_eq!(best.to_uri(), "/video/clip");
/// ```
pub fn longest_prefix_match<'a, I>(candidates: I, query: &Name) -> Option<&'a Name>
where
    I: IntoIterator<Item = &'a Name>,
{
    let mut best: Option<&'a Name> = None;
    for candidate in candidates {
        if !candidate.is_prefix_of(query) {
            continue;
        }
        if best.map_or(true, |b| candidate.len() > b.len()) {
            best = Some(candidate);
        }
    }
    best
}

/// Every candidate that is a prefix of `query`, shortest first.
pub fn matching_prefixes<'a, I>(candidates: I, query: &Name) -> Vec<&'a Name>
where
    I: IntoIterator<Item = &'a Name>,
{
    let mut matches: Vec<&'a Name> = candidates
        .into_iter()
        .filter(|candidate| candidate.is_prefix_of(query))
        .collect();
    matches.sort_by_key(|candidate| candidate.len());
    matches
}
