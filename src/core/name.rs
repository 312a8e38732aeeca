//! Hierarchical names: ordered sequences of components.
//!
//! A name is encoded as a `NAME` TLV whose value is the concatenation of its
//! component TLVs. Names compare component by component, and a strict prefix
//! sorts before every name it is a prefix of.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use tracing::debug;

use crate::core::block::{tlv_len, write_var_number, Block};
use crate::core::component::Component;
use crate::error::NameError;
use crate::types::{GENERIC_NAME_COMPONENT, NAME};
use crate::uri::escape::write_component_uri;
use crate::uri::parser::parse_components;

/// Sub-ranges and prefixes of a name are names themselves.
pub type PartialName = Name;

/// A hierarchical name.
///
/// Components are appended one at a time and never modified in place.
/// Sub-names share component buffers with their source; use
/// [`Name::deep_copy`] for a name backed by its own buffer.
///
/// # Examples
///
/// ```
/// use ndn_name::Name;
///
/// let mut name: Name = "/video/clip".parse()?;
/// name.append_version(3).append_segment(0);
/// assert_eq!(name.len(), 4);
/// assert_eq!(name.to_uri(), "/video/clip/%FD%03/%00%00");
///
/// let prefix = name.prefix(2);
/// assert!(prefix.is_prefix_of(&name));
/// assert!(prefix < name);
/// # Ok::<(), ndn_name::NameError>(())
/// ```
#[derive(Clone, Default)]
pub struct Name {
    components: Vec<Component>,
    // Cached outer encoding; cleared by every mutation.
    wire: Option<Bytes>,
}

impl Name {
    /// The empty name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a name from its wire encoding.
    pub fn from_wire(wire: Bytes) -> Result<Self, NameError> {
        let mut name = Self::new();
        name.wire_decode(wire)?;
        Ok(name)
    }

    /// Parse a name from its URI form.
    pub fn from_uri(uri: &str) -> Result<Self, NameError> {
        Ok(Self {
            components: parse_components(uri)?,
            wire: None,
        })
    }

    /// Replace `self` with the name encoded in `wire`.
    ///
    /// Components reference `wire` without copying. On error `self` is left
    /// unchanged.
    pub fn wire_decode(&mut self, wire: Bytes) -> Result<(), NameError> {
        let (block, components) = decode_components(wire).map_err(|err| {
            debug!(error = %err, "rejecting name wire encoding");
            err
        })?;
        self.components = components;
        self.wire = Some(block.wire().clone());
        Ok(())
    }

    /// Canonical wire encoding, cached until the next mutation.
    pub fn wire_encode(&mut self) -> Bytes {
        if let Some(wire) = &self.wire {
            return wire.clone();
        }
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_to(&mut out);
        let wire = Bytes::from(out);
        self.wire = Some(wire.clone());
        wire
    }

    /// Append the canonical encoding to `out` without touching the cache.
    pub fn encode_to(&self, out: &mut Vec<u8>) -> usize {
        if let Some(wire) = &self.wire {
            out.extend_from_slice(wire);
            return wire.len();
        }
        let mut written = write_var_number(NAME, out);
        written += write_var_number(self.value_len() as u64, out);
        for component in &self.components {
            written += component.encode_to(out);
        }
        written
    }

    /// Size of the canonical encoding in bytes.
    pub fn encoded_len(&self) -> usize {
        tlv_len(NAME, self.value_len())
    }

    fn value_len(&self) -> usize {
        self.components.iter().map(|c| c.wire().len()).sum()
    }

    /// True when a cached wire encoding backs this name.
    pub fn has_wire(&self) -> bool {
        self.wire.is_some()
    }

    /// Copy every component into fresh buffers shared with no other name.
    pub fn deep_copy(&self) -> Self {
        self.components.iter().map(Component::deep_copy).collect()
    }

    /// URI form: `/` for the empty name, `/c1/c2/...` otherwise.
    pub fn to_uri(&self) -> String {
        if self.components.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for component in &self.components {
            out.push('/');
            write_component_uri(component, &mut out);
        }
        out
    }

    /// True for the name with no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// All components in order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Component at `i`; negative `i` counts from the end (`-1` is the last).
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range after wraparound. Use [`Name::at`] for a
    /// checked lookup.
    pub fn get(&self, i: isize) -> &Component {
        let idx = if i < 0 {
            (self.len() as isize + i) as usize
        } else {
            i as usize
        };
        &self.components[idx]
    }

    /// Bounds-checked [`Name::get`].
    pub fn at(&self, i: isize) -> Result<&Component, NameError> {
        let len = self.len() as isize;
        let idx = if i < 0 { len + i } else { i };
        if idx < 0 || idx >= len {
            return Err(NameError::OutOfRange {
                index: i,
                len: self.len(),
            });
        }
        Ok(&self.components[idx as usize])
    }

    /// First component, if any.
    pub fn first(&self) -> Option<&Component> {
        self.components.first()
    }

    /// Last component, if any.
    pub fn last(&self) -> Option<&Component> {
        self.components.last()
    }

    /// Iterate over the components, first to last.
    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }

    /// Components `[start, start + count)`.
    ///
    /// A negative `start` counts from the end and is clamped at 0; a `start`
    /// past the end gives the empty name. `count` is clamped at the end, and
    /// `None` takes everything through the end.
    pub fn sub_name(&self, start: isize, count: Option<usize>) -> PartialName {
        let range = self.range(start, count);
        self.components[range].iter().cloned().collect()
    }

    /// First `n` components, or for negative `n` all but the last `|n|`.
    ///
    /// `prefix(n)` with `n < -len()` is the empty name.
    pub fn prefix(&self, n: isize) -> PartialName {
        if n >= 0 {
            return self.sub_name(0, Some(n as usize));
        }
        let keep = self.len() as isize + n;
        if keep <= 0 {
            return Self::new();
        }
        self.sub_name(0, Some(keep as usize))
    }

    fn range(&self, start: isize, count: Option<usize>) -> std::ops::Range<usize> {
        let len = self.len();
        let start = if start < 0 {
            (len as isize + start).max(0) as usize
        } else {
            (start as usize).min(len)
        };
        let end = match count {
            Some(count) => start.saturating_add(count).min(len),
            None => len,
        };
        start..end
    }

    /// Append a component.
    pub fn append(&mut self, component: Component) -> &mut Self {
        self.components.push(component);
        self.wire = None;
        self
    }

    /// Alias of [`Name::append`].
    pub fn push(&mut self, component: Component) {
        self.append(component);
    }

    /// Append a generic component holding `value`.
    pub fn append_bytes(&mut self, value: &[u8]) -> &mut Self {
        self.append(Component::new(value))
    }

    /// Append a generic component holding the UTF-8 bytes of `value`, unescaped.
    pub fn append_str(&mut self, value: &str) -> &mut Self {
        self.append(Component::new(value.as_bytes()))
    }

    /// Append a block: a generic component block as is, any other block as
    /// the value of a new generic component.
    pub fn append_block(&mut self, block: Block) -> &mut Self {
        let component = match block.type_number() {
            GENERIC_NAME_COMPONENT => Component::from_generic_block(block),
            _ => Component::new(block.wire()),
        };
        self.append(component)
    }

    /// Append a nonNegativeInteger component.
    pub fn append_number(&mut self, number: u64) -> &mut Self {
        self.append(Component::from_number(number))
    }

    /// Append `marker` followed by a nonNegativeInteger.
    pub fn append_number_with_marker(&mut self, marker: u8, number: u64) -> &mut Self {
        self.append(Component::from_number_with_marker(marker, number))
    }

    /// Append a version component.
    pub fn append_version(&mut self, version: u64) -> &mut Self {
        self.append(Component::from_version(version))
    }

    /// Append a version equal to the current time in milliseconds since the UNIX epoch.
    pub fn append_version_now(&mut self) -> &mut Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        self.append_version(millis)
    }

    /// Append a segment number component.
    pub fn append_segment(&mut self, segment: u64) -> &mut Self {
        self.append(Component::from_segment(segment))
    }

    /// Append a segment byte-offset component.
    pub fn append_segment_offset(&mut self, offset: u64) -> &mut Self {
        self.append(Component::from_segment_offset(offset))
    }

    /// Append a timestamp component (microseconds since the UNIX epoch).
    pub fn append_timestamp(&mut self, time: SystemTime) -> &mut Self {
        self.append(Component::from_timestamp(time))
    }

    /// Append the current wall-clock time as a timestamp.
    pub fn append_timestamp_now(&mut self) -> &mut Self {
        self.append_timestamp(SystemTime::now())
    }

    /// Append a sequence number component.
    pub fn append_sequence_number(&mut self, seq_no: u64) -> &mut Self {
        self.append(Component::from_sequence_number(seq_no))
    }

    /// Append an implicit SHA-256 digest; fails unless `digest` is 32 bytes.
    pub fn append_implicit_sha256_digest(&mut self, digest: &[u8]) -> Result<&mut Self, NameError> {
        let component = Component::from_implicit_sha256_digest(digest)?;
        Ok(self.append(component))
    }

    /// Append every component of `other`, in order.
    pub fn append_name(&mut self, other: &Name) -> &mut Self {
        self.components.extend_from_slice(&other.components);
        self.wire = None;
        self
    }

    /// Reset to the empty name.
    pub fn clear(&mut self) {
        self.components.clear();
        self.wire = None;
    }

    /// Next name in canonical order.
    ///
    /// The empty name's successor is `/%00`. Otherwise the last component is
    /// replaced by its [`Component::successor`].
    pub fn successor(&self) -> Self {
        let Some(last) = self.last() else {
            return std::iter::once(Component::new(&[0x00])).collect();
        };
        let mut next = self.prefix(-1);
        next.append(last.successor());
        next
    }

    /// True if every component of `self` matches the start of `other`.
    pub fn is_prefix_of(&self, other: &Name) -> bool {
        other.components.starts_with(&self.components)
    }

    /// Component-wise equality; the wire cache is ignored.
    pub fn equals(&self, other: &Name) -> bool {
        self.components == other.components
    }

    /// Canonical comparison of two names.
    pub fn compare(&self, other: &Name) -> Ordering {
        self.compare_range(0, None, other, 0, None)
    }

    /// Compare `self[pos1, pos1 + count1)` with `other[pos2, pos2 + count2)`.
    ///
    /// Positions past the end clamp to the end; counts clamp as in
    /// [`Name::sub_name`].
    pub fn compare_range(
        &self,
        pos1: usize,
        count1: Option<usize>,
        other: &Name,
        pos2: usize,
        count2: Option<usize>,
    ) -> Ordering {
        let lhs = &self.components[self.range(clamp_isize(pos1), count1)];
        let rhs = &other.components[other.range(clamp_isize(pos2), count2)];
        lhs.cmp(rhs)
    }
}

fn clamp_isize(pos: usize) -> isize {
    isize::try_from(pos).unwrap_or(isize::MAX)
}

fn decode_components(wire: Bytes) -> Result<(Block, Vec<Component>), NameError> {
    let block = Block::decode(wire)?;
    block.expect_type(NAME)?;
    let components = block
        .elements()
        .map(|element| element.and_then(Component::from_block))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((block, components))
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Name {}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components.hash(state);
    }
}

impl Index<isize> for Name {
    type Output = Component;

    fn index(&self, i: isize) -> &Component {
        self.get(i)
    }
}

impl<'a> IntoIterator for &'a Name {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

impl FromIterator<Component> for Name {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().collect(),
            wire: None,
        }
    }
}

impl Extend<Component> for Name {
    fn extend<I: IntoIterator<Item = Component>>(&mut self, iter: I) {
        self.components.extend(iter);
        self.wire = None;
    }
}

impl From<Vec<Component>> for Name {
    fn from(components: Vec<Component>) -> Self {
        Self {
            components,
            wire: None,
        }
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uri(s)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.to_uri())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Name {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(uri: &str) -> Name {
        uri.parse().unwrap()
    }

    #[test]
    fn test_empty_name() {
        let empty = Name::new();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.to_uri(), "/");
        assert!(empty.is_prefix_of(&name("/a")));
        assert!(empty.is_prefix_of(&empty));
    }

    #[test]
    fn test_wire_layout() {
        let mut n = name("/a/bc");
        assert_eq!(
            &n.wire_encode()[..],
            &[0x07, 0x07, 0x08, 0x01, b'a', 0x08, 0x02, b'b', b'c']
        );
        assert_eq!(n.encoded_len(), 9);
        assert_eq!(&Name::new().wire_encode()[..], &[0x07, 0x00]);
    }

    #[test]
    fn test_wire_cache_lifecycle() {
        let mut n = name("/a");
        assert!(!n.has_wire());

        let first = n.wire_encode();
        assert!(n.has_wire());
        let second = n.wire_encode();
        assert_eq!(first.as_ptr(), second.as_ptr());

        n.append_str("b");
        assert!(!n.has_wire());
        assert_ne!(n.wire_encode(), first);

        n.clear();
        assert!(!n.has_wire());
        assert!(n.is_empty());
    }

    #[test]
    fn test_decode_is_zero_copy() {
        let wire = Bytes::from(vec![0x07, 0x03, 0x08, 0x01, b'x']);
        let n = Name::from_wire(wire.clone()).unwrap();
        assert!(n.has_wire());
        assert_eq!(n.get(0).value().as_ptr(), wire[4..].as_ptr());
    }

    #[test]
    fn test_decode_failure_leaves_name_unchanged() {
        let mut n = name("/keep/me");
        let result = n.wire_decode(Bytes::from_static(&[0x06, 0x00]));
        assert_eq!(result, Err(NameError::UnexpectedType { expected: 7, actual: 6 }));
        assert_eq!(n, name("/keep/me"));
    }

    #[test]
    fn test_negative_indices() {
        let n = name("/a/b/c");
        assert_eq!(n.get(-1).value(), b"c");
        assert_eq!(n[-3].value(), b"a");
        assert_eq!(n[1].value(), b"b");
        assert_eq!(n.at(-3).unwrap().value(), b"a");
        assert_eq!(n.at(3), Err(NameError::OutOfRange { index: 3, len: 3 }));
        assert_eq!(n.at(-4), Err(NameError::OutOfRange { index: -4, len: 3 }));
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range_panics() {
        let n = name("/a");
        let _ = n.get(1);
    }

    #[test]
    fn test_sub_name() {
        let n = name("/a/b/c");
        assert_eq!(n.sub_name(1, None), name("/b/c"));
        assert_eq!(n.sub_name(1, Some(1)), name("/b"));
        assert_eq!(n.sub_name(-1, None), name("/c"));
        assert_eq!(n.sub_name(-10, Some(2)), name("/a/b"));
        assert_eq!(n.sub_name(1, Some(100)), name("/b/c"));
        assert_eq!(n.sub_name(3, None), Name::new());
        assert_eq!(n.sub_name(10, Some(1)), Name::new());
    }

    #[test]
    fn test_prefix() {
        let n = name("/a/b/c");
        assert_eq!(n.prefix(2), name("/a/b"));
        assert_eq!(n.prefix(-1), name("/a/b"));
        assert_eq!(n.prefix(0), Name::new());
        assert_eq!(n.prefix(-3), Name::new());
        assert_eq!(n.prefix(-4), Name::new());
        assert_eq!(n.prefix(10), n);
    }

    #[test]
    fn test_sub_name_shares_buffer() {
        let n = Name::from_wire(name("/a/b").wire_encode()).unwrap();
        let sub = n.sub_name(1, None);
        assert_eq!(sub.get(0).value().as_ptr(), n.get(1).value().as_ptr());

        let copy = sub.deep_copy();
        assert_eq!(copy, sub);
        assert_ne!(copy.get(0).value().as_ptr(), n.get(1).value().as_ptr());
    }

    #[test]
    fn test_compare_range() {
        let lhs = name("/x/a/b");
        let rhs = name("/a/b/y");
        assert_eq!(lhs.compare_range(1, Some(2), &rhs, 0, Some(2)), Ordering::Equal);
        assert_eq!(lhs.compare_range(1, None, &rhs, 0, None), Ordering::Less);
        assert_eq!(lhs.compare_range(10, None, &rhs, 3, None), Ordering::Equal);
    }

    #[test]
    fn test_successor() {
        assert_eq!(Name::new().successor(), name("/%00"));
        assert_eq!(name("/a/b").successor(), name("/a/c"));
        assert_eq!(name("/a/%FF%FF").successor(), name("/a/%00%00%00"));
    }

    #[test]
    fn test_append_block() {
        let mut n = Name::new();
        let generic = Block::new(GENERIC_NAME_COMPONENT, b"x");
        let shared = generic.wire().clone();
        n.append_block(generic);
        n.append_block(Block::new(0x80, b"y"));
        assert_eq!(n.get(0).value(), b"x");
        assert!(n.get(0).is_generic());
        assert_eq!(n.get(0).wire().as_ptr(), shared.as_ptr());
        assert_eq!(n.get(1).value(), &[0x80, 0x01, b'y']);
        assert!(n.get(1).is_generic());
    }

    #[test]
    fn test_append_name_and_extend() {
        let mut n = name("/a");
        n.append_name(&name("/b/c"));
        assert_eq!(n, name("/a/b/c"));

        n.extend(vec![Component::from("d")]);
        assert_eq!(n, name("/a/b/c/d"));
    }

    #[test]
    fn test_append_now_helpers() {
        let mut n = Name::new();
        n.append_version_now().append_timestamp_now();
        assert!(n.get(0).is_version());
        assert!(n.get(1).is_timestamp());
        assert!(n.get(0).to_version().unwrap() > 0);
    }
}
