//! Content checksums and the exact-duplicate index.
//!
//! Checksums are SHA-256 over the raw content bytes, rendered as lowercase
//! hex. Collision resistance is cryptographic: two different real-world
//! documents are never expected to collide, so digest equality is treated as
//! content identity.
//!
//! The index exists to shrink the similarity engine's input. Looking up a
//! digest is O(1); computing a pairwise similarity row is not. Every digest
//! seen more than once costs the pipeline one lookup instead of a matrix row.

use std::collections::{BTreeMap, BTreeSet};

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a text payload.
pub fn checksum_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Mapping from content checksum to the identities sharing it.
///
/// Pure bookkeeping with no failure modes. The representative for a digest
/// is the lexicographically smallest registered identity, so duplicate links
/// are reproducible no matter the registration order.
#[derive(Debug, Clone, Default)]
pub struct ChecksumIndex {
    by_digest: BTreeMap<String, BTreeSet<String>>,
}

impl ChecksumIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `identity` under `digest`.
    ///
    /// Returns the smallest identity already registered under the digest
    /// (this document is an exact duplicate of it), or `None` when the
    /// digest is new. Callers that register identities in sorted order
    /// always receive the digest's representative.
    pub fn register(&mut self, identity: &str, digest: &str) -> Option<String> {
        let members = self.by_digest.entry(digest.to_string()).or_default();
        let duplicate_of = members.iter().find(|m| m.as_str() != identity).cloned();
        members.insert(identity.to_string());
        duplicate_of
    }

    /// Identities registered under `digest`, in lexicographic order.
    pub fn members(&self, digest: &str) -> Option<&BTreeSet<String>> {
        self.by_digest.get(digest)
    }

    /// Every non-representative identity mapped to its representative.
    ///
    /// Exact duplicates are reported through these links instead of as
    /// similarity-matrix entries; their similarity is 1.0 by definition.
    pub fn duplicate_links(&self) -> BTreeMap<String, String> {
        let mut links = BTreeMap::new();
        for members in self.by_digest.values() {
            let mut iter = members.iter();
            if let Some(representative) = iter.next() {
                for duplicate in iter {
                    links.insert(duplicate.clone(), representative.clone());
                }
            }
        }
        links
    }

    /// Number of distinct digests seen so far.
    pub fn distinct_digests(&self) -> usize {
        self.by_digest.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_is_deterministic_and_hex() {
        let a = checksum_hex("hello world");
        let b = checksum_hex("hello world");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_content_different_checksum() {
        assert_ne!(checksum_hex("hello"), checksum_hex("hello "));
    }

    #[test]
    fn first_registration_is_not_a_duplicate() {
        let mut index = ChecksumIndex::new();
        assert_eq!(index.register("a.md", "digest-1"), None);
        assert_eq!(index.distinct_digests(), 1);
    }

    #[test]
    fn second_registration_links_to_representative() {
        let mut index = ChecksumIndex::new();
        assert_eq!(index.register("a.md", "digest-1"), None);
        assert_eq!(index.register("b.md", "digest-1"), Some("a.md".into()));
        assert_eq!(index.register("c.md", "digest-1"), Some("a.md".into()));

        let links = index.duplicate_links();
        assert_eq!(links.get("b.md"), Some(&"a.md".to_string()));
        assert_eq!(links.get("c.md"), Some(&"a.md".to_string()));
        assert!(!links.contains_key("a.md"));
    }

    #[test]
    fn representative_is_order_independent() {
        let mut forward = ChecksumIndex::new();
        forward.register("a.md", "d");
        forward.register("z.md", "d");

        let mut reverse = ChecksumIndex::new();
        reverse.register("z.md", "d");
        reverse.register("a.md", "d");

        assert_eq!(forward.duplicate_links(), reverse.duplicate_links());
        assert_eq!(
            reverse.duplicate_links().get("z.md"),
            Some(&"a.md".to_string())
        );
    }

    #[test]
    fn distinct_digests_stay_unlinked() {
        let mut index = ChecksumIndex::new();
        index.register("a.md", "digest-1");
        index.register("b.md", "digest-2");
        assert!(index.duplicate_links().is_empty());
        assert_eq!(index.distinct_digests(), 2);
    }
}
