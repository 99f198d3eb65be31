//! Threshold grouping over the similarity matrix.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use similarity::SimilarityMatrix;

use crate::dsu::DisjointSet;

/// Errors produced by the grouping engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GroupingError {
    /// Threshold must be a finite value in [0, 1].
    #[error("threshold must be in [0, 1], got {threshold}")]
    ThresholdOutOfRange { threshold: f32 },
    /// A matrix entry referenced an identity missing from the universe.
    #[error("matrix references unknown identity {identity:?}")]
    UnknownIdentity { identity: String },
}

/// The result of one grouping pass.
///
/// Groups are keyed by their representative: the lexicographically smallest
/// member. Documents with no neighbor at or above the threshold form no
/// group; they are reported in `ungrouped` so consuming reports stay
/// complete. A document belongs to at most one group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Grouping {
    /// Representative identity → all member identities (representative included).
    pub groups: BTreeMap<String, BTreeSet<String>>,
    /// Identities that joined no group.
    pub ungrouped: BTreeSet<String>,
}

impl Grouping {
    /// The group containing `identity`, if any.
    pub fn group_of(&self, identity: &str) -> Option<&BTreeSet<String>> {
        self.groups.values().find(|members| members.contains(identity))
    }

    /// Total number of grouped documents.
    pub fn grouped_len(&self) -> usize {
        self.groups.values().map(|m| m.len()).sum()
    }
}

/// Cluster `identities` by connected components of the threshold graph.
///
/// An edge (a, b) exists iff `matrix.get(a, b) >= threshold` and the score
/// is nonzero — a computed 0.0 is no evidence of relatedness, so it never
/// links documents even at threshold zero. Absent matrix entries are not
/// edges either; they were never computed and are not treated as zero.
/// Components with at least two members become groups; the rest land in
/// `ungrouped`. Threshold 1.0 degenerates to exact-score-1.0 grouping, 0.0
/// joins every document with any nonzero similarity to anything.
pub fn group_by_threshold(
    identities: &[String],
    matrix: &SimilarityMatrix,
    threshold: f32,
) -> Result<Grouping, GroupingError> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(GroupingError::ThresholdOutOfRange { threshold });
    }

    // Dense index over the sorted identity universe; sorting here is what
    // makes representatives independent of caller iteration order.
    let mut universe: Vec<String> = identities.to_vec();
    universe.sort();
    universe.dedup();
    let index: BTreeMap<&str, usize> = universe
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let mut dsu = DisjointSet::new(universe.len());
    for (a, b, score) in matrix.iter() {
        if score < threshold || score <= 0.0 {
            continue;
        }
        let &ia = index
            .get(a)
            .ok_or_else(|| GroupingError::UnknownIdentity {
                identity: a.to_string(),
            })?;
        let &ib = index
            .get(b)
            .ok_or_else(|| GroupingError::UnknownIdentity {
                identity: b.to_string(),
            })?;
        dsu.union(ia, ib);
    }

    let mut components: BTreeMap<usize, BTreeSet<String>> = BTreeMap::new();
    for (i, id) in universe.iter().enumerate() {
        components.entry(dsu.find(i)).or_default().insert(id.clone());
    }

    let mut grouping = Grouping::default();
    for members in components.into_values() {
        if members.len() >= 2 {
            // BTreeSet iterates in order, so first() is the smallest member.
            let representative = members
                .first()
                .cloned()
                .unwrap_or_default();
            grouping.groups.insert(representative, members);
        } else {
            grouping.ungrouped.extend(members);
        }
    }
    Ok(grouping)
}
