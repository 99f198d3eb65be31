//! doctriage grouping engine.
//!
//! Consumes the pairwise similarity matrix and a threshold and produces
//! clusters of mutually related documents. Pairs at or above the threshold
//! are edges of an undirected graph; groups are that graph's connected
//! components (transitive reachability, not cliques). Components are found
//! with a disjoint-set structure, so edges can be processed in any order and
//! re-running the pass is naturally idempotent.
//!
//! Every group is keyed by its lexicographically smallest member. That total
//! order is the stated tie-break: representatives are reproducible across
//! runs and across machines, never an accident of iteration order.

mod dsu;
mod groups;

pub use crate::groups::{group_by_threshold, Grouping, GroupingError};
