//! Symmetry reduction for task allocations on architecture graphs.
//!
//! An architecture's interchangeable processing elements form a permutation
//! group, derived from the automorphisms of its topology graph. This crate
//! builds a base and strong generating set for that group (Schreier–Sims,
//! deterministic or randomized, with symmetric/alternating fast paths) and
//! uses it to map every task allocation to the canonical representative of
//! its orbit, so that equivalent allocations deduplicate across a search
//! space.
pub mod error;
pub mod graph;
pub mod group;
pub mod mapping;
pub mod perm;
pub mod schreier;

pub use error::{Error, Result};
pub use graph::ColoredGraph;
pub use group::{BSGSOptions, PermGroup, BSGS};
pub use mapping::{MappingMethod, MappingOptions, TaskAllocation, TaskMapper, TaskOrbits};
pub use perm::{Perm, PermSet, Point};
