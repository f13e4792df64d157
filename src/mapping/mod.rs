//! Task allocations and their canonical orbit representatives under an
//! architecture's symmetry group.
use crate::error::Result;
use crate::graph::ColoredGraph;
use crate::group::PermGroup;
use crate::perm::{FHashMap, FHashSet, Perm, PermSet};
use std::collections::VecDeque;
use tracing::debug;

/// Sequence of processing element identifiers, shifted by an offset: a
/// permutation of degree d acts on the entries in (offset, offset + d],
/// leaving others untouched. Comparison is lexicographic.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TaskAllocation {
    tasks: Vec<usize>,
}

impl TaskAllocation {
    pub fn new(tasks: Vec<usize>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[usize] {
        &self.tasks
    }

    #[inline]
    fn mapped(task: usize, perm: &Perm, offset: usize) -> usize {
        if task > offset && task - offset <= perm.degree() {
            perm.apply(task - offset) + offset
        } else {
            task
        }
    }

    /// The allocation with `perm` applied to every entry in range.
    pub fn permuted(&self, perm: &Perm, offset: usize) -> Self {
        Self { tasks: self.tasks.iter().map(|&t| Self::mapped(t, perm, offset)).collect() }
    }

    /// In-place variant of [`TaskAllocation::permuted`].
    pub fn permute(&mut self, perm: &Perm, offset: usize) {
        for task in &mut self.tasks {
            *task = Self::mapped(*task, perm, offset);
        }
    }

    /// True iff `perm · self` precedes `other` lexicographically, without
    /// materializing the permuted allocation.
    pub fn less_than(&self, other: &Self, perm: &Perm, offset: usize) -> bool {
        assert_eq!(self.len(), other.len());
        for (&task, &reference) in self.tasks.iter().zip(&other.tasks) {
            let mapped = Self::mapped(task, perm, offset);
            if mapped != reference {
                return mapped < reference;
            }
        }
        false
    }
}

impl From<Vec<usize>> for TaskAllocation {
    fn from(tasks: Vec<usize>) -> Self {
        Self::new(tasks)
    }
}

/// Registry of discovered orbit representatives, mapping each to a dense
/// orbit id in insertion order.
#[derive(Clone, Debug, Default)]
pub struct TaskOrbits {
    ids: FHashMap<TaskAllocation, usize>,
    representatives: Vec<TaskAllocation>,
}

impl TaskOrbits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(true, id)` with a fresh id iff no equal representative was
    /// inserted before, `(false, existing_id)` otherwise.
    pub fn insert(&mut self, representative: TaskAllocation) -> (bool, usize) {
        if let Some(&id) = self.ids.get(&representative) {
            return (false, id);
        }
        let id = self.representatives.len();
        self.ids.insert(representative.clone(), id);
        self.representatives.push(representative);
        (true, id)
    }

    pub fn insert_all(&mut self, representatives: impl IntoIterator<Item = TaskAllocation>) {
        for representative in representatives {
            self.insert(representative);
        }
    }

    pub fn is_repr(&self, allocation: &TaskAllocation) -> bool {
        self.ids.contains_key(allocation)
    }

    pub fn num_orbits(&self) -> usize {
        self.representatives.len()
    }

    /// Representatives in insertion (id) order.
    pub fn iter(&self) -> std::slice::Iter<'_, TaskAllocation> {
        self.representatives.iter()
    }
}

/// Registries are equal iff they hold the same representative set; ids do
/// not participate.
impl PartialEq for TaskOrbits {
    fn eq(&self, other: &Self) -> bool {
        self.ids.len() == other.ids.len() && self.ids.keys().all(|m| other.ids.contains_key(m))
    }
}

impl Eq for TaskOrbits {}

/// BFS iterator over the orbit of one allocation under a generating set.
/// Owns its traversal state and yields each orbit member exactly once; for
/// multi-pass access, collect it first.
pub struct TaskOrbit {
    generators: PermSet,
    offset: usize,
    unprocessed: VecDeque<TaskAllocation>,
    seen: FHashSet<TaskAllocation>,
}

impl TaskOrbit {
    pub fn new(root: TaskAllocation, generators: PermSet, offset: usize) -> Self {
        Self {
            generators,
            offset,
            unprocessed: VecDeque::from([root.clone()]),
            seen: [root].into_iter().collect(),
        }
    }
}

impl Iterator for TaskOrbit {
    type Item = TaskAllocation;

    fn next(&mut self) -> Option<TaskAllocation> {
        let current = self.unprocessed.pop_front()?;
        for generator in &self.generators {
            let next = current.permuted(generator, self.offset);
            if self.seen.insert(next.clone()) {
                self.unprocessed.push_back(next);
            }
        }
        Some(current)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MappingMethod {
    /// Enumerate every group element; exact.
    #[default]
    Iterate,
    /// Generator descent to a fixed point; approximate.
    LocalSearch,
    /// BFS over the allocation's orbit; exact.
    OrbitBfs,
}

#[derive(Clone, Debug, Default)]
pub struct MappingOptions {
    pub method: MappingMethod,
}

/// Canonicalizes task allocations against the automorphism group of an
/// architecture graph.
#[derive(Clone, Debug)]
pub struct TaskMapper {
    automorphisms: PermGroup,
}

impl TaskMapper {
    pub fn new(automorphisms: PermGroup) -> Self {
        Self { automorphisms }
    }

    /// Mapper for the automorphism group extracted from an architecture
    /// graph.
    pub fn from_graph(graph: &ColoredGraph) -> Result<Self> {
        let generators = graph.automorphism_generators()?;
        Ok(Self::new(PermGroup::new(graph.reduced_len(), generators)?))
    }

    pub fn group(&self) -> &PermGroup {
        &self.automorphisms
    }

    /// Canonical representative of the allocation's orbit, computed by the
    /// configured method. A supplied registry enables opportunistic
    /// deduplication: encountering a known representative returns it
    /// immediately, which may not be the lexicographic minimum. The final
    /// representative is inserted into the registry.
    pub fn mapping(
        &self,
        allocation: &TaskAllocation,
        offset: usize,
        options: &MappingOptions,
        mut orbits: Option<&mut TaskOrbits>,
    ) -> TaskAllocation {
        debug!(?allocation, method = ?options.method, "requested task mapping");

        let representative = match options.method {
            MappingMethod::Iterate => {
                self.min_elem_iterate(allocation, offset, orbits.as_deref())
            }
            MappingMethod::LocalSearch => self.min_elem_local_search(allocation, offset),
            MappingMethod::OrbitBfs => self.min_elem_orbits(allocation, offset, orbits.as_deref()),
        };

        if let Some(orbits) = orbits.as_deref_mut() {
            orbits.insert(representative.clone());
        }
        representative
    }

    fn min_elem_iterate(
        &self,
        tasks: &TaskAllocation,
        offset: usize,
        orbits: Option<&TaskOrbits>,
    ) -> TaskAllocation {
        debug!("performing mapping by iteration");

        let mut representative = tasks.clone();
        for element in &self.automorphisms {
            if tasks.less_than(&representative, &element, offset) {
                representative = tasks.permuted(&element, offset);
                if Self::is_representative(&representative, orbits) {
                    return representative;
                }
            }
        }

        debug!(?representative, "found minimal orbit element");
        representative
    }

    fn min_elem_local_search(&self, tasks: &TaskAllocation, offset: usize) -> TaskAllocation {
        debug!("performing approximate mapping by local search");

        let mut representative = tasks.clone();
        let mut stationary = false;
        while !stationary {
            stationary = true;
            for generator in self.automorphisms.generators() {
                if representative.less_than(&representative, generator, offset) {
                    representative.permute(generator, offset);
                    stationary = false;
                }
            }
        }

        debug!(?representative, "found approximate minimal orbit element");
        representative
    }

    fn min_elem_orbits(
        &self,
        tasks: &TaskAllocation,
        offset: usize,
        orbits: Option<&TaskOrbits>,
    ) -> TaskAllocation {
        debug!("performing mapping by orbit construction");

        let mut representative = tasks.clone();
        let mut seen: FHashSet<TaskAllocation> = [tasks.clone()].into_iter().collect();
        let mut unprocessed = VecDeque::from([tasks.clone()]);

        while let Some(current) = unprocessed.pop_front() {
            if current < representative {
                representative = current.clone();
            }
            for generator in self.automorphisms.generators() {
                let next = current.permuted(generator, offset);
                if Self::is_representative(&next, orbits) {
                    return next;
                }
                if seen.insert(next.clone()) {
                    unprocessed.push_back(next);
                }
            }
        }

        representative
    }

    fn is_representative(allocation: &TaskAllocation, orbits: Option<&TaskOrbits>) -> bool {
        orbits.map_or(false, |orbits| orbits.is_repr(allocation))
    }
}
