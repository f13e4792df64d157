//! Orbits and Schreier structures: rooted spanning structures over the orbit
//! of a point under a generating set, mapping each orbit member to a coset
//! representative carrying the root to it.
use crate::perm::{FHashMap, Perm, PermSet, Point};
use std::collections::VecDeque;

/// Set of points presented as a sequence in BFS discovery order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Orbit {
    points: Vec<Point>,
}

impl Orbit {
    /// BFS closure of `root` under `labels`, recorded into `out`: resets
    /// `out`, then for every newly reached point stores the incoming edge
    /// `(origin, label_index)` with `labels[label_index](origin) = point`.
    /// Deterministic given the label iteration order.
    pub fn generate(root: Point, labels: &PermSet, out: &mut SchreierStructure) -> Orbit {
        out.create_root(root);
        out.create_labels(labels.clone());

        let mut points = vec![root];
        let mut queue = VecDeque::from([root]);
        while let Some(p) = queue.pop_front() {
            for (i, label) in labels.iter().enumerate() {
                let q = label.apply(p);
                if !out.contains(q) {
                    out.create_edge(p, q, i);
                    points.push(q);
                    queue.push_back(q);
                }
            }
        }
        Orbit { points }
    }

    /// Plain orbit closure without transversal bookkeeping.
    pub fn of(root: Point, labels: &PermSet) -> Orbit {
        let degree = labels.degree().unwrap_or(root);
        let mut seen = vec![false; degree.max(root)];
        seen[root - 1] = true;
        let mut points = vec![root];
        let mut queue = VecDeque::from([root]);
        while let Some(p) = queue.pop_front() {
            for label in labels {
                let q = label.apply(p);
                if !seen[q - 1] {
                    seen[q - 1] = true;
                    points.push(q);
                    queue.push_back(q);
                }
            }
        }
        Orbit { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.points.contains(&p)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a Orbit {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl From<Vec<Point>> for Orbit {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

/// Which transversal representation a Schreier structure stores.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Transversals {
    /// Composed coset representative per node; O(1) transversal queries.
    #[default]
    Explicit,
    /// Spanning-tree edges only; transversals multiply labels bottom-up.
    SchreierTrees,
    /// Stubbed; requesting it is an error.
    ShallowSchreierTrees,
}

/// Spanning structure over an orbit. Tagged variant chosen at construction;
/// both variants answer every query identically, only the cost of
/// `transversal` differs.
#[derive(Clone, Debug)]
pub enum SchreierStructure {
    Tree(SchreierTree),
    Explicit(ExplicitTransversals),
}

impl SchreierStructure {
    /// `kind` must not be `ShallowSchreierTrees`; callers reject that upfront.
    pub fn with_kind(kind: Transversals, degree: usize) -> Self {
        match kind {
            Transversals::Explicit => Self::Explicit(ExplicitTransversals::new(degree)),
            Transversals::SchreierTrees | Transversals::ShallowSchreierTrees => {
                Self::Tree(SchreierTree::new(degree))
            }
        }
    }

    pub fn create_root(&mut self, root: Point) {
        match self {
            Self::Tree(t) => t.create_root(root),
            Self::Explicit(e) => e.create_root(root),
        }
    }

    pub fn create_labels(&mut self, labels: PermSet) {
        match self {
            Self::Tree(t) => t.labels = labels,
            Self::Explicit(e) => e.labels = labels,
        }
    }

    pub fn create_edge(&mut self, origin: Point, destination: Point, label: usize) {
        match self {
            Self::Tree(t) => t.create_edge(origin, destination, label),
            Self::Explicit(e) => e.create_edge(origin, destination, label),
        }
    }

    pub fn root(&self) -> Point {
        match self {
            Self::Tree(t) => t.root,
            Self::Explicit(e) => e.root,
        }
    }

    /// Orbit members in BFS discovery order, root first.
    pub fn nodes(&self) -> &[Point] {
        match self {
            Self::Tree(t) => &t.nodes,
            Self::Explicit(e) => &e.nodes,
        }
    }

    pub fn labels(&self) -> &PermSet {
        match self {
            Self::Tree(t) => &t.labels,
            Self::Explicit(e) => &e.labels,
        }
    }

    pub fn contains(&self, node: Point) -> bool {
        match self {
            Self::Tree(t) => node == t.root || t.edges.contains_key(&node),
            Self::Explicit(e) => e.transversals.contains_key(&node),
        }
    }

    /// True iff the spanning structure records an edge from `node` labeled
    /// by `label`.
    pub fn incoming(&self, node: Point, label: &Perm) -> bool {
        let (edges, labels) = match self {
            Self::Tree(t) => (&t.edges, &t.labels),
            Self::Explicit(e) => (&e.edges, &e.labels),
        };
        match edges.get(&label.apply(node)) {
            Some(&(origin, index)) => origin == node && labels[index] == *label,
            None => false,
        }
    }

    /// Product of labels along the unique root path; satisfies
    /// `transversal(p)(root) = p`. `None` when `p` is outside the orbit.
    pub fn transversal(&self, node: Point) -> Option<Perm> {
        match self {
            Self::Tree(t) => t.transversal(node),
            Self::Explicit(e) => e.transversals.get(&node).cloned(),
        }
    }
}

/// Stores `(origin, label_index)` per non-root node.
#[derive(Clone, Debug)]
pub struct SchreierTree {
    degree: usize,
    root: Point,
    labels: PermSet,
    nodes: Vec<Point>,
    edges: FHashMap<Point, (Point, usize)>,
}

impl SchreierTree {
    fn new(degree: usize) -> Self {
        Self { degree, root: 1, labels: PermSet::new(), nodes: vec![], edges: FHashMap::default() }
    }

    fn create_root(&mut self, root: Point) {
        self.root = root;
        self.nodes = vec![root];
        self.edges.clear();
    }

    fn create_edge(&mut self, origin: Point, destination: Point, label: usize) {
        self.edges.insert(destination, (origin, label));
        self.nodes.push(destination);
    }

    fn transversal(&self, node: Point) -> Option<Perm> {
        if node == self.root {
            return Some(Perm::identity(self.degree));
        }
        let mut result = Perm::identity(self.degree);
        let mut current = node;
        while current != self.root {
            let &(origin, label) = self.edges.get(&current)?;
            result = &result * &self.labels[label];
            current = origin;
        }
        Some(result)
    }
}

/// Stores the composed coset representative per node; edge creation sets
/// `T(destination) = label ∘ T(origin)`.
#[derive(Clone, Debug)]
pub struct ExplicitTransversals {
    degree: usize,
    root: Point,
    labels: PermSet,
    nodes: Vec<Point>,
    edges: FHashMap<Point, (Point, usize)>,
    transversals: FHashMap<Point, Perm>,
}

impl ExplicitTransversals {
    fn new(degree: usize) -> Self {
        Self {
            degree,
            root: 1,
            labels: PermSet::new(),
            nodes: vec![],
            edges: FHashMap::default(),
            transversals: FHashMap::default(),
        }
    }

    fn create_root(&mut self, root: Point) {
        self.root = root;
        self.nodes = vec![root];
        self.edges.clear();
        self.transversals.clear();
        self.transversals.insert(root, Perm::identity(self.degree));
    }

    fn create_edge(&mut self, origin: Point, destination: Point, label: usize) {
        let through_origin = &self.labels[label] * &self.transversals[&origin];
        self.edges.insert(destination, (origin, label));
        self.transversals.insert(destination, through_origin);
        self.nodes.push(destination);
    }
}
