//! Permutations over the one-based domain [1, d] and ordered generating sets.
use crate::error::{Error, Result};
use fxhash::FxBuildHasher;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::{Index, Mul};

pub(crate) type FBuildHasher = FxBuildHasher;
pub(crate) type FHashMap<K, V> = HashMap<K, V, FBuildHasher>;
pub(crate) type FHashSet<K> = HashSet<K, FBuildHasher>;

/// A one-based point in [1, d].
pub type Point = usize;

/// Permutation of fixed degree, densely represented by its image vector.
/// Immutable value type; composition and inverse produce new permutations.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Perm {
    image: Vec<Point>,
}

impl Perm {
    pub fn identity(degree: usize) -> Self {
        Self { image: (1..=degree).collect() }
    }

    /// Builds a permutation from its image vector, `image[i]` being the image
    /// of point `i + 1`. Fails unless the vector is a bijection on [1, d].
    pub fn from_image(image: Vec<Point>) -> Result<Self> {
        let degree = image.len();
        let mut seen = vec![false; degree];
        for &p in &image {
            if p < 1 || p > degree {
                return Err(Error::Domain { point: p, degree });
            }
            if seen[p - 1] {
                return Err(Error::Domain { point: p, degree });
            }
            seen[p - 1] = true;
        }
        Ok(Self { image })
    }

    /// Builds a permutation of the given degree from disjoint cycles.
    pub fn from_cycles(degree: usize, cycles: &[Vec<Point>]) -> Result<Self> {
        let mut image: Vec<Point> = (1..=degree).collect();
        let mut moved = vec![false; degree];
        for cycle in cycles {
            for (i, &p) in cycle.iter().enumerate() {
                if p < 1 || p > degree {
                    return Err(Error::Domain { point: p, degree });
                }
                if moved[p - 1] {
                    return Err(Error::Domain { point: p, degree });
                }
                moved[p - 1] = true;
                image[p - 1] = cycle[(i + 1) % cycle.len()];
            }
        }
        Ok(Self { image })
    }

    pub fn degree(&self) -> usize {
        self.image.len()
    }

    /// Image of a point. Panics when `x` lies outside [1, d]; use
    /// [`Perm::try_apply`] for checked access.
    #[inline]
    pub fn apply(&self, x: Point) -> Point {
        self.image[x - 1]
    }

    pub fn try_apply(&self, x: Point) -> Result<Point> {
        if x < 1 || x > self.degree() {
            return Err(Error::Domain { point: x, degree: self.degree() });
        }
        Ok(self.image[x - 1])
    }

    pub fn is_identity(&self) -> bool {
        self.image.iter().enumerate().all(|(i, &p)| p == i + 1)
    }

    /// Smallest point moved by this permutation, if any.
    pub fn moved_point(&self) -> Option<Point> {
        self.image.iter().enumerate().find(|&(i, &p)| p != i + 1).map(|(i, _)| i + 1)
    }

    /// True iff every point in `points` is fixed.
    pub fn stabilizes(&self, points: impl IntoIterator<Item = Point>) -> bool {
        points.into_iter().all(|p| self.apply(p) == p)
    }

    pub fn inverse(&self) -> Self {
        let mut image = vec![0; self.degree()];
        for (i, &p) in self.image.iter().enumerate() {
            image[p - 1] = i + 1;
        }
        Self { image }
    }

    /// Parity: +1 for even permutations, -1 for odd ones.
    pub fn sign(&self) -> i32 {
        if (self.degree() - self.cycle_count()) % 2 == 0 { 1 } else { -1 }
    }

    pub fn is_even(&self) -> bool {
        self.sign() == 1
    }

    /// Checked composition; `(a.try_compose(b))(x) = a(b(x))`.
    pub fn try_compose(&self, rhs: &Perm) -> Result<Perm> {
        if self.degree() != rhs.degree() {
            return Err(Error::DegreeMismatch { expected: self.degree(), actual: rhs.degree() });
        }
        Ok(self * rhs)
    }

    fn cycle_count(&self) -> usize {
        let mut visited = vec![false; self.degree()];
        let mut count = 0;
        for start in 1..=self.degree() {
            if visited[start - 1] {
                continue;
            }
            count += 1;
            let mut p = start;
            while !visited[p - 1] {
                visited[p - 1] = true;
                p = self.apply(p);
            }
        }
        count
    }

    fn cycles(&self) -> Vec<Vec<Point>> {
        let mut visited = vec![false; self.degree()];
        let mut cycles = vec![];
        for start in 1..=self.degree() {
            if visited[start - 1] || self.apply(start) == start {
                continue;
            }
            let mut cycle = vec![];
            let mut p = start;
            while !visited[p - 1] {
                visited[p - 1] = true;
                cycle.push(p);
                p = self.apply(p);
            }
            cycles.push(cycle);
        }
        cycles
    }
}

/// Composition: `(a * b)(x) = a(b(x))`.
impl Mul for &Perm {
    type Output = Perm;

    fn mul(self, rhs: &Perm) -> Perm {
        assert_eq!(self.degree(), rhs.degree());
        Perm { image: rhs.image.iter().map(|&p| self.apply(p)).collect() }
    }
}

impl fmt::Debug for Perm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cycles = self.cycles();
        if cycles.is_empty() {
            return write!(f, "()");
        }
        for cycle in cycles {
            write!(f, "({})", cycle.iter().join(" "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Perm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Ordered sequence of permutations of a common degree. Iteration order is
/// insertion order and is part of the observable contract: orbits, Schreier
/// trees and minimization tie-breaks all follow it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PermSet {
    perms: Vec<Perm>,
}

impl PermSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Degree shared by all members; `None` when empty.
    pub fn degree(&self) -> Option<usize> {
        self.perms.first().map(Perm::degree)
    }

    pub fn len(&self) -> usize {
        self.perms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perms.is_empty()
    }

    /// True iff the set generates the trivial group.
    pub fn trivial(&self) -> bool {
        self.perms.iter().all(Perm::is_identity)
    }

    pub fn contains(&self, perm: &Perm) -> bool {
        self.perms.contains(perm)
    }

    /// Appends `perm` unless an equal member exists. Returns whether it was added.
    pub fn insert(&mut self, perm: Perm) -> bool {
        if self.contains(&perm) {
            return false;
        }
        self.perms.push(perm);
        true
    }

    /// Appends the inverse of every current member, deduplicating.
    pub fn insert_inverses(&mut self) {
        for inv in self.perms.iter().map(Perm::inverse).collect_vec() {
            self.insert(inv);
        }
    }

    /// Stable dedup keeping first occurrences.
    pub fn make_unique(&mut self) {
        let mut unique = Vec::with_capacity(self.perms.len());
        for perm in self.perms.drain(..) {
            if !unique.contains(&perm) {
                unique.push(perm);
            }
        }
        self.perms = unique;
    }

    /// Drops identity members.
    pub fn drop_identities(&mut self) {
        self.perms.retain(|p| !p.is_identity());
    }

    /// The first `n` members, in order.
    pub fn prefix(&self, n: usize) -> PermSet {
        Self { perms: self.perms[..n.min(self.perms.len())].to_vec() }
    }

    /// Fails unless every member has the given degree.
    pub fn assert_degree(&self, degree: usize) -> Result<()> {
        for perm in &self.perms {
            if perm.degree() != degree {
                return Err(Error::DegreeMismatch { expected: degree, actual: perm.degree() });
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Perm> {
        self.perms.iter()
    }

    pub fn retain(&mut self, f: impl FnMut(&Perm) -> bool) {
        self.perms.retain(f);
    }
}

impl Index<usize> for PermSet {
    type Output = Perm;

    fn index(&self, index: usize) -> &Perm {
        &self.perms[index]
    }
}

impl From<Vec<Perm>> for PermSet {
    fn from(perms: Vec<Perm>) -> Self {
        Self { perms }
    }
}

impl FromIterator<Perm> for PermSet {
    fn from_iter<T: IntoIterator<Item = Perm>>(iter: T) -> Self {
        Self { perms: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a PermSet {
    type Item = &'a Perm;
    type IntoIter = std::slice::Iter<'a, Perm>;

    fn into_iter(self) -> Self::IntoIter {
        self.perms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(degree: usize, points: &[Point]) -> Perm {
        Perm::from_cycles(degree, &[points.to_vec()]).unwrap()
    }

    #[test]
    fn identity() {
        let id = Perm::identity(4);
        assert!(id.is_identity());
        assert_eq!(id.moved_point(), None);
        assert_eq!(id.sign(), 1);
        assert_eq!(id.inverse(), id);
    }

    #[test]
    fn from_image_validates() {
        assert!(Perm::from_image(vec![2, 1, 3]).is_ok());
        assert_eq!(
            Perm::from_image(vec![2, 2, 3]),
            Err(Error::Domain { point: 2, degree: 3 })
        );
        assert_eq!(
            Perm::from_image(vec![0, 1, 2]),
            Err(Error::Domain { point: 0, degree: 3 })
        );
        assert_eq!(
            Perm::from_image(vec![1, 2, 4]),
            Err(Error::Domain { point: 4, degree: 3 })
        );
    }

    #[test]
    fn from_cycles() {
        let p = Perm::from_cycles(4, &[vec![1, 2, 3]]).unwrap();
        assert_eq!(p, Perm::from_image(vec![2, 3, 1, 4]).unwrap());
        let q = Perm::from_cycles(4, &[vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(q, Perm::from_image(vec![2, 1, 4, 3]).unwrap());
        assert!(Perm::from_cycles(3, &[vec![1, 2], vec![2, 3]]).is_err());
        assert!(Perm::from_cycles(3, &[vec![1, 4]]).is_err());
    }

    #[test]
    fn composition_applies_right_factor_first() {
        let a = cycle(3, &[1, 2]);
        let b = cycle(3, &[2, 3]);
        let ab = &a * &b;
        // (a ∘ b)(2) = a(3) = 3, (a ∘ b)(3) = a(2) = 1.
        assert_eq!(ab.apply(2), 3);
        assert_eq!(ab.apply(3), 1);
        assert_eq!(ab, Perm::from_image(vec![2, 3, 1]).unwrap());
    }

    #[test]
    fn inverse_cancels() {
        let p = Perm::from_image(vec![3, 1, 4, 2]).unwrap();
        assert!((&p * &p.inverse()).is_identity());
        assert!((&p.inverse() * &p).is_identity());
    }

    #[test]
    fn try_compose_checks_degree() {
        let a = Perm::identity(3);
        let b = Perm::identity(4);
        assert_eq!(
            a.try_compose(&b),
            Err(Error::DegreeMismatch { expected: 3, actual: 4 })
        );
    }

    #[test]
    fn try_apply_checks_domain() {
        let p = Perm::identity(3);
        assert_eq!(p.try_apply(2), Ok(2));
        assert_eq!(p.try_apply(0), Err(Error::Domain { point: 0, degree: 3 }));
        assert_eq!(p.try_apply(4), Err(Error::Domain { point: 4, degree: 3 }));
    }

    #[test]
    fn sign_multiplies_over_cycles() {
        assert_eq!(cycle(4, &[1, 2]).sign(), -1);
        assert_eq!(cycle(4, &[1, 2, 3]).sign(), 1);
        assert_eq!(Perm::from_cycles(4, &[vec![1, 2], vec![3, 4]]).unwrap().sign(), 1);
        assert_eq!(cycle(4, &[1, 2, 3, 4]).sign(), -1);
    }

    #[test]
    fn stabilizes() {
        let p = cycle(5, &[3, 4]);
        assert!(p.stabilizes([1, 2, 5]));
        assert!(!p.stabilizes([1, 3]));
        assert!(p.stabilizes([]));
    }

    #[test]
    fn moved_point_is_smallest() {
        assert_eq!(cycle(5, &[3, 4]).moved_point(), Some(3));
        assert_eq!(cycle(5, &[2, 5]).moved_point(), Some(2));
    }

    #[test]
    fn cycle_debug_form() {
        assert_eq!(format!("{:?}", Perm::identity(3)), "()");
        assert_eq!(format!("{:?}", cycle(4, &[1, 2, 3])), "(1 2 3)");
        assert_eq!(
            format!("{:?}", Perm::from_cycles(4, &[vec![1, 2], vec![3, 4]]).unwrap()),
            "(1 2)(3 4)"
        );
    }

    #[test]
    fn perm_set_insert_dedups() {
        let mut set = PermSet::new();
        assert!(set.insert(cycle(3, &[1, 2])));
        assert!(!set.insert(cycle(3, &[1, 2])));
        assert!(set.insert(cycle(3, &[2, 3])));
        assert_eq!(set.len(), 2);
        assert_eq!(set[0], cycle(3, &[1, 2]));
    }

    #[test]
    fn perm_set_insert_inverses() {
        let mut set: PermSet = vec![cycle(3, &[1, 2, 3]), cycle(3, &[1, 2])].into();
        set.insert_inverses();
        // The transposition is self-inverse and must not be duplicated.
        assert_eq!(set.len(), 3);
        assert!(set.contains(&cycle(3, &[1, 3, 2])));
    }

    #[test]
    fn perm_set_make_unique_is_stable() {
        let a = cycle(3, &[1, 2]);
        let b = cycle(3, &[2, 3]);
        let mut set: PermSet = vec![a.clone(), b.clone(), a.clone()].into();
        set.make_unique();
        assert_eq!(set.len(), 2);
        assert_eq!(set[0], a);
        assert_eq!(set[1], b);
    }

    #[test]
    fn perm_set_trivial() {
        assert!(PermSet::new().trivial());
        assert!(PermSet::from(vec![Perm::identity(3)]).trivial());
        assert!(!PermSet::from(vec![cycle(3, &[1, 2])]).trivial());
    }

    #[test]
    fn perm_set_assert_degree() {
        let set: PermSet = vec![Perm::identity(3), Perm::identity(4)].into();
        assert_eq!(
            set.assert_degree(3),
            Err(Error::DegreeMismatch { expected: 3, actual: 4 })
        );
        assert!(set.assert_degree(3).is_err());
        assert!(PermSet::from(vec![Perm::identity(3)]).assert_degree(3).is_ok());
    }
}
