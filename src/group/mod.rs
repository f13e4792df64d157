//! Permutation groups represented by a base and strong generating set.
use crate::error::Result;
use crate::perm::{Perm, PermSet};

pub mod bsgs;
pub mod randomizer;

pub use bsgs::{BSGSOptions, Construction, BSGS};
pub use randomizer::PrRandomizer;

pub use crate::schreier::Transversals;

/// Group façade over a [`BSGS`]: order, membership and element enumeration.
#[derive(Clone, Debug)]
pub struct PermGroup {
    bsgs: BSGS,
}

impl PermGroup {
    pub fn new(degree: usize, generators: PermSet) -> Result<Self> {
        Self::with_options(degree, generators, &BSGSOptions::default())
    }

    pub fn with_options(degree: usize, generators: PermSet, options: &BSGSOptions) -> Result<Self> {
        Ok(Self { bsgs: BSGS::new(degree, generators, options)? })
    }

    pub fn trivial(degree: usize) -> Self {
        Self { bsgs: BSGS::trivial(degree) }
    }

    pub fn symmetric(degree: usize) -> Self {
        Self { bsgs: BSGS::symmetric(degree) }
    }

    pub fn alternating(degree: usize) -> Self {
        Self { bsgs: BSGS::alternating(degree) }
    }

    pub fn from_bsgs(bsgs: BSGS) -> Self {
        Self { bsgs }
    }

    pub fn bsgs(&self) -> &BSGS {
        &self.bsgs
    }

    pub fn degree(&self) -> usize {
        self.bsgs.degree()
    }

    pub fn order(&self) -> u128 {
        self.bsgs.order()
    }

    pub fn is_trivial(&self) -> bool {
        self.bsgs.base_size() == 0
    }

    pub fn generators(&self) -> &PermSet {
        self.bsgs.strong_generators()
    }

    /// Membership by sifting through the stabilizer chain.
    pub fn contains(&self, perm: &Perm) -> bool {
        perm.degree() == self.degree() && self.bsgs.strips_completely(perm)
    }

    /// True iff every generator of `self` is a member of `other`.
    pub fn is_subgroup_of(&self, other: &PermGroup) -> bool {
        self.degree() == other.degree() && self.generators().iter().all(|g| other.contains(g))
    }

    /// Iterates every group element exactly once by base-image enumeration:
    /// each element is a product `T_1(β_1) ∘ … ∘ T_k(β_k)` of one transversal
    /// per level. The iterator owns its state.
    pub fn iter(&self) -> Elements {
        Elements::new(&self.bsgs)
    }
}

impl<'a> IntoIterator for &'a PermGroup {
    type Item = Perm;
    type IntoIter = Elements;

    fn into_iter(self) -> Elements {
        self.iter()
    }
}

/// Base-image enumeration over a stabilizer chain: an odometer over the
/// per-level orbits, the last level varying fastest.
pub struct Elements {
    degree: usize,
    transversals: Vec<Vec<Perm>>,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Elements {
    fn new(bsgs: &BSGS) -> Self {
        let transversals = (0..bsgs.base_size())
            .map(|i| {
                bsgs.orbit(i)
                    .iter()
                    .map(|&o| bsgs.transversal(i, o).expect("orbit node has a transversal"))
                    .collect()
            })
            .collect();
        Self {
            degree: bsgs.degree(),
            transversals,
            indices: vec![0; bsgs.base_size()],
            exhausted: false,
        }
    }
}

impl Iterator for Elements {
    type Item = Perm;

    fn next(&mut self) -> Option<Perm> {
        if self.exhausted {
            return None;
        }

        let mut element = Perm::identity(self.degree);
        for (level, &index) in self.transversals.iter().zip(&self.indices) {
            element = &element * &level[index];
        }

        self.exhausted = true;
        for i in (0..self.indices.len()).rev() {
            self.indices[i] += 1;
            if self.indices[i] < self.transversals[i].len() {
                self.exhausted = false;
                break;
            }
            self.indices[i] = 0;
        }

        Some(element)
    }
}
