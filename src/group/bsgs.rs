//! Base and strong generating set construction via Schreier–Sims, with fast
//! paths for symmetric and alternating groups.
use crate::error::{Error, Result};
use crate::group::randomizer::PrRandomizer;
use crate::perm::{Perm, PermSet, Point};
use crate::schreier::{Orbit, SchreierStructure, Transversals};
use tracing::debug;

/// Consecutive clean strips after which randomized construction stops;
/// chosen for an error probability of about 1e-6.
const RANDOM_STOP_STREAK: usize = 20;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Construction {
    #[default]
    Auto,
    SchreierSims,
    SchreierSimsRandom,
    Solve,
}

#[derive(Clone, Debug)]
pub struct BSGSOptions {
    pub transversals: Transversals,
    pub construction: Construction,
    /// When set and the degree exceeds 8, try the probabilistic
    /// symmetric/alternating identification before generic construction.
    pub check_altsym: bool,
    pub schreier_sims_random_use_known_order: bool,
    pub schreier_sims_random_known_order: u128,
    pub reduce_gens: bool,
}

impl Default for BSGSOptions {
    fn default() -> Self {
        Self {
            transversals: Transversals::default(),
            construction: Construction::default(),
            check_altsym: false,
            schreier_sims_random_use_known_order: false,
            schreier_sims_random_known_order: 0,
            reduce_gens: false,
        }
    }
}

/// Base and strong generating set: a base of points, strong generators, and
/// one Schreier structure per level representing the orbit of the level's
/// base point under the stabilizer of the preceding base points.
///
/// Invariants: level labels are exactly the strong generators stabilizing the
/// base prefix (plus inverses); no base point is fixed by every strong
/// generator; every strong generator strips completely.
#[derive(Clone, Debug)]
pub struct BSGS {
    degree: usize,
    base: Vec<Point>,
    strong_generators: PermSet,
    schreier_structures: Vec<SchreierStructure>,
    transversals: Transversals,
    is_symmetric: bool,
    is_alternating: bool,
}

impl BSGS {
    /// BSGS of the trivial group: empty base, no generators.
    pub fn trivial(degree: usize) -> Self {
        Self {
            degree,
            base: vec![],
            strong_generators: PermSet::new(),
            schreier_structures: vec![],
            transversals: Transversals::default(),
            is_symmetric: degree <= 1,
            is_alternating: degree <= 2,
        }
    }

    pub fn new(degree: usize, generators: PermSet, options: &BSGSOptions) -> Result<Self> {
        if degree == 0 {
            return Err(Error::Domain { point: 0, degree: 0 });
        }
        if let Transversals::ShallowSchreierTrees = options.transversals {
            return Err(Error::Unsupported("shallow Schreier trees"));
        }
        generators.assert_degree(degree)?;

        if generators.trivial() {
            return Ok(Self::trivial(degree));
        }

        debug!(degree, generators = generators.len(), "constructing BSGS");

        let mut bsgs = Self::trivial(degree);
        bsgs.is_symmetric = false;
        bsgs.is_alternating = false;
        bsgs.transversals = options.transversals;

        let mut generators = generators;
        generators.make_unique();
        generators.drop_identities();

        if options.check_altsym && degree > 8 {
            let mut pr = PrRandomizer::new(&generators);
            if pr.test_symmetric() {
                bsgs.construct_symmetric();
            } else if pr.test_alternating() {
                bsgs.construct_alternating();
            } else {
                bsgs.construct_unknown(generators, options);
            }
        } else {
            bsgs.construct_unknown(generators, options);
        }

        if options.reduce_gens {
            bsgs.reduce_gens();
        }
        bsgs.verify()?;

        debug!(base = ?bsgs.base, order = %bsgs.order(), "BSGS complete");
        Ok(bsgs)
    }

    /// Fast-path BSGS of the full symmetric group on [1, d].
    pub fn symmetric(degree: usize) -> Self {
        let mut bsgs = Self::trivial(degree);
        if degree >= 2 {
            bsgs.construct_symmetric();
        }
        bsgs.is_symmetric = true;
        bsgs
    }

    /// Fast-path BSGS of the alternating group on [1, d].
    pub fn alternating(degree: usize) -> Self {
        let mut bsgs = Self::trivial(degree);
        if degree >= 3 {
            bsgs.construct_alternating();
        }
        bsgs.is_alternating = true;
        bsgs
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn base(&self) -> &[Point] {
        &self.base
    }

    pub fn base_point(&self, i: usize) -> Point {
        self.base[i]
    }

    pub fn base_size(&self) -> usize {
        self.base.len()
    }

    pub fn strong_generators(&self) -> &PermSet {
        &self.strong_generators
    }

    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    pub fn is_alternating(&self) -> bool {
        self.is_alternating
    }

    /// Orbit of the i-th base point under the level's stabilizer generators.
    pub fn orbit(&self, i: usize) -> Orbit {
        self.schreier_structures[i].nodes().to_vec().into()
    }

    /// Coset representative carrying the i-th base point to `o`, if `o` lies
    /// in the level's orbit.
    pub fn transversal(&self, i: usize, o: Point) -> Option<Perm> {
        self.schreier_structures[i].transversal(o)
    }

    /// Labels of the i-th level: stabilizing strong generators plus inverses.
    pub fn stabilizers(&self, i: usize) -> &PermSet {
        self.schreier_structures[i].labels()
    }

    pub fn schreier_structure(&self, i: usize) -> &SchreierStructure {
        &self.schreier_structures[i]
    }

    /// Group order: the product of the level orbit sizes.
    pub fn order(&self) -> u128 {
        (0..self.base_size()).map(|i| self.schreier_structures[i].nodes().len() as u128).product()
    }

    /// Strong generators fixing the first `i` base points.
    pub fn strong_generators_stabilizing(&self, i: usize) -> PermSet {
        self.strong_generators
            .iter()
            .filter(|sg| sg.stabilizes(self.base[..i].iter().copied()))
            .cloned()
            .collect()
    }

    /// Sifts `perm` through the stabilizer chain starting at level `offs`.
    /// Returns the residue together with the one-based index of the level
    /// where sifting stopped, `base_size() + 1` when every level was passed.
    pub fn strip(&self, perm: &Perm, offs: usize) -> (Perm, usize) {
        let mut result = perm.clone();
        for i in offs..self.base_size() {
            let beta = result.apply(self.base[i]);
            let Some(transversal) = self.schreier_structures[i].transversal(beta) else {
                return (result, i + 1);
            };
            result = &transversal.inverse() * &result;
        }
        (result, self.base_size() + 1)
    }

    /// Membership test: `perm` lies in the generated group iff it strips to
    /// the identity past the last level.
    pub fn strips_completely(&self, perm: &Perm) -> bool {
        let (residue, level) = self.strip(perm, 0);
        residue.is_identity() && level == self.base_size() + 1
    }

    /// Appends a base point and builds its level.
    pub fn extend_base(&mut self, bp: Point) {
        self.base.push(bp);
        self.rebuild_level(self.base_size() - 1);
    }

    /// Inserts a base point at position `i`, rebuilding that level and every
    /// deeper one.
    pub fn extend_base_at(&mut self, bp: Point, i: usize) {
        self.base.insert(i, bp);
        self.schreier_structures
            .insert(i, SchreierStructure::with_kind(self.transversals, self.degree));
        for level in i..self.base_size() {
            self.rebuild_level(level);
        }
    }

    fn construct_unknown(&mut self, generators: PermSet, options: &BSGSOptions) {
        match options.construction {
            Construction::Auto => {
                if options.schreier_sims_random_use_known_order
                    && options.schreier_sims_random_known_order > 0
                {
                    self.schreier_sims_random(generators, options);
                } else {
                    self.schreier_sims(generators);
                }
            }
            Construction::SchreierSims => self.schreier_sims(generators),
            Construction::SchreierSimsRandom => self.schreier_sims_random(generators, options),
            Construction::Solve => self.solve(generators),
        }
    }

    /// Deterministic Schreier–Sims: verify levels bottom-up, inserting the
    /// residue of every Schreier generator that fails to strip and rebuilding
    /// the levels whose label sets it joins.
    fn schreier_sims(&mut self, generators: PermSet) {
        debug!("deterministic Schreier-Sims");
        self.init_chain(generators);

        let mut level = self.base_size();
        while level > 0 {
            let i = level - 1;
            match self.failing_schreier_generator(i) {
                Some((residue, position)) => {
                    level = self.insert_residue(residue, position) + 1;
                }
                None => level -= 1,
            }
        }
    }

    /// Randomized Schreier–Sims: sift random elements, inserting residues,
    /// until the known order is reached or enough consecutive elements strip
    /// cleanly. The clean-strip bound applies even when an order hint is
    /// supplied, so an unreachable hint degrades to the probabilistic stop
    /// instead of looping forever.
    fn schreier_sims_random(&mut self, generators: PermSet, options: &BSGSOptions) {
        debug!("randomized Schreier-Sims");
        let known_order = (options.schreier_sims_random_use_known_order
            && options.schreier_sims_random_known_order > 0)
            .then_some(options.schreier_sims_random_known_order);

        let mut pr = PrRandomizer::new(&generators);
        self.init_chain(generators);

        let mut streak = 0;
        loop {
            if streak >= RANDOM_STOP_STREAK || known_order == Some(self.order()) {
                return;
            }

            let candidate = pr.next();
            let (residue, position) = self.strip(&candidate, 0);
            if residue.is_identity() && position == self.base_size() + 1 {
                streak += 1;
            } else {
                streak = 0;
                self.insert_residue(residue, position);
            }
        }
    }

    /// Polycyclic construction for solvable groups. The chain it would
    /// produce is equivalent to the Schreier–Sims one, which is what this
    /// delegates to.
    fn solve(&mut self, generators: PermSet) {
        self.schreier_sims(generators);
    }

    /// Base 1..d−1; strong generators are the transpositions (i, d). Level i
    /// is generated by the transpositions acting on {i+1, .., d}, giving an
    /// orbit of size d − i.
    fn construct_symmetric(&mut self) {
        debug!("group is symmetric");
        let d = self.degree;
        self.base = (1..d).collect();
        self.strong_generators = (1..d)
            .rev()
            .map(|i| Perm::from_cycles(d, &[vec![i, d]]).expect("transposition in range"))
            .collect();
        for i in 0..self.base.len() {
            self.rebuild_level(i);
        }
        self.is_symmetric = true;
    }

    /// Base 1..d−2; strong generators are the 3-cycles (i, d−1, d). Level i
    /// is generated by the 3-cycles acting on {i+1, .., d}, giving an orbit
    /// of size d − i.
    fn construct_alternating(&mut self) {
        debug!("group is alternating");
        let d = self.degree;
        self.base = (1..d - 1).collect();
        self.strong_generators = (1..d - 1)
            .rev()
            .map(|i| Perm::from_cycles(d, &[vec![i, d - 1, d]]).expect("3-cycle in range"))
            .collect();
        for i in 0..self.base.len() {
            self.rebuild_level(i);
        }
        self.is_alternating = true;
    }

    /// Greedy strong generator reduction. Removing a generator is accepted
    /// iff the rebuilt chain preserves the group order and still strips the
    /// removed generator: order equality certifies the strong generating
    /// property, a complete strip certifies that no group element was lost.
    fn reduce_gens(&mut self) {
        let order = self.order();
        let mut index = self.strong_generators.len();
        while index > 0 && self.strong_generators.len() > 1 {
            index -= 1;
            let removed = self.strong_generators[index].clone();
            let mut candidate = self.strong_generators.clone();
            candidate.retain(|sg| *sg != removed);

            let saved_generators = std::mem::replace(&mut self.strong_generators, candidate);
            let saved_structures = self.schreier_structures.clone();
            for i in 0..self.base_size() {
                self.rebuild_level(i);
            }

            if self.order() == order && self.strips_completely(&removed) {
                debug!(removed = ?removed, "reduced strong generator");
            } else {
                self.strong_generators = saved_generators;
                self.schreier_structures = saved_structures;
            }
        }
    }

    /// Initial chain: a base where every generator moves some base point, the
    /// generators as strong generators, and one Schreier structure per level.
    fn init_chain(&mut self, generators: PermSet) {
        self.base.clear();
        for generator in &generators {
            if generator.stabilizes(self.base.iter().copied()) {
                let moved = generator.moved_point().expect("identities were dropped");
                self.base.push(moved);
            }
        }
        self.strong_generators = generators;
        self.schreier_structures.clear();
        for i in 0..self.base.len() {
            self.rebuild_level(i);
        }
    }

    /// First Schreier generator of level `i` whose residue is not the
    /// identity, as `(residue, strip_position)`.
    fn failing_schreier_generator(&self, i: usize) -> Option<(Perm, usize)> {
        let structure = &self.schreier_structures[i];
        let orbit: Vec<Point> = structure.nodes().to_vec();
        let generators = self.strong_generators_stabilizing(i);

        for &beta in &orbit {
            let t_beta = structure.transversal(beta).expect("orbit node");
            for s in &generators {
                let t_s_beta = structure.transversal(s.apply(beta)).expect("orbit closed");
                let schreier_generator = &t_s_beta.inverse() * &(s * &t_beta);
                if schreier_generator.is_identity() {
                    continue;
                }
                let (residue, position) = self.strip(&schreier_generator, i + 1);
                if !residue.is_identity() {
                    return Some((residue, position));
                }
            }
        }
        None
    }

    /// Inserts a non-identity strip residue as a strong generator, extending
    /// the base when the residue fixes all of it, and rebuilds every level
    /// whose label set gains the residue. Returns the zero-based index of the
    /// deepest rebuilt level.
    fn insert_residue(&mut self, residue: Perm, strip_position: usize) -> usize {
        let deepest = if strip_position == self.base_size() + 1 {
            let moved = residue.moved_point().expect("residue is not the identity");
            self.base.push(moved);
            self.base_size() - 1
        } else {
            strip_position - 1
        };
        self.strong_generators.insert(residue);
        for i in 0..=deepest {
            self.rebuild_level(i);
        }
        deepest
    }

    /// Recomputes level `i` from the current strong generators.
    fn rebuild_level(&mut self, i: usize) {
        let mut labels = self.strong_generators_stabilizing(i);
        labels.insert_inverses();
        let mut structure = SchreierStructure::with_kind(self.transversals, self.degree);
        Orbit::generate(self.base[i], &labels, &mut structure);
        if i < self.schreier_structures.len() {
            self.schreier_structures[i] = structure;
        } else {
            self.schreier_structures.push(structure);
        }
    }

    /// Post-construction check that every strong generator strips completely.
    fn verify(&self) -> Result<()> {
        for sg in &self.strong_generators {
            if !self.strips_completely(sg) {
                return Err(Error::InvariantViolated("strong generator does not strip"));
            }
        }
        for (i, &bp) in self.base.iter().enumerate() {
            if self.strong_generators.iter().all(|sg| sg.apply(bp) == bp) {
                return Err(Error::InvariantViolated("base point fixed by all strong generators"));
            }
            if self.schreier_structures[i].root() != bp {
                return Err(Error::InvariantViolated("level root differs from base point"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perm::FHashSet;

    fn perm(degree: usize, cycles: &[Vec<Point>]) -> Perm {
        Perm::from_cycles(degree, cycles).unwrap()
    }

    /// Brute-force closure of a generating set.
    fn brute_elements(generators: &PermSet) -> FHashSet<Perm> {
        let degree = generators.degree().unwrap();
        let mut elements: FHashSet<Perm> = [Perm::identity(degree)].into_iter().collect();
        let mut queue: Vec<Perm> = vec![Perm::identity(degree)];
        while let Some(element) = queue.pop() {
            for generator in generators {
                let next = generator * &element;
                if elements.insert(next.clone()) {
                    queue.push(next);
                }
            }
        }
        elements
    }

    fn assert_chain_matches_brute_force(degree: usize, generators: PermSet, options: &BSGSOptions) {
        let elements = brute_elements(&generators);
        let bsgs = BSGS::new(degree, generators, options).unwrap();
        assert_eq!(bsgs.order(), elements.len() as u128);
        for element in &elements {
            assert!(bsgs.strips_completely(element));
        }
    }

    fn sample_generator_sets(degree: usize) -> Vec<PermSet> {
        vec![
            vec![perm(degree, &[vec![1, 2]]), perm(degree, &[(1..=degree).collect()])].into(),
            vec![perm(degree, &[vec![1, 2, 3]]), perm(degree, &[vec![2, 3, 4]])].into(),
            vec![perm(degree, &[vec![1, 2], vec![3, 4]]), perm(degree, &[vec![2, 3]])].into(),
            vec![perm(degree, &[vec![1, 3]]), perm(degree, &[vec![1, 2], vec![3, 4]])].into(),
        ]
    }

    #[test]
    fn order_and_membership_match_brute_force() {
        for options in [
            BSGSOptions::default(),
            BSGSOptions { transversals: Transversals::SchreierTrees, ..Default::default() },
            BSGSOptions { reduce_gens: true, ..Default::default() },
        ] {
            for generators in sample_generator_sets(5) {
                assert_chain_matches_brute_force(5, generators, &options);
            }
        }
    }

    fn a4_generators() -> PermSet {
        vec![perm(4, &[vec![1, 2, 3]]), perm(4, &[vec![2, 3, 4]])].into()
    }

    #[test]
    fn non_members_fail_to_strip() {
        // A4 does not contain any transposition.
        let bsgs = BSGS::new(4, a4_generators(), &Default::default()).unwrap();
        assert_eq!(bsgs.order(), 12);
        for (a, b) in [(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)] {
            let transposition = Perm::from_cycles(4, &[vec![a, b]]).unwrap();
            assert!(!bsgs.strips_completely(&transposition));
        }
    }

    #[test]
    fn strip_reports_failure_level() {
        let bsgs = BSGS::new(4, a4_generators(), &Default::default()).unwrap();
        let (residue, position) = bsgs.strip(&Perm::from_cycles(4, &[vec![1, 2]]).unwrap(), 0);
        assert!(!residue.is_identity());
        assert!(position <= bsgs.base_size());
        let member = Perm::from_cycles(4, &[vec![1, 2], vec![3, 4]]).unwrap();
        let (residue, position) = bsgs.strip(&member, 0);
        assert!(residue.is_identity());
        assert_eq!(position, bsgs.base_size() + 1);
    }

    #[test]
    fn transversal_law_holds_per_level() {
        for transversals in [Transversals::Explicit, Transversals::SchreierTrees] {
            let options = BSGSOptions { transversals, ..Default::default() };
            for generators in sample_generator_sets(5) {
                let bsgs = BSGS::new(5, generators, &options).unwrap();
                for i in 0..bsgs.base_size() {
                    for &p in bsgs.orbit(i).iter() {
                        let t = bsgs.transversal(i, p).unwrap();
                        assert_eq!(t.apply(bsgs.base_point(i)), p);
                    }
                }
            }
        }
    }

    #[test]
    fn degree_three_transitive_odd_generators() {
        // Any transitive generating set of degree 3 containing odd
        // permutations yields S3: base (1, 2), orbit sizes 3 and 2.
        for generators in [
            vec![perm(3, &[vec![1, 2, 3]]), perm(3, &[vec![1, 2]])],
            vec![perm(3, &[vec![1, 2]]), perm(3, &[vec![2, 3]])],
        ] {
            let bsgs = BSGS::new(3, generators.into(), &Default::default()).unwrap();
            assert_eq!(bsgs.base(), vec![1, 2]);
            assert_eq!(bsgs.orbit(0).len(), 3);
            assert_eq!(bsgs.orbit(1).len(), 2);
            assert_eq!(bsgs.order(), 6);
        }
    }

    #[test]
    fn symmetric_fast_path() {
        for degree in 2..8 {
            let bsgs = BSGS::symmetric(degree);
            assert!(bsgs.is_symmetric());
            assert_eq!(bsgs.base(), (1..degree).collect::<Vec<_>>());
            let expected: u128 = (1..=degree as u128).product();
            assert_eq!(bsgs.order(), expected);
            for i in 0..bsgs.base_size() {
                assert_eq!(bsgs.orbit(i).len(), degree - i);
            }
        }
    }

    #[test]
    fn alternating_fast_path() {
        for degree in 3..8 {
            let bsgs = BSGS::alternating(degree);
            assert!(bsgs.is_alternating());
            assert_eq!(bsgs.base(), (1..degree - 1).collect::<Vec<_>>());
            let expected: u128 = (1..=degree as u128).product::<u128>() / 2;
            assert_eq!(bsgs.order(), expected);
            for sg in bsgs.strong_generators() {
                assert!(sg.is_even());
            }
        }
    }

    #[test]
    fn altsym_check_takes_fast_paths() {
        let degree = 10;
        let symmetric: PermSet =
            vec![perm(degree, &[vec![1, 2]]), perm(degree, &[(1..=degree).collect()])].into();
        let options = BSGSOptions { check_altsym: true, ..Default::default() };
        let bsgs = BSGS::new(degree, symmetric, &options).unwrap();
        assert!(bsgs.is_symmetric());
        assert_eq!(bsgs.order(), (1..=degree as u128).product());

        let alternating: PermSet =
            (3..=degree).map(|i| Perm::from_cycles(degree, &[vec![1, 2, i]]).unwrap()).collect();
        let bsgs = BSGS::new(degree, alternating, &options).unwrap();
        assert!(bsgs.is_alternating());
        assert_eq!(bsgs.order(), (1..=degree as u128).product::<u128>() / 2);
    }

    #[test]
    fn randomized_construction_with_known_order() {
        let generators = a4_generators();
        let options = BSGSOptions {
            construction: Construction::SchreierSimsRandom,
            schreier_sims_random_use_known_order: true,
            schreier_sims_random_known_order: 12,
            ..Default::default()
        };
        let bsgs = BSGS::new(4, generators.clone(), &options).unwrap();
        assert_eq!(bsgs.order(), 12);
        for element in brute_elements(&generators) {
            assert!(bsgs.strips_completely(&element));
        }
    }

    #[test]
    fn randomized_construction_with_wrong_order_hint_terminates() {
        // A stale hint (the supergroup's order, which the chain can never
        // reach) must degrade to the clean-strip bound, not hang.
        let options = BSGSOptions {
            construction: Construction::SchreierSimsRandom,
            schreier_sims_random_use_known_order: true,
            schreier_sims_random_known_order: 24,
            ..Default::default()
        };
        let bsgs = BSGS::new(4, a4_generators(), &options).unwrap();
        assert_eq!(bsgs.order(), 12);
    }

    #[test]
    fn randomized_construction_without_order_hint() {
        let generators: PermSet =
            vec![perm(5, &[vec![1, 2]]), perm(5, &[vec![1, 2, 3, 4, 5]])].into();
        let options =
            BSGSOptions { construction: Construction::SchreierSimsRandom, ..Default::default() };
        let bsgs = BSGS::new(5, generators, &options).unwrap();
        assert_eq!(bsgs.order(), 120);
    }

    #[test]
    fn solve_falls_back_to_deterministic_chain() {
        // S3 is solvable.
        let generators: PermSet = vec![perm(3, &[vec![1, 2, 3]]), perm(3, &[vec![1, 2]])].into();
        let options = BSGSOptions { construction: Construction::Solve, ..Default::default() };
        let bsgs = BSGS::new(3, generators, &options).unwrap();
        assert_eq!(bsgs.order(), 6);
    }

    #[test]
    fn reduce_gens_preserves_the_group() {
        // Redundant generating set of S4.
        let generators: PermSet = vec![
            perm(4, &[vec![1, 2]]),
            perm(4, &[vec![1, 2, 3, 4]]),
            perm(4, &[vec![2, 3]]),
            perm(4, &[vec![3, 4]]),
            perm(4, &[vec![1, 3]]),
        ]
        .into();
        let reduced = BSGS::new(
            4,
            generators.clone(),
            &BSGSOptions { reduce_gens: true, ..Default::default() },
        )
        .unwrap();
        let full = BSGS::new(4, generators, &Default::default()).unwrap();
        assert_eq!(reduced.order(), 24);
        assert!(reduced.strong_generators().len() <= full.strong_generators().len());
        for sg in full.strong_generators() {
            assert!(reduced.strips_completely(sg));
        }
    }

    #[test]
    fn shallow_schreier_trees_unsupported() {
        let generators: PermSet = vec![perm(3, &[vec![1, 2]])].into();
        let options =
            BSGSOptions { transversals: Transversals::ShallowSchreierTrees, ..Default::default() };
        assert_eq!(
            BSGS::new(3, generators, &options).unwrap_err(),
            Error::Unsupported("shallow Schreier trees")
        );
    }

    #[test]
    fn trivial_and_invalid_inputs() {
        assert_eq!(BSGS::new(3, PermSet::new(), &Default::default()).unwrap().order(), 1);
        assert_eq!(
            BSGS::new(3, PermSet::from(vec![Perm::identity(3)]), &Default::default())
                .unwrap()
                .base_size(),
            0
        );
        assert!(BSGS::new(0, PermSet::new(), &Default::default()).is_err());
        assert_eq!(
            BSGS::new(3, PermSet::from(vec![Perm::identity(4)]), &Default::default()).unwrap_err(),
            Error::DegreeMismatch { expected: 3, actual: 4 }
        );
    }

    #[test]
    fn extend_base_builds_levels() {
        let mut bsgs = BSGS::trivial(4);
        bsgs.extend_base(2);
        assert_eq!(bsgs.base(), vec![2]);
        assert_eq!(bsgs.orbit(0).iter().copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(bsgs.order(), 1);
        bsgs.extend_base_at(1, 0);
        assert_eq!(bsgs.base(), vec![1, 2]);
        assert_eq!(bsgs.schreier_structure(0).root(), 1);
    }

    #[test]
    fn level_labels_stabilize_base_prefix() {
        let generators: PermSet =
            vec![perm(5, &[vec![1, 2, 3, 4, 5]]), perm(5, &[vec![1, 2]])].into();
        let bsgs = BSGS::new(5, generators, &Default::default()).unwrap();
        for i in 0..bsgs.base_size() {
            for label in bsgs.stabilizers(i) {
                assert!(label.stabilizes(bsgs.base()[..i].iter().copied()));
            }
        }
    }
}
