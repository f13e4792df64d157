//! Product-replacement generation of approximately uniform random group
//! elements, with probabilistic symmetric/alternating detection.
use crate::perm::{Perm, PermSet};
use crate::schreier::Orbit;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

const MIN_TAPE: usize = 10;
const WARMUP_STEPS: usize = 50;
/// Samples drawn per alt/sym test are `⌈ALTSYM_RUNS_FACTOR · log₂ d⌉`.
const ALTSYM_RUNS_FACTOR: f64 = 10.0;
const DEFAULT_SEED: u64 = 0x5eed;

/// Markov chain on a tape of group elements whose stationary distribution is
/// approximately uniform on the generated group. One step replaces a random
/// tape slot by its product with another slot (random side and polarity) and
/// folds the replaced slot into an accumulator on the same side; this is the
/// accumulator ("rattle") variant of product replacement.
///
/// Owns its PRNG; construction is deterministic given the seed.
pub struct PrRandomizer {
    degree: usize,
    tape: Vec<Perm>,
    accumulator: Perm,
    rng: Pcg64Mcg,
}

impl PrRandomizer {
    /// Randomizer with a fixed default seed.
    pub fn new(generators: &PermSet) -> Self {
        Self::with_seed(generators, DEFAULT_SEED)
    }

    pub fn with_seed(generators: &PermSet, seed: u64) -> Self {
        let degree = generators.degree().unwrap_or(1);
        let tape_len = MIN_TAPE.max(2 * generators.len() + 1);

        // Seed the tape by cycling the generators, padding with the identity
        // when there are none.
        let tape = if generators.is_empty() {
            vec![Perm::identity(degree); tape_len]
        } else {
            generators.iter().cycle().take(tape_len).cloned().collect()
        };

        let mut randomizer = Self {
            degree,
            tape,
            accumulator: Perm::identity(degree),
            rng: Pcg64Mcg::seed_from_u64(seed),
        };
        for _ in 0..WARMUP_STEPS {
            randomizer.step();
        }
        randomizer
    }

    /// An approximately uniform random element of the generated group.
    pub fn next(&mut self) -> Perm {
        self.step();
        self.accumulator.clone()
    }

    fn step(&mut self) {
        let n = self.tape.len();
        let i = self.rng.gen_range(0..n);
        let mut j = self.rng.gen_range(0..n - 1);
        if j >= i {
            j += 1;
        }

        let factor = if self.rng.gen() { self.tape[j].clone() } else { self.tape[j].inverse() };
        if self.rng.gen() {
            self.tape[i] = &self.tape[i] * &factor;
            self.accumulator = &self.accumulator * &self.tape[i];
        } else {
            self.tape[i] = &factor * &self.tape[i];
            self.accumulator = &self.tape[i] * &self.accumulator;
        }
    }

    /// Probabilistic test whether the generated group is the full symmetric
    /// group: passes iff some sample is odd and the samples act transitively.
    /// False negatives occur with probability bounded by the run count;
    /// a `false` result is not a certificate.
    pub fn test_symmetric(&mut self) -> bool {
        let samples = self.sample_set();
        samples.iter().any(|p| !p.is_even()) && self.transitive(&samples)
    }

    /// Probabilistic test for the alternating group: all samples even and
    /// acting transitively.
    pub fn test_alternating(&mut self) -> bool {
        let samples = self.sample_set();
        samples.iter().all(Perm::is_even) && self.transitive(&samples)
    }

    fn sample_set(&mut self) -> PermSet {
        let runs = (ALTSYM_RUNS_FACTOR * (self.degree as f64).log2()).ceil().max(1.0) as usize;
        let mut samples: PermSet = (0..runs).map(|_| self.next()).collect();
        samples.make_unique();
        samples.drop_identities();
        samples
    }

    fn transitive(&self, samples: &PermSet) -> bool {
        if samples.is_empty() {
            return self.degree == 1;
        }
        Orbit::of(1, samples).len() == self.degree
    }
}
