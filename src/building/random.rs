/***************************************/
/*        3rd party libraries          */
/***************************************/
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::collections::VecDeque;

/// Source of the randomness used by passenger spawning.
pub trait RandomSource {
    /// Uniform real in [0, 1).
    fn next_unit(&mut self) -> f64;
    /// Uniform integer in [0, n). `n` is always at least 1.
    fn next_index(&mut self, n: usize) -> usize;
}

/// `StdRng` backed source. Reproducible when built from a seed.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }
}

/**
 * Replays fixed sequences of values.
 *
 * Each sequence cycles once exhausted; an empty sequence yields 0. Index
 * values are reduced modulo `n` and unit values are clamped into [0, 1).
 */
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    units: VecDeque<f64>,
    indices: VecDeque<usize>,
}

impl ScriptedSource {
    pub fn new(units: Vec<f64>, indices: Vec<usize>) -> Self {
        Self {
            units: units.into(),
            indices: indices.into(),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        match self.units.pop_front() {
            Some(u) => {
                self.units.push_back(u);
                u.clamp(0.0, 1.0 - f64::EPSILON)
            }
            None => 0.0,
        }
    }

    fn next_index(&mut self, n: usize) -> usize {
        match self.indices.pop_front() {
            Some(i) => {
                self.indices.push_back(i);
                i % n.max(1)
            }
            None => 0,
        }
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = SeededSource::from_seed(42);
        let mut b = SeededSource::from_seed(42);

        for _ in 0..32 {
            assert_eq!(a.next_unit(), b.next_unit());
            assert_eq!(a.next_index(7), b.next_index(7));
        }
    }

    #[test]
    fn test_seeded_source_stays_in_range() {
        let mut source = SeededSource::from_seed(1);

        for _ in 0..1000 {
            let u = source.next_unit();
            assert!((0.0..1.0).contains(&u));
            assert!(source.next_index(5) < 5);
        }
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut source = ScriptedSource::new(vec![0.25, 0.5], vec![3, 9]);

        assert_eq!(source.next_unit(), 0.25);
        assert_eq!(source.next_unit(), 0.5);
        assert_eq!(source.next_unit(), 0.25);
        assert_eq!(source.next_index(5), 3);
        assert_eq!(source.next_index(5), 4);
        assert_eq!(source.next_index(5), 3);
    }

    #[test]
    fn test_scripted_source_empty_yields_zero() {
        let mut source = ScriptedSource::default();

        assert_eq!(source.next_unit(), 0.0);
        assert_eq!(source.next_index(4), 0);
    }
}
