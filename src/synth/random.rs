use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded random source owned by a single generation run.
///
/// Every draw made while building a dataset goes through one instance, so two
/// runs with the same seed see the same stream and nothing outside the run can
/// observe or perturb it.
pub struct SeededRandom {
    inner: StdRng,
    seed: u64,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Uniform integer in [low, low + width), as an amount.
    pub fn amount(&mut self, low: u32, width: u32) -> f64 {
        f64::from(low + self.inner.gen_range(0..width))
    }

    /// Uniform index in [0, len) different from `exclude`. `len` must be at least 2.
    pub fn index_excluding(&mut self, len: usize, exclude: usize) -> usize {
        loop {
            let idx = self.index(len);
            if idx != exclude {
                return idx;
            }
        }
    }

    /// Uniform value in [low, high).
    pub fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }

    /// Pick one element of a non-empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }
}
