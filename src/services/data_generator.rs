// Seeded inputs for benchmarks and stability checks

/// Digits cycled through by the stability input. Dividing by three, each
/// group {0, 1, 2}, {3, 4, 5}, {6, 7, 8} appears in ascending order.
const STABILITY_PATTERN: [u32; 9] = [3, 0, 6, 4, 7, 8, 1, 5, 2];

/// Key used by the stability input: elements are equal within a group of three.
pub fn stability_key(x: &u32) -> u32 {
    x / 3
}

/// Generates sort inputs from a fixed seed
#[derive(Debug, Clone)]
pub struct InputGenerator {
    rng: fastrand::Rng,
}

impl InputGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// A shuffled permutation of `1..=n`.
    pub fn permutation(&mut self, n: usize) -> Vec<u32> {
        let mut v: Vec<u32> = (1..=n as u32).collect();
        self.rng.shuffle(&mut v);
        v
    }

    /// A shuffled permutation of `1..=n` in which each upper half
    /// `[i / 2, i)`, for `i = n, n / 2, ...` while `i > floor`, has been
    /// sorted with probability one half.
    pub fn presorted_permutation(&mut self, n: usize, floor: usize) -> Vec<u32> {
        let mut v = self.permutation(n);

        let mut i = n;
        while i > floor {
            if self.rng.bool() {
                v[i >> 1..i].sort_unstable();
            }
            i >>= 1;
        }

        v
    }
}

/// The repeating stability input of length `n`, with a middle stretch
/// already stably sorted by [`stability_key`].
pub fn stability_input(n: usize) -> Vec<u32> {
    let mut v: Vec<u32> = (0..n).map(|i| STABILITY_PATTERN[i % STABILITY_PATTERN.len()]).collect();

    // Same proportions as 979..4934 out of 9000
    let (lo, hi) = (n * 979 / 9000, n * 4934 / 9000);
    v[lo..hi].sort_by_key(stability_key);
    v
}
