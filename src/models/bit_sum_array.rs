/// A bit array backed by a prefix sum array for fast rank queries.
///
/// Only what block partitioning needs is implemented: bits can be set but
/// never cleared, and `cardinality` is only valid after `build_sums`.
#[derive(Debug, Clone)]
pub struct BitSumArray {
    /// Packed bits, 64 per word
    words: Vec<u64>,
    /// Inclusive prefix sums of set bits per word
    sums: Vec<usize>,
    /// Number of addressable bits
    capacity: usize,
}

const WORD_BITS: usize = 6;
const WORD_SIZE: usize = 1 << WORD_BITS;

impl BitSumArray {
    /// Create an array of `capacity` cleared bits
    pub fn new(capacity: usize) -> Self {
        let word_count = (capacity + WORD_SIZE - 1) >> WORD_BITS;
        Self {
            words: vec![0; word_count],
            sums: Vec::new(),
            capacity,
        }
    }

    /// Set bit `i` to one
    pub fn set(&mut self, i: usize) {
        debug_assert!(i < self.capacity, "bit {i} out of range {}", self.capacity);
        self.words[i >> WORD_BITS] |= mask(i);
    }

    /// Whether bit `i` is one
    pub fn get(&self, i: usize) -> bool {
        self.words[i >> WORD_BITS] & mask(i) != 0
    }

    /// Freeze the prefix sums used by [`cardinality`](Self::cardinality).
    pub fn build_sums(&mut self) {
        let mut total = 0;
        self.sums = self
            .words
            .iter()
            .map(|word| {
                total += word.count_ones() as usize;
                total
            })
            .collect();
    }

    /// Number of set bits in `0..end`.
    pub fn cardinality(&self, end: usize) -> usize {
        if end == 0 {
            return 0;
        }

        let word = end >> WORD_BITS;
        match self.words.get(word) {
            Some(bits) => self.sums[word] - (bits >> (end & (WORD_SIZE - 1))).count_ones() as usize,
            None => self.sums.last().copied().unwrap_or(0),
        }
    }
}

fn mask(i: usize) -> u64 {
    1 << (i & (WORD_SIZE - 1))
}
