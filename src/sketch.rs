//! Approximate distinct counting with a HyperLogLog sketch.
//!
//! Small cardinalities are tracked exactly as a sorted list of 64-bit hashes.
//! Once that list would outgrow the register array it is folded into dense
//! HyperLogLog registers, so memory stays bounded by `2^precision` bytes
//! whatever the stream length or cardinality.

use foldhash::quality::FixedState;
use std::hash::BuildHasher;

/// Default precision: 4096 registers, ~1.6% standard error.
pub const DEFAULT_PRECISION: u8 = 12;

/// Smallest supported precision.
pub const MIN_PRECISION: u8 = 4;

/// Largest supported precision.
pub const MAX_PRECISION: u8 = 16;

const HASH_SEED: u64 = 0x6364_692d_7072_6f66;

/// Fixed-memory approximate distinct-count estimator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardinalityEstimator {
    precision: u8,
    repr: Representation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Representation {
    /// Exact set of observed hashes, kept sorted.
    Sparse(Vec<u64>),
    /// One register per bucket holding the maximum observed rank.
    Dense(Box<[u8]>),
}

impl Default for CardinalityEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl CardinalityEstimator {
    /// Create an estimator with `2^precision` registers.
    ///
    /// The precision is clamped to `MIN_PRECISION..=MAX_PRECISION`.
    pub fn new(precision: u8) -> Self {
        Self {
            precision: precision.clamp(MIN_PRECISION, MAX_PRECISION),
            repr: Representation::Sparse(Vec::new()),
        }
    }

    /// Configured precision.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Number of dense registers (`2^precision`).
    #[inline]
    pub fn register_count(&self) -> usize {
        1 << self.precision
    }

    /// Returns true once the exact phase has been left behind.
    pub fn is_dense(&self) -> bool {
        matches!(self.repr, Representation::Dense(_))
    }

    /// Sparse entries are 8 bytes each; stop before exceeding the dense size.
    fn sparse_limit(&self) -> usize {
        self.register_count() / std::mem::size_of::<u64>()
    }

    /// Incorporate one observation.
    pub fn update(&mut self, value: &[u8]) {
        let hash = FixedState::with_seed(HASH_SEED).hash_one(value);
        self.insert_hash(hash);
    }

    fn insert_hash(&mut self, hash: u64) {
        let limit = self.sparse_limit();
        let precision = self.precision;
        match &mut self.repr {
            Representation::Sparse(hashes) => {
                if let Err(pos) = hashes.binary_search(&hash) {
                    if hashes.len() < limit {
                        hashes.insert(pos, hash);
                        return;
                    }
                    let mut registers = vec![0u8; 1 << precision].into_boxed_slice();
                    for &h in hashes.iter() {
                        set_register(&mut registers, precision, h);
                    }
                    set_register(&mut registers, precision, hash);
                    self.repr = Representation::Dense(registers);
                }
            }
            Representation::Dense(registers) => set_register(registers, precision, hash),
        }
    }

    /// Estimated number of distinct values seen so far.
    pub fn estimate(&self) -> u64 {
        match &self.repr {
            Representation::Sparse(hashes) => hashes.len() as u64,
            Representation::Dense(registers) => dense_estimate(registers).round() as u64,
        }
    }
}

/// Record `hash` in its bucket: the top `precision` bits pick the register,
/// the rank is the position of the first set bit in the remainder.
#[inline]
fn set_register(registers: &mut [u8], precision: u8, hash: u64) {
    let index = (hash >> (64 - precision)) as usize;
    let remainder = (hash << precision) | (1u64 << (precision - 1));
    let rank = remainder.leading_zeros() as u8 + 1;
    if registers[index] < rank {
        registers[index] = rank;
    }
}

fn dense_estimate(registers: &[u8]) -> f64 {
    let m = registers.len() as f64;
    let alpha = match registers.len() {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / m),
    };

    let sum: f64 = registers.iter().map(|&r| 2.0_f64.powi(-i32::from(r))).sum();
    let raw = alpha * m * m / sum;

    // Linear counting is more accurate while many registers are still empty.
    let zeros = bytecount::count(registers, 0);
    if raw <= 2.5 * m && zeros > 0 {
        m * (m / zeros as f64).ln()
    } else {
        raw
    }
}
