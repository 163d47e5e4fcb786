//! String-seeded deterministic pseudo-randomness.
//!
//! Every random-looking decision in a layout pass (item scale, pocket pick,
//! offsets, rotation) is drawn from a seed string built from the item's
//! stable identity plus a purpose tag. The same seed always yields the same
//! value, across calls and across process restarts.
//!
//! Not cryptographically secure. Its only job is reproducible visual jitter.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};
#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Hash a string to a 32-bit signed integer with a polynomial rolling hash.
///
/// `h = h * 31 + unit` over the UTF-16 code units, wrapping at 32 bits.
pub fn hash_seed(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(unit as i32)
    })
}

/// Fraction in `[0, 1)` derived from `seed`.
///
/// Feeds the seed hash through `sin(h) * 10000` and keeps the fractional part.
pub fn unit_from_hash(seed: &str) -> f64 {
    let x = (hash_seed(seed) as f64).sin() * 10000.0;
    let frac = x - x.floor();
    // `x - floor(x)` rounds up to exactly 1.0 for tiny negative x.
    if frac >= 1.0 { 0.0 } else { frac }
}

/// Value in `[min, max)` derived from `seed`.
pub fn random_from_hash(seed: &str, min: f64, max: f64) -> f64 {
    min + unit_from_hash(seed) * (max - min)
}

/// Stable per-item seed: the item id joined with its list index.
///
/// Draws append a purpose tag (`"-scale"`, `"-rotation-mag"`, …) so two
/// uses of randomness for the same item never collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SeedKey {
    key: String,
}

impl SeedKey {
    /// Seed for the item `id` at position `index` in the input list.
    pub fn new(id: &str, index: usize) -> Self {
        Self {
            key: format!("{id}-{index}"),
        }
    }

    /// The underlying seed string.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Value in `[min, max)` for the given purpose tag.
    pub fn range(&self, tag: &str, min: f64, max: f64) -> f64 {
        random_from_hash(&self.tagged(tag), min, max)
    }

    /// Fraction in `[0, 1)` for the given purpose tag.
    pub fn unit(&self, tag: &str) -> f64 {
        unit_from_hash(&self.tagged(tag))
    }

    /// Index in `0..len` for the given purpose tag. `len` must be non-zero.
    pub fn pick(&self, tag: &str, len: usize) -> usize {
        let i = (self.unit(tag) * len as f64) as usize;
        i.min(len.saturating_sub(1))
    }

    fn tagged(&self, tag: &str) -> String {
        let mut s = String::with_capacity(self.key.len() + tag.len());
        s.push_str(&self.key);
        s.push_str(tag);
        s
    }
}
