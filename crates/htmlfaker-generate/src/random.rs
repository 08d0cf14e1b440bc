//! Entropy primitives used at every branch point of the composers.

use std::fmt;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use htmlfaker_core::{Error, Result, WeightTable};

/// Uniform, boolean, ranged, jittered and weighted sampling over one RNG.
pub struct RandomSource {
    rng: Box<dyn RngCore>,
}

impl fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomSource").finish_non_exhaustive()
    }
}

impl RandomSource {
    pub fn new(rng: impl RngCore + 'static) -> Self {
        Self { rng: Box::new(rng) }
    }

    /// Deterministic source: the same seed yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        self.rng.as_mut()
    }

    /// Uniform float in `[0, 1)`.
    pub fn uniform_float(&mut self) -> f64 {
        self.rng().random::<f64>()
    }

    /// `true` with probability `probability`; 0 never fires, 1 always does.
    pub fn chance(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.uniform_float() < probability
    }

    /// Uniform integer in `lo..=hi`.
    pub fn int_between(&mut self, lo: i64, hi: i64) -> Result<i64> {
        if lo > hi {
            return Err(Error::InvalidRange { lo, hi });
        }
        Ok(self.rng().random_range(lo..=hi))
    }

    /// Uniform float between `lo` and `hi`.
    pub fn float_between(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.uniform_float() * (hi - lo)
    }

    /// Integer uniformly drawn from `[value * (1 - spread), value * (1 + spread)]`,
    /// with the bounds floored and ceiled.
    pub fn jitter_int(&mut self, value: i64, spread: f64) -> Result<i64> {
        let spread = spread.clamp(0.0, 1.0);
        if spread == 0.0 {
            return Ok(value);
        }
        let low = (value as f64 * (1.0 - spread)).floor() as i64;
        let high = (value as f64 * (1.0 + spread)).ceil() as i64;
        self.int_between(low.min(high), low.max(high))
    }

    /// Float uniformly drawn from `[value * (1 - spread), value * (1 + spread)]`.
    pub fn jitter_float(&mut self, value: f64, spread: f64) -> f64 {
        let spread = spread.clamp(0.0, 1.0);
        if spread == 0.0 {
            return value;
        }
        self.float_between(value * (1.0 - spread), value * (1.0 + spread))
    }

    /// Jittered unit count, never below 1.
    pub fn jitter_count(&mut self, value: u32, spread: f64) -> Result<usize> {
        let jittered = self.jitter_int(i64::from(value), spread)?;
        Ok(jittered.max(1) as usize)
    }

    /// Jittered continuous size, never below 0.
    pub fn jitter_size(&mut self, value: f64, spread: f64) -> f64 {
        self.jitter_float(value, spread).max(0.0)
    }

    /// Uniformly pick one item; `None` when `items` is empty.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let index = self.rng().random_range(0..items.len());
        items.get(index).copied()
    }

    /// Select a key with probability proportional to its weight.
    ///
    /// A single-entry table is answered without drawing. Zero-weight keys are
    /// skipped unless every weight is zero, in which case the first key wins.
    /// Rounding residue after the last key resolves to the last positive key.
    pub fn weighted_choice<K: Copy + PartialEq>(&mut self, table: &WeightTable<K>) -> Result<K> {
        let entries = table.entries();
        let (first, last) = match entries {
            [] => return Err(Error::EmptyWeightTable(table.name().to_string())),
            [(only, _)] => return Ok(*only),
            [(first, _), .., (last, _)] => (*first, *last),
        };

        let total = table.total();
        let mut remaining = self.uniform_float() * total;
        for (key, weight) in entries {
            if total > 0.0 && *weight <= 0.0 {
                continue;
            }
            remaining -= weight;
            if remaining <= 0.0 {
                return Ok(*key);
            }
        }

        let fallback = entries
            .iter()
            .rev()
            .find(|(_, weight)| *weight > 0.0)
            .map(|(key, _)| *key);
        Ok(fallback.unwrap_or(if total > 0.0 { last } else { first }))
    }
}
