//! Random sources for round building: OS entropy when available, seeded PRNG otherwise.
//!
//! Fairness here is party-game fairness. Neither source is meant to give
//! cryptographic unpredictability guarantees to players.

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Uniform integer source injected into the shuffle.
pub trait RandomSource {
    /// Uniform value in `0..upper`. Returns 0 when `upper` is 0.
    fn below(&mut self, upper: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn below(&mut self, upper: usize) -> usize {
        (**self).below(upper)
    }
}

/// Operating-system entropy.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureRandom;

impl SecureRandom {
    /// Probe the OS generator once; None if it is unavailable.
    pub fn detect() -> Option<Self> {
        let mut probe = [0u8; 8];
        OsRng.try_fill_bytes(&mut probe).ok()?;
        Some(SecureRandom)
    }
}

impl RandomSource for SecureRandom {
    fn below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        OsRng.gen_range(0..upper)
    }
}

/// Seedable pseudo-random fallback (also used for reproducible tests).
#[derive(Clone, Debug)]
pub struct PseudoRandom {
    rng: StdRng,
}

impl PseudoRandom {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the wall clock, for when no OS entropy is available.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::seeded(nanos)
    }
}

impl RandomSource for PseudoRandom {
    fn below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }
}

/// Pick the source once at startup: OS entropy if it works, PRNG fallback otherwise.
pub fn detect_random_source() -> Box<dyn RandomSource + Send> {
    match SecureRandom::detect() {
        Some(secure) => {
            log::info!("Using OS entropy for round shuffles");
            Box::new(secure)
        }
        None => {
            log::warn!("OS entropy unavailable, falling back to clock-seeded PRNG");
            Box::new(PseudoRandom::from_clock())
        }
    }
}

/// Fisher-Yates shuffle of `0..n`. Every ordering is equally likely up to RNG quality.
pub fn shuffled_indices(n: usize, rng: &mut dyn RandomSource) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.below(i + 1);
        indices.swap(i, j);
    }
    indices
}
