//! # Map Seeds
//!
//! Deterministic seeding for cave generation.
//!
//! ## Determinism Guarantee
//!
//! Given the same `MapSeed`, the random fill draws **exactly** the same
//! sequence on any platform. `ChaCha8Rng` is used instead of `StdRng`
//! because its output stream is fixed across `rand` releases.
//!
//! Seeds can be written as integers or as free-form phrases. A phrase that
//! parses as a `u64` is that number; any other phrase is hashed with
//! FNV-1a 64.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// FNV-1a 64-bit offset basis.
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
/// FNV-1a 64-bit prime.
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Seed for deterministic cave generation.
///
/// All randomness in a generated cave derives from this value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SeedRepr", into = "SeedRepr")]
pub struct MapSeed(u64);

impl MapSeed {
    /// Creates a seed from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Creates a seed from a phrase.
    ///
    /// `"42"` and `MapSeed::new(42)` are the same seed. Anything else is
    /// hashed, so `"crystal caverns"` always maps to the same cave.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        let trimmed = phrase.trim();
        match trimmed.parse::<u64>() {
            Ok(value) => Self(value),
            Err(_) => Self(fnv1a(trimmed.as_bytes())),
        }
    }
}

/// FNV-1a 64 over a byte string.
const fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

impl fmt::Display for MapSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MapSeed {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_phrase(s))
    }
}

impl From<u64> for MapSeed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// On-disk form of a seed: a bare integer or a phrase.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum SeedRepr {
    Number(u64),
    Phrase(String),
}

impl From<SeedRepr> for MapSeed {
    fn from(repr: SeedRepr) -> Self {
        match repr {
            SeedRepr::Number(value) => Self(value),
            SeedRepr::Phrase(phrase) => Self::from_phrase(&phrase),
        }
    }
}

impl From<MapSeed> for SeedRepr {
    fn from(seed: MapSeed) -> Self {
        Self::Number(seed.0)
    }
}

// =============================================================================
// RANDOM SOURCE
// =============================================================================

/// Seeded random source consumed by the random fill.
///
/// Wraps a `ChaCha8Rng` and remembers the seed it was built from.
#[derive(Debug, Clone)]
pub struct MapRng {
    rng: ChaCha8Rng,
    seed: MapSeed,
}

impl MapRng {
    /// Creates a random source from a seed.
    #[must_use]
    pub fn new(seed: MapSeed) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed.value()),
            seed,
        }
    }

    /// Seed this source was created from.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> MapSeed {
        self.seed
    }

    /// Uniform value in `[0, n)`. Returns 0 when `n` is 0.
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns `true` with probability `percent / 100`.
    ///
    /// Draws `below(100)` and compares it against `percent`, so 0 never
    /// succeeds and 100 always does.
    pub fn percent(&mut self, percent: u8) -> bool {
        self.below(100) < u32::from(percent)
    }
}
