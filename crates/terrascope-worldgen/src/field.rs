//! Seeded multi-octave noise sampling.

use noise::{NoiseFn, Perlin};
use terrascope_common::ConfigError;

/// Octaves summed per sample.
pub const DEFAULT_OCTAVES: u32 = 4;

/// Amplitude falloff between octaves.
pub const DEFAULT_PERSISTENCE: f64 = 0.5;

/// Deterministic 2D scalar field in `[0, 1]`.
///
/// Each octave doubles the frequency and multiplies the amplitude by the
/// persistence. The octave sum is normalized by the total amplitude, then
/// remapped from `[-1, 1]` to `[0, 1]`.
#[derive(Clone)]
pub struct NoiseField {
    seed: u32,
    source: Perlin,
    octaves: u32,
    persistence: f64,
}

impl NoiseField {
    /// Creates a field with the default detail settings.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            source: Perlin::new(seed),
            octaves: DEFAULT_OCTAVES,
            persistence: DEFAULT_PERSISTENCE,
        }
    }

    /// Creates a field with explicit octave settings.
    pub fn with_detail(seed: u32, octaves: u32, persistence: f64) -> Result<Self, ConfigError> {
        if octaves == 0 {
            return Err(ConfigError::Octaves(octaves));
        }
        if !(persistence > 0.0 && persistence <= 1.0) {
            return Err(ConfigError::Persistence(persistence));
        }
        Ok(Self {
            seed,
            source: Perlin::new(seed),
            octaves,
            persistence,
        })
    }

    /// Returns the active seed.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Returns the octave count.
    #[must_use]
    pub const fn octaves(&self) -> u32 {
        self.octaves
    }

    /// Replaces the seed. Later samples follow the new seed.
    pub fn reseed(&mut self, seed: u32) {
        self.seed = seed;
        self.source = Perlin::new(seed);
    }

    /// Samples the field at `(x, y)`.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..self.octaves {
            total += self.source.get([x * frequency, y * frequency]) * amplitude;
            max_value += amplitude;
            amplitude *= self.persistence;
            frequency *= 2.0;
        }

        ((total / max_value + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .field("octaves", &self.octaves)
            .field("persistence", &self.persistence)
            .finish_non_exhaustive()
    }
}
