//! # Lattice Gradient Noise
//!
//! Deterministic 2D gradient noise plus a fractal (fbm) wrapper.
//!
//! ## Determinism Guarantee
//!
//! Given the same `WorldSeed`, this implementation produces **exactly** the
//! same values on any platform, any time. The permutation shuffle is driven
//! by ChaCha8, whose output stream is stable across platforms and releases.
//!
//! ## World Space Only
//!
//! Callers always pass world coordinates (scaled by a frequency), never
//! chunk-local ones. Two chunks sampling the same world point get the same
//! value, which is what makes chunk borders invisible.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// World seed for deterministic generation.
///
/// All procedural generation derives from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Creates a new world seed.
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

    /// Derives a sub-seed for a specific purpose (e.g., the agent's walk).
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self(42)
    }
}

impl std::fmt::Display for WorldSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Permutation of `0..256` doubled to 512 entries.
///
/// Doubling means `perm[perm[x] + y + 1]` never needs wrapping.
struct PermutationTable {
    perm: [u8; 512],
}

impl PermutationTable {
    fn new(seed: WorldSeed) -> Self {
        let mut base: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut rng = ChaCha8Rng::seed_from_u64(seed.value());
        base.shuffle(&mut rng);

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&base);
        perm[256..].copy_from_slice(&base);

        Self { perm }
    }

    #[inline]
    fn get(&self, index: usize) -> usize {
        usize::from(self.perm[index])
    }
}

/// 2D lattice gradient noise (classic Perlin construction).
///
/// Produces smooth, continuous values in `[-1, 1]`. Exactly zero on every
/// integer lattice point.
///
/// # Example
///
/// ```rust
/// use tilestream_procedural::noise::{NoiseField, WorldSeed};
///
/// let noise = NoiseField::new(WorldSeed::new(42));
/// let value = noise.sample(100.5, 200.3);
/// assert!((-1.0..=1.0).contains(&value));
/// ```
pub struct NoiseField {
    perm_table: PermutationTable,
}

impl NoiseField {
    /// Builds the noise field for a seed.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            perm_table: PermutationTable::new(seed),
        }
    }

    /// Samples noise at `(x, y)`.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x_floor = x.floor();
        let y_floor = y.floor();

        // Lattice cell, wrapped into the table
        let xi = (x_floor as i64 & 255) as usize;
        let yi = (y_floor as i64 & 255) as usize;

        let xf = x - x_floor;
        let yf = y - y_floor;
        let u = fade(xf);
        let v = fade(yf);

        let p = &self.perm_table;
        let aa = p.get(p.get(xi) + yi);
        let ab = p.get(p.get(xi) + yi + 1);
        let ba = p.get(p.get(xi + 1) + yi);
        let bb = p.get(p.get(xi + 1) + yi + 1);

        let x1 = lerp(grad(aa, xf, yf), grad(ba, xf - 1.0, yf), u);
        let x2 = lerp(grad(ab, xf, yf - 1.0), grad(bb, xf - 1.0, yf - 1.0), u);
        lerp(x1, x2, v)
    }

    /// Generates fractal Brownian motion.
    ///
    /// Sums `octaves` samples, each at `lacunarity` times the previous
    /// frequency and `gain` times the previous amplitude, then divides by
    /// the total amplitude.
    ///
    /// # Returns
    ///
    /// A value roughly in the range [-1, 1]. Zero octaves yield `0.0`.
    #[must_use]
    pub fn fbm(&self, x: f64, y: f64, octaves: u32, lacunarity: f64, gain: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut norm = 0.0;

        for _ in 0..octaves {
            total += amplitude * self.sample(x * frequency, y * frequency);
            norm += amplitude;
            amplitude *= gain;
            frequency *= lacunarity;
        }

        if norm == 0.0 {
            0.0
        } else {
            total / norm
        }
    }
}

/// Quintic smoothing curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product of `(x, y)` with one of 8 fixed diagonal directions.
#[inline]
fn grad(hash: usize, x: f64, y: f64) -> f64 {
    let h = hash & 7;
    let (u, v) = if h < 4 { (x, y) } else { (y, x) };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

/// Fractal noise parameters.
///
/// Presets that work well:
/// - islands: 5 octaves, lacunarity 2.0, gain 0.5, base frequency 1/100
/// - continents: 6 octaves, lacunarity 2.2, gain 0.55, base frequency 1/80
/// - rolling hills: 4 octaves, lacunarity 1.9, gain 0.4, base frequency 1/120
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalParams {
    /// Number of noise layers. More octaves add ridges and valleys.
    pub octaves: u32,
    /// Frequency multiplier per octave. Below 2.0 blends detail more softly.
    pub lacunarity: f64,
    /// Amplitude multiplier per octave. Higher means rougher terrain.
    pub gain: f64,
    /// World-to-noise scale. Smaller values give larger features.
    pub base_frequency: f64,
}

impl FractalParams {
    /// Samples fbm at world coordinates `(world_x, world_y)`.
    #[inline]
    #[must_use]
    pub fn height_at(&self, field: &NoiseField, world_x: f64, world_y: f64) -> f64 {
        field.fbm(
            world_x * self.base_frequency,
            world_y * self.base_frequency,
            self.octaves,
            self.lacunarity,
            self.gain,
        )
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: 5,
            lacunarity: 2.0,
            gain: 0.5,
            base_frequency: 1.0 / 80.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let seed = WorldSeed::new(12345);
        let noise1 = NoiseField::new(seed);
        let noise2 = NoiseField::new(seed);

        for i in 0..100 {
            let x = f64::from(i) * 0.1;
            let y = f64::from(i) * 0.17;
            assert_eq!(
                noise1.sample(x, y).to_bits(),
                noise2.sample(x, y).to_bits(),
                "Noise should be deterministic"
            );
        }
    }

    #[test]
    fn test_permutation_is_a_doubled_shuffle() {
        let table = PermutationTable::new(WorldSeed::new(7));

        let mut seen = [false; 256];
        for &p in &table.perm[..256] {
            seen[usize::from(p)] = true;
        }
        assert!(seen.iter().all(|&s| s), "All 256 values must appear once");
        assert_eq!(table.perm[..256], table.perm[256..]);

        let identity: Vec<u8> = (0..=255).collect();
        assert_ne!(table.perm[..256], identity[..], "Table should be shuffled");
    }

    #[test]
    fn test_seed_42_table_is_fixed() {
        // Pinned: any change here reshapes every seed-42 world
        let table = PermutationTable::new(WorldSeed::new(42));
        assert_eq!(
            table.perm[..16],
            [181, 106, 238, 18, 176, 93, 183, 139, 95, 77, 160, 14, 2, 92, 250, 47]
        );
    }

    #[test]
    fn test_different_seeds_different_results() {
        let noise1 = NoiseField::new(WorldSeed::new(1));
        let noise2 = NoiseField::new(WorldSeed::new(2));

        let differs = (0..32).any(|i| {
            let x = f64::from(i) * 0.37 + 0.5;
            noise1.sample(x, x * 0.5) != noise2.sample(x, x * 0.5)
        });
        assert!(differs, "Different seeds should produce different results");
    }

    #[test]
    fn test_zero_on_lattice_points() {
        let noise = NoiseField::new(WorldSeed::new(42));
        for x in -5..5 {
            for y in -5..5 {
                assert_eq!(noise.sample(f64::from(x), f64::from(y)), 0.0);
            }
        }
    }

    #[test]
    fn test_range() {
        let noise = NoiseField::new(WorldSeed::new(42));

        for i in 0..10_000 {
            let x = f64::from(i) * 0.1 - 500.0;
            let y = f64::from(i) * 0.13 - 650.0;
            let value = noise.sample(x, y);

            assert!(
                (-1.0..=1.0).contains(&value),
                "Value {value} out of range at ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_continuity() {
        let noise = NoiseField::new(WorldSeed::new(42));

        let x = 100.3;
        let y = 100.7;
        let delta = 0.001;

        let v1 = noise.sample(x, y);
        let diff1 = (v1 - noise.sample(x + delta, y)).abs();
        let diff2 = (v1 - noise.sample(x, y + delta)).abs();

        assert!(diff1 < 0.01, "Noise should be continuous: diff = {diff1}");
        assert!(diff2 < 0.01, "Noise should be continuous: diff = {diff2}");
    }

    #[test]
    fn test_fbm_single_octave_is_sample() {
        let noise = NoiseField::new(WorldSeed::new(9));
        let (x, y) = (3.25, -7.5);
        assert_eq!(noise.fbm(x, y, 1, 2.0, 0.5), noise.sample(x, y));
    }

    #[test]
    fn test_fbm_normalizes_by_total_amplitude() {
        let noise = NoiseField::new(WorldSeed::new(9));
        let (x, y) = (1.3, 2.6);

        let expected = (noise.sample(x, y)
            + 0.5 * noise.sample(x * 2.0, y * 2.0)
            + 0.25 * noise.sample(x * 4.0, y * 4.0))
            / 1.75;
        let actual = noise.fbm(x, y, 3, 2.0, 0.5);
        assert!((expected - actual).abs() < 1e-12);
    }

    #[test]
    fn test_fbm_range_and_zero_octaves() {
        let noise = NoiseField::new(WorldSeed::new(42));
        let params = FractalParams::default();

        for i in -200..200 {
            let h = params.height_at(&noise, f64::from(i) * 3.7, f64::from(i) * -1.3);
            assert!((-1.0..=1.0).contains(&h), "fbm value {h} out of range");
        }
        assert_eq!(noise.fbm(0.3, 0.3, 0, 2.0, 0.5), 0.0);
    }

    #[test]
    fn test_seed_derivation() {
        let base = WorldSeed::new(42);
        let derived1 = base.derive(1);
        let derived2 = base.derive(2);

        assert_ne!(derived1, derived2, "Different purposes should give different seeds");
        assert_eq!(derived1, base.derive(1), "Same purpose should give same seed");
        assert_ne!(derived1, base, "Derived seed should differ from base");
    }
}
