//! Synthetic nearby-property exposure sampler.
//!
//! Scatters a handful of illustrative "neighbouring properties" around the
//! selected point for map decoration and the report table. The output is
//! fully determined by `(center, count, seed)`: the generator is a seeded
//! `ChaCha8Rng`, which produces the same stream on every platform.
//!
//! Draw order is fixed: all latitude offsets, then all longitude offsets,
//! then all risk labels. Changing it changes every sample.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::{Coordinate, ExposurePoint, ExposureRisk};

/// Default number of exposure points per assessment.
pub const DEFAULT_EXPOSURE_COUNT: usize = 5;

/// Default sampler seed.
pub const DEFAULT_EXPOSURE_SEED: u64 = 42;

/// Maximum offset from the centre on either axis, in degrees (~550 m).
pub const MAX_OFFSET_DEG: f64 = 0.005;

/// Generates `count` exposure points around `center` from a fresh generator
/// seeded with `seed`.
pub fn generate(center: Coordinate, count: usize, seed: u64) -> Vec<ExposurePoint> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_with(&mut rng, center, count)
}

/// Generates `count` exposure points around `center` drawing from `rng`.
pub fn generate_with<R: Rng>(
    rng: &mut R,
    center: Coordinate,
    count: usize,
) -> Vec<ExposurePoint> {
    let lat_offsets: Vec<f64> = (0..count).map(|_| unit_offset(rng)).collect();
    let lon_offsets: Vec<f64> = (0..count).map(|_| unit_offset(rng)).collect();
    let risks: Vec<ExposureRisk> = (0..count)
        .map(|_| ExposureRisk::ALL[rng.random_range(0..ExposureRisk::ALL.len())])
        .collect();

    lat_offsets
        .into_iter()
        .zip(lon_offsets)
        .zip(risks)
        .map(|((dlat, dlon), risk)| ExposurePoint {
            location: Coordinate::new(center.latitude + dlat, center.longitude + dlon),
            risk,
        })
        .collect()
}

/// Uniform offset in `[-0.005, 0.005)` degrees.
fn unit_offset<R: Rng>(rng: &mut R) -> f64 {
    (rng.random::<f64>() - 0.5) / 100.0
}
