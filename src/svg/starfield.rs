//! Background stars
//!
//! Cosmetic only, but seeded from the scene identity so the rendered SVG
//! stays byte-identical between requests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// One background star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
}

/// FNV-1a over the username plus the contribution total
pub fn scene_seed(username: &str, total: u32) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;
    username
        .bytes()
        .chain(total.to_le_bytes())
        .fold(OFFSET, |hash, b| (hash ^ u64::from(b)).wrapping_mul(PRIME))
}

/// Scatter `count` stars over the canvas
pub fn generate(seed: u64, count: u32, width: f32, height: f32) -> Vec<Star> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..count)
        .map(|_| Star {
            cx: rng.random::<f32>() * width.max(0.0),
            cy: rng.random::<f32>() * height.max(0.0),
            r: rng.random::<f32>() * 1.5,
        })
        .collect()
}
