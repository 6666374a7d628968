use std::f32::consts::TAU;

use bevy::log::debug;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::{GalaxyError, GalaxyParameters, GalaxyPointCloud, ParameterDomain};

/// Particles per independent random stream in `generate_seeded`.
pub const PARTICLES_PER_STREAM: usize = 4096;

/// Angle of the arm particle `index` belongs to. Arms are assigned round-robin.
pub fn branch_angle(index: usize, branches: u32) -> f32 {
    (index % branches as usize) as f32 / branches as f32 * TAU
}

/// `p^power` with a random sign, `p ~ U(0, 1)`. Draws the magnitude first, then the sign.
fn jitter<R: Rng + ?Sized>(rng: &mut R, power: f32) -> f32 {
    let magnitude = rng.random::<f32>().powf(power);
    if rng.random::<f32>() < 0.5 {
        -magnitude
    } else {
        magnitude
    }
}

/// Fills one contiguous run of particles starting at `first_index`.
/// Every particle consumes exactly eight draws.
fn fill_particles<R: Rng + ?Sized>(
    params: &GalaxyParameters,
    first_index: usize,
    positions: &mut [f32],
    colors: &mut [f32],
    rng: &mut R,
) {
    for (offset, (position, color)) in positions
        .chunks_exact_mut(3)
        .zip(colors.chunks_exact_mut(3))
        .enumerate()
    {
        // uniform over the radial coordinate, not over the disk area
        let radius = rng.random::<f32>() * params.radius;
        let spin_angle = radius * params.spin;
        let angle = branch_angle(first_index + offset, params.branches) + spin_angle;

        let jitter_x = jitter(rng, params.randomness_power);
        let jitter_y = jitter(rng, params.randomness_power);
        let jitter_z = jitter(rng, params.randomness_power);

        position[0] = angle.cos() * radius + jitter_x;
        position[1] = 0.0 + jitter_y;
        position[2] = angle.sin() * radius + jitter_z;

        let mix = rng.random::<f32>() * radius;
        let mixed = params
            .inside_color
            .lerp_unclamped(params.outside_color, mix);
        color.copy_from_slice(&mixed.to_array());
    }
}

/// Random stream for the particle range `stream` of a seeded generation.
pub fn stream_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

/// Spiral galaxy generator with a selectable validation domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct GalaxyGenerator {
    pub domain: ParameterDomain,
}

impl GalaxyGenerator {
    pub fn new(domain: ParameterDomain) -> Self {
        Self { domain }
    }

    /// Generates `params.count` particles drawing from `rng` in index order.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        params: &GalaxyParameters,
        rng: &mut R,
    ) -> Result<GalaxyPointCloud, GalaxyError> {
        let mut cloud = self.prepare(params)?;
        let (positions, colors) = cloud.buffers_mut();
        fill_particles(params, 0, positions, colors, rng);

        debug!(
            "Generated {} particles across {} branches",
            params.count, params.branches
        );
        Ok(cloud)
    }

    /// Generates in parallel. Particles are split into runs of `PARTICLES_PER_STREAM`, run `k`
    /// drawing from `stream_rng(seed, k)`, so the result depends only on `params` and `seed`.
    pub fn generate_seeded(
        &self,
        params: &GalaxyParameters,
        seed: u64,
    ) -> Result<GalaxyPointCloud, GalaxyError> {
        let mut cloud = self.prepare(params)?;
        let (positions, colors) = cloud.buffers_mut();
        let run_len = PARTICLES_PER_STREAM * 3;

        positions
            .par_chunks_mut(run_len)
            .zip(colors.par_chunks_mut(run_len))
            .enumerate()
            .for_each(|(stream, (positions, colors))| {
                let mut rng = stream_rng(seed, stream as u64);
                fill_particles(
                    params,
                    stream * PARTICLES_PER_STREAM,
                    positions,
                    colors,
                    &mut rng,
                );
            });

        debug!(
            "Generated {} particles across {} branches (seed {})",
            params.count, params.branches, seed
        );
        Ok(cloud)
    }

    fn prepare(&self, params: &GalaxyParameters) -> Result<GalaxyPointCloud, GalaxyError> {
        params.validate(self.domain)?;
        GalaxyPointCloud::zeroed(params.count as usize)
    }
}

/// Generates with the editor parameter domain.
pub fn generate<R: Rng + ?Sized>(
    params: &GalaxyParameters,
    rng: &mut R,
) -> Result<GalaxyPointCloud, GalaxyError> {
    GalaxyGenerator::default().generate(params, rng)
}

/// Seeded parallel generation with the editor parameter domain.
pub fn generate_seeded(params: &GalaxyParameters, seed: u64) -> Result<GalaxyPointCloud, GalaxyError> {
    GalaxyGenerator::default().generate_seeded(params, seed)
}
