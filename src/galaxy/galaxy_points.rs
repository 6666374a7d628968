use std::time::Instant;

use bevy::prelude::*;
use galaxy_generator::{GalaxyPointCloud, generate_seeded};

use super::{GalaxyGeneration, GalaxySystems, SettledParameters};

/// The point cloud handed to whatever draws the galaxy.
#[derive(Resource, Default)]
pub struct GalaxyPoints {
    pub cloud: Option<GalaxyPointCloud>,
    /// Last generation attempted, successful or not.
    pub generation: u32,
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct GalaxySeed(pub u64);

pub(super) struct GalaxyPointsPlugin {
    pub seed: u64,
}

impl Plugin for GalaxyPointsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GalaxySeed(self.seed))
            .insert_resource(GalaxyPoints::default())
            .add_systems(Update, regenerate_points.in_set(GalaxySystems::Regenerate));
    }
}

/// Rebuilds the point cloud when a new generation has been requested. The old cloud is
/// released before the new one is stored; a rejected snapshot leaves the old cloud in place.
fn regenerate_points(
    settled: Res<SettledParameters>,
    generation: Res<GalaxyGeneration>,
    seed: Res<GalaxySeed>,
    mut points: ResMut<GalaxyPoints>,
) {
    if points.generation == generation.0 {
        return;
    }
    points.generation = generation.0;

    let started = Instant::now();
    match generate_seeded(&settled, seed.0) {
        Ok(cloud) => {
            drop(points.cloud.take());

            let (min, max) = cloud.bounds().unwrap_or_default();
            info!(
                "Galaxy generation {} rebuilt: {} particles, {} branches, extent {} .. {} in {:.1} ms",
                generation.0,
                cloud.len(),
                settled.branches,
                min,
                max,
                started.elapsed().as_secs_f64() * 1000.0
            );
            points.cloud = Some(cloud);
        }
        Err(err) => {
            warn!(
                "Galaxy generation {} rejected, keeping previous point cloud: {}",
                generation.0, err
            );
        }
    }
}
