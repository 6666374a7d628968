use std::time::Duration;

use bevy::prelude::*;
use galaxy_generator::GalaxyParameters;

mod galaxy_points;
mod live_parameters;

pub use galaxy_points::GalaxyPoints;
pub use live_parameters::{GalaxyGeneration, LiveParameters, SettleTimer, SettledParameters};

/// Ordering of the per-frame galaxy work: edits land, then settle, then regenerate.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GalaxySystems {
    ApplyEdits,
    Settle,
    Regenerate,
}

/// Owns the live parameter set and the current point cloud.
pub struct GalaxyPlugin {
    pub parameters: GalaxyParameters,
    pub seed: u64,
    pub settle: Duration,
}

impl Plugin for GalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GalaxySystems::ApplyEdits,
                GalaxySystems::Settle,
                GalaxySystems::Regenerate,
            )
                .chain(),
        )
        .add_plugins((
            live_parameters::LiveParametersPlugin {
                parameters: self.parameters.clone(),
                settle: self.settle,
            },
            galaxy_points::GalaxyPointsPlugin { seed: self.seed },
        ));
    }
}
