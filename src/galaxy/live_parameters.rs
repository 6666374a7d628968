use std::time::Duration;

use bevy::prelude::*;
use galaxy_generator::GalaxyParameters;

use super::GalaxySystems;

/// Parameters as currently edited. May change every frame.
#[derive(Resource, Debug, Clone, PartialEq, Deref, DerefMut)]
pub struct LiveParameters(pub GalaxyParameters);

/// Snapshot the current generation was requested with.
#[derive(Resource, Debug, Clone, PartialEq, Deref)]
pub struct SettledParameters(pub GalaxyParameters);

/// Bumped every time a new settled snapshot is requested.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalaxyGeneration(pub u32);

#[derive(Resource, Debug)]
pub struct SettleTimer {
    timer: Timer,
    pending: bool,
}

impl SettleTimer {
    pub fn new(settle: Duration) -> Self {
        Self {
            timer: Timer::new(settle, TimerMode::Once),
            pending: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

pub(super) struct LiveParametersPlugin {
    pub parameters: GalaxyParameters,
    pub settle: Duration,
}

impl Plugin for LiveParametersPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LiveParameters(self.parameters.clone()))
            .insert_resource(SettledParameters(self.parameters.clone()))
            // the startup snapshot is requested straight away
            .insert_resource(GalaxyGeneration(1))
            .insert_resource(SettleTimer::new(self.settle))
            .add_systems(Update, settle_parameter_edits.in_set(GalaxySystems::Settle));
    }
}

/// Restarts the settle timer on every edit and requests a new generation once edits
/// have been quiet for the whole settle period.
fn settle_parameter_edits(
    time: Res<Time>,
    live: Res<LiveParameters>,
    mut settle: ResMut<SettleTimer>,
    mut settled: ResMut<SettledParameters>,
    mut generation: ResMut<GalaxyGeneration>,
) {
    if live.is_changed() && !live.is_added() {
        settle.timer.reset();
        settle.pending = true;
    }
    if !settle.pending {
        return;
    }

    settle.timer.tick(time.delta());
    if !settle.timer.finished() {
        return;
    }
    settle.pending = false;

    if live.0 != settled.0 {
        settled.0 = live.0.clone();
        generation.0 += 1;
        info!(
            "Galaxy parameters settled, requesting generation {}",
            generation.0
        );
    }
}
