use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;

mod config;
mod editing;
mod galaxy;

mod prelude;

use config::{AppError, Cli};

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let parameters = cli.load_parameters()?;
    let seed = cli.seed.unwrap_or_else(rand::random);

    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(cli.tick())),
            LogPlugin::default(),
        ))
        .add_plugins((
            galaxy::GalaxyPlugin {
                parameters,
                seed,
                settle: cli.settle(),
            },
            editing::EditingPlugin {
                receiver: editing::spawn_stdin_reader(),
            },
        ))
        .add_systems(Startup, move || {
            info!("Spiral galaxy generator started with seed {}", seed)
        })
        .run();
    Ok(())
}
