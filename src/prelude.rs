pub use crate::galaxy::{
    GalaxyGeneration, GalaxyPoints, GalaxySystems, LiveParameters, SettleTimer, SettledParameters,
};
pub use galaxy_generator::prelude::*;
