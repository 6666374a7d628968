pub use crate::{
    GalaxyColor, GalaxyError, GalaxyGenerator, GalaxyParameters, GalaxyPointCloud,
    ParameterDomain, generate, generate_seeded,
};
