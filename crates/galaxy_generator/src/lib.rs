//! Procedural spiral galaxy point clouds.
//!
//! [`generate`] turns a [`GalaxyParameters`] snapshot and a random source into a
//! [`GalaxyPointCloud`]: flat `x, y, z` and `r, g, b` buffers, one triple per particle.
mod color;
mod error;
mod generator;
mod parameters;
mod point_cloud;
pub mod prelude;

pub use color::GalaxyColor;
pub use error::GalaxyError;
pub use generator::{
    GalaxyGenerator, PARTICLES_PER_STREAM, branch_angle, generate, generate_seeded, stream_rng,
};
pub use parameters::{GalaxyParameters, ParameterDomain};
pub use point_cloud::GalaxyPointCloud;
