//! Procedural spiral galaxy point clouds.
//!
//! Every point lands on one of `branches` evenly spaced arms, twisted by a
//! radius dependent spin and scattered by a power shaped random offset.
mod error;
mod generate;
mod parameters;
mod point_cloud;

pub mod prelude;

pub use error::GalaxyError;
pub use generate::{branch_angle, generate, generate_parallel, mix_color, spiral_point};
pub use parameters::GalaxyParameters;
pub use point_cloud::PointCloud;
