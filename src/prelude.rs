pub use crate::galaxy::{GalaxyConfig, GalaxySet, PointCount};
pub use crate::graphics::{GalaxyPointsMaterial, SceneFog};
pub use galaxy_generator::prelude::*;
