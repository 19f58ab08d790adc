pub use crate::{GalaxyError, GalaxyParameters, PointCloud, generate, generate_parallel};
