// Domain layer: models and ports only, no filesystem access.

pub mod model;
pub mod ports;
