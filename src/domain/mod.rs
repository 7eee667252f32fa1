// Domain layer: models, store signal vocabulary and ports (interfaces).

pub mod failure;
pub mod model;
pub mod ports;
pub mod signal;
