// Domain layer: data model, profiles, and ports (interfaces).

pub mod model;
pub mod ports;
pub mod profile;
