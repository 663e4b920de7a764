// Domain layer: vocabulary, map and export types, plus the ports the core depends on.

pub mod model;
pub mod ports;
