// Domain layer: card value objects, the manifest document and ports (interfaces).

pub mod manifest;
pub mod model;
pub mod ports;
