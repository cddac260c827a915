// Domain layer: catalog models and ports (interfaces) for transport, storage and config.

pub mod model;
pub mod ports;
