// Domain layer: sample readings, results and the ports used by the adapters.

pub mod model;
pub mod ports;
