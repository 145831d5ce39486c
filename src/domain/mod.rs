// Domain layer: course records, import results and the ports the pipeline is built on.

pub mod model;
pub mod ports;
