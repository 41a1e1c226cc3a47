// Domain layer: studio entities, errors and the ports use cases depend on.

pub mod entities;
pub mod errors;
pub mod password;
pub mod ports;
