//! Ready-made animations for common strip behaviors.

mod pulsing;
mod spark;
mod theater;

pub use pulsing::Pulsing;
pub use spark::Spark;
pub use theater::TheaterLights;
