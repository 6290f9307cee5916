pub mod satellite;
pub mod sink;
