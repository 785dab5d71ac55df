mod body;
mod registry;

pub use body::{BodyDescriptor, BodyId, BodyRef, FactSheet, MoonSpec, OrbitSpec, RingSpec};
pub use registry::{solar_system, Registry, RegistryError};
