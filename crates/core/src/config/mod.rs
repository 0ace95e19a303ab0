//! Configuration loading and schema definitions

mod loader;
mod schema;

pub use loader::{Config, MAX_SURFACE_DISTANCE_KM};
pub use schema::*;
