//! Islegen - procedural island terrain generation and clustered scenery placement

pub mod core;
pub mod terrain;
pub mod placement;
pub mod scheduler;
pub mod spawn;
pub mod world;
