//! Clustered scenery placement
//!
//! A seeded scatter algorithm that drops groups of props in clusters
//! around the island center, rejecting candidates on missing ground,
//! water, steep slopes, or crowding against already-accepted items.

pub mod engine;
pub mod group;
pub mod session;

pub use engine::{PlacementConfig, PlacementEngine};
pub use group::GroupSpec;
pub use session::{PlacementRecord, PlacementSession};
