//! Transient per-pass placement state

use glam::{Vec2, Vec3};

/// One accepted scenery placement. Immutable once produced; consumed
/// exactly once by the instantiation collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementRecord {
    pub position: Vec3,
    pub yaw_degrees: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Index into the group's external variant table.
    pub variant_index: usize,
    /// Index of the group this record belongs to.
    pub group_index: usize,
}

/// State of a single placement pass: the accepted positions in acceptance
/// order (the crowding check scans them all) and the output records.
///
/// Owned exclusively by the pass that created it and discarded afterwards —
/// never shared across sessions.
#[derive(Default)]
pub struct PlacementSession {
    positions: Vec<Vec3>,
    records: Vec<PlacementRecord>,
}

impl PlacementSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any previously accepted position lies within `min_distance`
    /// of `position` in the plane. O(accepted items) per call; fine at the
    /// scale of hundreds of items.
    pub fn is_too_close(&self, position: Vec3, min_distance: f32) -> bool {
        let planar = Vec2::new(position.x, position.z);
        self.positions
            .iter()
            .any(|p| Vec2::new(p.x, p.z).distance(planar) < min_distance)
    }

    pub fn accept(&mut self, record: PlacementRecord) {
        self.positions.push(record.position);
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PlacementRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PlacementRecord> {
        self.records
    }
}
