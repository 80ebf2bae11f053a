//! Floor levels of a home.

use serde::{Deserialize, Serialize};

use crate::home::LevelId;

/// One floor/storey of the home. Every placeable item belongs to exactly one
/// level when the home has levels at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub name: String,
    /// Elevation of the level floor surface in centimeters.
    pub elevation: f64,
    pub floor_thickness: f64,
    /// Distance from the floor to the ceiling of this level.
    pub height: f64,
    pub viewable: bool,
}

impl Level {
    pub fn new(name: impl Into<String>, elevation: f64, floor_thickness: f64, height: f64) -> Self {
        Self {
            id: LevelId(0),
            name: name.into(),
            elevation,
            floor_thickness,
            height,
            viewable: true,
        }
    }
}
