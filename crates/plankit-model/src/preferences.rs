//! User preferences consumed by the editing engine.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::units::LengthUnit;

/// Behavior switches and defaults for new entities. Validation happens when
/// a snapshot is loaded, not on every field write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub unit: LengthUnit,
    /// Default magnetism flag; gestures may toggle it temporarily.
    pub magnetism_enabled: bool,
    /// Thickness of newly drawn walls, in cm.
    pub new_wall_thickness: f64,
    /// Height of newly drawn walls, in cm.
    pub new_wall_height: f64,
    /// Floor thickness of newly added levels, in cm.
    pub new_floor_thickness: f64,
    /// Fraction of a door or window depth kept outside the wall it snaps
    /// into, in 0..=1.
    pub door_window_wall_distance: f64,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            unit: LengthUnit::default(),
            magnetism_enabled: true,
            new_wall_thickness: 7.5,
            new_wall_height: 250.0,
            new_floor_thickness: 12.0,
            door_window_wall_distance: 0.0,
        }
    }
}

impl UserPreferences {
    pub fn validate(&self) -> Result<()> {
        if !(self.new_wall_thickness > 0.0) {
            return Err(ModelError::InvalidPreference {
                name: "new_wall_thickness".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if !(self.new_wall_height > 0.0) {
            return Err(ModelError::InvalidPreference {
                name: "new_wall_height".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if !(self.new_floor_thickness > 0.0) {
            return Err(ModelError::InvalidPreference {
                name: "new_floor_thickness".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.door_window_wall_distance) {
            return Err(ModelError::InvalidPreference {
                name: "door_window_wall_distance".to_string(),
                reason: "must lie in 0..=1".to_string(),
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let preferences: Self = serde_json::from_str(json)?;
        preferences.validate()?;
        Ok(preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let preferences = UserPreferences::default();
        assert_eq!(preferences.unit, LengthUnit::Centimeter);
        assert!(preferences.magnetism_enabled);
        assert_eq!(preferences.new_wall_thickness, 7.5);
        assert_eq!(preferences.new_wall_height, 250.0);
        assert!(preferences.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut preferences = UserPreferences::default();
        preferences.new_wall_thickness = 0.0;
        assert!(preferences.validate().is_err());
        preferences.new_wall_thickness = 7.5;
        preferences.door_window_wall_distance = 1.5;
        assert!(preferences.validate().is_err());
    }

    #[test]
    fn test_json_file_round_trip() {
        let preferences = UserPreferences {
            unit: LengthUnit::Inch,
            magnetism_enabled: false,
            ..UserPreferences::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(preferences.to_json().unwrap().as_bytes())
            .unwrap();
        let loaded = UserPreferences::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, preferences);
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"{
            "unit": "centimeter",
            "magnetism_enabled": true,
            "new_wall_thickness": -1.0,
            "new_wall_height": 250.0,
            "new_floor_thickness": 12.0,
            "door_window_wall_distance": 0.0
        }"#;
        assert!(UserPreferences::from_json(json).is_err());
    }
}
