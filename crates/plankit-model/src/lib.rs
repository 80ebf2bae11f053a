//! # PlanKit Model
//!
//! Geometry model for PlanKit.
//! Provides the entities of a 2D home plan - walls, rooms, dimension lines,
//! labels, furniture, compass, cameras and levels - the `Home` aggregate that
//! owns them, change notification, measurement units and user preferences.
//!
//! All coordinates are expressed in centimeters, with the Y axis growing
//! downwards as on a plan sheet. Angles are in radians unless noted.

pub mod camera;
pub mod compass;
pub mod dimension_line;
pub mod error;
pub mod events;
pub mod furniture;
pub mod geometry;
pub mod home;
pub mod label;
pub mod level;
pub mod preferences;
pub mod room;
pub mod selectable;
pub mod units;
pub mod wall;

pub use camera::Camera;
pub use compass::Compass;
pub use dimension_line::DimensionLine;
pub use error::{ModelError, Result};
pub use events::{EventDispatcher, HomeEvent, ListenerHandle};
pub use furniture::{Furniture, FurnitureKind};
pub use geometry::Point;
pub use home::{DimensionLineId, FurnitureId, Home, LabelId, LevelId, RoomId, WallId};
pub use label::Label;
pub use level::Level;
pub use preferences::UserPreferences;
pub use room::Room;
pub use selectable::Selectable;
pub use units::LengthUnit;
pub use wall::Wall;
