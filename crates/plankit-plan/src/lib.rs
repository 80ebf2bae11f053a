//! # PlanKit Plan
//!
//! Plan editing engine for PlanKit.
//! Takes the entities of [`plankit_model`] and makes them editable with the
//! mouse and keyboard: a controller turns low level input events into wall
//! chains, room polygons, dimension lines, labels and furniture gestures,
//! with magnetism, feedback and a bounded undo journal.
//!
//! ## Architecture
//!
//! ```text
//! PlanController (input events, modes, undo/redo)
//!   ├── State machine (one state per gesture)
//!   ├── EditContext (home, preferences, viewport, journal, caches)
//!   ├── PlanView (feedback callbacks implemented by the UI layer)
//!   └── EditJournal (undoable commands, 50 deep)
//! ```
//!
//! Events arrive in model coordinates; the [`viewport`] module converts
//! from screen pixels and back. Every change lands in the home as a
//! [`commands::PlanCommand`] so undo and redo replay exactly.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use plankit_model::{Home, UserPreferences};
//! use plankit_plan::{Mode, NoOpView, PlanController};
//!
//! let mut controller =
//!     PlanController::new(Home::new(), UserPreferences::default(), Box::new(NoOpView));
//!
//! // Draw one wall from (0, 0) to (300, 0) and end the chain.
//! controller.set_mode(Mode::WallCreation);
//! controller.press_mouse(0.0, 0.0, 1, false, false);
//! controller.move_mouse(300.0, 0.0);
//! controller.press_mouse(300.0, 0.0, 2, false, false);
//! assert_eq!(controller.home().walls().len(), 1);
//! ```

pub mod commands;
pub mod context;
pub mod controller;
pub mod magnetism;
pub mod room_paths;
mod selection;
pub mod states;
pub mod view;
pub mod viewport;
pub mod wall_ops;

pub use commands::{EditJournal, PlanCommand, UndoableEdit};
pub use context::EditContext;
pub use controller::{ControllerEvent, Mode, PlanController};
pub use view::{CursorKind, EditableProperty, NoOpView, PlanView};
pub use viewport::Viewport;
