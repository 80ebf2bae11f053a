//! Feedback contract between the plan controller and whatever renders it.
//!
//! The controller never draws anything itself. While a gesture runs it calls
//! the methods below to describe transient feedback, and the view decides how
//! to paint it. Every method has an empty default body so a view only
//! implements the feedback it actually renders; [`NoOpView`] implements
//! nothing and is what tests and headless callers plug in.

use plankit_model::Selectable;

/// Mouse cursor shapes the controller may request during gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    Selection,
    Panning,
    Draw,
    Rotation,
    Elevation,
    Height,
    PowerLevel,
    Resize,
    Duplication,
    Move,
}

/// Properties a gesture exposes for keyboard edition while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableProperty {
    X,
    Y,
    Length,
    Angle,
    Offset,
}

/// Rendering side of the plan editor.
///
/// Coordinates passed to feedback methods are model coordinates in
/// centimeters unless a method says otherwise.
pub trait PlanView {
    /// Changes the mouse cursor shown over the plan.
    fn set_cursor(&mut self, cursor: CursorKind) {
        let _ = cursor;
    }

    /// Shows or hides resize indicators around the selected items.
    fn set_resize_indicator_visible(&mut self, visible: bool) {
        let _ = visible;
    }

    /// Shows a tool tip with the given text near the (x, y) model point.
    fn set_tool_tip_feedback(&mut self, text: &str, x: f64, y: f64) {
        let _ = (text, x, y);
    }

    /// Removes the tool tip.
    fn delete_tool_tip_feedback(&mut self) {}

    /// Shows the properties the running gesture lets the user type in,
    /// with their current values, near the (x, y) model point.
    fn set_edited_properties(&mut self, properties: &[(EditableProperty, f64)], x: f64, y: f64) {
        let _ = (properties, x, y);
    }

    /// Shows where the point being drawn or dragged currently is, and which
    /// item it aligns with, if any.
    fn set_alignment_feedback(
        &mut self,
        aligned_item: Option<Selectable>,
        x: f64,
        y: f64,
        show_point: bool,
    ) {
        let _ = (aligned_item, x, y, show_point);
    }

    /// Removes alignment feedback, along with any angle feedback shown
    /// with it.
    fn delete_alignment_feedback(&mut self) {}

    /// Shows the angle at (cx, cy) between the rays towards the two other
    /// points, typically the angle a wall under creation makes with the
    /// previous one.
    fn set_angle_feedback(&mut self, cx: f64, cy: f64, x1: f64, y1: f64, x2: f64, y2: f64) {
        let _ = (cx, cy, x1, y1, x2, y2);
    }

    /// Shows the rubber band of a rectangle selection, from the press point
    /// to the current mouse point.
    fn set_rectangle_feedback(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        let _ = (x0, y0, x1, y1);
    }

    /// Removes the rectangle selection rubber band.
    fn delete_rectangle_feedback(&mut self) {}

    /// Shows the outline of furniture being dragged from outside the plan.
    fn set_dragged_items_feedback(&mut self, items: &[plankit_model::Furniture]) {
        let _ = items;
    }

    /// Removes the dragged furniture outline.
    fn delete_dragged_items_feedback(&mut self) {}

    /// Shows transient dimension lines, typically along the walls a dragged
    /// piece of furniture touches.
    fn set_dimension_lines_feedback(&mut self, lines: &[plankit_model::DimensionLine]) {
        let _ = lines;
    }

    /// Removes transient dimension lines.
    fn delete_dimension_lines_feedback(&mut self) {}

    /// Asks the view to scroll so the (x, y) model point stays visible.
    fn make_point_visible(&mut self, x: f64, y: f64) {
        let _ = (x, y);
    }

    /// Asks the view to scroll so the selected items stay visible.
    fn make_selection_visible(&mut self) {}

    /// Asks the user for the text of a label about to be created at (x, y).
    /// Returning `None` cancels the creation.
    fn ask_label_text(&mut self, x: f64, y: f64) -> Option<String> {
        let _ = (x, y);
        None
    }

    /// Size in model units of the given text once rendered, used to grow
    /// the pick area of labels and room names.
    fn text_size(&self, text: &str) -> (f64, f64) {
        let _ = text;
        (0.0, 0.0)
    }
}

/// View that renders nothing. Suits tests and batch edition of a plan.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpView;

impl PlanView for NoOpView {}
