//! Dimension line editing through the controller: the two phase drawing
//! gesture, endpoint resizing and the offset drag.

use plankit_model::{DimensionLine, Home, Selectable, UserPreferences};
use plankit_plan::{Mode, NoOpView, PlanController};

fn controller(home: Home) -> PlanController {
    PlanController::new(home, UserPreferences::default(), Box::new(NoOpView))
}

fn controller_without_magnetism(home: Home) -> PlanController {
    let preferences = UserPreferences {
        magnetism_enabled: false,
        ..UserPreferences::default()
    };
    PlanController::new(home, preferences, Box::new(NoOpView))
}

#[test]
fn test_draw_dimension_line_in_two_phases() {
    let mut controller = controller(Home::new());
    controller.set_mode(Mode::DimensionLineCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 0.0);
    // First click freezes the length, the next drag picks the offset side.
    controller.press_mouse(200.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 40.0);
    controller.press_mouse(200.0, 40.0, 1, false, false);

    let home = controller.home();
    assert_eq!(home.dimension_lines().len(), 1);
    let line = &home.dimension_lines()[0];
    assert_eq!((line.x_start, line.y_start), (0.0, 0.0));
    assert_eq!((line.x_end, line.y_end), (200.0, 0.0));
    assert_eq!(line.offset, 40.0);
    assert_eq!(
        home.selected_items(),
        [Selectable::DimensionLine(line.id)]
    );
    assert_eq!(controller.undo_name(), Some("Add dimension line"));
    assert_eq!(controller.mode(), Mode::DimensionLineCreation);

    controller.undo();
    assert!(controller.home().dimension_lines().is_empty());
    controller.redo();
    assert_eq!(controller.home().dimension_lines()[0].offset, 40.0);
}

#[test]
fn test_offset_follows_the_pointer_side() {
    let mut controller = controller(Home::new());
    controller.set_mode(Mode::DimensionLineCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 0.0);
    controller.press_mouse(200.0, 0.0, 1, false, false);
    // Above the base line in Y-down coordinates the offset goes negative.
    controller.move_mouse(200.0, -25.0);
    controller.press_mouse(200.0, -25.0, 1, false, false);

    assert_eq!(controller.home().dimension_lines()[0].offset, -25.0);
}

#[test]
fn test_escape_backs_out_phase_by_phase() {
    let mut controller = controller(Home::new());
    controller.set_mode(Mode::DimensionLineCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 0.0);
    controller.press_mouse(200.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 40.0);
    // First escape drops the offset and reopens the length phase.
    controller.escape();
    {
        let home = controller.home();
        assert_eq!(home.dimension_lines().len(), 1);
        assert_eq!(home.dimension_lines()[0].offset, 0.0);
    }
    assert!(!controller.can_undo());
    // Second escape abandons the line entirely.
    controller.escape();
    assert!(controller.home().dimension_lines().is_empty());
    assert!(!controller.can_undo());
    assert_eq!(controller.mode(), Mode::DimensionLineCreation);
}

#[test]
fn test_validating_typed_values_commits_the_line() {
    let mut controller = controller(Home::new());
    controller.set_mode(Mode::DimensionLineCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 0.0);
    controller.set_edition_activated(true);
    controller.set_edition_activated(false);

    let home = controller.home();
    assert_eq!(home.dimension_lines().len(), 1);
    assert_eq!(home.dimension_lines()[0].offset, 0.0);
    assert_eq!(controller.undo_name(), Some("Add dimension line"));
}

#[test]
fn test_drag_dimension_end_extends_length() {
    let mut home = Home::new();
    let line = home.add_dimension_line(DimensionLine::new(0.0, 0.0, 200.0, 0.0, 0.0));
    let mut controller = controller_without_magnetism(home);
    controller.press_mouse(100.0, 0.0, 1, false, false);
    controller.release_mouse(100.0, 0.0);
    assert_eq!(
        controller.home().selected_items(),
        [Selectable::DimensionLine(line)]
    );

    // At offset zero the extension line degenerates to the endpoint itself.
    controller.press_mouse(200.0, 0.0, 1, false, false);
    controller.move_mouse(260.0, 0.0);
    controller.release_mouse(260.0, 0.0);

    let resized = controller.home().dimension_line(line).unwrap();
    assert_eq!((resized.x_end, resized.y_end), (260.0, 0.0));
    assert_eq!((resized.x_start, resized.y_start), (0.0, 0.0));
    assert_eq!(controller.undo_name(), Some("Resize dimension line"));
    controller.undo();
    let restored = controller.home().dimension_line(line).unwrap();
    assert_eq!((restored.x_end, restored.y_end), (200.0, 0.0));
}

#[test]
fn test_drag_middle_point_changes_offset() {
    let mut home = Home::new();
    let line = home.add_dimension_line(DimensionLine::new(0.0, 0.0, 200.0, 0.0, 0.0));
    let mut controller = controller_without_magnetism(home);
    controller.press_mouse(100.0, 0.0, 1, false, false);
    controller.release_mouse(100.0, 0.0);

    controller.press_mouse(100.0, 0.0, 1, false, false);
    controller.move_mouse(100.0, 30.0);
    controller.release_mouse(100.0, 30.0);

    assert_eq!(controller.home().dimension_line(line).unwrap().offset, 30.0);
    assert_eq!(
        controller.undo_name(),
        Some("Change dimension line offset")
    );
    controller.undo();
    assert_eq!(controller.home().dimension_line(line).unwrap().offset, 0.0);
}

#[test]
fn test_escape_cancels_offset_drag() {
    let mut home = Home::new();
    let line = home.add_dimension_line(DimensionLine::new(0.0, 0.0, 200.0, 0.0, 15.0));
    let mut controller = controller_without_magnetism(home);
    controller.press_mouse(100.0, 15.0, 1, false, false);
    controller.release_mouse(100.0, 15.0);

    controller.press_mouse(100.0, 15.0, 1, false, false);
    controller.move_mouse(100.0, 60.0);
    assert_eq!(controller.home().dimension_line(line).unwrap().offset, 60.0);
    controller.escape();

    assert_eq!(controller.home().dimension_line(line).unwrap().offset, 15.0);
    assert!(!controller.can_undo());
}
