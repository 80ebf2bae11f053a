//! Wall editing through the controller: chain drawing, endpoint joining,
//! resizing and the journal records these gestures leave behind.

use plankit_model::{Home, Selectable, UserPreferences, Wall};
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
fn test_draw_single_wall_posts_one_record() {
    let mut controller = controller(Home::new());
    controller.set_mode(Mode::WallCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    controller.move_mouse(300.0, 0.0);
    controller.press_mouse(300.0, 0.0, 1, false, false);
    controller.press_mouse(300.0, 0.0, 2, false, false);

    assert_eq!(controller.home().walls().len(), 1);
    let wall = &controller.home().walls()[0];
    assert_eq!((wall.x_start, wall.y_start), (0.0, 0.0));
    assert_eq!((wall.x_end, wall.y_end), (300.0, 0.0));
    assert_eq!(wall.thickness, 7.5);
    assert_eq!(wall.height, 250.0);
    let id = wall.id;
    assert_eq!(controller.home().selected_items(), [Selectable::Wall(id)]);
    assert_eq!(controller.undo_name(), Some("Add walls"));
    assert_eq!(controller.mode(), Mode::WallCreation);

    controller.undo();
    assert!(controller.home().walls().is_empty());
    assert!(!controller.can_undo());
    controller.redo();
    assert_eq!(controller.home().walls().len(), 1);
    assert_eq!(controller.home().walls()[0].x_end, 300.0);
}

#[test]
fn test_chained_walls_join_and_share_one_record() {
    let mut controller = controller_without_magnetism(Home::new());
    controller.set_mode(Mode::WallCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 0.0);
    controller.press_mouse(200.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 150.0);
    controller.press_mouse(200.0, 150.0, 1, false, false);
    controller.press_mouse(200.0, 150.0, 2, false, false);

    let home = controller.home();
    assert_eq!(home.walls().len(), 2);
    let first = &home.walls()[0];
    let second = &home.walls()[1];
    assert_eq!((first.x_end, first.y_end), (200.0, 0.0));
    assert_eq!((second.x_start, second.y_start), (200.0, 0.0));
    assert_eq!((second.x_end, second.y_end), (200.0, 150.0));
    assert_eq!(first.wall_at_end, Some(second.id));
    assert_eq!(second.wall_at_start, Some(first.id));
    assert_eq!(
        home.selected_items(),
        [Selectable::Wall(first.id), Selectable::Wall(second.id)]
    );
    assert_eq!(controller.undo_name(), Some("Add walls"));

    // One undo removes the whole chain, one redo rebuilds it joined.
    controller.undo();
    assert!(controller.home().walls().is_empty());
    assert!(!controller.can_undo());
    controller.redo();
    let home = controller.home();
    assert_eq!(home.walls().len(), 2);
    assert_eq!(home.walls()[0].wall_at_end, Some(home.walls()[1].id));
    assert_eq!(home.walls()[1].wall_at_start, Some(home.walls()[0].id));
}

#[test]
fn test_chain_closes_on_its_first_wall() {
    let mut controller = controller_without_magnetism(Home::new());
    controller.set_mode(Mode::WallCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 0.0);
    controller.press_mouse(200.0, 0.0, 1, false, false);
    controller.move_mouse(100.0, 150.0);
    controller.press_mouse(100.0, 150.0, 1, false, false);
    controller.move_mouse(0.0, 0.0);
    // Clicking back on the chain start closes the loop without a double
    // click.
    controller.press_mouse(0.0, 0.0, 1, false, false);

    let home = controller.home();
    assert_eq!(home.walls().len(), 3);
    let first = &home.walls()[0];
    let second = &home.walls()[1];
    let third = &home.walls()[2];
    assert_eq!(first.wall_at_end, Some(second.id));
    assert_eq!(second.wall_at_start, Some(first.id));
    assert_eq!(second.wall_at_end, Some(third.id));
    assert_eq!(third.wall_at_start, Some(second.id));
    assert_eq!(third.wall_at_end, Some(first.id));
    assert_eq!(first.wall_at_start, Some(third.id));
    assert_eq!((third.x_end, third.y_end), (0.0, 0.0));
    assert_eq!(home.selected_items().len(), 3);
    assert_eq!(controller.undo_name(), Some("Add walls"));

    controller.undo();
    assert!(controller.home().walls().is_empty());
    controller.redo();
    let home = controller.home();
    assert_eq!(home.walls().len(), 3);
    assert_eq!(home.walls()[0].wall_at_start, Some(home.walls()[2].id));
}

#[test]
fn test_chain_start_attaches_to_free_wall_end() {
    let mut home = Home::new();
    let existing = home.add_wall(Wall::new(0.0, 0.0, 300.0, 0.0, 7.5, 250.0));
    let mut controller = controller_without_magnetism(home);
    controller.set_mode(Mode::WallCreation);
    // Pressing near the free end snaps the chain start onto it.
    controller.press_mouse(301.0, 1.0, 1, false, false);
    controller.move_mouse(300.0, 200.0);
    controller.press_mouse(300.0, 200.0, 1, false, false);
    controller.press_mouse(300.0, 200.0, 2, false, false);

    let home = controller.home();
    assert_eq!(home.walls().len(), 2);
    let added = &home.walls()[1];
    assert_eq!((added.x_start, added.y_start), (300.0, 0.0));
    assert_eq!((added.x_end, added.y_end), (300.0, 200.0));
    assert_eq!(added.wall_at_start, Some(existing));
    assert_eq!(home.wall(existing).unwrap().wall_at_end, Some(added.id));

    controller.undo();
    let home = controller.home();
    assert_eq!(home.walls().len(), 1);
    assert_eq!(home.wall(existing).unwrap().wall_at_end, None);
    controller.redo();
    let home = controller.home();
    let added = home.walls()[1].id;
    assert_eq!(home.wall(existing).unwrap().wall_at_end, Some(added));
}

#[test]
fn test_escape_while_drawing_leaves_walls_untouched() {
    let mut home = Home::new();
    home.add_wall(Wall::new(0.0, 0.0, 300.0, 0.0, 7.5, 250.0));
    let mut controller = controller_without_magnetism(home);
    let snapshot = serde_json::to_string(controller.home().walls()).unwrap();

    controller.set_mode(Mode::WallCreation);
    controller.press_mouse(301.0, 1.0, 1, false, false);
    controller.move_mouse(300.0, 200.0);
    assert_eq!(controller.home().walls().len(), 2);
    controller.escape();

    assert_eq!(
        serde_json::to_string(controller.home().walls()).unwrap(),
        snapshot
    );
    assert!(!controller.can_undo());
    assert_eq!(controller.mode(), Mode::WallCreation);
}

#[test]
fn test_escape_before_the_first_move_changes_nothing() {
    let mut home = Home::new();
    home.add_wall(Wall::new(0.0, 0.0, 300.0, 0.0, 7.5, 250.0));
    let mut controller = controller_without_magnetism(home);
    let snapshot = serde_json::to_string(controller.home()).unwrap();

    controller.set_mode(Mode::WallCreation);
    // The pending wall only appears once the pointer moves, so there is
    // nothing to roll back yet.
    controller.press_mouse(50.0, 50.0, 1, false, false);
    controller.escape();

    assert_eq!(serde_json::to_string(controller.home()).unwrap(), snapshot);
    assert!(!controller.can_undo());
    assert_eq!(controller.mode(), Mode::WallCreation);
}

#[test]
fn test_escape_mid_chain_keeps_committed_walls() {
    let mut controller = controller_without_magnetism(Home::new());
    controller.set_mode(Mode::WallCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 0.0);
    controller.press_mouse(200.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 150.0);
    // Escape drops the wall under the pointer and posts the rest.
    controller.escape();

    let home = controller.home();
    assert_eq!(home.walls().len(), 1);
    assert_eq!((home.walls()[0].x_end, home.walls()[0].y_end), (200.0, 0.0));
    assert_eq!(home.walls()[0].wall_at_end, None);
    assert_eq!(controller.undo_name(), Some("Add walls"));
}

#[test]
fn test_wall_drawing_magnetizes_direction_and_length() {
    let mut controller = controller(Home::new());
    controller.set_mode(Mode::WallCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    let raw = 8.0f64.to_radians();
    let (x, y) = (200.0 * raw.cos(), -200.0 * raw.sin());
    controller.move_mouse(x, y);
    controller.press_mouse(x, y, 1, false, false);
    controller.press_mouse(x, y, 2, false, false);

    let wall = &controller.home().walls()[0];
    let angle = f64::atan2(wall.y_start - wall.y_end, wall.x_end - wall.x_start).to_degrees();
    assert!((angle - 15.0).abs() < 1e-9);
    // 200 cm projected on the 15 degree radius rounds to the whole
    // centimeter at the default scale.
    assert!((wall.length() - 199.0).abs() < 1e-9);
}

#[test]
fn test_toggle_magnetism_replays_the_last_move() {
    let mut controller = controller(Home::new());
    controller.set_mode(Mode::WallCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    let raw = 8.0f64.to_radians();
    let (x, y) = (200.0 * raw.cos(), -200.0 * raw.sin());
    controller.move_mouse(x, y);
    {
        let wall = &controller.home().walls()[0];
        assert!((wall.y_end + 199.0 * 15.0f64.to_radians().sin()).abs() < 1e-9);
    }
    // Shift disables magnetism and the wall end jumps back to the raw
    // pointer position.
    controller.toggle_magnetism(true);
    let wall = &controller.home().walls()[0];
    assert_eq!((wall.x_end, wall.y_end), (x, y));
}

#[test]
fn test_drag_wall_end_resizes_and_posts() {
    let mut home = Home::new();
    let wall = home.add_wall(Wall::new(0.0, 0.0, 300.0, 0.0, 7.5, 250.0));
    let mut controller = controller_without_magnetism(home);
    controller.press_mouse(150.0, 0.0, 1, false, false);
    controller.release_mouse(150.0, 0.0);
    assert_eq!(controller.home().selected_items(), [Selectable::Wall(wall)]);

    controller.press_mouse(300.0, 0.0, 1, false, false);
    controller.move_mouse(400.0, 80.0);
    controller.release_mouse(400.0, 80.0);

    let resized = controller.home().wall(wall).unwrap();
    assert_eq!((resized.x_end, resized.y_end), (400.0, 80.0));
    assert_eq!((resized.x_start, resized.y_start), (0.0, 0.0));
    assert_eq!(controller.undo_name(), Some("Resize wall"));
    controller.undo();
    let restored = controller.home().wall(wall).unwrap();
    assert_eq!((restored.x_end, restored.y_end), (300.0, 0.0));
}

#[test]
fn test_wall_resize_drags_joined_endpoint_along() {
    let mut home = Home::new();
    let a = home.add_wall(Wall::new(0.0, 0.0, 300.0, 0.0, 7.5, 250.0));
    let mut b = Wall::new(300.0, 0.0, 300.0, 200.0, 7.5, 250.0);
    b.wall_at_start = Some(a);
    let b = home.add_wall(b);
    if let Some(wall) = home.wall_mut(a) {
        wall.wall_at_end = Some(b);
    }
    let mut controller = controller_without_magnetism(home);
    controller.press_mouse(150.0, 0.0, 1, false, false);
    controller.release_mouse(150.0, 0.0);
    controller.press_mouse(300.0, 0.0, 1, false, false);
    controller.move_mouse(320.0, 40.0);
    controller.release_mouse(320.0, 40.0);

    let home = controller.home();
    assert_eq!(
        (home.wall(a).unwrap().x_end, home.wall(a).unwrap().y_end),
        (320.0, 40.0)
    );
    assert_eq!(
        (home.wall(b).unwrap().x_start, home.wall(b).unwrap().y_start),
        (320.0, 40.0)
    );
    controller.undo();
    let home = controller.home();
    assert_eq!((home.wall(b).unwrap().x_start, home.wall(b).unwrap().y_start), (300.0, 0.0));
}

#[test]
fn test_press_and_release_without_move_posts_nothing() {
    let mut home = Home::new();
    let wall = home.add_wall(Wall::new(0.0, 0.0, 300.0, 0.0, 7.5, 250.0));
    let mut controller = controller_without_magnetism(home);
    controller.press_mouse(150.0, 0.0, 1, false, false);
    controller.release_mouse(150.0, 0.0);
    controller.press_mouse(300.0, 0.0, 1, false, false);
    controller.release_mouse(300.0, 0.0);

    assert!(!controller.can_undo());
    let untouched = controller.home().wall(wall).unwrap();
    assert_eq!((untouched.x_end, untouched.y_end), (300.0, 0.0));
}

#[test]
fn test_escape_cancels_wall_resize() {
    let mut home = Home::new();
    let wall = home.add_wall(Wall::new(0.0, 0.0, 300.0, 0.0, 7.5, 250.0));
    let mut controller = controller_without_magnetism(home);
    controller.press_mouse(150.0, 0.0, 1, false, false);
    controller.release_mouse(150.0, 0.0);
    controller.press_mouse(300.0, 0.0, 1, false, false);
    controller.move_mouse(400.0, 80.0);
    controller.escape();

    let restored = controller.home().wall(wall).unwrap();
    assert_eq!((restored.x_end, restored.y_end), (300.0, 0.0));
    assert!(!controller.can_undo());
}

#[test]
fn test_reverse_selected_walls_direction() {
    let mut home = Home::new();
    let wall = home.add_wall(Wall::new(0.0, 0.0, 300.0, 0.0, 7.5, 250.0));
    let mut controller = controller_without_magnetism(home);
    controller.press_mouse(150.0, 0.0, 1, false, false);
    controller.release_mouse(150.0, 0.0);
    controller.reverse_selected_walls_direction();

    let reversed = controller.home().wall(wall).unwrap();
    assert_eq!((reversed.x_start, reversed.y_start), (300.0, 0.0));
    assert_eq!((reversed.x_end, reversed.y_end), (0.0, 0.0));
    assert_eq!(controller.undo_name(), Some("Reverse walls"));
    controller.undo();
    let restored = controller.home().wall(wall).unwrap();
    assert_eq!((restored.x_start, restored.y_start), (0.0, 0.0));
}

#[test]
fn test_split_selected_wall_in_two_joined_halves() {
    let mut home = Home::new();
    let wall = home.add_wall(Wall::new(0.0, 0.0, 300.0, 0.0, 7.5, 250.0));
    let mut controller = controller_without_magnetism(home);
    controller.press_mouse(150.0, 0.0, 1, false, false);
    controller.release_mouse(150.0, 0.0);
    controller.split_selected_wall();

    let home = controller.home();
    assert_eq!(home.walls().len(), 2);
    assert!(home.wall(wall).is_none());
    let first = &home.walls()[0];
    let second = &home.walls()[1];
    assert_eq!((first.x_end, first.y_end), (150.0, 0.0));
    assert_eq!((second.x_start, second.y_start), (150.0, 0.0));
    assert_eq!(first.wall_at_end, Some(second.id));
    assert_eq!(second.wall_at_start, Some(first.id));
    assert_eq!(controller.undo_name(), Some("Split wall"));

    controller.undo();
    let home = controller.home();
    assert_eq!(home.walls().len(), 1);
    let restored = home.wall(wall).unwrap();
    assert_eq!((restored.x_end, restored.y_end), (300.0, 0.0));
    controller.redo();
    assert_eq!(controller.home().walls().len(), 2);
}
