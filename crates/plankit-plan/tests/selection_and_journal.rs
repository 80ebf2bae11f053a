//! Selection gestures in the default mode, the drag journal around them,
//! drag and drop from a catalog, levels and the base plan lock.

use plankit_model::{Furniture, Home, Selectable, UserPreferences, Wall};
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

fn select(controller: &mut PlanController, x: f64, y: f64) {
    controller.press_mouse(x, y, 1, false, false);
    controller.release_mouse(x, y);
}

fn shift_click(controller: &mut PlanController, x: f64, y: f64) {
    controller.press_mouse(x, y, 1, true, false);
    controller.release_mouse(x, y);
}

/// A wall along y = 0 and a 50 x 50 table centered at (100, 100).
fn furnished_home() -> (Home, plankit_model::WallId, plankit_model::FurnitureId) {
    let mut home = Home::new();
    let wall = home.add_wall(Wall::new(0.0, 0.0, 200.0, 0.0, 7.5, 250.0));
    let piece = home.add_furniture(Furniture::new("table", 100.0, 100.0, 50.0, 50.0, 75.0));
    (home, wall, piece)
}

#[test]
fn test_click_selects_and_empty_click_deselects() {
    let (home, wall, _) = furnished_home();
    let mut controller = controller(home);

    select(&mut controller, 100.0, 0.0);
    assert_eq!(controller.home().selected_items(), [Selectable::Wall(wall)]);

    select(&mut controller, 300.0, 200.0);
    assert!(controller.home().selected_items().is_empty());
    assert!(!controller.can_undo());
}

#[test]
fn test_shift_click_toggles_selection_membership() {
    let (home, wall, piece) = furnished_home();
    let mut controller = controller(home);

    select(&mut controller, 100.0, 0.0);
    shift_click(&mut controller, 100.0, 100.0);
    assert_eq!(
        controller.home().selected_items(),
        [Selectable::Wall(wall), Selectable::Furniture(piece)]
    );

    shift_click(&mut controller, 100.0, 100.0);
    assert_eq!(controller.home().selected_items(), [Selectable::Wall(wall)]);
}

#[test]
fn test_rubber_band_selects_everything_it_touches() {
    let (home, wall, piece) = furnished_home();
    let mut controller = controller(home);

    controller.press_mouse(-30.0, -30.0, 1, false, false);
    controller.move_mouse(210.0, 160.0);
    controller.release_mouse(210.0, 160.0);

    let selected = controller.home().selected_items();
    assert_eq!(selected.len(), 2);
    assert!(selected.contains(&Selectable::Wall(wall)));
    assert!(selected.contains(&Selectable::Furniture(piece)));
}

#[test]
fn test_shift_rubber_band_toggles_covered_items() {
    let (home, wall, piece) = furnished_home();
    let mut controller = controller(home);
    select(&mut controller, 100.0, 0.0);

    // A shift band over the table adds it to the selected wall.
    controller.press_mouse(300.0, 200.0, 1, true, false);
    controller.move_mouse(60.0, 60.0);
    controller.release_mouse(60.0, 60.0);
    assert_eq!(
        controller.home().selected_items(),
        [Selectable::Wall(wall), Selectable::Furniture(piece)]
    );

    // The same band again toggles it back out.
    controller.press_mouse(300.0, 200.0, 1, true, false);
    controller.move_mouse(60.0, 60.0);
    controller.release_mouse(60.0, 60.0);
    assert_eq!(controller.home().selected_items(), [Selectable::Wall(wall)]);
}

#[test]
fn test_rubber_band_never_catches_the_camera() {
    let mut home = Home::new();
    home.set_camera_in_plan(true);
    let piece = home.add_furniture(Furniture::new("table", 100.0, 100.0, 50.0, 50.0, 75.0));
    let mut controller = controller(home);

    controller.press_mouse(30.0, 30.0, 1, false, false);
    controller.move_mouse(170.0, 170.0);
    controller.release_mouse(170.0, 170.0);

    assert_eq!(
        controller.home().selected_items(),
        [Selectable::Furniture(piece)]
    );
}

#[test]
fn test_the_camera_only_belongs_to_a_selection_alone() {
    let mut home = Home::new();
    home.set_camera_in_plan(true);
    let wall = home.add_wall(Wall::new(0.0, 0.0, 200.0, 0.0, 7.5, 250.0));
    let mut controller = controller(home);

    // Shift clicking a wall drops the camera from the selection.
    select(&mut controller, 100.0, 100.0);
    assert_eq!(controller.home().selected_items(), [Selectable::Camera]);
    shift_click(&mut controller, 100.0, 0.0);
    assert_eq!(controller.home().selected_items(), [Selectable::Wall(wall)]);

    // Shift clicking the camera over a selected wall adds nothing.
    shift_click(&mut controller, 100.0, 100.0);
    assert_eq!(controller.home().selected_items(), [Selectable::Wall(wall)]);
}

#[test]
fn test_drag_moves_the_whole_selection_in_one_record() {
    let (home, wall, piece) = furnished_home();
    let mut controller = controller(home);

    controller.press_mouse(-30.0, -30.0, 1, false, false);
    controller.move_mouse(210.0, 160.0);
    controller.release_mouse(210.0, 160.0);

    controller.press_mouse(100.0, 100.0, 1, false, false);
    controller.move_mouse(130.0, 120.0);
    controller.release_mouse(130.0, 120.0);

    let moved_wall = controller.home().wall(wall).unwrap();
    assert_eq!((moved_wall.x_start, moved_wall.y_start), (30.0, 20.0));
    assert_eq!((moved_wall.x_end, moved_wall.y_end), (230.0, 20.0));
    let moved_piece = controller.home().furniture_piece(piece).unwrap();
    assert_eq!((moved_piece.x, moved_piece.y), (130.0, 120.0));
    assert_eq!(controller.undo_name(), Some("Move items"));

    controller.undo();
    let restored_wall = controller.home().wall(wall).unwrap();
    assert_eq!((restored_wall.x_start, restored_wall.y_start), (0.0, 0.0));
    let restored_piece = controller.home().furniture_piece(piece).unwrap();
    assert_eq!((restored_piece.x, restored_piece.y), (100.0, 100.0));
}

#[test]
fn test_escape_cancels_a_selection_drag() {
    let (home, _, piece) = furnished_home();
    let mut controller = controller(home);

    controller.press_mouse(100.0, 100.0, 1, false, false);
    controller.move_mouse(150.0, 140.0);
    controller.escape();

    let piece = controller.home().furniture_piece(piece).unwrap();
    assert_eq!((piece.x, piece.y), (100.0, 100.0));
    assert!(!controller.can_undo());
}

#[test]
fn test_dragging_the_camera_leaves_no_record() {
    let mut home = Home::new();
    home.set_camera_in_plan(true);
    let mut controller = controller(home);

    controller.press_mouse(100.0, 100.0, 1, false, false);
    controller.move_mouse(150.0, 130.0);
    controller.release_mouse(150.0, 130.0);

    let camera = controller.home().camera();
    assert_eq!((camera.x, camera.y), (150.0, 130.0));
    assert!(!controller.can_undo());
}

#[test]
fn test_duplication_drag_adds_selected_copies() {
    let mut home = Home::new();
    let original = home.add_furniture(Furniture::new("table", 100.0, 100.0, 50.0, 50.0, 75.0));
    let mut controller = controller(home);

    controller.press_mouse(100.0, 100.0, 1, false, true);
    controller.move_mouse(150.0, 100.0);
    controller.release_mouse(150.0, 100.0);

    let furniture = controller.home().furniture();
    assert_eq!(furniture.len(), 2);
    let copy = furniture
        .iter()
        .find(|piece| piece.id != original)
        .expect("a copy of the table");
    assert_eq!((copy.x, copy.y), (150.0, 100.0));
    let kept = controller.home().furniture_piece(original).unwrap();
    assert_eq!((kept.x, kept.y), (100.0, 100.0));
    assert_eq!(
        controller.home().selected_items(),
        [Selectable::Furniture(copy.id)]
    );
    assert_eq!(controller.undo_name(), Some("Duplicate items"));

    controller.undo();
    assert_eq!(controller.home().furniture().len(), 1);
    assert_eq!(
        controller.home().selected_items(),
        [Selectable::Furniture(original)]
    );

    controller.redo();
    assert_eq!(controller.home().furniture().len(), 2);
}

#[test]
fn test_escape_cancels_a_duplication_drag() {
    let mut home = Home::new();
    let original = home.add_furniture(Furniture::new("table", 100.0, 100.0, 50.0, 50.0, 75.0));
    let mut controller = controller(home);

    controller.press_mouse(100.0, 100.0, 1, false, true);
    controller.move_mouse(150.0, 100.0);
    controller.escape();

    assert_eq!(controller.home().furniture().len(), 1);
    assert_eq!(
        controller.home().selected_items(),
        [Selectable::Furniture(original)]
    );
    assert!(!controller.can_undo());
}

#[test]
fn test_releasing_the_duplication_modifier_reverts_to_a_plain_move() {
    let mut home = Home::new();
    let original = home.add_furniture(Furniture::new("table", 100.0, 100.0, 50.0, 50.0, 75.0));
    let mut controller = controller(home);

    controller.press_mouse(100.0, 100.0, 1, false, true);
    controller.move_mouse(150.0, 100.0);
    controller.set_duplication_activated(false);
    controller.release_mouse(150.0, 100.0);

    assert_eq!(controller.home().furniture().len(), 1);
    let piece = controller.home().furniture_piece(original).unwrap();
    assert_eq!((piece.x, piece.y), (150.0, 100.0));
    assert_eq!(controller.undo_name(), Some("Move items"));
}

#[test]
fn test_delete_selection_removes_items_in_one_record() {
    let (home, wall, piece) = furnished_home();
    let mut controller = controller(home);

    controller.press_mouse(-30.0, -30.0, 1, false, false);
    controller.move_mouse(210.0, 160.0);
    controller.release_mouse(210.0, 160.0);
    controller.delete_selection();

    assert!(controller.home().walls().is_empty());
    assert!(controller.home().furniture().is_empty());
    assert_eq!(controller.undo_name(), Some("Delete selection"));

    controller.undo();
    assert!(controller.home().wall(wall).is_some());
    assert!(controller.home().furniture_piece(piece).is_some());
}

#[test]
fn test_delete_selection_spares_camera_and_compass() {
    let mut home = Home::new();
    home.set_camera_in_plan(true);
    let mut controller = controller(home);

    select(&mut controller, 100.0, 100.0);
    assert_eq!(controller.home().selected_items(), [Selectable::Camera]);
    controller.delete_selection();
    assert!(!controller.can_undo());

    select(&mut controller, -100.0, 50.0);
    assert_eq!(controller.home().selected_items(), [Selectable::Compass]);
    controller.delete_selection();
    assert!(!controller.can_undo());
}

#[test]
fn test_move_selection_nudges_and_posts() {
    let (home, wall, _) = furnished_home();
    let mut controller = controller(home);

    select(&mut controller, 100.0, 0.0);
    controller.move_selection(2.0, 0.0);

    let moved = controller.home().wall(wall).unwrap();
    assert_eq!((moved.x_start, moved.x_end), (2.0, 202.0));
    assert_eq!(controller.undo_name(), Some("Move items"));
}

#[test]
fn test_base_plan_lock_blocks_wall_picks_but_not_furniture() {
    let (home, _, piece) = furnished_home();
    let mut controller = controller(home);
    controller.set_base_plan_locked(true);

    select(&mut controller, 100.0, 0.0);
    assert!(controller.home().selected_items().is_empty());

    select(&mut controller, 100.0, 100.0);
    assert_eq!(
        controller.home().selected_items(),
        [Selectable::Furniture(piece)]
    );

    controller.press_mouse(100.0, 100.0, 1, false, false);
    controller.move_mouse(120.0, 100.0);
    controller.release_mouse(120.0, 100.0);
    assert_eq!(controller.home().furniture_piece(piece).unwrap().x, 120.0);
    assert_eq!(controller.undo_name(), Some("Move items"));
}

#[test]
fn test_locking_freezes_an_already_selected_wall() {
    let (home, wall, _) = furnished_home();
    let mut controller = controller(home);

    select(&mut controller, 100.0, 0.0);
    controller.set_base_plan_locked(true);
    controller.move_selection(5.0, 0.0);

    assert_eq!(controller.home().wall(wall).unwrap().x_start, 0.0);
    assert!(!controller.can_undo());
}

#[test]
fn test_drop_dragged_furniture_adds_it_where_it_lands() {
    let mut controller = controller_without_magnetism(Home::new());

    let chair = Furniture::new("chair", 0.0, 0.0, 40.0, 40.0, 90.0);
    controller.start_dragged_items(vec![chair], 10.0, 10.0);
    controller.drop_dragged_items(200.0, 150.0);

    let furniture = controller.home().furniture();
    assert_eq!(furniture.len(), 1);
    assert_eq!((furniture[0].x, furniture[0].y), (200.0, 150.0));
    assert_eq!(
        controller.home().selected_items(),
        [Selectable::Furniture(furniture[0].id)]
    );
    assert_eq!(controller.undo_name(), Some("Add furniture"));

    controller.undo();
    assert!(controller.home().furniture().is_empty());
}

#[test]
fn test_dropped_group_keeps_its_relative_layout() {
    let mut controller = controller_without_magnetism(Home::new());

    let table = Furniture::new("table", 0.0, 0.0, 50.0, 50.0, 75.0);
    let chair = Furniture::new("chair", 60.0, 10.0, 40.0, 40.0, 90.0);
    controller.start_dragged_items(vec![table, chair], 0.0, 0.0);
    controller.drop_dragged_items(100.0, 100.0);

    let furniture = controller.home().furniture();
    assert_eq!(furniture.len(), 2);
    assert_eq!((furniture[0].x, furniture[0].y), (100.0, 100.0));
    assert_eq!((furniture[1].x, furniture[1].y), (160.0, 110.0));
    assert_eq!(controller.home().selected_items().len(), 2);
    assert_eq!(controller.undo_name(), Some("Add furniture"));
}

#[test]
fn test_stop_dragged_items_leaves_the_home_untouched() {
    let mut controller = controller(Home::new());

    let chair = Furniture::new("chair", 0.0, 0.0, 40.0, 40.0, 90.0);
    controller.start_dragged_items(vec![chair], 10.0, 10.0);
    controller.stop_dragged_items();

    assert!(controller.home().furniture().is_empty());
    assert!(!controller.can_undo());
    assert_eq!(controller.mode(), Mode::Selection);
}

#[test]
fn test_a_new_edit_clears_the_redo_branch() {
    let (home, _, _) = furnished_home();
    let mut controller = controller(home);

    controller.press_mouse(100.0, 100.0, 1, false, false);
    controller.move_mouse(110.0, 100.0);
    controller.release_mouse(110.0, 100.0);
    controller.press_mouse(110.0, 100.0, 1, false, false);
    controller.move_mouse(120.0, 100.0);
    controller.release_mouse(120.0, 100.0);

    controller.undo();
    assert!(controller.can_redo());
    assert_eq!(controller.redo_name(), Some("Move items"));

    controller.press_mouse(110.0, 100.0, 1, false, false);
    controller.move_mouse(90.0, 100.0);
    controller.release_mouse(90.0, 100.0);
    assert!(!controller.can_redo());
    assert_eq!(controller.redo_name(), None);
    assert_eq!(controller.undo_name(), Some("Move items"));
}

#[test]
fn test_undoing_every_record_walks_back_to_the_start() {
    let mut home = Home::new();
    home.add_furniture(Furniture::new("table", 100.0, 100.0, 50.0, 50.0, 0.0));
    let mut controller = controller_without_magnetism(home);
    let start_walls = serde_json::to_string(controller.home().walls()).unwrap();
    let start_furniture = serde_json::to_string(controller.home().furniture()).unwrap();

    // Three records: a drawn wall, a furniture move, a deletion.
    controller.set_mode(Mode::WallCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 0.0);
    controller.press_mouse(200.0, 0.0, 1, false, false);
    controller.press_mouse(200.0, 0.0, 2, false, false);
    controller.set_mode(Mode::Selection);
    controller.press_mouse(100.0, 100.0, 1, false, false);
    controller.move_mouse(140.0, 130.0);
    controller.release_mouse(140.0, 130.0);
    select(&mut controller, 100.0, 0.0);
    controller.delete_selection();

    let end_walls = serde_json::to_string(controller.home().walls()).unwrap();
    let end_furniture = serde_json::to_string(controller.home().furniture()).unwrap();
    let end_selection = controller.home().selected_items().to_vec();

    controller.undo();
    controller.undo();
    controller.undo();
    assert!(!controller.can_undo());
    assert_eq!(
        serde_json::to_string(controller.home().walls()).unwrap(),
        start_walls
    );
    assert_eq!(
        serde_json::to_string(controller.home().furniture()).unwrap(),
        start_furniture
    );
    assert!(controller.home().selected_items().is_empty());

    controller.redo();
    controller.redo();
    controller.redo();
    assert!(!controller.can_redo());
    assert_eq!(
        serde_json::to_string(controller.home().walls()).unwrap(),
        end_walls
    );
    assert_eq!(
        serde_json::to_string(controller.home().furniture()).unwrap(),
        end_furniture
    );
    assert_eq!(controller.home().selected_items(), end_selection);
}

#[test]
fn test_add_level_stacks_above_the_tallest() {
    let mut controller = controller(Home::new());

    let first = controller.add_level();
    let levels = controller.home().levels();
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].name, "Level 0");
    assert_eq!(levels[0].elevation, 0.0);
    assert_eq!(controller.home().selected_level(), Some(first));

    let second = controller.add_level();
    let levels = controller.home().levels();
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[1].name, "Level 1");
    // 0 elevation + 250 of wall height + 12 of floor thickness.
    assert_eq!(levels[1].elevation, 262.0);
    assert_eq!(controller.home().selected_level(), Some(second));
}
