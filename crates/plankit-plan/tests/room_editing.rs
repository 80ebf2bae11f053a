//! Room editing through the controller: polygon drawing, the double click
//! that fills a walled area, vertex and text gestures.

use plankit_model::{Home, Point, Room, Selectable, UserPreferences, Wall};
use plankit_plan::{Mode, NoOpView, PlanController};

fn controller_without_magnetism(home: Home) -> PlanController {
    let preferences = UserPreferences {
        magnetism_enabled: false,
        ..UserPreferences::default()
    };
    PlanController::new(home, preferences, Box::new(NoOpView))
}

fn triangle() -> Room {
    Room::new(vec![
        Point::new(0.0, 0.0),
        Point::new(200.0, 0.0),
        Point::new(200.0, 150.0),
    ])
}

fn square() -> Room {
    Room::new(vec![
        Point::new(0.0, 0.0),
        Point::new(400.0, 0.0),
        Point::new(400.0, 300.0),
        Point::new(0.0, 300.0),
    ])
}

#[test]
fn test_draw_room_point_by_point() {
    let mut controller = controller_without_magnetism(Home::new());
    controller.set_mode(Mode::RoomCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 0.0);
    controller.press_mouse(200.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 150.0);
    controller.press_mouse(200.0, 150.0, 1, false, false);
    controller.press_mouse(200.0, 150.0, 2, false, false);

    let home = controller.home();
    assert_eq!(home.rooms().len(), 1);
    let room = &home.rooms()[0];
    assert_eq!(
        room.points,
        vec![
            Point::new(0.0, 0.0),
            Point::new(200.0, 0.0),
            Point::new(200.0, 150.0),
        ]
    );
    assert_eq!(home.selected_items(), [Selectable::Room(room.id)]);
    assert_eq!(controller.undo_name(), Some("Add room"));
    assert_eq!(controller.mode(), Mode::RoomCreation);

    controller.undo();
    assert!(controller.home().rooms().is_empty());
    controller.redo();
    assert_eq!(controller.home().rooms().len(), 1);
}

#[test]
fn test_escape_deletes_degenerate_room() {
    let mut controller = controller_without_magnetism(Home::new());
    controller.set_mode(Mode::RoomCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 0.0);
    controller.press_mouse(200.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 150.0);
    // Dropping the floating point would leave a segment, so the whole room
    // goes away.
    controller.escape();

    assert!(controller.home().rooms().is_empty());
    assert!(!controller.can_undo());
    assert_eq!(controller.mode(), Mode::RoomCreation);
}

#[test]
fn test_escape_removes_floating_point_and_posts() {
    let mut controller = controller_without_magnetism(Home::new());
    controller.set_mode(Mode::RoomCreation);
    controller.press_mouse(0.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 0.0);
    controller.press_mouse(200.0, 0.0, 1, false, false);
    controller.move_mouse(200.0, 150.0);
    controller.press_mouse(200.0, 150.0, 1, false, false);
    controller.move_mouse(0.0, 150.0);
    controller.escape();

    let home = controller.home();
    assert_eq!(home.rooms().len(), 1);
    assert_eq!(
        home.rooms()[0].points,
        vec![
            Point::new(0.0, 0.0),
            Point::new(200.0, 0.0),
            Point::new(200.0, 150.0),
        ]
    );
    assert_eq!(controller.undo_name(), Some("Add room"));
}

#[test]
fn test_double_click_fills_walled_area() {
    let mut home = Home::new();
    home.add_wall(Wall::new(0.0, 0.0, 400.0, 0.0, 7.5, 250.0));
    home.add_wall(Wall::new(400.0, 0.0, 400.0, 300.0, 7.5, 250.0));
    home.add_wall(Wall::new(400.0, 300.0, 0.0, 300.0, 7.5, 250.0));
    home.add_wall(Wall::new(0.0, 300.0, 0.0, 0.0, 7.5, 250.0));
    let mut controller = controller_without_magnetism(home);
    controller.set_mode(Mode::RoomCreation);
    controller.press_mouse(200.0, 150.0, 1, false, false);
    controller.press_mouse(200.0, 150.0, 2, false, false);

    let home = controller.home();
    assert_eq!(home.rooms().len(), 1);
    let room = &home.rooms()[0];
    assert!(room.points.len() >= 4);
    assert!(room.contains_point(200.0, 150.0, 0.0));
    // The room hugs the inner wall sides: 392.5 by 292.5 centimeters.
    assert!((room.area() - 392.5 * 292.5).abs() < 1.0);
    assert_eq!(home.selected_items(), [Selectable::Room(room.id)]);
    assert_eq!(controller.undo_name(), Some("Add room"));

    controller.undo();
    assert!(controller.home().rooms().is_empty());
    assert_eq!(controller.home().walls().len(), 4);
}

#[test]
fn test_double_click_outside_walled_area_adds_nothing() {
    let mut home = Home::new();
    home.add_wall(Wall::new(0.0, 0.0, 400.0, 0.0, 7.5, 250.0));
    let mut controller = controller_without_magnetism(home);
    controller.set_mode(Mode::RoomCreation);
    controller.press_mouse(200.0, 150.0, 1, false, false);
    controller.press_mouse(200.0, 150.0, 2, false, false);

    assert!(controller.home().rooms().is_empty());
    assert!(!controller.can_undo());
}

#[test]
fn test_drag_room_vertex_resizes_and_posts() {
    let mut home = Home::new();
    let room = home.add_room(triangle());
    let mut controller = controller_without_magnetism(home);
    controller.press_mouse(150.0, 50.0, 1, false, false);
    controller.release_mouse(150.0, 50.0);
    assert_eq!(controller.home().selected_items(), [Selectable::Room(room)]);

    controller.press_mouse(200.0, 150.0, 1, false, false);
    controller.move_mouse(240.0, 190.0);
    controller.release_mouse(240.0, 190.0);

    let resized = controller.home().room(room).unwrap();
    assert_eq!(resized.points[2], Point::new(240.0, 190.0));
    assert_eq!(resized.points[0], Point::new(0.0, 0.0));
    assert_eq!(controller.undo_name(), Some("Resize room"));
    controller.undo();
    assert_eq!(
        controller.home().room(room).unwrap().points[2],
        Point::new(200.0, 150.0)
    );
}

#[test]
fn test_escape_cancels_room_vertex_drag() {
    let mut home = Home::new();
    let room = home.add_room(triangle());
    let mut controller = controller_without_magnetism(home);
    controller.press_mouse(150.0, 50.0, 1, false, false);
    controller.release_mouse(150.0, 50.0);
    controller.press_mouse(200.0, 150.0, 1, false, false);
    controller.move_mouse(240.0, 190.0);
    controller.escape();

    assert_eq!(
        controller.home().room(room).unwrap().points[2],
        Point::new(200.0, 150.0)
    );
    assert!(!controller.can_undo());
}

#[test]
fn test_drag_room_name_accumulates_offset() {
    let mut home = Home::new();
    let mut named = square();
    named.name = Some("Living".to_string());
    let room = home.add_room(named);
    let mut controller = controller_without_magnetism(home);
    controller.press_mouse(100.0, 100.0, 1, false, false);
    controller.release_mouse(100.0, 100.0);

    // The name anchor sits 40 cm above the room center.
    controller.press_mouse(200.0, 110.0, 1, false, false);
    controller.move_mouse(250.0, 130.0);
    controller.release_mouse(250.0, 130.0);

    let moved = controller.home().room(room).unwrap();
    assert_eq!((moved.name_x_offset, moved.name_y_offset), (50.0, -20.0));
    assert_eq!(controller.undo_name(), Some("Move room name"));
    controller.undo();
    let restored = controller.home().room(room).unwrap();
    assert_eq!((restored.name_x_offset, restored.name_y_offset), (0.0, -40.0));
}

#[test]
fn test_drag_room_area_text_accumulates_offset() {
    let mut home = Home::new();
    let mut displayed = square();
    displayed.area_visible = true;
    let room = home.add_room(displayed);
    let mut controller = controller_without_magnetism(home);
    controller.press_mouse(100.0, 100.0, 1, false, false);
    controller.release_mouse(100.0, 100.0);

    // The area text anchor starts at the room center.
    controller.press_mouse(200.0, 150.0, 1, false, false);
    controller.move_mouse(260.0, 180.0);
    controller.release_mouse(260.0, 180.0);

    let moved = controller.home().room(room).unwrap();
    assert_eq!((moved.area_x_offset, moved.area_y_offset), (60.0, 30.0));
    assert_eq!(controller.undo_name(), Some("Move room area"));
    controller.undo();
    let restored = controller.home().room(room).unwrap();
    assert_eq!((restored.area_x_offset, restored.area_y_offset), (0.0, 0.0));
}
