//! Structural wall operations that must keep the join graph consistent.
//!
//! Walls reference at most one neighbor per endpoint and the references are
//! symmetric: when wall A points at B from one of its ends, B points back at
//! A from the end sharing that corner, or neither points at the other. The
//! helpers here are the only code paths allowed to rewire those links, and
//! each one restores the invariant before returning.
//!
//! [`JoinedWall`] freezes a wall together with which endpoint of each
//! neighbor pointed back at it, so an undo can rebuild the exact topology
//! after the wall came and went.

use plankit_model::{Home, Selectable, Wall, WallId};

/// Snapshot of a wall and of the back-references its neighbors held when it
/// was captured.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedWall {
    wall: Wall,
    joined_at_start_of_wall_at_start: bool,
    joined_at_end_of_wall_at_start: bool,
    joined_at_start_of_wall_at_end: bool,
    joined_at_end_of_wall_at_end: bool,
}

impl JoinedWall {
    /// Captures the wall and the joint orientation of both its neighbors.
    pub fn capture(home: &Home, id: WallId) -> Option<JoinedWall> {
        let wall = home.wall(id)?.clone();
        let (mut start_of_start, mut end_of_start) = (false, false);
        if let Some(neighbor) = wall.wall_at_start.and_then(|n| home.wall(n)) {
            start_of_start = neighbor.wall_at_start == Some(id);
            end_of_start = neighbor.wall_at_end == Some(id);
        }
        let (mut start_of_end, mut end_of_end) = (false, false);
        if let Some(neighbor) = wall.wall_at_end.and_then(|n| home.wall(n)) {
            start_of_end = neighbor.wall_at_start == Some(id);
            end_of_end = neighbor.wall_at_end == Some(id);
        }
        Some(JoinedWall {
            wall,
            joined_at_start_of_wall_at_start: start_of_start,
            joined_at_end_of_wall_at_start: end_of_start,
            joined_at_start_of_wall_at_end: start_of_end,
            joined_at_end_of_wall_at_end: end_of_end,
        })
    }

    /// Captures every wall of `ids`, skipping ones already deleted.
    pub fn capture_all(home: &Home, ids: &[WallId]) -> Vec<JoinedWall> {
        ids.iter()
            .filter_map(|id| JoinedWall::capture(home, *id))
            .collect()
    }

    /// Gets the identifier of the captured wall.
    pub fn wall_id(&self) -> WallId {
        self.wall.id
    }

    /// Gets the captured wall data.
    pub fn wall(&self) -> &Wall {
        &self.wall
    }
}

/// Re-inserts captured walls and restores the back-references their
/// neighbors held. Walls are all inserted first so joins between two
/// restored walls resolve whatever the order.
pub fn do_add_walls(home: &mut Home, joined_walls: &[JoinedWall]) {
    for joined in joined_walls {
        home.restore_wall(joined.wall.clone());
    }
    for joined in joined_walls {
        let id = joined.wall.id;
        if let Some(start_id) = joined.wall.wall_at_start {
            if home.wall(start_id).is_some() {
                if joined.joined_at_end_of_wall_at_start {
                    if let Some(neighbor) = home.wall_mut(start_id) {
                        neighbor.wall_at_end = Some(id);
                    }
                } else if joined.joined_at_start_of_wall_at_start {
                    if let Some(neighbor) = home.wall_mut(start_id) {
                        neighbor.wall_at_start = Some(id);
                    }
                }
            } else if let Some(wall) = home.wall_mut(id) {
                wall.wall_at_start = None;
            }
        }
        if let Some(end_id) = joined.wall.wall_at_end {
            if home.wall(end_id).is_some() {
                if joined.joined_at_end_of_wall_at_end {
                    if let Some(neighbor) = home.wall_mut(end_id) {
                        neighbor.wall_at_end = Some(id);
                    }
                } else if joined.joined_at_start_of_wall_at_end {
                    if let Some(neighbor) = home.wall_mut(end_id) {
                        neighbor.wall_at_start = Some(id);
                    }
                }
            } else if let Some(wall) = home.wall_mut(id) {
                wall.wall_at_end = None;
            }
        }
    }
}

/// Deletes the given walls. `Home::delete_wall` already clears the
/// back-references other walls held on each deleted one.
pub fn do_delete_walls(home: &mut Home, ids: &[WallId]) {
    for id in ids {
        home.delete_wall(*id);
    }
}

/// Creates a wall from (x_start, y_start) to (x_end, y_end) on the selected
/// level, joined at its start to the start of `start_at_start` or to the end
/// of `end_at_start` when one is given.
pub fn create_new_wall(
    home: &mut Home,
    x_start: f64,
    y_start: f64,
    x_end: f64,
    y_end: f64,
    thickness: f64,
    height: f64,
    start_at_start: Option<WallId>,
    end_at_start: Option<WallId>,
) -> WallId {
    let mut wall = Wall::new(x_start, y_start, x_end, y_end, thickness, height);
    wall.level = home.selected_level();
    if start_at_start.is_some() {
        wall.wall_at_start = start_at_start;
    } else if end_at_start.is_some() {
        wall.wall_at_start = end_at_start;
    }
    let new_id = home.add_wall(wall);
    if let Some(neighbor_id) = start_at_start {
        if let Some(neighbor) = home.wall_mut(neighbor_id) {
            neighbor.wall_at_start = Some(new_id);
        }
    } else if let Some(neighbor_id) = end_at_start {
        if let Some(neighbor) = home.wall_mut(neighbor_id) {
            neighbor.wall_at_end = Some(new_id);
        }
    }
    new_id
}

/// Joins the end of `wall` to the free endpoint of one of the given walls
/// and snaps its end coordinates onto that endpoint.
pub fn join_new_wall_end_to_wall(
    home: &mut Home,
    wall: WallId,
    start_at_end: Option<WallId>,
    end_at_end: Option<WallId>,
) {
    if let Some(neighbor_id) = start_at_end {
        let Some(neighbor) = home.wall(neighbor_id) else {
            return;
        };
        let (x, y) = (neighbor.x_start, neighbor.y_start);
        if let Some(wall) = home.wall_mut(wall) {
            wall.wall_at_end = Some(neighbor_id);
            wall.x_end = x;
            wall.y_end = y;
        }
        if let Some(neighbor) = home.wall_mut(neighbor_id) {
            neighbor.wall_at_start = Some(wall);
        }
    } else if let Some(neighbor_id) = end_at_end {
        let Some(neighbor) = home.wall(neighbor_id) else {
            return;
        };
        let (x, y) = (neighbor.x_end, neighbor.y_end);
        if let Some(wall) = home.wall_mut(wall) {
            wall.wall_at_end = Some(neighbor_id);
            wall.x_end = x;
            wall.y_end = y;
        }
        if let Some(neighbor) = home.wall_mut(neighbor_id) {
            neighbor.wall_at_end = Some(wall);
        }
    }
}

/// Wall at the selected level whose start point is free and within `margin`
/// of (x, y), other than `ignored`.
pub fn wall_start_at(
    home: &Home,
    x: f64,
    y: f64,
    margin: f64,
    ignored: Option<WallId>,
) -> Option<WallId> {
    let level = home.selected_level();
    home.walls()
        .iter()
        .find(|wall| {
            Some(wall.id) != ignored
                && wall.is_at_level(level)
                && wall.wall_at_start.is_none()
                && wall.contains_wall_start_at(x, y, margin)
        })
        .map(|wall| wall.id)
}

/// Wall at the selected level whose end point is free and within `margin`
/// of (x, y), other than `ignored`.
pub fn wall_end_at(
    home: &Home,
    x: f64,
    y: f64,
    margin: f64,
    ignored: Option<WallId>,
) -> Option<WallId> {
    let level = home.selected_level();
    home.walls()
        .iter()
        .find(|wall| {
            Some(wall.id) != ignored
                && wall.is_at_level(level)
                && wall.wall_at_end.is_none()
                && wall.contains_wall_end_at(x, y, margin)
        })
        .map(|wall| wall.id)
}

/// Moves the start point of a wall. When `move_joined` is set, the matching
/// endpoint of the wall joined there moves along.
pub fn move_wall_start_point(home: &mut Home, id: WallId, x: f64, y: f64, move_joined: bool) {
    let Some(wall) = home.wall_mut(id) else {
        return;
    };
    wall.x_start = x;
    wall.y_start = y;
    let neighbor_id = wall.wall_at_start;
    if !move_joined {
        return;
    }
    if let Some(neighbor) = neighbor_id.and_then(|n| home.wall_mut(n)) {
        if neighbor.wall_at_start == Some(id) {
            neighbor.x_start = x;
            neighbor.y_start = y;
        } else if neighbor.wall_at_end == Some(id) {
            neighbor.x_end = x;
            neighbor.y_end = y;
        }
    }
}

/// Moves the end point of a wall, see [`move_wall_start_point`].
pub fn move_wall_end_point(home: &mut Home, id: WallId, x: f64, y: f64, move_joined: bool) {
    let Some(wall) = home.wall_mut(id) else {
        return;
    };
    wall.x_end = x;
    wall.y_end = y;
    let neighbor_id = wall.wall_at_end;
    if !move_joined {
        return;
    }
    if let Some(neighbor) = neighbor_id.and_then(|n| home.wall_mut(n)) {
        if neighbor.wall_at_start == Some(id) {
            neighbor.x_start = x;
            neighbor.y_start = y;
        } else if neighbor.wall_at_end == Some(id) {
            neighbor.x_end = x;
            neighbor.y_end = y;
        }
    }
}

/// Moves one endpoint of a wall, dragging any joined wall endpoint along.
pub fn move_wall_point(home: &mut Home, id: WallId, x: f64, y: f64, start_point: bool) {
    if start_point {
        move_wall_start_point(home, id, x, y, true);
    } else {
        move_wall_end_point(home, id, x, y, true);
    }
}

/// Reverses the direction of each wall: start and end swap together with
/// the side colors and raked heights, and the arc bends to the other side.
/// Neighbor back-references are untouched since the shared corners stay.
/// Applying this twice restores the walls exactly.
pub fn reverse_walls(home: &mut Home, ids: &[WallId]) {
    for id in ids {
        let Some(wall) = home.wall_mut(*id) else {
            continue;
        };
        std::mem::swap(&mut wall.x_start, &mut wall.x_end);
        std::mem::swap(&mut wall.y_start, &mut wall.y_end);
        std::mem::swap(&mut wall.wall_at_start, &mut wall.wall_at_end);
        std::mem::swap(&mut wall.left_side_color, &mut wall.right_side_color);
        if let Some(extent) = wall.arc_extent {
            wall.arc_extent = Some(-extent);
        }
        if let Some(end_height) = wall.height_at_end {
            wall.height_at_end = Some(wall.height);
            wall.height = end_height;
        }
    }
}

/// Snapshots surrounding a wall split, enough to undo and redo it.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitWalls {
    pub original: JoinedWall,
    pub first: JoinedWall,
    pub second: JoinedWall,
}

/// Splits a wall at its middle point into two halves joined to each other,
/// each keeping the original properties on its side. Former neighbors are
/// rewired to the half now touching them. Round walls split on the arc with
/// each half keeping half the extent, raked walls interpolate the height at
/// the cut. Declines on zero length walls.
pub fn split_wall(home: &mut Home, id: WallId) -> Option<SplitWalls> {
    let original = home.wall(id)?.clone();
    if original.length() == 0.0 {
        return None;
    }
    let original_joined = JoinedWall::capture(home, id)?;

    let middle = original.middle_point();
    let mut first = original.clone();
    first.x_end = middle.x;
    first.y_end = middle.y;
    first.wall_at_end = None;
    let mut second = original.clone();
    second.x_start = middle.x;
    second.y_start = middle.y;
    second.wall_at_start = None;
    if let Some(extent) = original.arc_extent {
        first.arc_extent = Some(extent / 2.0);
        second.arc_extent = Some(extent / 2.0);
    }
    if original.is_raked() {
        let middle_height = (original.height + original.end_height()) / 2.0;
        first.height_at_end = Some(middle_height);
        second.height = middle_height;
    }

    home.delete_wall(id);
    let first_id = home.add_wall(first);
    let second_id = home.add_wall(second);
    if let Some(wall) = home.wall_mut(first_id) {
        wall.wall_at_end = Some(second_id);
    }
    if let Some(wall) = home.wall_mut(second_id) {
        wall.wall_at_start = Some(first_id);
    }
    // Hand the original's neighbors over to the half touching them.
    if let Some(start_id) = original.wall_at_start {
        if original_joined.joined_at_end_of_wall_at_start {
            if let Some(neighbor) = home.wall_mut(start_id) {
                neighbor.wall_at_end = Some(first_id);
            }
        } else if original_joined.joined_at_start_of_wall_at_start {
            if let Some(neighbor) = home.wall_mut(start_id) {
                neighbor.wall_at_start = Some(first_id);
            }
        }
    }
    if let Some(end_id) = original.wall_at_end {
        if original_joined.joined_at_end_of_wall_at_end {
            if let Some(neighbor) = home.wall_mut(end_id) {
                neighbor.wall_at_end = Some(second_id);
            }
        } else if original_joined.joined_at_start_of_wall_at_end {
            if let Some(neighbor) = home.wall_mut(end_id) {
                neighbor.wall_at_start = Some(second_id);
            }
        }
    }

    let first_joined = JoinedWall::capture(home, first_id)?;
    let second_joined = JoinedWall::capture(home, second_id)?;
    Some(SplitWalls {
        original: original_joined,
        first: first_joined,
        second: second_joined,
    })
}

/// Translates items by (dx, dy). A moved wall drags the joined endpoint of
/// a neighbor along only when that neighbor is not itself moved, which
/// keeps joints intact whether one wall or a whole chain is moved.
pub fn move_items(home: &mut Home, items: &[Selectable], dx: f64, dy: f64) {
    for item in items {
        match item {
            Selectable::Wall(id) => {
                let Some(wall) = home.wall(*id) else {
                    continue;
                };
                let (x_start, y_start) = (wall.x_start + dx, wall.y_start + dy);
                let (x_end, y_end) = (wall.x_end + dx, wall.y_end + dy);
                let move_at_start = wall
                    .wall_at_start
                    .map_or(true, |n| !items.contains(&Selectable::Wall(n)));
                let move_at_end = wall
                    .wall_at_end
                    .map_or(true, |n| !items.contains(&Selectable::Wall(n)));
                move_wall_start_point(home, *id, x_start, y_start, move_at_start);
                move_wall_end_point(home, *id, x_end, y_end, move_at_end);
            }
            other => other.move_by(home, dx, dy),
        }
    }
}

/// Inserts a copy of each item and returns the copies, in the same order.
/// Joins between two copied walls are rebuilt between their copies; a join
/// towards a wall left out of the copy is dropped. The compass and the
/// camera are singletons and never duplicate.
pub fn duplicate_items(home: &mut Home, items: &[Selectable]) -> Vec<Selectable> {
    let mut wall_copies: Vec<(WallId, WallId)> = Vec::new();
    let mut copies = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Selectable::Wall(id) => {
                if let Some(wall) = home.wall(*id) {
                    let new_id = home.add_wall(wall.clone());
                    wall_copies.push((*id, new_id));
                    copies.push(Selectable::Wall(new_id));
                }
            }
            Selectable::Room(id) => {
                if let Some(room) = home.room(*id) {
                    let new_id = home.add_room(room.clone());
                    copies.push(Selectable::Room(new_id));
                }
            }
            Selectable::DimensionLine(id) => {
                if let Some(line) = home.dimension_line(*id) {
                    let new_id = home.add_dimension_line(line.clone());
                    copies.push(Selectable::DimensionLine(new_id));
                }
            }
            Selectable::Label(id) => {
                if let Some(label) = home.label(*id) {
                    let new_id = home.add_label(label.clone());
                    copies.push(Selectable::Label(new_id));
                }
            }
            Selectable::Furniture(id) => {
                if let Some(piece) = home.furniture_piece(*id) {
                    let new_id = home.add_furniture(piece.clone());
                    copies.push(Selectable::Furniture(new_id));
                }
            }
            Selectable::Compass | Selectable::Camera => {}
        }
    }
    for (_, new_id) in &wall_copies {
        let Some(wall) = home.wall(*new_id) else {
            continue;
        };
        let remap = |link: Option<WallId>| {
            link.and_then(|old| {
                wall_copies
                    .iter()
                    .find(|(original, _)| *original == old)
                    .map(|(_, copy)| *copy)
            })
        };
        let start = remap(wall.wall_at_start);
        let end = remap(wall.wall_at_end);
        if let Some(wall) = home.wall_mut(*new_id) {
            wall.wall_at_start = start;
            wall.wall_at_end = end;
        }
    }
    copies
}
