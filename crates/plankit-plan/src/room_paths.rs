//! Implicit room outlines recovered from the wall footprints.
//!
//! Joined walls enclose empty areas the user reads as rooms before any Room
//! entity exists. This module unions the footprints of the walls at the
//! selected level and keeps the interior contours of the result, one closed
//! polygon per enclosed area. Double clicking inside such an area turns its
//! contour into a room, and the contour vertices feed point magnetism with
//! the corners walls form where they join.
//!
//! Contours are cached. Every operation that changes a wall or the selected
//! level invalidates the cache at the mutation site; the next lookup
//! rebuilds it.

use csgrs::sketch::Sketch;
use csgrs::traits::CSG;
use tracing::debug;

use plankit_model::geometry::{self, Point};
use plankit_model::Home;

/// Cross-track distance under which a contour point collapses into the
/// straight run of its neighbors, in centimeters.
const COLLINEAR_TOLERANCE: f64 = 0.01;

/// Box size for on-edge containment tests during door gap healing, in
/// centimeters. Door corners often sit exactly on a wall side.
const CONTAINMENT_EPSILON: f64 = 0.05;

/// Lazily rebuilt contours of the areas enclosed by walls.
#[derive(Debug, Default)]
pub struct RoomPathsCache {
    paths: Option<Vec<Vec<Point>>>,
}

impl RoomPathsCache {
    pub fn new() -> Self {
        Self { paths: None }
    }

    /// Drops the cached contours. Called wherever a wall or the selected
    /// level changes.
    pub fn invalidate(&mut self) {
        self.paths = None;
    }

    /// Contours of the enclosed areas, one polygon each, rebuilt on demand.
    pub fn paths(&mut self, home: &Home) -> &[Vec<Point>] {
        self.paths.get_or_insert_with(|| {
            let paths = compute_room_paths(home);
            debug!(contours = paths.len(), "room paths rebuilt");
            paths
        })
    }
}

/// Union of the footprints of all walls at the selected level.
fn walls_union(home: &Home) -> Option<Sketch<()>> {
    let level = home.selected_level();
    let mut union: Option<Sketch<()>> = None;
    for wall in home.walls() {
        if !wall.is_at_level(level) || wall.length() == 0.0 {
            continue;
        }
        let footprint: Vec<[f64; 2]> = wall.points().iter().map(|p| [p.x, p.y]).collect();
        if footprint.len() < 3 {
            continue;
        }
        let sketch = Sketch::polygon(&footprint, None);
        union = Some(match union {
            Some(acc) => acc.union(&sketch),
            None => sketch,
        });
    }
    union
}

fn compute_room_paths(home: &Home) -> Vec<Vec<Point>> {
    let Some(union) = walls_union(home) else {
        return Vec::new();
    };
    let mut paths = Vec::new();
    let mp = union.to_multipolygon();
    for poly in mp.0 {
        for interior in poly.interiors() {
            let mut points: Vec<Point> = interior.0.iter().map(|c| Point::new(c.x, c.y)).collect();
            drop_closing_point(&mut points);
            let points = collapse_collinear(&points);
            if points.len() >= 3 {
                paths.push(points);
            }
        }
    }
    paths
}

fn drop_closing_point(points: &mut Vec<Point>) {
    if points.len() > 1 {
        let first = points[0];
        let last = points[points.len() - 1];
        if first.x == last.x && first.y == last.y {
            points.pop();
        }
    }
}

/// Removes every vertex lying within the tolerance of the line through its
/// neighbors. A run of any length on one straight edge collapses at once
/// since all its points share that line.
fn collapse_collinear(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let next = points[(i + 1) % n];
        let point = points[i];
        if geometry::line_distance(prev.x, prev.y, next.x, next.y, point.x, point.y)
            > COLLINEAR_TOLERANCE
        {
            kept.push(point);
        }
    }
    kept
}

/// Polygon of the enclosed area containing (x, y), if any, with door and
/// window gaps healed: a door or window at floor level straddling the
/// contour extends the room halfway into the wall it occupies, so adjacent
/// rooms built on both sides of a door meet under its sill.
pub fn room_polygon_at(home: &Home, paths: &[Vec<Point>], x: f64, y: f64) -> Option<Vec<Point>> {
    let path = paths
        .iter()
        .find(|path| geometry::polygon_contains(path, x, y))?;
    let mut room_points = path.clone();

    let level = home.selected_level();
    let doors: Vec<Vec<Point>> = home
        .furniture()
        .iter()
        .filter(|piece| {
            piece.is_door_or_window() && piece.elevation == 0.0 && piece.is_at_level(level)
        })
        .map(|piece| piece.points())
        .collect();
    if !doors.is_empty() {
        if let Some(walls_area) = walls_union(home) {
            for door_points in &doors {
                if let Some(extended) =
                    extend_room_under_door(&walls_area, &room_points, door_points, x, y)
                {
                    room_points = extended;
                }
            }
        }
    }
    Some(collapse_collinear(&room_points))
}

/// Grows `room_points` with the room-side half of the intersection between a
/// door footprint and the walls, when exactly two of the door corners lie in
/// the room. Returns `None` when the door does not straddle this room.
fn extend_room_under_door(
    walls_area: &Sketch<()>,
    room_points: &[Point],
    door_points: &[Point],
    x: f64,
    y: f64,
) -> Option<Vec<Point>> {
    if door_points.len() != 4 {
        return None;
    }
    let corners_inside = door_points
        .iter()
        .filter(|p| geometry::polygon_contains(room_points, p.x, p.y))
        .count();
    if corners_inside != 2 {
        return None;
    }

    // Clip the door to the walls it crosses; expect a quadrilateral.
    let door_polygon: Vec<[f64; 2]> = door_points.iter().map(|p| [p.x, p.y]).collect();
    let clipped = walls_area.intersection(&Sketch::polygon(&door_polygon, None));
    let mp = clipped.to_multipolygon();
    if mp.0.len() != 1 {
        return None;
    }
    let mut intersection: Vec<Point> = mp.0[0]
        .exterior()
        .0
        .iter()
        .map(|c| Point::new(c.x, c.y))
        .collect();
    drop_closing_point(&mut intersection);
    let mut intersection = collapse_collinear(&intersection);
    if intersection.len() != 4 {
        return None;
    }

    // Classify corners against the room with a small box test, since the two
    // room-side corners usually sit exactly on the contour.
    let in_room = |p: &Point| {
        geometry::polygon_intersects_rect(
            room_points,
            p.x - CONTAINMENT_EPSILON / 2.0,
            p.y - CONTAINMENT_EPSILON / 2.0,
            CONTAINMENT_EPSILON,
            CONTAINMENT_EPSILON,
        )
    };
    let first_in = (0..4).find(|i| in_room(&intersection[*i]))?;
    let (in1, in2, out1, out2) = if in_room(&intersection[(first_in + 1) % 4]) {
        (
            first_in,
            (first_in + 1) % 4,
            (first_in + 3) % 4,
            (first_in + 2) % 4,
        )
    } else {
        (
            first_in,
            (first_in + 3) % 4,
            (first_in + 1) % 4,
            (first_in + 2) % 4,
        )
    };
    // Pull the wall-side corners halfway back towards the room.
    intersection[out1] = Point::new(
        (intersection[out1].x + intersection[in1].x) / 2.0,
        (intersection[out1].y + intersection[in1].y) / 2.0,
    );
    intersection[out2] = Point::new(
        (intersection[out2].x + intersection[in2].x) / 2.0,
        (intersection[out2].y + intersection[in2].y) / 2.0,
    );

    // Enlarge the half door slightly so its union with the room keeps a
    // single contour.
    let (min_x, min_y, max_x, max_y) = geometry::points_bounds(&intersection);
    let min_side = (max_x - min_x).min(max_y - min_y);
    if min_side <= 0.0 {
        return None;
    }
    let scale = (min_side + CONTAINMENT_EPSILON) / min_side;
    let center_x = (min_x + max_x) / 2.0;
    let center_y = (min_y + max_y) / 2.0;
    let half_door: Vec<[f64; 2]> = intersection
        .iter()
        .map(|p| {
            [
                center_x + (p.x - center_x) * scale,
                center_y + (p.y - center_y) * scale,
            ]
        })
        .collect();

    let room_polygon: Vec<[f64; 2]> = room_points.iter().map(|p| [p.x, p.y]).collect();
    let union = Sketch::<()>::polygon(&room_polygon, None).union(&Sketch::polygon(&half_door, None));
    let mp = union.to_multipolygon();
    let poly = mp
        .0
        .iter()
        .find(|poly| {
            let ring: Vec<Point> = poly.exterior().0.iter().map(|c| Point::new(c.x, c.y)).collect();
            geometry::polygon_contains(&ring, x, y)
        })
        .or_else(|| mp.0.first())?;
    let mut extended: Vec<Point> = poly
        .exterior()
        .0
        .iter()
        .map(|c| Point::new(c.x, c.y))
        .collect();
    drop_closing_point(&mut extended);
    Some(extended)
}
