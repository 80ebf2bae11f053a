//! Snapping applied to points while the user draws or drags.
//!
//! Three families of magnetism cooperate here. Angle magnetism pulls the
//! direction from a pivot to one of 24 steps of 15 degrees, then rounds the
//! length along that direction with the unit ladder. Point magnetism replaces
//! a candidate with the closest reference point, a wall corner or room
//! vertex, when one sits within the pick radius. Furniture magnetism snaps a
//! dragged piece against the side of the wall it touches.
//!
//! Coordinates are Y-down, so a screen direction converts to a trigonometric
//! angle as `atan2(y_pivot - y, x - x_pivot)`.

use plankit_model::geometry::{self, Point};
use plankit_model::{DimensionLine, Furniture, FurnitureKind, Home, LengthUnit, Wall};

/// Number of angle steps a direction can magnetize to, 15 degrees apart.
pub const ANGLE_STEP_COUNT: u32 = 24;

/// Rounds an angle in radians to the nearest magnetism step.
pub fn magnetized_angle(angle: f64) -> f64 {
    let step = 2.0 * std::f64::consts::PI / ANGLE_STEP_COUNT as f64;
    (angle / step).round() * step
}

/// End point of a segment pulled towards the closest of the 24 step angles
/// around its start point, with its length rounded by the unit ladder.
///
/// `max_length_delta` bounds how far length rounding may move the point and
/// is usually the model length of one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointWithAngleMagnetism {
    x: f64,
    y: f64,
}

impl PointWithAngleMagnetism {
    pub fn new(
        x_start: f64,
        y_start: f64,
        x: f64,
        y: f64,
        unit: LengthUnit,
        max_length_delta: f64,
    ) -> Self {
        if x_start == x {
            // Exactly vertical: only the length magnetizes.
            let length = unit.magnetized_length((y_start - y).abs(), max_length_delta);
            return Self {
                x,
                y: y_start + length * (y - y_start).signum(),
            };
        }
        if y_start == y {
            let length = unit.magnetized_length((x_start - x).abs(), max_length_delta);
            return Self {
                x: x_start + length * (x - x_start).signum(),
                y,
            };
        }

        let angle = f64::atan2(y_start - y, x - x_start);
        let magnetism_angle = magnetized_angle(angle);
        // Project the raw point on the magnetized radius, then round that
        // length. The projection never flips sign since the angle moved by
        // at most half a step.
        let length = geometry::distance(x_start, y_start, x, y) * (angle - magnetism_angle).cos();
        let length = unit.magnetized_length(length, max_length_delta);
        Self {
            x: x_start + length * magnetism_angle.cos(),
            y: y_start - length * magnetism_angle.sin(),
        }
    }

    /// Gets the magnetized abscissa.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Gets the magnetized ordinate.
    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Candidate point possibly replaced by the closest reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetizedPoint {
    pub x: f64,
    pub y: f64,
    pub magnetized: bool,
}

/// Replaces (x, y) with the closest of `reference_points` when that point
/// lies within `margin`, keeping the raw coordinates otherwise.
pub fn magnetize_to_closest_point(
    reference_points: &[Point],
    x: f64,
    y: f64,
    margin: f64,
) -> MagnetizedPoint {
    let mut smallest_distance_sq = f64::MAX;
    let mut closest = Point::new(x, y);
    for point in reference_points {
        let distance_sq = geometry::distance_sq(point.x, point.y, x, y);
        if distance_sq < smallest_distance_sq {
            smallest_distance_sq = distance_sq;
            closest = *point;
        }
    }
    if smallest_distance_sq <= margin * margin {
        MagnetizedPoint {
            x: closest.x,
            y: closest.y,
            magnetized: true,
        }
    } else {
        MagnetizedPoint {
            x,
            y,
            magnetized: false,
        }
    }
}

/// Like [`magnetize_to_closest_point`] for a point already pulled on the ray
/// from (x_pivot, y_pivot) through (x, y) by angle magnetism. A reference
/// point qualifies only if it also lies within `margin` of that ray, so the
/// snap never breaks the magnetized direction.
pub fn magnetize_to_closest_point_on_ray(
    reference_points: &[Point],
    x_pivot: f64,
    y_pivot: f64,
    x: f64,
    y: f64,
    margin: f64,
) -> Option<Point> {
    let ray_length_sq = geometry::distance_sq(x_pivot, y_pivot, x, y);
    if ray_length_sq == 0.0 {
        return None;
    }
    let mut smallest_distance_sq = margin * margin;
    let mut closest = None;
    for point in reference_points {
        let distance_sq = geometry::distance_sq(point.x, point.y, x, y);
        if distance_sq >= smallest_distance_sq {
            continue;
        }
        let forward = (point.x - x_pivot) * (x - x_pivot) + (point.y - y_pivot) * (y - y_pivot);
        if forward < 0.0 {
            continue;
        }
        if geometry::line_distance(x_pivot, y_pivot, x, y, point.x, point.y) <= margin {
            smallest_distance_sq = distance_sq;
            closest = Some(*point);
        }
    }
    closest
}

/// Snaps `piece` against the closest wall side within `margin` of its
/// center, if any. The piece takes the wall's angle on the side it sits on.
/// Doors and windows additionally take the wall thickness as depth, shift
/// into the wall by `door_window_wall_distance` of that depth and get their
/// `bound_to_wall` flag raised. Returns the wall it snapped to.
pub fn adjust_piece_on_wall(
    home: &Home,
    piece: &mut Furniture,
    margin: f64,
    door_window_wall_distance: f64,
) -> Option<plankit_model::WallId> {
    let level = home.selected_level();
    let mut best: Option<(&Wall, f64)> = None;
    for wall in home.walls() {
        if !wall.is_at_level(level) || wall.arc_extent.is_some() || wall.length() == 0.0 {
            continue;
        }
        let corners = wall.corner_points();
        let left = geometry::seg_distance(
            corners[0].x, corners[0].y, corners[1].x, corners[1].y, piece.x, piece.y,
        );
        let right = geometry::seg_distance(
            corners[2].x, corners[2].y, corners[3].x, corners[3].y, piece.x, piece.y,
        );
        let distance = left.min(right);
        if distance <= margin && best.map_or(true, |(_, d)| distance < d) {
            best = Some((wall, distance));
        }
    }
    let (wall, _) = best?;

    let wall_angle = f64::atan2(wall.y_end - wall.y_start, wall.x_end - wall.x_start);
    let side = if geometry::relative_ccw(
        wall.x_start, wall.y_start, wall.x_end, wall.y_end, piece.x, piece.y,
    ) >= 0
    {
        1.0
    } else {
        -1.0
    };
    let normal_x = -wall_angle.sin() * side;
    let normal_y = wall_angle.cos() * side;
    // Project the piece center on the wall center line.
    let along = (piece.x - wall.x_start) * wall_angle.cos() + (piece.y - wall.y_start) * wall_angle.sin();
    let projected_x = wall.x_start + along * wall_angle.cos();
    let projected_y = wall.y_start + along * wall_angle.sin();

    if piece.is_door_or_window() {
        piece.depth = wall.thickness;
        let shift = door_window_wall_distance * piece.depth;
        piece.x = projected_x + normal_x * shift;
        piece.y = projected_y + normal_y * shift;
        piece.kind = FurnitureKind::DoorOrWindow { bound_to_wall: true };
    } else {
        let shift = wall.thickness / 2.0 + piece.depth / 2.0;
        piece.x = projected_x + normal_x * shift;
        piece.y = projected_y + normal_y * shift;
    }
    piece.set_angle(if side > 0.0 {
        wall_angle
    } else {
        wall_angle + std::f64::consts::PI
    });
    Some(wall.id)
}

/// Lowers the `bound_to_wall` flag of a door or window once it moved on its
/// own and no longer fits a wall.
pub fn release_piece_from_wall(piece: &mut Furniture) {
    if let FurnitureKind::DoorOrWindow { bound_to_wall } = &mut piece.kind {
        *bound_to_wall = false;
    }
}

/// Raises a plain piece resting at elevation 0 onto the top of the tallest
/// piece whose footprint fully contains it.
pub fn adjust_piece_elevation(home: &Home, piece: &mut Furniture) {
    if piece.is_door_or_window() || piece.elevation != 0.0 {
        return;
    }
    let level = home.selected_level();
    let corners = piece.points();
    let mut top: Option<f64> = None;
    for other in home.furniture() {
        if other.id == piece.id
            || other.is_door_or_window()
            || !other.is_at_level(level)
            || std::ptr::eq(other, piece)
        {
            continue;
        }
        if corners
            .iter()
            .all(|corner| other.contains_point(corner.x, corner.y, 0.0))
        {
            let surface = other.elevation + other.height;
            if top.map_or(true, |t| surface > t) {
                top = Some(surface);
            }
        }
    }
    if let Some(elevation) = top {
        piece.elevation = elevation;
    }
}

/// Transient dimension lines measuring the gaps between a piece snapped on a
/// wall and that wall's two ends, along the wall direction. Gaps shorter
/// than a hundredth of a centimeter are dropped.
pub fn wall_distance_feedback(wall: &Wall, piece: &Furniture) -> Vec<DimensionLine> {
    let wall_angle = f64::atan2(wall.y_end - wall.y_start, wall.x_end - wall.x_start);
    let (cos, sin) = (wall_angle.cos(), wall_angle.sin());
    let length = wall.length();
    let mut t_min = f64::MAX;
    let mut t_max = f64::MIN;
    for corner in piece.points() {
        let t = (corner.x - wall.x_start) * cos + (corner.y - wall.y_start) * sin;
        t_min = t_min.min(t);
        t_max = t_max.max(t);
    }
    let mut lines = Vec::with_capacity(2);
    let t_min = t_min.clamp(0.0, length);
    let t_max = t_max.clamp(0.0, length);
    if t_min > 0.01 {
        lines.push(DimensionLine::new(
            wall.x_start,
            wall.y_start,
            wall.x_start + t_min * cos,
            wall.y_start + t_min * sin,
            0.0,
        ));
    }
    if length - t_max > 0.01 {
        lines.push(DimensionLine::new(
            wall.x_start + t_max * cos,
            wall.y_start + t_max * sin,
            wall.x_end,
            wall.y_end,
            0.0,
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle_of(x_start: f64, y_start: f64, point: &PointWithAngleMagnetism) -> f64 {
        f64::atan2(y_start - point.y(), point.x() - x_start).to_degrees()
    }

    #[test]
    fn test_seven_degrees_magnetizes_to_zero() {
        // 200 cm at 7 degrees above the horizontal, Y-down.
        let raw_angle = 7.0f64.to_radians();
        let point = PointWithAngleMagnetism::new(
            0.0,
            0.0,
            200.0 * raw_angle.cos(),
            -200.0 * raw_angle.sin(),
            LengthUnit::Centimeter,
            0.5,
        );
        assert!(angle_of(0.0, 0.0, &point).abs() < 1e-6);
        assert_eq!(point.y(), 0.0);
    }

    #[test]
    fn test_eight_degrees_magnetizes_to_fifteen() {
        let raw_angle = 8.0f64.to_radians();
        let point = PointWithAngleMagnetism::new(
            0.0,
            0.0,
            200.0 * raw_angle.cos(),
            -200.0 * raw_angle.sin(),
            LengthUnit::Centimeter,
            0.5,
        );
        assert!((angle_of(0.0, 0.0, &point) - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_vertical_direction_keeps_abscissa() {
        let point =
            PointWithAngleMagnetism::new(50.0, 50.0, 50.0, 153.4, LengthUnit::Centimeter, 0.5);
        assert_eq!(point.x(), 50.0);
        // 103.4 cm rounds to 103.5 with the 0.5 cm precision a one pixel
        // allowance selects.
        assert!((point.y() - 153.5).abs() < 1e-6);
    }

    #[test]
    fn test_point_magnetism_respects_margin() {
        let references = vec![Point::new(100.0, 100.0)];
        let snapped = magnetize_to_closest_point(&references, 102.0, 101.0, 4.0);
        assert!(snapped.magnetized);
        assert_eq!((snapped.x, snapped.y), (100.0, 100.0));
        let free = magnetize_to_closest_point(&references, 104.0, 103.0, 4.0);
        assert!(!free.magnetized);
        assert_eq!((free.x, free.y), (104.0, 103.0));
    }

    #[test]
    fn test_point_magnetism_on_ray_rejects_off_ray_points() {
        // Ray along +X from the origin; the reference sits 3 cm off the ray.
        let references = vec![Point::new(100.0, 3.0)];
        assert!(
            magnetize_to_closest_point_on_ray(&references, 0.0, 0.0, 101.0, 0.0, 2.0).is_none()
        );
        let on_ray = vec![Point::new(100.0, 0.5)];
        let snapped = magnetize_to_closest_point_on_ray(&on_ray, 0.0, 0.0, 101.0, 0.0, 2.0);
        assert_eq!(snapped, Some(Point::new(100.0, 0.5)));
    }

    #[test]
    fn test_door_snaps_into_wall() {
        let mut home = Home::new();
        home.add_wall(Wall::new(0.0, 0.0, 200.0, 0.0, 10.0, 250.0));
        let mut door = Furniture::new_door_or_window("door", 80.0, 3.0, 90.0, 6.0, 210.0);
        let wall = adjust_piece_on_wall(&home, &mut door, 10.0, 0.0);
        assert!(wall.is_some());
        assert_eq!(door.depth, 10.0);
        assert_eq!(door.y, 0.0);
        assert_eq!(door.x, 80.0);
        assert!(matches!(
            door.kind,
            FurnitureKind::DoorOrWindow { bound_to_wall: true }
        ));
    }

    #[test]
    fn test_piece_backs_against_wall_side() {
        let mut home = Home::new();
        home.add_wall(Wall::new(0.0, 0.0, 200.0, 0.0, 10.0, 250.0));
        let mut piece = Furniture::new("shelf", 100.0, 12.0, 60.0, 30.0, 90.0);
        adjust_piece_on_wall(&home, &mut piece, 10.0, 0.0).unwrap();
        // Below the wall in Y-down coordinates, back side touching it.
        assert!((piece.y - 20.0).abs() < 1e-9);
        assert_eq!(piece.angle, 0.0);
        let mut above = Furniture::new("shelf", 100.0, -12.0, 60.0, 30.0, 90.0);
        adjust_piece_on_wall(&home, &mut above, 10.0, 0.0).unwrap();
        assert!((above.y + 20.0).abs() < 1e-9);
        assert!((above.angle - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn test_piece_elevates_onto_larger_piece() {
        let mut home = Home::new();
        home.add_furniture(Furniture::new("table", 0.0, 0.0, 200.0, 120.0, 75.0));
        let mut lamp = Furniture::new("lamp", 10.0, 5.0, 20.0, 20.0, 40.0);
        adjust_piece_elevation(&home, &mut lamp);
        assert_eq!(lamp.elevation, 75.0);
        // A piece wider than the table stays on the floor.
        let mut rug = Furniture::new("rug", 0.0, 0.0, 300.0, 200.0, 1.0);
        adjust_piece_elevation(&home, &mut rug);
        assert_eq!(rug.elevation, 0.0);
    }

    #[test]
    fn test_wall_distance_feedback_measures_both_gaps() {
        let wall = Wall::new(0.0, 0.0, 300.0, 0.0, 10.0, 250.0);
        let mut piece = Furniture::new("bench", 100.0, 20.0, 80.0, 30.0, 45.0);
        piece.y = 20.0;
        let lines = wall_distance_feedback(&wall, &piece);
        assert_eq!(lines.len(), 2);
        assert!((lines[0].length() - 60.0).abs() < 1e-9);
        assert!((lines[1].length() - 160.0).abs() < 1e-9);
    }
}
