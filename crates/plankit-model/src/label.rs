//! Free text labels anchored at a plan point.

use serde::{Deserialize, Serialize};

use crate::home::{LabelId, LevelId};

/// A piece of text pinned at (x, y). Hit testing against the rendered text
/// bounds belongs to the view; the model only knows the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub level: Option<LevelId>,
}

impl Label {
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            id: LabelId(0),
            x,
            y,
            text: text.into(),
            level: None,
        }
    }

    /// Whether (x, y) lies within `margin` of the anchor on both axes.
    pub fn contains_point(&self, x: f64, y: f64, margin: f64) -> bool {
        (x - self.x).abs() <= margin && (y - self.y).abs() <= margin
    }

    pub fn intersects_rectangle(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        self.x >= x0.min(x1) && self.x <= x0.max(x1) && self.y >= y0.min(y1) && self.y <= y0.max(y1)
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn is_at_level(&self, level: Option<LevelId>) -> bool {
        self.level == level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point() {
        let label = Label::new(40.0, 60.0, "Kitchen sink");
        assert!(label.contains_point(42.0, 58.0, 4.0));
        assert!(!label.contains_point(46.0, 60.0, 4.0));
    }

    #[test]
    fn test_intersects_rectangle() {
        let label = Label::new(40.0, 60.0, "Note");
        assert!(label.intersects_rectangle(50.0, 70.0, 30.0, 50.0));
        assert!(!label.intersects_rectangle(0.0, 0.0, 30.0, 50.0));
    }
}
