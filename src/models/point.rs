/// A point of interest reported by a decode engine (finder centre, bar edge, ...)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResultPoint {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl ResultPoint {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &ResultPoint) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Calculate squared distance (faster, no sqrt)
    pub fn distance_squared(&self, other: &ResultPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Translate point by (dx, dy)
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned bounding box of a set of points as (min_x, min_y, max_x, max_y)
pub fn bounding_box(points: &[ResultPoint]) -> Option<(f32, f32, f32, f32)> {
    let first = points.first()?;
    let init = (first.x, first.y, first.x, first.y);
    Some(points.iter().fold(init, |(min_x, min_y, max_x, max_y), p| {
        (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
    }))
}
