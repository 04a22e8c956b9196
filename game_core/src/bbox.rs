use crate::Vector2;

/// Axis-aligned box around an entity's center.
///
/// `y1` is the top edge and `y2` the bottom edge. Edges are only ever
/// regenerated from the center and size, never edited directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    center: Vector2,
    width: f32,
    height: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl BoundingBox {
    pub fn new(center: Vector2, width: f32, height: f32) -> Self {
        let mut bounds = Self {
            center,
            width,
            height,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        };
        bounds.generate();
        bounds
    }

    fn generate(&mut self) {
        self.x1 = self.center.x - self.width / 2.0;
        self.x2 = self.center.x + self.width / 2.0;
        self.y1 = self.center.y + self.height / 2.0;
        self.y2 = self.center.y - self.height / 2.0;
    }

    /// Move the box to a new center
    pub fn update(&mut self, center: Vector2) {
        self.center = center;
        self.generate();
    }

    /// Change the box size around the current center
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.generate();
    }

    /// Strict overlap test: boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1 && self.y1 > other.y2 && self.y2 < other.y1
    }

    pub fn center(&self) -> Vector2 {
        self.center
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn x1(&self) -> f32 {
        self.x1
    }

    pub fn x2(&self) -> f32 {
        self.x2
    }

    pub fn y1(&self) -> f32 {
        self.y1
    }

    pub fn y2(&self) -> f32 {
        self.y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_from_center() {
        let bounds = BoundingBox::new(Vector2::new(10.0, -4.0), 20.0, 2.0);
        assert_eq!(bounds.x1(), 0.0);
        assert_eq!(bounds.x2(), 20.0);
        assert_eq!(bounds.y1(), -3.0, "y1 is the top edge");
        assert_eq!(bounds.y2(), -5.0, "y2 is the bottom edge");
    }

    #[test]
    fn test_update_regenerates_edges() {
        let mut bounds = BoundingBox::new(Vector2::ZERO, 2.0, 2.0);
        bounds.update(Vector2::new(5.0, 5.0));
        assert_eq!(bounds.center(), Vector2::new(5.0, 5.0));
        assert_eq!(bounds.x1(), 4.0);
        assert_eq!(bounds.y1(), 6.0);

        bounds.resize(4.0, 1.0);
        assert_eq!(bounds.x1(), 3.0);
        assert_eq!(bounds.y2(), 4.5);
    }

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = BoundingBox::new(Vector2::ZERO, 4.0, 4.0);
        let b = BoundingBox::new(Vector2::new(3.0, 3.0), 4.0, 4.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_edge_touching_does_not_intersect() {
        let a = BoundingBox::new(Vector2::ZERO, 2.0, 2.0);
        let right = BoundingBox::new(Vector2::new(2.0, 0.0), 2.0, 2.0);
        let above = BoundingBox::new(Vector2::new(0.0, 2.0), 2.0, 2.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&above));
    }

    #[test]
    fn test_separated_on_one_axis_does_not_intersect() {
        let a = BoundingBox::new(Vector2::ZERO, 2.0, 2.0);
        let b = BoundingBox::new(Vector2::new(0.5, 10.0), 2.0, 2.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_intersects_is_symmetric() {
        let centers = [-6.0_f32, -2.5, -1.0, 0.0, 0.75, 2.0, 5.0];
        let sizes = [(1.0_f32, 1.0_f32), (4.0, 0.5), (20.0, 2.0), (2.0, 20.0)];
        let mut boxes = Vec::new();
        for &x in &centers {
            for &y in &centers {
                for &(w, h) in &sizes {
                    boxes.push(BoundingBox::new(Vector2::new(x, y), w, h));
                }
            }
        }
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.intersects(b), b.intersects(a), "{a:?} vs {b:?}");
            }
        }
    }
}
