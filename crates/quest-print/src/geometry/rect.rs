//! Rectangle arithmetic in PDF points
//!
//! Origin is the bottom-left corner of the page, y grows upward.
//! Callers pass non-negative sizes; nothing here fails.

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

/// Per-edge distances, used for insets and outsets
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Edges {
    pub fn uniform(value: f32) -> Self {
        Self {
            left: value,
            bottom: value,
            right: value,
            top: value,
        }
    }
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        self.inset_edges(Edges::uniform(margin))
    }

    /// Shrink by a distinct amount per side
    pub fn inset_edges(&self, edges: Edges) -> Self {
        Self::new(
            self.x + edges.left,
            self.y + edges.bottom,
            self.width - edges.left - edges.right,
            self.height - edges.bottom - edges.top,
        )
    }

    /// Grow by a distinct amount per side
    pub fn outset_edges(&self, edges: Edges) -> Self {
        Self::new(
            self.x - edges.left,
            self.y - edges.bottom,
            self.width + edges.left + edges.right,
            self.height + edges.bottom + edges.top,
        )
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.top().max(other.top()) - y,
        )
    }

    /// True when `other` lies inside or on the border of `self`
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.top() <= self.top() + EPS
    }

    /// True when `other` lies inside `self` without touching any edge
    pub fn strictly_contains(&self, other: &Rect) -> bool {
        other.x > self.x
            && other.y > self.y
            && other.right() < self.right()
            && other.top() < self.top()
    }

    /// True when the interiors overlap (shared edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }

    /// Per-edge distance from `inner` to the edges of `self`
    pub fn gaps_to(&self, inner: &Rect) -> Edges {
        Edges {
            left: inner.x - self.x,
            bottom: inner.y - self.y,
            right: self.right() - inner.right(),
            top: self.top() - inner.top(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_and_outset_cancel() {
        let rect = Rect::new(9.0, 9.0, 612.0, 612.0);
        let edges = Edges {
            left: 9.0,
            bottom: 9.0,
            right: 0.0,
            top: 9.0,
        };
        assert_eq!(rect.outset_edges(edges).inset_edges(edges), rect);
    }

    #[test]
    fn test_union_covers_both() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, -5.0, 20.0, 5.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(0.0, -5.0, 25.0, 15.0));
        assert!(u.contains(&a));
        assert!(u.contains(&b));
    }

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&b.translate(-0.5, 0.0)));
    }

    #[test]
    fn test_strict_containment_rejects_shared_edge() {
        let outer = Rect::from_size(100.0, 100.0);
        assert!(outer.strictly_contains(&outer.inset(1.0)));
        assert!(!outer.strictly_contains(&Rect::new(0.0, 1.0, 50.0, 50.0)));
    }
}
