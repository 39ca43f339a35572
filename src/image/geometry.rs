//! Integer geometry in absolute source (frame) coordinates.

/// A point in source pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when both axis distances to `other` are strictly below `tolerance`.
    pub fn is_near(&self, other: Point, tolerance: u32) -> bool {
        let tol = i64::from(tolerance);
        (i64::from(self.x) - i64::from(other.x)).abs() < tol
            && (i64::from(self.y) - i64::from(other.y)).abs() < tol
    }
}

/// Axis-aligned rectangle; `x`/`y` may be negative before clamping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size whose centre is `center`.
    pub fn centered(center: Point, width: u32, height: u32) -> Self {
        let x = i64::from(center.x) - i64::from(width / 2);
        let y = i64::from(center.y) - i64::from(height / 2);
        Self {
            x: saturate_i32(x),
            y: saturate_i32(y),
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Centre point, rounded towards the top-left.
    pub fn center(&self) -> Point {
        Point {
            x: saturate_i32(i64::from(self.x) + i64::from(self.width / 2)),
            y: saturate_i32(i64::from(self.y) + i64::from(self.height / 2)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersects the rectangle with `[0, width) x [0, height)`.
    ///
    /// Returns `None` when nothing of the rectangle lies inside the bounds.
    pub fn clamp_to(&self, width: usize, height: usize) -> Option<Rect> {
        let x0 = i64::from(self.x).max(0);
        let y0 = i64::from(self.y).max(0);
        let x1 = self.right().min(width as i64);
        let y1 = self.bottom().min(height as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect {
            x: x0 as i32,
            y: y0 as i32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    /// Intersection of two rectangles, `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = i64::from(self.x).max(i64::from(other.x));
        let y0 = i64::from(self.y).max(i64::from(other.y));
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect {
            x: x0 as i32,
            y: y0 as i32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    pub fn contains(&self, p: Point) -> bool {
        let (px, py) = (i64::from(p.x), i64::from(p.y));
        px >= i64::from(self.x)
            && px < self.right()
            && py >= i64::from(self.y)
            && py < self.bottom()
    }
}

fn saturate_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn clamp_trims_partial_overlap() {
        let r = Rect::new(-5, 10, 20, 100);
        assert_eq!(r.clamp_to(64, 48), Some(Rect::new(0, 10, 15, 38)));
    }

    #[test]
    fn clamp_rejects_disjoint_and_empty() {
        assert_eq!(Rect::new(70, 0, 10, 10).clamp_to(64, 48), None);
        assert_eq!(Rect::new(-20, 0, 10, 10).clamp_to(64, 48), None);
        assert_eq!(Rect::new(0, 0, 0, 10).clamp_to(64, 48), None);
    }

    #[test]
    fn centered_round_trips_center() {
        let c = Point::new(40, 30);
        let r = Rect::centered(c, 12, 8);
        assert_eq!(r, Rect::new(34, 26, 12, 8));
        assert_eq!(r.center(), c);
    }

    #[test]
    fn near_uses_strict_tolerance() {
        let a = Point::new(10, 10);
        assert!(a.is_near(Point::new(11, 9), 2));
        assert!(!a.is_near(Point::new(12, 10), 2));
        assert!(!a.is_near(a, 0));
    }
}
