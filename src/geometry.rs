//! 2D geometry for the subdivision engine
//!
//! Screen coordinates: origin top-left, y grows downward.

use std::ops::{Add, Div, Mul, Neg, Sub};

/// sqrt(3) / 2, height of an equilateral triangle with unit side
pub const EQUILATERAL_HEIGHT: f32 = 0.866_025_4;

/// 2D Vector (screen-space point or displacement)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint of the segment between two points
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        (self + other) / 2.0
    }

    /// Point at parameter t along `self + t * direction`
    #[inline]
    pub fn along(self, direction: Self, t: f32) -> Self {
        self + direction * t
    }

    /// 2D cross product (z component of the 3D cross)
    #[inline]
    pub fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }

    #[inline]
    pub fn as_tuple(self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

// ============================================================================
// Triangle
// ============================================================================

/// Three ordered vertices. Edges are always (v1,v2), (v2,v3), (v3,v1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v1: Vec2,
    pub v2: Vec2,
    pub v3: Vec2,
}

/// Result of punching the center out of a triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subdivision {
    /// The hole, built from the three edge midpoints
    pub center: Triangle,
    /// Corner triangles at v1, v2, v3 in that order
    pub corners: [Triangle; 3],
}

impl Triangle {
    #[inline]
    pub const fn new(v1: Vec2, v2: Vec2, v3: Vec2) -> Self {
        Self { v1, v2, v3 }
    }

    /// Largest equilateral triangle that fits a `width` x `height` viewport
    /// with `margin` pixels reserved on every side, centered on both axes.
    ///
    /// v1 is the apex, v2 the bottom-left corner, v3 the bottom-right corner.
    /// A viewport smaller than twice the margin yields a degenerate triangle.
    pub fn equilateral_in(width: f32, height: f32, margin: f32) -> Self {
        let by_width = width - 2.0 * margin;
        let by_height = (height - 2.0 * margin) / EQUILATERAL_HEIGHT;
        let side = by_width.min(by_height).max(0.0);
        let h = EQUILATERAL_HEIGHT * side;

        let left = 0.5 * (width - side);
        let top = 0.5 * (height - h);

        Self {
            v1: Vec2::new(0.5 * width, top),
            v2: Vec2::new(left, top + h),
            v3: Vec2::new(left + side, top + h),
        }
    }

    #[inline]
    pub fn vertices(&self) -> [Vec2; 3] {
        [self.v1, self.v2, self.v3]
    }

    /// Midpoints of edges (v1,v2), (v2,v3), (v3,v1)
    #[inline]
    pub fn midpoints(&self) -> [Vec2; 3] {
        [
            self.v1.midpoint(self.v2),
            self.v2.midpoint(self.v3),
            self.v3.midpoint(self.v1),
        ]
    }

    /// Edge vectors v2-v1, v3-v2, v1-v3: `vertex + t * edge` walks each edge
    #[inline]
    pub fn edge_vectors(&self) -> [Vec2; 3] {
        [self.v2 - self.v1, self.v3 - self.v2, self.v1 - self.v3]
    }

    /// Unsigned area
    #[inline]
    pub fn area(&self) -> f32 {
        0.5 * (self.v2 - self.v1).cross(self.v3 - self.v1).abs()
    }

    /// Split into the center hole plus three corner triangles
    pub fn subdivide(&self) -> Subdivision {
        let [c1, c2, c3] = self.midpoints();
        Subdivision {
            center: Triangle::new(c1, c2, c3),
            corners: [
                Triangle::new(self.v1, c1, c3),
                Triangle::new(c1, self.v2, c2),
                Triangle::new(c3, c2, self.v3),
            ],
        }
    }

    pub fn as_tuples(&self) -> [(f32, f32); 3] {
        [self.v1.as_tuple(), self.v2.as_tuple(), self.v3.as_tuple()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalene() -> Triangle {
        Triangle::new(Vec2::new(13.0, 7.5), Vec2::new(250.0, 40.0), Vec2::new(90.0, 311.0))
    }

    #[test]
    fn test_midpoint_symmetric() {
        let a = Vec2::new(3.25, -17.0);
        let b = Vec2::new(-120.5, 44.75);
        assert_eq!(a.midpoint(b), b.midpoint(a));
    }

    #[test]
    fn test_edge_pairing_consistent() {
        let tri = scalene();
        let mids = tri.midpoints();
        let edges = tri.edge_vectors();
        let verts = tri.vertices();
        for i in 0..3 {
            // Half way along each edge vector lands on that edge's midpoint
            assert!(verts[i].along(edges[i], 0.5).approx_eq(&mids[i], 1e-4));
        }
    }

    #[test]
    fn test_subdivision_partitions_area() {
        let tri = scalene();
        let sub = tri.subdivide();
        let total = sub.center.area() + sub.corners.iter().map(Triangle::area).sum::<f32>();
        assert!((total - tri.area()).abs() < tri.area() * 1e-5);
        for corner in &sub.corners {
            assert!((corner.area() * 4.0 - tri.area()).abs() < tri.area() * 1e-4);
        }
    }

    #[test]
    fn test_subdivision_center_is_midpoints() {
        let tri = scalene();
        let sub = tri.subdivide();
        assert_eq!(sub.center.vertices(), tri.midpoints());
        assert_eq!(sub.corners[0].v1, tri.v1);
        assert_eq!(sub.corners[1].v2, tri.v2);
        assert_eq!(sub.corners[2].v3, tri.v3);
    }

    #[test]
    fn test_equilateral_fits_wide_viewport() {
        // Height-bound: side limited by (600 - 40) / 0.866
        let tri = Triangle::equilateral_in(800.0, 600.0, 20.0);
        let side = tri.v3.x - tri.v2.x;
        assert!((side - 560.0 / EQUILATERAL_HEIGHT).abs() < 0.01);
        assert!((tri.v1.y - 20.0).abs() < 0.01);
        assert!((tri.v2.y - 580.0).abs() < 0.01);
        assert!((tri.v1.x - 400.0).abs() < 0.01);
        assert!(tri.v2.x >= 20.0 && tri.v3.x <= 780.0);
    }

    #[test]
    fn test_equilateral_fits_tall_viewport() {
        // Width-bound: side = 1000 - 2 * 20
        let tri = Triangle::equilateral_in(1000.0, 1000.0, 20.0);
        assert!((tri.v2.x - 20.0).abs() < 0.01);
        assert!((tri.v3.x - 980.0).abs() < 0.01);
        let h = tri.v2.y - tri.v1.y;
        assert!((h - 960.0 * EQUILATERAL_HEIGHT).abs() < 0.01);
        // Vertically centered
        assert!((tri.v1.y - (1000.0 - tri.v2.y)).abs() < 0.01);
    }

    #[test]
    fn test_equilateral_degenerate_when_margin_too_large() {
        let tri = Triangle::equilateral_in(30.0, 30.0, 20.0);
        assert_eq!(tri.area(), 0.0);
    }
}
