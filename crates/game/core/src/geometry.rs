//! Plane geometry used by targeting and formation logic.
//!
//! Coordinates are continuous arena units (`f64`). Angles are expressed in
//! degrees at the API surface; rotation is counter-clockwise for positive
//! angles.
use std::fmt;
use std::ops::{Add, Sub};

/// Added to the product of ray lengths in [`angle_between`] so that a
/// zero-length ray yields a finite angle instead of NaN.
pub const ANGLE_EPSILON: f64 = 1.0e-8;

/// Two points closer than this are treated as the same location.
pub const POSITION_TOLERANCE: f64 = 1.0e-6;

/// Anything with a location in the arena.
pub trait Located {
    fn location(&self) -> Point;

    fn distance_to<L: Located + ?Sized>(&self, other: &L) -> f64 {
        self.location().distance_to_point(other.location())
    }
}

/// Absolute position in arena coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to_point(self, other: Point) -> f64 {
        (other - self).length()
    }

    /// Returns true when both points denote the same location.
    pub fn coincides(self, other: Point) -> bool {
        self.distance_to_point(other) <= POSITION_TOLERANCE
    }
}

impl Located for Point {
    fn location(&self) -> Point {
        *self
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Displacement between two points.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector pointing from `from` to `to`.
    pub fn between(from: Point, to: Point) -> Self {
        to - from
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Unit vector in the same direction, or [`Vector::ZERO`] for a
    /// degenerate (near-zero) vector.
    pub fn normalized(self) -> Self {
        let length = self.length();
        if length <= POSITION_TOLERANCE {
            return Self::ZERO;
        }
        self.scaled(1.0 / length)
    }

    /// Rotates counter-clockwise by `degrees`.
    pub fn rotated(self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

/// Euclidean distance between two located things.
pub fn distance<A, B>(a: &A, b: &B) -> f64
where
    A: Located + ?Sized,
    B: Located + ?Sized,
{
    a.distance_to(b)
}

/// Angle in degrees (0..=180) between the rays `vertex -> ray_a` and
/// `vertex -> ray_b`.
pub fn angle_between(vertex: Point, ray_a: Point, ray_b: Point) -> f64 {
    let a = ray_a - vertex;
    let b = ray_b - vertex;
    let cos = a.dot(b) / (a.length() * b.length() + ANGLE_EPSILON);
    // Rounding can push |cos| marginally past 1 for collinear rays.
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Rotates `origin` around `target` by `degrees` and returns the new point.
///
/// The distance to `target` is preserved, so this is how an agent stands
/// "near" a target at an angular offset instead of on top of it.
pub fn place_near(origin: Point, target: Point, degrees: f64) -> Point {
    target + (origin - target).rotated(degrees)
}

/// Point reached by walking from `from` toward `to` for `fraction` of
/// `radius`, optionally rotating the walk by `degrees` around `from`.
///
/// Formation and stand-off points are expressed in multiples of the home-base
/// healing radius, which callers pass as `radius`. A degenerate direction
/// (`from == to`) returns `from`.
pub fn offset_toward(
    from: Point,
    to: Point,
    fraction: f64,
    degrees: Option<f64>,
    radius: f64,
) -> Point {
    let mut step = (to - from).normalized().scaled(fraction * radius);
    if let Some(degrees) = degrees {
        step = step.rotated(degrees);
    }
    from + step
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1.0e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn distance_is_euclidean() {
        assert_close(distance(&Point::new(0.0, 0.0), &Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn angle_between_perpendicular_rays() {
        let angle = angle_between(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 5.0),
        );
        assert_close(angle, 90.0);
    }

    #[test]
    fn angle_between_opposite_rays() {
        let angle = angle_between(
            Point::new(5.0, 5.0),
            Point::new(10.0, 5.0),
            Point::new(0.0, 5.0),
        );
        assert!((angle - 180.0).abs() < 1.0e-3);
    }

    #[test]
    fn angle_between_degenerate_ray_is_finite() {
        let vertex = Point::new(1.0, 1.0);
        let angle = angle_between(vertex, vertex, Point::new(4.0, 1.0));
        assert!(angle.is_finite());
        assert_close(angle, 90.0);
    }

    #[test]
    fn place_near_rotates_around_target() {
        let spot = place_near(Point::new(10.0, 0.0), Point::ORIGIN, 90.0);
        assert_close(spot.x, 0.0);
        assert_close(spot.y, 10.0);

        let unchanged = place_near(Point::new(7.0, 3.0), Point::new(2.0, 2.0), 0.0);
        assert!(unchanged.coincides(Point::new(7.0, 3.0)));
    }

    #[test]
    fn place_near_keeps_distance_to_target() {
        let target = Point::new(100.0, 100.0);
        let origin = Point::new(160.0, 180.0);
        let spot = place_near(origin, target, -40.0);
        assert_close(spot.distance_to(&target), origin.distance_to(&target));
    }

    #[test]
    fn offset_toward_scales_by_radius() {
        let spot = offset_toward(
            Point::new(0.0, 0.0),
            Point::new(1000.0, 0.0),
            0.5,
            None,
            200.0,
        );
        assert_close(spot.x, 100.0);
        assert_close(spot.y, 0.0);
    }

    #[test]
    fn offset_toward_applies_rotation() {
        let spot = offset_toward(
            Point::new(0.0, 0.0),
            Point::new(0.0, 50.0),
            1.0,
            Some(-90.0),
            200.0,
        );
        assert_close(spot.x, 200.0);
        assert_close(spot.y, 0.0);
    }

    #[test]
    fn offset_toward_degenerate_direction_stays_put() {
        let here = Point::new(42.0, 17.0);
        assert!(offset_toward(here, here, 0.8, Some(30.0), 200.0).coincides(here));
    }
}
