// navigator_core/src/types.rs

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;

// --- Core Type Aliases ---
pub type Point = Point2<f64>;
pub type Vector = Vector2<f64>;

/// Identifier of a robot. Unique within a team, not across teams.
pub type RobotId = u32;

// --- Core Time Type ---

/// A point on the monotonic control clock, in seconds.
///
/// The clock origin is arbitrary (typically the start of the process); only
/// differences between timestamps carry meaning.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Timestamp(f64);

impl Timestamp {
    pub fn from_secs(seconds: f64) -> Self {
        Self(seconds)
    }

    pub fn from_millis(milliseconds: u64) -> Self {
        Self(milliseconds as f64 / 1000.0)
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }

    /// Seconds elapsed from `earlier` to `self`. Negative if `earlier` is later.
    pub fn seconds_since(&self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }

    /// Returns this timestamp shifted forward by `seconds`.
    pub fn advanced_by(&self, seconds: f64) -> Self {
        Self(self.0 + seconds)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

// --- Angle Helpers ---

/// Wraps an angle in radians into the canonical range `(-PI, PI]`.
pub fn normalize_angle(angle: f64) -> f64 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid maps +PI onto -PI; keep the upper bound inclusive instead.
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Axis-aligned rectangle in the field plane, used as the planner's sampling region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Builds bounds from `(min_x, max_x)` and `(min_y, max_y)` ranges.
    pub fn from_ranges(x: (f64, f64), y: (f64, f64)) -> Self {
        Self {
            min: Point::new(x.0, y.0),
            max: Point::new(x.1, y.1),
        }
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// True when the rectangle has a strictly positive extent along both axes.
    pub fn is_valid(&self) -> bool {
        self.min.x < self.max.x && self.min.y < self.max.y
    }

    pub fn clamp(&self, point: &Point) -> Point {
        Point::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalize_angle_wraps_into_canonical_range() {
        assert_abs_diff_eq!(normalize_angle(0.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(-PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(-5.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(4.0 * TAU + 0.25), 0.25, epsilon = 1e-9);
    }

    #[test]
    fn timestamp_differences() {
        let earlier = Timestamp::from_millis(1500);
        let later = Timestamp::from_secs(2.0);
        assert_abs_diff_eq!(later.seconds_since(earlier), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(earlier.seconds_since(later), -0.5, epsilon = 1e-12);
        assert!(earlier < later);
        assert_eq!(earlier.advanced_by(0.5), later);
    }

    #[test]
    fn bounds_contains_and_clamps() {
        let bounds = Bounds::from_ranges((-1.0, 1.0), (-2.0, 2.0));
        assert!(bounds.is_valid());
        assert!(bounds.contains(&Point::new(1.0, -2.0)));
        assert!(!bounds.contains(&Point::new(1.1, 0.0)));
        assert_eq!(bounds.clamp(&Point::new(3.0, -3.0)), Point::new(1.0, -2.0));
        assert!(!Bounds::from_ranges((1.0, 1.0), (0.0, 1.0)).is_valid());
    }
}
