//! Renderer-agnostic vector paths.
//!
//! A [`PathData`] is a declarative list of segments. Arcs carry their
//! center, radius, angles and sweep explicitly so each renderer can
//! convert them to its own syntax (SVG `A` commands, cubic Béziers, ...)
//! without replaying drawing-cursor calls.
//!
//! Angles are in radians measured in screen space (y grows downward), so
//! increasing angle turns clockwise on screen.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Points closer than this are treated as coincident.
const COINCIDENT_EPSILON: f64 = 1e-9;

/// Direction an arc travels on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sweep {
    /// Increasing angle (SVG sweep flag 1).
    Clockwise,
    /// Decreasing angle (SVG sweep flag 0).
    CounterClockwise,
}

/// A circular arc given by center, radius and start/end angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    /// Circle center.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
    /// Angle of the start point.
    pub start_angle: f64,
    /// Angle of the end point.
    pub end_angle: f64,
    /// Travel direction from start to end.
    pub sweep: Sweep,
}

impl ArcSegment {
    /// Point on the circle at `angle`.
    #[must_use]
    pub fn point_at(&self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(
            snap(cos).mul_add(self.radius, self.center.x),
            snap(sin).mul_add(self.radius, self.center.y),
        )
    }

    /// Where the arc begins.
    #[must_use]
    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    /// Where the arc ends.
    #[must_use]
    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }

    /// Unsigned angle travelled, in `(0, 2π]`.
    #[must_use]
    pub fn sweep_angle(&self) -> f64 {
        let raw = match self.sweep {
            Sweep::Clockwise => self.end_angle - self.start_angle,
            Sweep::CounterClockwise => self.start_angle - self.end_angle,
        };
        let wrapped = raw.rem_euclid(TAU);
        if wrapped < COINCIDENT_EPSILON {
            TAU
        } else {
            wrapped
        }
    }

    /// Signed angle travelled (negative for counter-clockwise).
    #[must_use]
    pub fn signed_sweep_angle(&self) -> f64 {
        match self.sweep {
            Sweep::Clockwise => self.sweep_angle(),
            Sweep::CounterClockwise => -self.sweep_angle(),
        }
    }

    /// Whether the arc spans more than half a circle.
    #[must_use]
    pub fn is_large(&self) -> bool {
        self.sweep_angle() > PI
    }
}

/// Remove floating-point dust from unit-circle coordinates so quarter
/// angles land exactly on axis-aligned points.
fn snap(value: f64) -> f64 {
    if value.abs() < COINCIDENT_EPSILON {
        0.0
    } else if (value.abs() - 1.0).abs() < COINCIDENT_EPSILON {
        value.signum()
    } else {
        value
    }
}

/// One path command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight line from the current point.
    LineTo(Point),
    /// Circular arc beginning at the current point.
    Arc(ArcSegment),
    /// Straight line back to the subpath start, closing it.
    Close,
}

/// An ordered list of path segments, built with chained calls.
///
/// # Examples
///
/// ```
/// use sleepline_chart::path::PathData;
/// use sleepline_chart::Point;
///
/// let path = PathData::new()
///     .move_to(Point::new(0.0, 0.0))
///     .line_to(Point::new(10.0, 0.0))
///     .line_to(Point::new(10.0, 10.0))
///     .close();
/// assert!(path.is_closed());
/// assert_eq!(path.segments().len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    segments: Vec<PathSegment>,
}

impl PathData {
    /// An empty path.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Begin a subpath at `to`.
    #[must_use]
    pub fn move_to(mut self, to: Point) -> Self {
        self.segments.push(PathSegment::MoveTo(to));
        self
    }

    /// Straight line to `to`.
    #[must_use]
    pub fn line_to(mut self, to: Point) -> Self {
        self.segments.push(PathSegment::LineTo(to));
        self
    }

    /// Circular arc around `center`.
    ///
    /// If the current point is not the arc's start point, a connecting
    /// line is inserted first so the outline stays continuous.
    #[must_use]
    pub fn arc(
        mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        sweep: Sweep,
    ) -> Self {
        let arc = ArcSegment {
            center,
            radius,
            start_angle,
            end_angle,
            sweep,
        };
        let start = arc.start_point();
        match self.current_point() {
            Some(current) if current.distance_squared(start) <= COINCIDENT_EPSILON => {}
            Some(_) => self.segments.push(PathSegment::LineTo(start)),
            None => self.segments.push(PathSegment::MoveTo(start)),
        }
        self.segments.push(PathSegment::Arc(arc));
        self
    }

    /// Close the current subpath.
    #[must_use]
    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    /// The segments in drawing order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns `true` if the path has no segments.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Start of the first subpath.
    #[must_use]
    pub fn start_point(&self) -> Option<Point> {
        match self.segments.first() {
            Some(PathSegment::MoveTo(p)) => Some(*p),
            _ => None,
        }
    }

    /// The pen position after the last segment.
    #[must_use]
    pub fn current_point(&self) -> Option<Point> {
        let mut current = None;
        let mut subpath_start = None;
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    current = Some(p);
                    subpath_start = Some(p);
                }
                PathSegment::LineTo(p) => current = Some(p),
                PathSegment::Arc(arc) => current = Some(arc.end_point()),
                PathSegment::Close => current = subpath_start,
            }
        }
        current
    }

    /// Returns `true` if the path ends with [`PathSegment::Close`].
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.segments.last(), Some(PathSegment::Close))
    }
}
