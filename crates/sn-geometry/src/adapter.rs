//! The geometry capability consumed by the network core.
//!
//! # Pluggability
//!
//! `sn-network` only talks to geometry through [`GeometryAdapter`], so a
//! different engine (or a projected CRS with its own length rule) drops in
//! without touching weight derivation or invariant checks.  Only
//! [`length`](GeometryAdapter::length) has no default: it is the one place a
//! metric choice shows up.

use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Coord, Intersects, LineString, Point};

use crate::{GeometryError, GeometryResult};

/// Coordinates are 2-D throughout a network.
pub const DIMENSION: usize = 2;

/// Geometry construction and measurement.
///
/// Implementations must be `Send + Sync` so read-only distance queries can
/// run on several threads at once.
pub trait GeometryAdapter: Send + Sync {
    /// Path length of `line` in this adapter's metric.  Never negative.
    fn length(&self, line: &LineString<f64>) -> f64;

    /// Build a point from raw components.
    ///
    /// Fails with [`GeometryError::Dimension`] unless exactly two values are
    /// given, and with [`GeometryError::NonFinite`] on NaN or infinity.
    fn make_point(&self, coords: &[f64]) -> GeometryResult<Point<f64>> {
        if coords.len() != DIMENSION {
            return Err(GeometryError::Dimension { expected: DIMENSION, got: coords.len() });
        }
        for (index, &value) in coords.iter().enumerate() {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { index, value });
            }
        }
        Ok(Point::new(coords[0], coords[1]))
    }

    /// Straight line from `a` to `b`; the default shape of a new edge.
    fn make_line(&self, a: Coord<f64>, b: Coord<f64>) -> LineString<f64> {
        LineString::new(vec![a, b])
    }

    /// Multi-segment line through `points`, in order.
    fn make_path(&self, points: &[Coord<f64>]) -> GeometryResult<LineString<f64>> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints(points.len()));
        }
        for c in points {
            for (index, value) in [c.x, c.y].into_iter().enumerate() {
                if !value.is_finite() {
                    return Err(GeometryError::NonFinite { index, value });
                }
            }
        }
        Ok(LineString::new(points.to_vec()))
    }

    /// Straight-line distance between two coordinates, ignoring topology.
    fn flying_distance(&self, a: Coord<f64>, b: Coord<f64>) -> f64 {
        self.length(&self.make_line(a, b))
    }

    /// Gap between two coordinates in raw coordinate units.  Used for the
    /// endpoint tolerance check, which is metric-independent.
    fn endpoint_gap(&self, a: Coord<f64>, b: Coord<f64>) -> f64 {
        (a.x - b.x).hypot(a.y - b.y)
    }

    /// `true` if the two geometries share at least one point.
    fn intersects(&self, a: &LineString<f64>, b: &LineString<f64>) -> bool {
        a.intersects(b)
    }

    /// `true` if the two geometries cross: some pair of segments meets at a
    /// point that is not a terminal point of both lines, or overlaps along a
    /// stretch of non-zero length.  Lines that only share an end point (two
    /// edges meeting at a node) do not cross.
    fn crosses(&self, a: &LineString<f64>, b: &LineString<f64>) -> bool {
        let is_shared_terminal = |p: Coord<f64>| is_terminal(a, p) && is_terminal(b, p);

        a.lines().any(|sa| {
            b.lines().any(|sb| match line_intersection(sa, sb) {
                None => false,
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    !is_shared_terminal(intersection)
                }
                Some(LineIntersection::Collinear { intersection }) => {
                    intersection.start != intersection.end
                        || !is_shared_terminal(intersection.start)
                }
            })
        })
    }
}

fn is_terminal(line: &LineString<f64>, p: Coord<f64>) -> bool {
    line.0.first() == Some(&p) || line.0.last() == Some(&p)
}
