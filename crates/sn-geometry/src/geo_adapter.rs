//! [`GeometryAdapter`] backed by the `geo` crate.

use std::f64::consts::PI;

use geo::{Coord, Distance, Euclidean, HaversineMeasure, Length, LineString, Point};

use sn_core::Metric;

use crate::GeometryAdapter;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Longest great-circle distance: half the circumference.
pub const MAX_HAVERSINE_M: f64 = PI * EARTH_RADIUS_M;

const EARTH: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_M);

/// Geometry engine parameterised by the network's [`Metric`].
///
/// - `Euclidean`: planar lengths via `geo::Euclidean`.
/// - `Haversine`: coordinates are `(lon, lat)` degrees and each segment is
///   measured along the great circle, in metres.  Intersection tests still
///   treat lon/lat as planar, which is adequate away from the antimeridian.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GeoAdapter {
    metric: Metric,
}

impl GeoAdapter {
    pub fn new(metric: Metric) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }
}

impl GeometryAdapter for GeoAdapter {
    fn length(&self, line: &LineString<f64>) -> f64 {
        match self.metric {
            Metric::Euclidean => Euclidean.length(line),
            Metric::Haversine => line.lines().map(|seg| haversine_m(seg.start, seg.end)).sum(),
        }
    }
}

/// Haversine great-circle distance in metres between two `(lon, lat)`
/// coordinates given in degrees.
///
/// Near-antipodal pairs can round the haversine term past 1, which makes
/// `geo` return NaN; the true distance there is half the circumference.
/// `f64::min` discards the NaN, so the result is always finite.
pub fn haversine_m(a: Coord<f64>, b: Coord<f64>) -> f64 {
    EARTH.distance(Point::from(a), Point::from(b)).min(MAX_HAVERSINE_M)
}
