//! Network configuration.
//!
//! Everything that would otherwise be module-level convenience state (the
//! coordinate reference system, the endpoint tolerance) is carried by a
//! [`NetworkConfig`] passed explicitly when a network is constructed.  The
//! directedness it names is fixed for the lifetime of that network.

use crate::ConfigError;

// ── Metric ────────────────────────────────────────────────────────────────────

/// How coordinates are interpreted when measuring lengths.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Metric {
    /// Planar `(x, y)` coordinates; lengths are Euclidean, in coordinate units.
    #[default]
    Euclidean,
    /// Geographic `(lon, lat)` in degrees; lengths are great-circle metres.
    Haversine,
}

// ── NetworkConfig ─────────────────────────────────────────────────────────────

/// Construction-time configuration of a spatial network.
///
/// Typically built in code, or loaded from JSON by the application crate
/// when the `serde` feature is enabled.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NetworkConfig {
    /// `true` → edges are traversable only `from → to`.
    pub directed: bool,

    /// Maximum coordinate-space gap between an edge geometry's end points
    /// and the coordinates of the nodes it connects.  `0.0` demands an
    /// exact match.
    pub tolerance: f64,

    /// Whether an edge may start and end at the same node.
    pub allow_self_loops: bool,

    /// Coordinate interpretation for lengths and flying distances.
    pub metric: Metric,
}

impl NetworkConfig {
    pub const DEFAULT_TOLERANCE: f64 = 1e-9;

    /// Undirected planar network with default tolerance.
    pub fn undirected() -> Self {
        Self::default()
    }

    /// Directed planar network with default tolerance.
    pub fn directed() -> Self {
        Self { directed: true, ..Self::default() }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_self_loops(mut self, allow: bool) -> Self {
        self.allow_self_loops = allow;
        self
    }

    /// Reject configurations no network can honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::Tolerance(self.tolerance));
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            directed:         false,
            tolerance:        Self::DEFAULT_TOLERANCE,
            allow_self_loops: true,
            metric:           Metric::Euclidean,
        }
    }
}
