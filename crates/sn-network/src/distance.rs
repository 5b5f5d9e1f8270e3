//! Flying distance, routing distance, and detour ratio.
//!
//! # Pluggable weights
//!
//! Routing normally uses each edge's stored `weight`.  Every routing query
//! also has a `_with` form taking a [`WeightFn`], which recomputes the
//! effective cost of each edge on the fly without touching stored weights.
//! That supports "what-if" analyses such as routing by travel time:
//!
//! ```
//! use sn_network::{Attributes, EdgeOptions, NetworkConfig, SpatialNetwork, TravelTime};
//!
//! let mut net = SpatialNetwork::new(NetworkConfig::undirected()).unwrap();
//! let a = net.add_node(&[0.0, 0.0], Attributes::new()).unwrap();
//! let b = net.add_node(&[100.0, 0.0], Attributes::new()).unwrap();
//! net.add_edge(a, b, EdgeOptions::new().attribute("speed", 20.0)).unwrap();
//!
//! let secs = net
//!     .distances()
//!     .routing_distance_with(a, b, &TravelTime::new("speed", 10.0))
//!     .unwrap();
//! assert_eq!(secs, 5.0);
//! ```
//!
//! | Weight function     | Edge cost                                        |
//! |---------------------|--------------------------------------------------|
//! | [`StoredWeight`]    | `edge.weight` (the default)                      |
//! | [`GeometricLength`] | `edge.length`, ignoring weight overrides         |
//! | [`TravelTime`]      | `edge.length / speed`, speed from an attribute   |
//! | [`AttributeWeight`] | a numeric attribute                              |
//! | any closure         | `Fn(&SpatialEdge) -> f64`                        |
//!
//! A weight function returning a negative or non-finite cost fails the
//! query with `InvalidWeight` naming the edge.

use std::collections::BTreeMap;

use sn_core::{EdgeId, NodeId};
use sn_geometry::GeometryAdapter;
use sn_graph::{GraphAdapter, Route};

use crate::{NetworkError, NetworkResult, SpatialEdge, SpatialNetwork};

// ── WeightFn ──────────────────────────────────────────────────────────────────

/// Effective routing cost of an edge.
///
/// Implementations must be `Send + Sync` so they can be shared across Rayon
/// workers during parallel accessibility analysis.
pub trait WeightFn: Send + Sync {
    fn weight(&self, edge: &SpatialEdge) -> f64;
}

impl<F> WeightFn for F
where
    F: Fn(&SpatialEdge) -> f64 + Send + Sync,
{
    fn weight(&self, edge: &SpatialEdge) -> f64 {
        self(edge)
    }
}

/// The weight stored on the edge.
#[derive(Copy, Clone, Debug, Default)]
pub struct StoredWeight;

impl WeightFn for StoredWeight {
    fn weight(&self, edge: &SpatialEdge) -> f64 {
        edge.weight
    }
}

/// The geometric length of the edge, even where a weight was overridden.
#[derive(Copy, Clone, Debug, Default)]
pub struct GeometricLength;

impl WeightFn for GeometricLength {
    fn weight(&self, edge: &SpatialEdge) -> f64 {
        edge.length
    }
}

/// Traversal time: `length / speed`.
///
/// Speed is read from the numeric attribute `speed_key` when the edge has a
/// positive one, else `default_speed` applies.  Units follow the network:
/// metres and metres per second give seconds on a `Haversine` network.
#[derive(Clone, Debug)]
pub struct TravelTime {
    pub speed_key:     String,
    pub default_speed: f64,
}

impl TravelTime {
    pub fn new(speed_key: impl Into<String>, default_speed: f64) -> Self {
        Self { speed_key: speed_key.into(), default_speed }
    }
}

impl WeightFn for TravelTime {
    fn weight(&self, edge: &SpatialEdge) -> f64 {
        let speed = edge
            .attr(&self.speed_key)
            .and_then(|v| v.as_f64())
            .filter(|&s| s > 0.0)
            .unwrap_or(self.default_speed);
        edge.length / speed
    }
}

/// Cost read from a numeric attribute.
///
/// Edges without the attribute cost `fallback`; with no fallback the query
/// fails on the first such edge it relaxes.
#[derive(Clone, Debug)]
pub struct AttributeWeight {
    pub key:      String,
    pub fallback: Option<f64>,
}

impl AttributeWeight {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), fallback: None }
    }

    pub fn or(mut self, fallback: f64) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl WeightFn for AttributeWeight {
    fn weight(&self, edge: &SpatialEdge) -> f64 {
        edge.attr(&self.key)
            .and_then(|v| v.as_f64())
            .or(self.fallback)
            .unwrap_or(f64::NAN)
    }
}

// ── DistanceEngine ────────────────────────────────────────────────────────────

/// Stateless distance queries over a borrowed network.
///
/// Holding a shared borrow, the engine cannot observe a half-applied
/// mutation; several engines may query the same network concurrently.
pub struct DistanceEngine<'a, S: GraphAdapter, G: GeometryAdapter> {
    network: &'a SpatialNetwork<S, G>,
}

impl<S: GraphAdapter, G: GeometryAdapter> Clone for DistanceEngine<'_, S, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: GraphAdapter, G: GeometryAdapter> Copy for DistanceEngine<'_, S, G> {}

impl<'a, S: GraphAdapter, G: GeometryAdapter> DistanceEngine<'a, S, G> {
    pub fn new(network: &'a SpatialNetwork<S, G>) -> Self {
        Self { network }
    }

    /// Straight-line distance between the two node coordinates.
    pub fn flying_distance(&self, from: NodeId, to: NodeId) -> NetworkResult<f64> {
        let a = self.network.coordinate(from)?;
        let b = self.network.coordinate(to)?;
        Ok(self.network.geometry().flying_distance(a, b))
    }

    /// Least-weight route over stored weights.
    pub fn route(&self, from: NodeId, to: NodeId) -> NetworkResult<Route> {
        self.check_nodes(from, to)?;
        Ok(self.network.graph().shortest_path(from, to)?)
    }

    /// Least-cost route with costs from `weight`.
    pub fn route_with<W: WeightFn + ?Sized>(
        &self,
        from:   NodeId,
        to:     NodeId,
        weight: &W,
    ) -> NetworkResult<Route> {
        self.check_nodes(from, to)?;
        let network = self.network;
        let cost = |id: EdgeId, stored: f64| network.edge(id).map_or(stored, |e| weight.weight(e));
        Ok(network.graph().shortest_path_by(from, to, &cost)?)
    }

    pub fn routing_distance(&self, from: NodeId, to: NodeId) -> NetworkResult<f64> {
        self.route(from, to).map(|r| r.total_weight)
    }

    pub fn routing_distance_with<W: WeightFn + ?Sized>(
        &self,
        from:   NodeId,
        to:     NodeId,
        weight: &W,
    ) -> NetworkResult<f64> {
        self.route_with(from, to, weight).map(|r| r.total_weight)
    }

    /// `routing_distance / flying_distance`.
    ///
    /// Fails with `UndefinedRatio` when the two nodes coincide, and with
    /// whatever the underlying distance queries fail with otherwise.
    pub fn detour_ratio(&self, from: NodeId, to: NodeId) -> NetworkResult<f64> {
        let flying = self.flying_distance(from, to)?;
        let routing = self.routing_distance(from, to)?;
        ratio(from, to, routing, flying)
    }

    pub fn detour_ratio_with<W: WeightFn + ?Sized>(
        &self,
        from:   NodeId,
        to:     NodeId,
        weight: &W,
    ) -> NetworkResult<f64> {
        let flying = self.flying_distance(from, to)?;
        let routing = self.routing_distance_with(from, to, weight)?;
        ratio(from, to, routing, flying)
    }

    /// Routing distance from `from` to every node it can reach.
    pub fn routing_distances_from<W: WeightFn + ?Sized>(
        &self,
        from:   NodeId,
        weight: &W,
    ) -> NetworkResult<BTreeMap<NodeId, f64>> {
        if !self.network.contains_node(from) {
            return Err(NetworkError::UnknownNode(from));
        }
        let network = self.network;
        let cost = |id: EdgeId, stored: f64| network.edge(id).map_or(stored, |e| weight.weight(e));
        Ok(network.graph().distances_from(from, &cost)?)
    }

    fn check_nodes(&self, from: NodeId, to: NodeId) -> NetworkResult<()> {
        for id in [from, to] {
            if !self.network.contains_node(id) {
                return Err(NetworkError::UnknownNode(id));
            }
        }
        Ok(())
    }
}

fn ratio(from: NodeId, to: NodeId, routing: f64, flying: f64) -> NetworkResult<f64> {
    if flying == 0.0 {
        return Err(NetworkError::UndefinedRatio { from, to });
    }
    Ok(routing / flying)
}
