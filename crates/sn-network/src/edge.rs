//! Network edges and the options accepted when adding one.

use sn_core::{AttrValue, Attributes, EdgeId, NodeId};
use sn_geometry::{Coord, LineString};

/// An edge with real geometric shape.
///
/// `geometry` always runs from the coordinate of `from` to the coordinate of
/// `to` (within the network tolerance).  `length` is the geometric length
/// measured when the edge was added; `weight` is the routing cost, equal to
/// `length` unless the caller supplied one.
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialEdge {
    pub id:         EdgeId,
    pub from:       NodeId,
    pub to:         NodeId,
    pub geometry:   LineString<f64>,
    pub length:     f64,
    pub weight:     f64,
    pub attributes: Attributes,
}

impl SpatialEdge {
    #[inline]
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.from, self.to)
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }
}

// ── EdgeOptions ───────────────────────────────────────────────────────────────

/// Optional inputs to [`SpatialNetwork::add_edge`](crate::SpatialNetwork::add_edge).
///
/// | Method          | Default                                        |
/// |-----------------|------------------------------------------------|
/// | `.geometry(..)` | straight line between the two node coordinates |
/// | `.weight(w)`    | geometric length of the edge                   |
/// | `.attribute(..)`| no attributes                                  |
///
/// ```
/// use sn_network::EdgeOptions;
///
/// let opts = EdgeOptions::new()
///     .geometry([(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])
///     .attribute("name", "Canal St")
///     .attribute("lanes", 2_i64);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeOptions {
    pub geometry:   Option<Vec<Coord<f64>>>,
    pub weight:     Option<f64>,
    pub attributes: Attributes,
}

impl EdgeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit (possibly multi-segment) geometry, first point at `from`.
    pub fn geometry<I, C>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coord<f64>>,
    {
        self.geometry = Some(points.into_iter().map(Into::into).collect());
        self
    }

    /// Routing cost overriding the geometric length.
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}
