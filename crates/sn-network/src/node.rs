//! Network nodes.

use sn_core::{AttrValue, Attributes, NodeId};
use sn_geometry::{Coord, Point};

/// A node positioned in the network's coordinate space.
///
/// Obtained by reference from [`SpatialNetwork`](crate::SpatialNetwork);
/// the id never changes and the coordinate only changes through
/// [`set_coordinate`](crate::SpatialNetwork::set_coordinate) while the node
/// has no edges.
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialNode {
    pub id:         NodeId,
    pub coordinate: Coord<f64>,
    pub attributes: Attributes,
}

impl SpatialNode {
    #[inline]
    pub fn point(&self) -> Point<f64> {
        Point::from(self.coordinate)
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }
}
