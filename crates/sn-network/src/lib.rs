//! `sn-network` — spatial networks and their distance queries.
//!
//! A [`SpatialNetwork`] owns nodes (with coordinates) and edges (with line
//! geometry) and keeps each edge's weight in step with its geometry.
//!
//! | Query              | Meaning                                        |
//! |--------------------|------------------------------------------------|
//! | flying distance    | straight line between two node coordinates     |
//! | routing distance   | least total weight along edges                 |
//! | detour ratio       | routing distance over flying distance          |
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`node`]     | `SpatialNode`                                                 |
//! | [`edge`]     | `SpatialEdge`, `EdgeOptions`                                  |
//! | [`network`]  | `SpatialNetwork` (storage, invariants, mutation)              |
//! | [`distance`] | `DistanceEngine`, `WeightFn` and the stock weight functions   |
//! | [`analysis`] | distance strength, accessibility, triangles, edge crossings   |
//! | [`record`]   | `NodeRecord`, `EdgeRecord`, `NetworkBuilder`                  |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                       |
//! |------------|--------------------------------------------------------------|
//! | `parallel` | `graph_accessibility` fans out over Rayon.                   |
//! | `serde`    | Derives `Serialize`/`Deserialize` on records and core types. |
//!
//! # Example
//!
//! ```
//! use sn_network::{Attributes, EdgeOptions, NetworkConfig, SpatialNetwork};
//!
//! let mut net = SpatialNetwork::new(NetworkConfig::undirected()).unwrap();
//! let a = net.add_node(&[0.0, 0.0], Attributes::new()).unwrap();
//! let b = net.add_node(&[3.0, 0.0], Attributes::new()).unwrap();
//! let c = net.add_node(&[3.0, 4.0], Attributes::new()).unwrap();
//! net.add_edge(a, b, EdgeOptions::new()).unwrap();
//! net.add_edge(b, c, EdgeOptions::new()).unwrap();
//!
//! assert_eq!(net.routing_distance(a, c).unwrap(), 7.0);
//! assert_eq!(net.flying_distance(a, c).unwrap(), 5.0);
//! assert_eq!(net.detour_ratio(a, c).unwrap(), 1.4);
//! ```

pub mod analysis;
pub mod distance;
pub mod edge;
pub mod error;
pub mod network;
pub mod node;
pub mod record;


pub use distance::{AttributeWeight, DistanceEngine, GeometricLength, StoredWeight, TravelTime, WeightFn};
pub use edge::{EdgeOptions, SpatialEdge};
pub use error::{EdgeEnd, NetworkError, NetworkResult};
pub use network::SpatialNetwork;
pub use node::SpatialNode;
pub use record::{EdgeRecord, NetworkBuilder, NodeRecord};

pub use sn_core::{AttrValue, Attributes, EdgeId, Metric, NetworkConfig, NodeId};
pub use sn_geometry::{Coord, GeoAdapter, GeometryAdapter, LineString};
pub use sn_graph::{GraphAdapter, PetgraphStore, Route};
