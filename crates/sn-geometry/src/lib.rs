//! `sn-geometry` — the geometry engine seen through one small trait.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`adapter`]     | `GeometryAdapter` trait                                |
//! | [`geo_adapter`] | `GeoAdapter` (backed by the `geo` crate), `haversine_m`|
//! | [`error`]       | `GeometryError`, `GeometryResult<T>`                   |
//!
//! The network core never calls `geo` directly; swapping the backing library
//! means writing another [`GeometryAdapter`].

pub mod adapter;
pub mod error;
pub mod geo_adapter;

#[cfg(test)]
mod tests;

pub use adapter::GeometryAdapter;
pub use error::{GeometryError, GeometryResult};
pub use geo_adapter::{GeoAdapter, MAX_HAVERSINE_M, haversine_m};

// Geometry types used across the workspace.
pub use geo::{Coord, LineString, Point};
