//! `sn-io` — reading and writing spatial networks.
//!
//! | Format  | Read                                        | Write                                    |
//! |---------|---------------------------------------------|------------------------------------------|
//! | GeoJSON | [`read_geojson`], [`read_geojson_reader`]   | [`write_geojson`], [`write_geojson_writer`] |
//! | CSV     | [`load_network_csv`], [`load_network_readers`] | [`write_nodes_csv`], [`write_edges_csv`] |
//!
//! GeoJSON is lossless (geometry, weights and attributes survive a round
//! trip); CSV keeps topology, coordinates and weights only.
//!
//! Every reader goes through [`sn_network::NetworkBuilder`], so a file either
//! yields a network satisfying every invariant or an error naming the first
//! offending record.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sn_io::{read_geojson, write_geojson};
//! use sn_network::NetworkConfig;
//!
//! let net = read_geojson(Path::new("streets.geojson"), NetworkConfig::undirected())?;
//! write_geojson(Path::new("copy.geojson"), &net)?;
//! ```

pub mod csv;
pub mod error;
pub mod geojson;

#[cfg(test)]
mod tests;

pub use self::csv::{
    load_network_csv, load_network_readers, write_edges_csv, write_edges_writer, write_nodes_csv,
    write_nodes_writer,
};
pub use error::{IoError, IoResult};
pub use geojson::{
    Feature, FeatureCollection, Geometry, from_geojson, read_geojson, read_geojson_reader,
    to_geojson, write_geojson, write_geojson_writer,
};
