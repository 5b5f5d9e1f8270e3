//! `sn-graph` — topology storage and shortest paths.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`adapter`]  | `GraphAdapter` trait, `Adjacent`                            |
//! | [`store`]    | `PetgraphStore` (backed by `petgraph::StableGraph`)         |
//! | [`dijkstra`] | `Route`, deterministic Dijkstra over any `GraphAdapter`     |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                              |

pub mod adapter;
pub mod dijkstra;
pub mod error;
pub mod store;


pub use adapter::{Adjacent, GraphAdapter};
pub use dijkstra::Route;
pub use error::{GraphError, GraphResult};
pub use store::PetgraphStore;
