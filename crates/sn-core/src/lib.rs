//! `sn-core` — foundational types for the spatial-networks workspace.
//!
//! Every other `sn-*` crate depends on this one.  It has no `sn-*`
//! dependencies and no geometry or graph engine: only identifiers, attribute
//! bags, and the configuration object a network is built from.
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`                                    |
//! | [`attr`]     | `AttrValue`, `Attributes`                             |
//! | [`config`]   | `NetworkConfig`, `Metric`                             |
//! | [`error`]    | `ConfigError`                                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod attr;
pub mod config;
pub mod error;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use attr::{AttrValue, Attributes};
pub use config::{Metric, NetworkConfig};
pub use error::ConfigError;
pub use ids::{EdgeId, NodeId};
