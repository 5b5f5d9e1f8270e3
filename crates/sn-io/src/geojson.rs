//! GeoJSON import and export.
//!
//! # Feature layout
//!
//! A network becomes one `FeatureCollection`: every node, in ascending id
//! order, then every edge.
//!
//! | `object_type`   | Geometry     | Reserved properties                          |
//! |-----------------|--------------|----------------------------------------------|
//! | `"SpatialNode"` | `Point`      | `id`                                         |
//! | `"SpatialEdge"` | `LineString` | `id`, `start`, `end`, `weight`, `length`     |
//!
//! All other properties are the element's attributes.  Only scalar values
//! are accepted on import (`null` counts as absent); arrays and objects fail
//! with [`IoError::Format`].  Features with a missing or unrecognised
//! `object_type` are skipped with a warning, so a collection that also holds
//! unrelated features still loads, whatever their geometry (including
//! `null`).
//!
//! `length` is written for readers' convenience and ignored on import: the
//! network measures each edge's geometry itself.
//!
//! ```json
//! { "type": "FeatureCollection", "features": [
//!   { "type": "Feature",
//!     "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
//!     "properties": { "object_type": "SpatialNode", "id": 0 } },
//!   { "type": "Feature",
//!     "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [3.0, 0.0]] },
//!     "properties": { "object_type": "SpatialEdge", "id": 0, "start": 0, "end": 1,
//!                     "weight": 3.0, "length": 3.0, "name": "Quay Rd" } }
//! ] }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use sn_core::{AttrValue, Attributes, EdgeId, NetworkConfig, NodeId};
use sn_network::{
    EdgeRecord, GeometryAdapter, GraphAdapter, NetworkBuilder, NodeRecord, SpatialNetwork,
};

use crate::{IoError, IoResult};

pub const NODE_OBJECT_TYPE: &str = "SpatialNode";
pub const EDGE_OBJECT_TYPE: &str = "SpatialEdge";

const NODE_RESERVED: [&str; 2] = ["object_type", "id"];
const EDGE_RESERVED: [&str; 6] = ["object_type", "id", "start", "end", "weight", "length"];

// ── GeoJSON types ─────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum CollectionKind {
    #[default]
    FeatureCollection,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum FeatureKind {
    #[default]
    Feature,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind:         CollectionKind,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { kind: CollectionKind::FeatureCollection, features }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Feature {
    #[serde(rename = "type")]
    kind:           FeatureKind,
    /// `None` for a `null` geometry or a type no network element uses.
    #[serde(default, deserialize_with = "network_geometry")]
    pub geometry:   Option<Geometry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: Map<String, Value>) -> Self {
        Self { kind: FeatureKind::Feature, geometry: Some(geometry), properties }
    }

    /// The `object_type` property, if it is a string.
    pub fn object_type(&self) -> Option<&str> {
        self.properties.get("object_type").and_then(Value::as_str)
    }
}

/// The two geometry types a network uses.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Vec<f64>),
    LineString(Vec<Vec<f64>>),
}

/// Accept any geometry; keep it only if it is one a network element uses.
fn network_geometry<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Geometry>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| Geometry::deserialize(v).ok()))
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Map<String, Value>, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

// ── Export ────────────────────────────────────────────────────────────────────

/// Convert a network to a feature collection: nodes first, then edges.
pub fn to_geojson<S: GraphAdapter, G: GeometryAdapter>(network: &SpatialNetwork<S, G>) -> FeatureCollection {
    let mut features = Vec::with_capacity(network.node_count() + network.edge_count());

    for node in network.nodes() {
        let mut props = attributes_to_json(&node.attributes);
        reserve(&mut props, "object_type", NODE_OBJECT_TYPE.into());
        reserve(&mut props, "id", node.id.0.into());
        features.push(Feature::new(
            Geometry::Point(vec![node.coordinate.x, node.coordinate.y]),
            props,
        ));
    }

    for edge in network.edges() {
        let mut props = attributes_to_json(&edge.attributes);
        reserve(&mut props, "object_type", EDGE_OBJECT_TYPE.into());
        reserve(&mut props, "id", edge.id.0.into());
        reserve(&mut props, "start", edge.from.0.into());
        reserve(&mut props, "end", edge.to.0.into());
        reserve(&mut props, "weight", float(edge.weight));
        reserve(&mut props, "length", float(edge.length));
        let coords = edge.geometry.coords().map(|c| vec![c.x, c.y]).collect();
        features.push(Feature::new(Geometry::LineString(coords), props));
    }

    FeatureCollection::new(features)
}

/// Write `network` as pretty-printed GeoJSON to `path`.
pub fn write_geojson<S: GraphAdapter, G: GeometryAdapter>(
    path:    &Path,
    network: &SpatialNetwork<S, G>,
) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_geojson_writer(&mut writer, network)?;
    writer.flush()?;
    debug!(path = %path.display(), "geojson written");
    Ok(())
}

/// Like [`write_geojson`] but accepts any `Write` sink.
pub fn write_geojson_writer<W: Write, S: GraphAdapter, G: GeometryAdapter>(
    writer:  W,
    network: &SpatialNetwork<S, G>,
) -> IoResult<()> {
    serde_json::to_writer_pretty(writer, &to_geojson(network))?;
    Ok(())
}

// ── Import ────────────────────────────────────────────────────────────────────

/// Build a network from a feature collection.
///
/// Fails on the first malformed feature, or with [`IoError::Network`] if
/// the features describe an invalid network (an edge whose line does not
/// reach its `start`/`end` nodes, a duplicate id, …).
pub fn from_geojson(collection: FeatureCollection, config: NetworkConfig) -> IoResult<SpatialNetwork> {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for (index, feature) in collection.features.into_iter().enumerate() {
        let object_type = feature.object_type().map(str::to_owned);
        match object_type.as_deref() {
            Some(NODE_OBJECT_TYPE) => nodes.push(node_record(index, feature)?),
            Some(EDGE_OBJECT_TYPE) => edges.push(edge_record(index, feature)?),
            other => {
                warn!(feature = index, object_type = ?other, "skipping feature that is not part of a network");
            }
        }
    }

    debug!(nodes = nodes.len(), edges = edges.len(), "geojson parsed");
    Ok(NetworkBuilder::new(config).nodes(nodes).edges(edges).build()?)
}

/// Read a network from the GeoJSON file at `path`.
pub fn read_geojson(path: &Path, config: NetworkConfig) -> IoResult<SpatialNetwork> {
    let file = File::open(path)?;
    read_geojson_reader(BufReader::new(file), config)
}

/// Like [`read_geojson`] but accepts any `Read` source.
pub fn read_geojson_reader<R: Read>(reader: R, config: NetworkConfig) -> IoResult<SpatialNetwork> {
    let collection: FeatureCollection = serde_json::from_reader(reader)?;
    from_geojson(collection, config)
}

fn node_record(index: usize, feature: Feature) -> IoResult<NodeRecord> {
    let Some(Geometry::Point(coordinate)) = feature.geometry else {
        return Err(format_error(index, "a SpatialNode must have Point geometry"));
    };
    Ok(NodeRecord {
        id: NodeId(id_property(index, &feature.properties, "id")?),
        coordinate,
        attributes: attributes_from_json(index, feature.properties, &NODE_RESERVED)?,
    })
}

fn edge_record(index: usize, feature: Feature) -> IoResult<EdgeRecord> {
    let Some(Geometry::LineString(points)) = feature.geometry else {
        return Err(format_error(index, "a SpatialEdge must have LineString geometry"));
    };
    let props = feature.properties;

    let weight = match props.get("weight") {
        None | Some(Value::Null) => None,
        Some(v) => Some(
            v.as_f64()
                .ok_or_else(|| format_error(index, &format!("weight {v} is not a number")))?,
        ),
    };

    Ok(EdgeRecord {
        id: EdgeId(id_property(index, &props, "id")?),
        from: NodeId(id_property(index, &props, "start")?),
        to: NodeId(id_property(index, &props, "end")?),
        geometry: Some(points),
        weight,
        attributes: attributes_from_json(index, props, &EDGE_RESERVED)?,
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn id_property(index: usize, props: &Map<String, Value>, key: &str) -> IoResult<u32> {
    props
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| format_error(index, &format!("property {key:?} must be a non-negative 32-bit integer")))
}

fn attributes_from_json(index: usize, props: Map<String, Value>, reserved: &[&str]) -> IoResult<Attributes> {
    let mut attributes = Attributes::new();
    for (key, value) in props {
        if reserved.contains(&key.as_str()) {
            continue;
        }
        let attr = match value {
            Value::Null => continue,
            Value::Bool(b) => AttrValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => AttrValue::Int(i),
                None => AttrValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => AttrValue::Text(s),
            Value::Array(_) | Value::Object(_) => {
                return Err(format_error(index, &format!("property {key:?} is not a scalar")));
            }
        };
        attributes.insert(key, attr);
    }
    Ok(attributes)
}

fn attributes_to_json(attributes: &Attributes) -> Map<String, Value> {
    attributes
        .iter()
        .map(|(k, v)| {
            let json = match v {
                AttrValue::Bool(b) => Value::Bool(*b),
                AttrValue::Int(i) => Value::from(*i),
                AttrValue::Float(f) => float(*f),
                AttrValue::Text(s) => Value::String(s.clone()),
            };
            (k.clone(), json)
        })
        .collect()
}

/// Insert a reserved property, warning if an attribute of the same name is
/// shadowed.
fn reserve(props: &mut Map<String, Value>, key: &str, value: Value) {
    if props.insert(key.to_owned(), value).is_some() {
        warn!(key, "attribute shadowed by a reserved GeoJSON property");
    }
}

/// JSON has no NaN or infinity; those become `null`.
fn float(f: f64) -> Value {
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}

fn format_error(index: usize, msg: &str) -> IoError {
    IoError::Format(format!("feature {index}: {msg}"))
}
