//! Unit tests for sn-io.

#[cfg(test)]
mod fixtures {
    use sn_network::{AttrValue, Attributes, EdgeOptions, NetworkConfig, SpatialNetwork};

    /// Three streets around a quay:
    ///
    ///   2 (3,4)
    ///   │  e1 "Quay Rd", curved through (4,2), weight 9
    ///   1 (3,0) ── e0 ── 0 (0,0)
    ///
    /// Node 0 carries `name = "depot"`, e0 carries `lanes = 2` and
    /// `lit = true`.
    pub fn quay() -> SpatialNetwork {
        let mut net = SpatialNetwork::new(NetworkConfig::undirected()).unwrap();

        let mut depot = Attributes::new();
        depot.insert("name".into(), AttrValue::from("depot"));
        let a = net.add_node(&[0.0, 0.0], depot).unwrap();
        let b = net.add_node(&[3.0, 0.0], Attributes::new()).unwrap();
        let c = net.add_node(&[3.0, 4.0], Attributes::new()).unwrap();

        net.add_edge(a, b, EdgeOptions::new().attribute("lanes", 2_i64).attribute("lit", true))
            .unwrap();
        net.add_edge(
            b,
            c,
            EdgeOptions::new()
                .geometry([(3.0, 0.0), (4.0, 2.0), (3.0, 4.0)])
                .weight(9.0)
                .attribute("name", "Quay Rd")
                .attribute("grade", 0.5),
        )
        .unwrap();
        net
    }
}

// ── GeoJSON ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod geojson_tests {
    use approx::assert_relative_eq;
    use serde_json::Value;
    use tempfile::TempDir;

    use sn_network::{AttrValue, Attributes, EdgeId, NetworkConfig, NetworkError, NodeId, SpatialNetwork};

    use super::fixtures::quay;
    use crate::{
        Geometry, IoError, from_geojson, read_geojson, read_geojson_reader, to_geojson,
        write_geojson, write_geojson_writer,
    };

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn nodes_then_edges() {
        let fc = to_geojson(&quay());
        assert_eq!(fc.features.len(), 5);

        let kinds: Vec<_> = fc.features.iter().map(|f| f.object_type().unwrap()).collect();
        assert_eq!(kinds, ["SpatialNode", "SpatialNode", "SpatialNode", "SpatialEdge", "SpatialEdge"]);
        assert_eq!(fc.features[0].geometry, Some(Geometry::Point(vec![0.0, 0.0])));
    }

    #[test]
    fn edge_properties() {
        let fc = to_geojson(&quay());
        let edge = &fc.features[4];
        let props = &edge.properties;

        assert_eq!(props["id"], Value::from(1));
        assert_eq!(props["start"], Value::from(1));
        assert_eq!(props["end"], Value::from(2));
        assert_eq!(props["weight"], Value::from(9.0));
        assert_eq!(props["name"], Value::from("Quay Rd"));
        assert_eq!(
            edge.geometry,
            Some(Geometry::LineString(vec![vec![3.0, 0.0], vec![4.0, 2.0], vec![3.0, 4.0]]))
        );
    }

    #[test]
    fn serialized_shape_is_geojson() {
        let json = serde_json::to_value(to_geojson(&quay())).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["type"], "Feature");
        assert_eq!(json["features"][0]["geometry"]["type"], "Point");
        assert_eq!(json["features"][3]["geometry"]["type"], "LineString");
        assert_eq!(json["features"][3]["geometry"]["coordinates"][1][0], 3.0);
    }

    #[test]
    fn round_trip_through_writer() {
        let original = quay();
        let mut buf = Vec::new();
        write_geojson_writer(&mut buf, &original).unwrap();

        let copy = read_geojson_reader(buf.as_slice(), NetworkConfig::undirected()).unwrap();
        assert_eq!(copy.node_count(), 3);
        assert_eq!(copy.edge_count(), 2);
        for (a, b) in original.edges().zip(copy.edges()) {
            assert_eq!(a, b);
        }
        for (a, b) in original.nodes().zip(copy.nodes()) {
            assert_eq!(a, b);
        }
        assert_eq!(copy.edge(EdgeId(0)).unwrap().attr("lanes"), Some(&AttrValue::Int(2)));
        assert_eq!(copy.edge(EdgeId(1)).unwrap().attr("grade"), Some(&AttrValue::Float(0.5)));
    }

    #[test]
    fn round_trip_through_file() {
        let dir = tmp();
        let path = dir.path().join("quay.geojson");
        write_geojson(&path, &quay()).unwrap();
        assert!(path.exists());

        let copy = read_geojson(&path, NetworkConfig::undirected()).unwrap();
        assert_relative_eq!(copy.routing_distance(NodeId(0), NodeId(2)).unwrap(), 12.0);
        assert_relative_eq!(copy.detour_ratio(NodeId(0), NodeId(2)).unwrap(), 12.0 / 5.0);
    }

    const HAND_WRITTEN: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature",
              "geometry": { "type": "Point", "coordinates": [0, 0] },
              "properties": { "object_type": "SpatialNode", "id": 10, "note": null } },
            { "type": "Feature",
              "geometry": { "type": "Point", "coordinates": [6, 8] },
              "properties": { "object_type": "SpatialNode", "id": 20 } },
            { "type": "Feature",
              "geometry": { "type": "Point", "coordinates": [50, 50] },
              "properties": { "object_type": "Landmark", "name": "Clock tower" } },
            { "type": "Feature",
              "geometry": { "type": "LineString", "coordinates": [[6, 8], [0, 8], [0, 0]] },
              "properties": { "object_type": "SpatialEdge", "id": 3, "start": 10, "end": 20 } }
        ]
    }"#;

    #[test]
    fn hand_written_collection() {
        let net = read_geojson_reader(HAND_WRITTEN.as_bytes(), NetworkConfig::undirected()).unwrap();

        // The landmark is skipped; the reversed line is stored 10 → 20.
        assert_eq!(net.node_count(), 2);
        assert!(net.node(NodeId(10)).unwrap().attributes.is_empty());
        let edge = net.edge(EdgeId(3)).unwrap();
        assert_eq!(edge.endpoints(), (NodeId(10), NodeId(20)));
        assert_eq!(edge.geometry.0[0].x, 0.0);
        assert_relative_eq!(edge.weight, 14.0);
        assert_relative_eq!(net.detour_ratio(NodeId(10), NodeId(20)).unwrap(), 1.4);
    }

    #[test]
    fn edge_must_reach_its_nodes() {
        let json = HAND_WRITTEN.replace("[[6, 8], [0, 8], [0, 0]]", "[[6, 8], [1, 1]]");
        let err = read_geojson_reader(json.as_bytes(), NetworkConfig::undirected()).unwrap_err();
        assert!(matches!(err, IoError::Network(NetworkError::GeometryMismatch { .. })));
    }

    #[test]
    fn directed_network_rejects_reversed_line() {
        let err = read_geojson_reader(HAND_WRITTEN.as_bytes(), NetworkConfig::directed()).unwrap_err();
        assert!(matches!(err, IoError::Network(NetworkError::GeometryMismatch { .. })));
    }

    #[test]
    fn nested_properties_rejected() {
        let json = HAND_WRITTEN.replace(r#""note": null"#, r#""tags": ["a", "b"]"#);
        let err = read_geojson_reader(json.as_bytes(), NetworkConfig::undirected()).unwrap_err();
        assert!(matches!(err, IoError::Format(ref msg) if msg.contains("tags")));
    }

    #[test]
    fn node_attributes_may_reuse_edge_property_names() {
        let mut net = SpatialNetwork::new(NetworkConfig::undirected()).unwrap();
        let mut survey = Attributes::new();
        survey.insert("length".into(), AttrValue::from(12.5));
        survey.insert("start".into(), AttrValue::from("1990"));
        survey.insert("weight".into(), AttrValue::from(3_i64));
        let id = net.add_node(&[1.0, 2.0], survey.clone()).unwrap();

        let copy = from_geojson(to_geojson(&net), NetworkConfig::undirected()).unwrap();
        assert_eq!(copy.node(id).unwrap().attributes, survey);
    }

    const MIXED: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature",
              "geometry": { "type": "Point", "coordinates": [0, 0] },
              "properties": { "object_type": "SpatialNode", "id": 0 } },
            { "type": "Feature",
              "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]] },
              "properties": { "name": "Square" } },
            { "type": "Feature", "geometry": null, "properties": { "name": "Nowhere" } },
            { "type": "Feature",
              "geometry": { "type": "Point", "coordinates": [5, 5] },
              "properties": null }
        ]
    }"#;

    #[test]
    fn unrelated_geometries_are_skipped() {
        let net = read_geojson_reader(MIXED.as_bytes(), NetworkConfig::undirected()).unwrap();
        assert_eq!(net.node_count(), 1);
        assert_eq!(net.edge_count(), 0);
    }

    #[test]
    fn node_with_foreign_geometry_rejected() {
        let json = MIXED.replace(r#""name": "Square""#, r#""object_type": "SpatialNode", "id": 1"#);
        let err = read_geojson_reader(json.as_bytes(), NetworkConfig::undirected()).unwrap_err();
        assert!(matches!(err, IoError::Format(ref msg) if msg.contains("Point")));

        let json = MIXED.replace(r#""name": "Nowhere""#, r#""object_type": "SpatialNode", "id": 2"#);
        let err = read_geojson_reader(json.as_bytes(), NetworkConfig::undirected()).unwrap_err();
        assert!(matches!(err, IoError::Format(_)));
    }

    #[test]
    fn node_needs_point_geometry() {
        let mut fc = to_geojson(&quay());
        fc.features[0].geometry = Some(Geometry::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]]));
        assert!(matches!(from_geojson(fc, NetworkConfig::undirected()), Err(IoError::Format(_))));
    }

    #[test]
    fn edge_needs_endpoints() {
        let mut fc = to_geojson(&quay());
        fc.features[3].properties.remove("start");
        let err = from_geojson(fc, NetworkConfig::undirected()).err();
        assert!(matches!(err, Some(IoError::Format(ref msg)) if msg.contains("start")));
    }

    #[test]
    fn wrong_collection_type_is_a_json_error() {
        let json = HAND_WRITTEN.replacen("FeatureCollection", "GeometryCollection", 1);
        let err = read_geojson_reader(json.as_bytes(), NetworkConfig::undirected()).unwrap_err();
        assert!(matches!(err, IoError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tmp();
        let err = read_geojson(&dir.path().join("absent.geojson"), NetworkConfig::undirected()).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    use sn_network::{EdgeId, NetworkConfig, NetworkError, NodeId};

    use super::fixtures::quay;
    use crate::{
        IoError, load_network_csv, load_network_readers, write_edges_csv, write_edges_writer,
        write_nodes_csv, write_nodes_writer,
    };

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    const NODES: &str = "id,x,y\n0,0.0,0.0\n1,3.0,0.0\n2,3.0,4.0\n";
    const EDGES: &str = "id,from,to,weight\n0,0,1,\n1,1,2,12.5\n";

    #[test]
    fn load_from_readers() {
        let net = load_network_readers(NODES.as_bytes(), EDGES.as_bytes(), NetworkConfig::undirected())
            .unwrap();

        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 2);
        assert_relative_eq!(net.edge(EdgeId(0)).unwrap().weight, 3.0);
        assert_relative_eq!(net.edge(EdgeId(1)).unwrap().weight, 12.5);
        assert_relative_eq!(net.routing_distance(NodeId(0), NodeId(2)).unwrap(), 15.5);
    }

    #[test]
    fn edges_to_unknown_nodes_fail() {
        let edges = "id,from,to,weight\n0,0,7,\n";
        let err = load_network_readers(NODES.as_bytes(), edges.as_bytes(), NetworkConfig::undirected())
            .err();
        assert!(matches!(err, Some(IoError::Network(NetworkError::UnknownNode(NodeId(7))))));
    }

    #[test]
    fn negative_weight_fails() {
        let edges = "id,from,to,weight\n0,0,1,-1\n";
        let err = load_network_readers(NODES.as_bytes(), edges.as_bytes(), NetworkConfig::undirected())
            .err();
        assert!(matches!(
            err,
            Some(IoError::Network(NetworkError::InvalidWeight { edge: EdgeId(0), .. }))
        ));
    }

    #[test]
    fn malformed_number_is_a_csv_error() {
        let nodes = "id,x,y\n0,zero,0\n";
        let err = load_network_readers(nodes.as_bytes(), "id,from,to,weight\n".as_bytes(), NetworkConfig::undirected())
            .err();
        assert!(matches!(err, Some(IoError::Csv(_))));
    }

    #[test]
    fn nodes_writer_output() {
        let mut buf = Vec::new();
        write_nodes_writer(&mut buf, &quay()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "id,x,y\n0,0,0\n1,3,0\n2,3,4\n");
    }

    #[test]
    fn edges_writer_output() {
        let mut buf = Vec::new();
        write_edges_writer(&mut buf, &quay()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "id,from,to,weight\n0,0,1,3\n1,1,2,9\n");
    }

    #[test]
    fn file_round_trip_keeps_weights_not_shape() {
        let dir = tmp();
        let (nodes, edges) = (dir.path().join("nodes.csv"), dir.path().join("edges.csv"));
        let original = quay();
        write_nodes_csv(&nodes, &original).unwrap();
        write_edges_csv(&edges, &original).unwrap();

        let copy = load_network_csv(&nodes, &edges, NetworkConfig::undirected()).unwrap();
        assert_eq!(copy.node_count(), 3);
        assert_relative_eq!(
            copy.routing_distance(NodeId(0), NodeId(2)).unwrap(),
            original.routing_distance(NodeId(0), NodeId(2)).unwrap()
        );

        let curved = copy.edge(EdgeId(1)).unwrap();
        assert_eq!(curved.geometry.0.len(), 2);
        assert_relative_eq!(curved.length, 4.0);
        assert_relative_eq!(curved.weight, 9.0);
    }
}
