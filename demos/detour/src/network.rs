//! Synthetic street network inspired by the geography of Mobile, Alabama.
//!
//! Coordinates are `(longitude, latitude)` in degrees, so the network uses
//! the haversine metric and every length is in metres.

use anyhow::Result;

use sn_core::{AttrValue, Attributes, Metric, NetworkConfig, NodeId};
use sn_network::{EdgeOptions, SpatialNetwork};

/// Urban arterial speed, 45 km/h.
pub const ARTERIAL_MPS: f64 = 12.5;
/// Connector speed, 30 km/h.
pub const CONNECTOR_MPS: f64 = 8.3;

/// Build the 5-node network.
///
/// Returns the network and its nodes with display names, ascending id.
pub fn build_network() -> Result<(SpatialNetwork, [(&'static str, NodeId); 5])> {
    let config = NetworkConfig::undirected().with_metric(Metric::Haversine);
    let mut net = SpatialNetwork::new(config)?;

    let mut place = |name: &str, lon: f64, lat: f64| {
        let mut attrs = Attributes::new();
        attrs.insert("name".into(), AttrValue::from(name));
        net.add_node(&[lon, lat], attrs)
    };
    let north     = place("North residential", -88.070, 30.710)?;
    let south     = place("South residential", -88.030, 30.670)?;
    let downtown  = place("Downtown",          -88.050, 30.695)?;
    let commerce  = place("Commerce park",     -88.030, 30.700)?;
    let connector = place("Connector",         -88.060, 30.680)?;

    let road = |name: &str, speed: f64| {
        EdgeOptions::new().attribute("name", name).attribute("speed_mps", speed)
    };

    // Government St bends north of the straight line.
    net.add_edge(
        north,
        downtown,
        road("Government St", ARTERIAL_MPS)
            .geometry([(-88.070, 30.710), (-88.062, 30.706), (-88.050, 30.695)]),
    )?;
    net.add_edge(north, connector, road("Airport Blvd", ARTERIAL_MPS))?;
    net.add_edge(connector, downtown, road("Dauphin St", CONNECTOR_MPS))?;
    net.add_edge(south, connector, road("Michigan Ave", ARTERIAL_MPS))?;
    net.add_edge(south, commerce, road("Broad St", ARTERIAL_MPS))?;
    net.add_edge(downtown, commerce, road("Water St", CONNECTOR_MPS))?;

    Ok((
        net,
        [
            ("North residential", north),
            ("South residential", south),
            ("Downtown", downtown),
            ("Commerce park", commerce),
            ("Connector", connector),
        ],
    ))
}
