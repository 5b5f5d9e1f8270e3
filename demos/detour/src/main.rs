//! detour — detour ratios and accessibility on a small street network.
//!
//! Builds the synthetic Mobile, AL network from [`network`], prints the
//! flying distance, routing distance and detour ratio for every node pair,
//! the accessibility of each node, and travel times, then exports the
//! network as GeoJSON and CSV.
//!
//! ```text
//! cargo run -p detour -- [output_dir]
//! RUST_LOG=debug cargo run -p detour
//! ```

mod network;

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sn_io::{write_edges_csv, write_geojson, write_nodes_csv};
use sn_network::{NetworkError, TravelTime};

use network::{ARTERIAL_MPS, build_network};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"));

    let (net, places) = build_network()?;
    info!(
        nodes  = net.node_count(),
        edges  = net.edge_count(),
        planar = net.is_planar(),
        "network ready"
    );

    // ── Pairwise distances ────────────────────────────────────────────────

    let engine = net.distances();
    let travel_time = TravelTime::new("speed_mps", ARTERIAL_MPS);

    println!(
        "{:<18} {:<18} {:>10} {:>10} {:>7} {:>8}",
        "from", "to", "flying m", "routing m", "detour", "minutes"
    );
    for (i, &(from_name, from)) in places.iter().enumerate() {
        for &(to_name, to) in &places[i + 1..] {
            let flying = engine.flying_distance(from, to)?;
            match engine.routing_distance(from, to) {
                Ok(routing) => {
                    let minutes = engine.routing_distance_with(from, to, &travel_time)? / 60.0;
                    println!(
                        "{from_name:<18} {to_name:<18} {flying:>10.0} {routing:>10.0} {:>7.3} {minutes:>8.1}",
                        routing / flying
                    );
                }
                Err(NetworkError::NoPath { .. }) => {
                    println!("{from_name:<18} {to_name:<18} {flying:>10.0} {:>10} {:>7} {:>8}", "-", "-", "-");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    // ── Accessibility ─────────────────────────────────────────────────────

    println!();
    println!("{:<18} {:>13} {:>11}", "node", "accessibility", "strength m");
    for &(name, id) in &places {
        let strength = net.distance_strength(id)?;
        match net.node_accessibility(id)? {
            Some(a) => println!("{name:<18} {a:>13.3} {strength:>11.0}"),
            None => println!("{name:<18} {:>13} {strength:>11.0}", "-"),
        }
    }
    match net.graph_accessibility()? {
        Some(a) => info!(accessibility = a, "graph accessibility"),
        None => warn!("graph accessibility undefined: no node reaches another"),
    }

    // ── Export ────────────────────────────────────────────────────────────

    fs::create_dir_all(&out_dir)?;
    write_geojson(&out_dir.join("network.geojson"), &net)?;
    write_nodes_csv(&out_dir.join("nodes.csv"), &net)?;
    write_edges_csv(&out_dir.join("edges.csv"), &net)?;
    info!(dir = %out_dir.display(), "network exported");

    Ok(())
}
