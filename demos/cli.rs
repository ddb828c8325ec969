//! Minimal driver binary exercising a full create → populate → snapshot →
//! reload → verify cycle against an `eavgraphdb::Store`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example cli -- --snapshot-path ./demo.snapshot --entity-count 50
//! ```

use clap::Parser;
use eavgraphdb::{DataType, Store, StoreConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cli")]
#[command(about = "Populate a store, snapshot it, reload it, and verify the round trip")]
struct Args {
    /// Snapshot file to write and then reload.
    #[arg(long, default_value = "eavgraphdb.snapshot")]
    snapshot_path: PathBuf,

    /// Number of entities to create before snapshotting.
    #[arg(long, default_value = "20")]
    entity_count: u64,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> eavgraphdb::Result<()> {
    let store = Store::new(StoreConfig::default());
    let label = store.add_attribute("label", DataType::String, None)?;
    let linked_to = store.add_relation_type("linked_to")?;

    let mut entity_ids = Vec::with_capacity(args.entity_count as usize);
    for i in 0..args.entity_count {
        let entity = store.add_entity(1, Some(&format!("node{i}")))?;
        store.add_string_value(entity.id, label.id, &format!("node {i}"))?;
        entity_ids.push(entity.id);
    }
    for window in entity_ids.windows(2) {
        store.add_edge(window[0], window[1], linked_to.id, 1.0)?;
    }
    tracing::info!(count = entity_ids.len(), "populated store");

    store.save(&args.snapshot_path)?;
    tracing::info!(path = %args.snapshot_path.display(), "wrote snapshot");

    let reloaded = Store::load(&args.snapshot_path)?;
    let mut verified = 0;
    for i in 0..args.entity_count {
        if reloaded.find_entity_by_name(&format!("node{i}")).is_some() {
            verified += 1;
        }
    }
    tracing::info!(verified, expected = args.entity_count, "reload verified");

    Ok(())
}
