use super::*;
use crate::catalog::value::ValueData;
use crate::config::StoreConfig;
use crate::store::Store;

#[test]
fn round_trips_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.snapshot");
    let store = Store::new(StoreConfig::default());
    store.save(&path).unwrap();

    let loaded = Store::load(&path).unwrap();
    assert!(loaded.find_entity_by_id(1).is_none());
    let reentity = loaded.add_entity(1, None).unwrap();
    assert_eq!(reentity.id, 1);
}

#[test]
fn round_trips_entities_attributes_relation_types_values_and_edges() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("full.snapshot");

    let store = Store::new(StoreConfig::default());
    let alice = store.add_entity(1, Some("alice")).unwrap();
    let bob = store.add_entity(1, Some("bob")).unwrap();
    let age = store.add_attribute("age", DataType::Int, None).unwrap();
    let bio = store.add_attribute("bio", DataType::Binary, None).unwrap();
    let knows = store.add_relation_type("knows").unwrap();
    store.add_int_value(alice.id, age.id, 30).unwrap();
    store.add_binary_value(alice.id, bio.id, &[1, 2, 3, 0, 255]).unwrap();
    let edge = store.add_edge(alice.id, bob.id, knows.id, 2.5).unwrap();

    store.save(&path).unwrap();
    let loaded = Store::load(&path).unwrap();

    assert_eq!(loaded.find_entity_by_name("alice"), Some(alice.clone()));
    assert_eq!(loaded.find_entity_by_name("bob"), Some(bob.clone()));
    assert_eq!(loaded.find_attribute_by_name("age"), Some(age.clone()));
    assert_eq!(loaded.find_relation_type_by_name("knows"), Some(knows.clone()));

    let values = loaded.values_for_entity(alice.id);
    assert!(values.iter().any(|v| v.data == ValueData::Int(30)));
    assert!(values
        .iter()
        .any(|v| v.data == ValueData::Binary(vec![1, 2, 3, 0, 255])));

    let adj = loaded.get_adj_list(alice.id);
    assert_eq!(adj.len(), 1);
    assert_eq!(adj[0].id, edge.id);
    assert_eq!(adj[0].weight, 2.5);

    // monotonic counters survive the round trip
    let new_entity = loaded.add_entity(1, None).unwrap();
    assert!(new_entity.id > bob.id);
}

#[test]
fn load_rejects_bad_magic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.snapshot");
    std::fs::write(&path, b"NOTMAGIC\x01\x00\x00\x00").unwrap();
    let err = match Store::load(&path) {
        Ok(_) => panic!("expected snapshot load to fail on bad magic"),
        Err(e) => e,
    };
    assert!(matches!(err, Error::SnapshotCorrupt(_)));
}
