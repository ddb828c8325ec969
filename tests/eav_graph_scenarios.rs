//! Concrete scenarios ported 1:1 from the design documentation driving this store.

use eavgraphdb::{DataType, Direction, Error, Store, StoreConfig};

fn fresh() -> Store {
    Store::new(StoreConfig::default())
}

#[test]
fn scenario_1_add_entity_is_findable_by_id_and_name() {
    let store = fresh();
    let test = store.add_entity(42, Some("Test")).unwrap();
    assert_eq!(test.id, 1);
    assert_eq!(store.find_entity_by_id(1), store.find_entity_by_name("Test"));
}

#[test]
fn scenario_2_type_mismatch_on_wrong_value_kind() {
    let store = fresh();
    let entity = store.add_entity(1, None).unwrap();
    let label = store.add_attribute("label", DataType::String, None).unwrap();
    let value = store.add_string_value(entity.id, label.id, "hello").unwrap();
    assert_eq!(value.data, eavgraphdb::ValueData::String("hello".to_string()));

    let err = store.add_int_value(entity.id, label.id, 5).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn scenario_3_add_edge_appears_in_both_adjacency_lists() {
    let store = fresh();
    let a = store.add_entity(1, None).unwrap();
    let b = store.add_entity(1, None).unwrap();
    let r = store.add_relation_type("r").unwrap();
    let edge = store.add_edge(a.id, b.id, r.id, 2.5).unwrap();

    assert!(store.get_adj_list(a.id).iter().any(|e| e.id == edge.id));
    assert!(store.get_reverse_adj_list(b.id).iter().any(|e| e.id == edge.id));
}

#[test]
fn scenario_4_update_edge_weight_is_visible_from_both_directions() {
    let store = fresh();
    let a = store.add_entity(1, None).unwrap();
    let b = store.add_entity(1, None).unwrap();
    let r = store.add_relation_type("r").unwrap();
    let edge = store.add_edge(a.id, b.id, r.id, 2.5).unwrap();

    store.update_edge_weight(edge.id, 9.0).unwrap();

    assert_eq!(store.get_adj_list(a.id)[0].weight, 9.0);
    assert_eq!(store.get_reverse_adj_list(b.id)[0].weight, 9.0);
}

#[test]
fn scenario_5_remove_entity_clears_its_outgoing_adjacency_and_itself() {
    let store = fresh();
    let a = store.add_entity(1, None).unwrap();
    let b = store.add_entity(1, None).unwrap();
    let r = store.add_relation_type("r").unwrap();
    store.add_edge(a.id, b.id, r.id, 2.5).unwrap();

    store.remove_entity(b.id).unwrap();

    assert_eq!(store.get_adj_list(a.id).len(), 0);
    assert!(store.find_entity_by_id(b.id).is_none());
}

#[test]
fn scenario_6_empty_store_round_trips_with_zero_callbacks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.snapshot");
    fresh().save(&path).unwrap();

    let loaded = Store::load(&path).unwrap();
    let mut entity_calls = 0;
    loaded.for_each_entity(|_| {
        entity_calls += 1;
        true
    });
    let mut edge_calls = 0;
    loaded.for_each_edge(|_| {
        edge_calls += 1;
        true
    });
    assert_eq!(entity_calls, 0);
    assert_eq!(edge_calls, 0);
}

#[test]
fn scenario_7_full_persistence_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("full.snapshot");

    let store = fresh();
    let node_a = store.add_entity(1, Some("NodeA")).unwrap();
    let node_b = store.add_entity(1, Some("NodeB")).unwrap();
    let label = store.add_attribute("label", DataType::String, None).unwrap();
    store.add_string_value(node_a.id, label.id, "hello").unwrap();
    let connects = store.add_relation_type("connects").unwrap();
    store.add_edge(node_a.id, node_b.id, connects.id, 2.75).unwrap();

    store.save(&path).unwrap();
    let loaded = Store::load(&path).unwrap();

    let reloaded_a = loaded.find_entity_by_name("NodeA").unwrap();
    let reloaded_b = loaded.find_entity_by_name("NodeB").unwrap();
    let values = loaded.values_for_entity(reloaded_a.id);
    assert_eq!(values[0].data, eavgraphdb::ValueData::String("hello".to_string()));

    let adj = loaded.get_adj_list(reloaded_a.id);
    assert_eq!(adj.len(), 1);
    assert_eq!(adj[0].target, reloaded_b.id);
    assert!((adj[0].weight - 2.75).abs() < 1e-9);
}

#[test]
fn scenario_8_remove_entity_sweeps_reverse_adjacency_of_its_incoming_edges() {
    let store = fresh();
    let a = store.add_entity(1, None).unwrap();
    let b = store.add_entity(1, None).unwrap();
    let r = store.add_relation_type("r").unwrap();
    store.add_edge(a.id, b.id, r.id, 1.0).unwrap();

    store.remove_entity(b.id).unwrap();

    assert!(store.get_reverse_adj_list(b.id).is_empty());
    assert_eq!(store.get_adj_list(a.id).len(), 0);
}

#[test]
fn get_filtered_edges_respects_direction_mask() {
    let store = fresh();
    let a = store.add_entity(1, None).unwrap();
    let b = store.add_entity(1, None).unwrap();
    let r = store.add_relation_type("r").unwrap();
    let out_edge = store.add_edge(a.id, b.id, r.id, 1.0).unwrap();
    store.add_edge(b.id, a.id, r.id, 1.0).unwrap();

    let out_only = store.get_filtered_edges(a.id, Direction::Out, None);
    assert_eq!(out_only.len(), 1);
    assert_eq!(out_only[0].id, out_edge.id);
}
