//! Property tests covering store-wide invariants that must hold regardless
//! of the exact sequence of mutations applied.

use eavgraphdb::{DataType, Store, StoreConfig};
use proptest::prelude::*;

fn fresh() -> Store {
    Store::new(StoreConfig::default())
}

proptest! {
    #[test]
    fn entity_ids_are_monotonic_and_unique(type_ids in prop::collection::vec(1u32..10, 1..50)) {
        let store = fresh();
        let mut last_id = 0;
        for type_id in type_ids {
            let entity = store.add_entity(type_id, None).unwrap();
            prop_assert!(entity.id > last_id);
            last_id = entity.id;
        }
    }

    #[test]
    fn named_entity_is_reachable_both_ways(names in prop::collection::vec("[a-z]{1,8}", 1..30)) {
        let store = fresh();
        let mut seen = std::collections::HashSet::new();
        for name in names {
            if !seen.insert(name.clone()) {
                prop_assert!(store.add_entity(1, Some(&name)).is_err());
                continue;
            }
            let entity = store.add_entity(1, Some(&name)).unwrap();
            prop_assert_eq!(store.find_entity_by_id(entity.id), store.find_entity_by_name(&name));
        }
    }

    #[test]
    fn adjacency_lists_stay_mutually_consistent(
        edge_count in 1usize..20,
        removals in prop::collection::vec(0usize..20, 0..10),
    ) {
        let store = fresh();
        let r = store.add_relation_type("rel").unwrap();
        let mut entities = Vec::new();
        for _ in 0..(edge_count + 1) {
            entities.push(store.add_entity(1, None).unwrap().id);
        }

        let mut edges = Vec::new();
        for i in 0..edge_count {
            let source = entities[i];
            let target = entities[i + 1];
            let edge = store.add_edge(source, target, r.id, 1.0).unwrap();
            edges.push((edge.id, source, target));
        }

        for idx in removals {
            if idx < entities.len() {
                let victim = entities[idx];
                if store.find_entity_by_id(victim).is_some() {
                    store.remove_entity(victim).unwrap();
                }
            }
        }

        for &(edge_id, source, target) in &edges {
            let still_source_alive = store.find_entity_by_id(source).is_some();
            let still_target_alive = store.find_entity_by_id(target).is_some();
            let in_forward = store.get_adj_list(source).iter().any(|e| e.id == edge_id);
            let in_reverse = store.get_reverse_adj_list(target).iter().any(|e| e.id == edge_id);

            if still_source_alive && still_target_alive {
                prop_assert_eq!(in_forward, in_reverse);
            } else {
                prop_assert!(!in_forward);
                prop_assert!(!in_reverse);
            }
        }
    }

    #[test]
    fn snapshot_round_trip_preserves_entities_and_edges(
        entity_count in 1usize..15,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prop.snapshot");

        let store = fresh();
        let r = store.add_relation_type("rel").unwrap();
        let mut ids = Vec::new();
        for i in 0..entity_count {
            ids.push(store.add_entity(1, Some(&format!("e{i}"))).unwrap().id);
        }
        for window in ids.windows(2) {
            store.add_edge(window[0], window[1], r.id, 1.0).unwrap();
        }
        store.save(&path).unwrap();

        let loaded = Store::load(&path).unwrap();
        for i in 0..entity_count {
            let name = format!("e{i}");
            prop_assert!(loaded.find_entity_by_name(&name).is_some());
        }

        let post_load = loaded.add_entity(1, Some("post-load")).unwrap();
        prop_assert!(post_load.id > *ids.last().unwrap());
    }

    #[test]
    fn value_type_mismatch_never_mutates_the_store(values in prop::collection::vec(-1000i64..1000, 1..20)) {
        let store = fresh();
        let entity = store.add_entity(1, None).unwrap();
        let attr = store.add_attribute("count", DataType::Int, None).unwrap();

        for value in values {
            store.add_int_value(entity.id, attr.id, value).unwrap();
        }
        let before = store.values_for_entity(entity.id).len();

        prop_assert!(store.add_string_value(entity.id, attr.id, "nope").is_err());
        let after = store.values_for_entity(entity.id).len();
        prop_assert_eq!(before, after);
    }
}
