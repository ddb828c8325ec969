//! An embeddable, in-process graph database combining an entity-attribute-value
//! property model with a directed, typed, weighted, labeled, timestamped edge
//! model.
//!
//! The store supports concurrent readers with exclusive writers, indexed
//! lookup by id and by name across entities, attributes, relation types, and
//! edges, and durable snapshot persistence to a single binary file.
//!
//! ```
//! use eavgraphdb::{DataType, Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::default());
//! let alice = store.add_entity(1, Some("alice")).unwrap();
//! let bob = store.add_entity(1, Some("bob")).unwrap();
//! let knows = store.add_relation_type("knows").unwrap();
//! store.add_edge(alice.id, bob.id, knows.id, 1.0).unwrap();
//! assert_eq!(store.get_adj_list(alice.id).len(), 1);
//! # let _ = DataType::Int;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod arena;
mod catalog;
mod config;
mod graph;
mod intmap;
mod snapshot;
mod store;
mod strmap;

mod error;

pub use catalog::attribute::{AttributeView, DataType, Hook};
pub use catalog::entity::EntityView;
pub use catalog::relation_type::RelationTypeView;
pub use catalog::value::{ValueData, ValueView};
pub use config::StoreConfig;
pub use error::{Error, Result};
pub use graph::{Direction, EdgeView};
pub use store::Store;
