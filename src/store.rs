//! Top-level store: catalog + adjacency engine behind one reader/writer lock,
//! id counters held outside it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;

use crate::catalog::attribute::{AttributeView, DataType, Hook};
use crate::catalog::entity::EntityView;
use crate::catalog::relation_type::RelationTypeView;
use crate::catalog::value::ValueView;
use crate::catalog::{Catalog, ValueInput};
use crate::config::StoreConfig;
use crate::error::Result;
use crate::graph::{AdjacencyEngine, Direction, EdgeView};

pub(crate) struct StoreInner {
    pub(crate) catalog: Catalog,
    pub(crate) graph: AdjacencyEngine,
}

/// An embeddable, in-process EAV + graph store.
///
/// Every public method takes `&self` and internally acquires the store's
/// reader/writer lock for its full duration; none release and reacquire
/// mid-operation. The five id counters are `AtomicU64`s living outside that
/// lock, since monotonic allocation needs no synchronization beyond what the
/// atomic itself provides.
pub struct Store {
    inner: RwLock<StoreInner>,
    next_entity_id: AtomicU64,
    next_attribute_id: AtomicU64,
    next_value_id: AtomicU64,
    next_relation_type_id: AtomicU64,
    next_edge_id: AtomicU64,
}

fn wallclock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl Store {
    /// Creates an empty store sized per `config`.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        tracing::debug!(?config, "store created");
        Self {
            inner: RwLock::new(StoreInner {
                catalog: Catalog::new(config.capacity_hint, config.arena_block_size),
                graph: AdjacencyEngine::new(config.capacity_hint, config.arena_block_size),
            }),
            next_entity_id: AtomicU64::new(1),
            next_attribute_id: AtomicU64::new(1),
            next_value_id: AtomicU64::new(1),
            next_relation_type_id: AtomicU64::new(1),
            next_edge_id: AtomicU64::new(1),
        }
    }

    fn alloc_entity_id(&self) -> u64 {
        self.next_entity_id.fetch_add(1, Ordering::Relaxed)
    }
    fn alloc_attribute_id(&self) -> u64 {
        self.next_attribute_id.fetch_add(1, Ordering::Relaxed)
    }
    fn alloc_value_id(&self) -> u64 {
        self.next_value_id.fetch_add(1, Ordering::Relaxed)
    }
    fn alloc_relation_type_id(&self) -> u64 {
        self.next_relation_type_id.fetch_add(1, Ordering::Relaxed)
    }
    fn alloc_edge_id(&self) -> u64 {
        self.next_edge_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn bump_entity_id(&self, seen: u64) {
        self.next_entity_id.fetch_max(seen + 1, Ordering::Relaxed);
    }
    pub(crate) fn bump_attribute_id(&self, seen: u64) {
        self.next_attribute_id.fetch_max(seen + 1, Ordering::Relaxed);
    }
    pub(crate) fn bump_value_id(&self, seen: u64) {
        self.next_value_id.fetch_max(seen + 1, Ordering::Relaxed);
    }
    pub(crate) fn bump_relation_type_id(&self, seen: u64) {
        self.next_relation_type_id.fetch_max(seen + 1, Ordering::Relaxed);
    }
    pub(crate) fn bump_edge_id(&self, seen: u64) {
        self.next_edge_id.fetch_max(seen + 1, Ordering::Relaxed);
    }

    pub(crate) fn read(&self) -> parking_lot::RwLockReadGuard<'_, StoreInner> {
        self.inner.read()
    }
    pub(crate) fn write(&self) -> parking_lot::RwLockWriteGuard<'_, StoreInner> {
        self.inner.write()
    }

    // ---- entities ----------------------------------------------------

    /// Assigns the next entity id and inserts a new entity.
    pub fn add_entity(&self, type_id: u32, name: Option<&str>) -> Result<EntityView> {
        let id = self.alloc_entity_id();
        self.inner.write().catalog.add_entity(id, type_id, name)
    }

    /// Looks up an entity by id.
    #[must_use]
    pub fn find_entity_by_id(&self, id: u64) -> Option<EntityView> {
        self.inner.read().catalog.find_entity_by_id(id)
    }

    /// Looks up an entity by its unique name.
    #[must_use]
    pub fn find_entity_by_name(&self, name: &str) -> Option<EntityView> {
        self.inner.read().catalog.find_entity_by_name(name)
    }

    /// Removes the entity and every edge incident to it (both directions).
    pub fn remove_entity(&self, id: u64) -> Result<EntityView> {
        let mut guard = self.inner.write();
        let view = guard.catalog.remove_entity(id)?;
        guard.graph.remove_entity_edges(id);
        Ok(view)
    }

    /// Returns every live entity with the given `type_id`.
    #[must_use]
    pub fn find_entities_by_type(&self, type_id: u32) -> Vec<EntityView> {
        self.inner.read().catalog.find_entities_by_type(type_id)
    }

    /// Iterates every live entity; `f` returning `false` stops iteration early.
    pub fn for_each_entity(&self, f: impl FnMut(&EntityView) -> bool) {
        self.inner.read().catalog.for_each_entity(f);
    }

    // ---- attributes ----------------------------------------------------

    /// Assigns the next attribute id and registers a new attribute, with an
    /// optional hook invoked synchronously whenever a value of this
    /// attribute is added.
    pub fn add_attribute(
        &self,
        name: &str,
        data_type: DataType,
        hook: Option<Hook>,
    ) -> Result<AttributeView> {
        let id = self.alloc_attribute_id();
        self.inner.write().catalog.add_attribute(id, name, data_type, hook)
    }

    /// Looks up an attribute by id.
    #[must_use]
    pub fn find_attribute_by_id(&self, id: u64) -> Option<AttributeView> {
        self.inner.read().catalog.find_attribute_by_id(id)
    }

    /// Looks up an attribute by its unique name.
    #[must_use]
    pub fn find_attribute_by_name(&self, name: &str) -> Option<AttributeView> {
        self.inner.read().catalog.find_attribute_by_name(name)
    }

    // ---- relation types --------------------------------------------------

    /// Assigns the next relation type id and registers a new named relation type.
    pub fn add_relation_type(&self, name: &str) -> Result<RelationTypeView> {
        let id = self.alloc_relation_type_id();
        self.inner.write().catalog.add_relation_type(id, name)
    }

    /// Looks up a relation type by id.
    #[must_use]
    pub fn find_relation_type_by_id(&self, id: u64) -> Option<RelationTypeView> {
        self.inner.read().catalog.find_relation_type_by_id(id)
    }

    /// Looks up a relation type by its unique name.
    #[must_use]
    pub fn find_relation_type_by_name(&self, name: &str) -> Option<RelationTypeView> {
        self.inner.read().catalog.find_relation_type_by_name(name)
    }

    /// Removes a relation type. Does not cascade: surviving edges keep a
    /// `relation_type_id` that may no longer resolve.
    pub fn remove_relation_type(&self, id: u64) -> Result<RelationTypeView> {
        self.inner.write().catalog.remove_relation_type(id)
    }

    // ---- values ----------------------------------------------------------

    /// Adds an `Int`-typed value, failing with `TypeMismatch` unless
    /// `attribute_id` was declared with that data type.
    pub fn add_int_value(&self, entity_id: u64, attribute_id: u64, value: i64) -> Result<ValueView> {
        let id = self.alloc_value_id();
        self.inner.write().catalog.add_value(
            id,
            entity_id,
            attribute_id,
            DataType::Int,
            ValueInput::Int(value),
        )
    }

    /// Adds a `Double`-typed value.
    pub fn add_double_value(&self, entity_id: u64, attribute_id: u64, value: f64) -> Result<ValueView> {
        let id = self.alloc_value_id();
        self.inner.write().catalog.add_value(
            id,
            entity_id,
            attribute_id,
            DataType::Double,
            ValueInput::Double(value),
        )
    }

    /// Adds a `String`-typed value.
    pub fn add_string_value(&self, entity_id: u64, attribute_id: u64, value: &str) -> Result<ValueView> {
        let id = self.alloc_value_id();
        self.inner.write().catalog.add_value(
            id,
            entity_id,
            attribute_id,
            DataType::String,
            ValueInput::Str(value),
        )
    }

    /// Adds a `Binary`-typed value.
    pub fn add_binary_value(&self, entity_id: u64, attribute_id: u64, value: &[u8]) -> Result<ValueView> {
        let id = self.alloc_value_id();
        self.inner.write().catalog.add_value(
            id,
            entity_id,
            attribute_id,
            DataType::Binary,
            ValueInput::Binary(value),
        )
    }

    /// Adds an `Entity`-typed value referencing `referenced_entity` by id.
    pub fn add_entity_ref_value(
        &self,
        entity_id: u64,
        attribute_id: u64,
        referenced_entity: u64,
    ) -> Result<ValueView> {
        let id = self.alloc_value_id();
        self.inner.write().catalog.add_value(
            id,
            entity_id,
            attribute_id,
            DataType::Entity,
            ValueInput::Entity(referenced_entity),
        )
    }

    /// Removes a value record by id; scans every entity's value list.
    pub fn remove_value(&self, id: u64) -> Result<ValueView> {
        self.inner.write().catalog.remove_value(id)
    }

    /// Returns every live value owned by `entity_id`.
    #[must_use]
    pub fn values_for_entity(&self, entity_id: u64) -> Vec<ValueView> {
        self.inner.read().catalog.values_for_entity(entity_id)
    }

    // ---- edges -------------------------------------------------------

    /// Convenience: resolves `relation_type_id`'s name as the default label,
    /// stamps the current wallclock time, direction `OUT`.
    pub fn add_edge(&self, source: u64, target: u64, relation_type_id: u64, weight: f64) -> Result<EdgeView> {
        let id = self.alloc_edge_id();
        let mut guard = self.inner.write();
        let relation_name = guard
            .catalog
            .find_relation_type_by_id(relation_type_id)
            .ok_or(crate::error::Error::NotFound(relation_type_id))?
            .name;
        Ok(guard.graph.add_edge(
            id,
            source,
            target,
            relation_type_id,
            &relation_name,
            weight,
            wallclock_ms(),
        ))
    }

    /// Adds an edge with an explicit direction and label, bypassing the
    /// relation-type-name-as-default-label convenience of [`Store::add_edge`].
    #[allow(clippy::too_many_arguments)]
    pub fn add_edge_ex(
        &self,
        source: u64,
        target: u64,
        relation_type_id: u64,
        weight: f64,
        direction: Direction,
        label: Option<&str>,
    ) -> Result<EdgeView> {
        let id = self.alloc_edge_id();
        Ok(self.inner.write().graph.add_edge_ex(
            id,
            source,
            target,
            relation_type_id,
            weight,
            direction,
            label,
            wallclock_ms(),
        ))
    }

    /// Patches an edge's label in place. Atomic with respect to both
    /// adjacency directions by construction: there is only one record.
    pub fn update_edge_label(&self, id: u64, new_label: Option<&str>) -> Result<EdgeView> {
        self.inner.write().graph.update_edge_label(id, new_label)
    }

    /// Patches an edge's weight in place.
    pub fn update_edge_weight(&self, id: u64, new_weight: f64) -> Result<EdgeView> {
        self.inner.write().graph.update_edge_weight(id, new_weight)
    }

    /// Removes an edge from the central table and both adjacency indexes.
    pub fn remove_edge(&self, id: u64) -> Result<EdgeView> {
        self.inner.write().graph.remove_edge(id)
    }

    /// Returns the outgoing edges of `source`, insertion order.
    #[must_use]
    pub fn get_adj_list(&self, source: u64) -> Vec<EdgeView> {
        self.inner.read().graph.get_adj_list(source)
    }

    /// Returns the incoming edges of `target`, insertion order.
    #[must_use]
    pub fn get_reverse_adj_list(&self, target: u64) -> Vec<EdgeView> {
        self.inner.read().graph.get_reverse_adj_list(target)
    }

    /// Returns edges incident to `entity_id` in the given direction(s),
    /// forward entries before reverse entries, filtered by `filter` if given.
    #[must_use]
    pub fn get_filtered_edges(
        &self,
        entity_id: u64,
        direction: Direction,
        filter: Option<&dyn Fn(&EdgeView) -> bool>,
    ) -> Vec<EdgeView> {
        self.inner.read().graph.get_filtered_edges(entity_id, direction, filter)
    }

    /// Iterates every live edge; `f` returning `false` stops iteration early.
    pub fn for_each_edge(&self, f: impl FnMut(&EdgeView) -> bool) {
        self.inner.read().graph.for_each_edge(f);
    }

    // ---- persistence ---------------------------------------------------

    /// Saves a full snapshot to `path`.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        crate::snapshot::save(self, path.as_ref())
    }

    /// Loads a full snapshot from `path`, replacing an initially empty store.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        crate::snapshot::load(path.as_ref())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
