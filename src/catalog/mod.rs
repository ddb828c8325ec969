//! Entity, Attribute, and RelationType tables, plus the per-entity value store.
//!
//! Each kind gets a by-id [`crate::intmap::IntMap`] and, where names are
//! unique, a by-name [`crate::strmap::StrMap`] pointing back at the same id.
//! Attribute and relation-type names share one arena, per the original
//! design ("`addRelationType` ... as for entities, in the attribute arena").

pub mod attribute;
pub mod entity;
pub mod relation_type;
pub mod value;

use crate::arena::Arena;
use crate::error::{Error, Result};
use crate::intmap::IntMap;
use crate::strmap::StrMap;

use attribute::{Attribute, AttributeView, DataType, Hook};
use entity::{Entity, EntityView};
use relation_type::{RelationType, RelationTypeView};
use value::{StoredData, ValueData, ValueRecord, ValueView};

/// Entity, Attribute, RelationType catalogs and the per-entity value lists.
pub(crate) struct Catalog {
    entities_by_id: IntMap<Entity>,
    entities_by_name: StrMap<u64>,
    entity_arena: Arena,

    attributes_by_id: IntMap<Attribute>,
    attributes_by_name: StrMap<u64>,

    relation_types_by_id: IntMap<RelationType>,
    relation_types_by_name: StrMap<u64>,
    attribute_arena: Arena,

    values_by_entity: IntMap<Vec<ValueRecord>>,
    value_arena: Arena,
}

impl Catalog {
    pub fn new(capacity_hint: usize, arena_block_size: usize) -> Self {
        Self {
            entities_by_id: IntMap::with_capacity_hint(capacity_hint),
            entities_by_name: StrMap::with_capacity_hint(capacity_hint),
            entity_arena: Arena::new(arena_block_size),

            attributes_by_id: IntMap::with_capacity_hint(capacity_hint),
            attributes_by_name: StrMap::with_capacity_hint(capacity_hint),

            relation_types_by_id: IntMap::with_capacity_hint(capacity_hint),
            relation_types_by_name: StrMap::with_capacity_hint(capacity_hint),
            attribute_arena: Arena::new(arena_block_size),

            values_by_entity: IntMap::with_capacity_hint(capacity_hint),
            value_arena: Arena::new(arena_block_size),
        }
    }

    // ---- entities ----------------------------------------------------

    fn entity_view(&self, e: &Entity) -> EntityView {
        EntityView {
            id: e.id,
            type_id: e.type_id,
            name: e.name.map(|h| self.entity_arena.get_str(h).to_string()),
        }
    }

    pub fn add_entity(&mut self, id: u64, type_id: u32, name: Option<&str>) -> Result<EntityView> {
        if let Some(n) = name {
            if self.entities_by_name.get(n).is_some() {
                return Err(Error::DuplicateName(n.to_string()));
            }
        }
        let name_handle = name.map(|n| self.entity_arena.alloc_str(n));
        let entity = Entity {
            id,
            type_id,
            name: name_handle,
        };
        self.entities_by_id.put(id, entity);
        if let Some(n) = name {
            self.entities_by_name.put(n, id);
        }
        tracing::debug!(id, type_id, name, "entity added");
        Ok(self.entity_view(&entity))
    }

    pub fn find_entity_by_id(&self, id: u64) -> Option<EntityView> {
        self.entities_by_id.get(id).map(|e| self.entity_view(e))
    }

    pub fn find_entity_by_name(&self, name: &str) -> Option<EntityView> {
        let id = *self.entities_by_name.get(name)?;
        self.find_entity_by_id(id)
    }

    pub fn entity_exists(&self, id: u64) -> bool {
        self.entities_by_id.contains(id)
    }

    /// Removes the entity's catalog footprint (id/name indexes and its
    /// value list). Adjacency cleanup is the graph engine's responsibility
    /// and is orchestrated by `Store::remove_entity`.
    pub fn remove_entity(&mut self, id: u64) -> Result<EntityView> {
        let entity = *self
            .entities_by_id
            .get(id)
            .ok_or_else(|| { tracing::warn!(id, "remove_entity: not found"); Error::NotFound(id) })?;
        let view = self.entity_view(&entity);
        if let Some(name) = &view.name {
            self.entities_by_name.remove(name);
        }
        self.entities_by_id.remove(id);
        self.values_by_entity.remove(id);
        tracing::debug!(id, "entity removed");
        Ok(view)
    }

    pub fn find_entities_by_type(&self, type_id: u32) -> Vec<EntityView> {
        self.entities_by_id
            .iter()
            .filter(|(_, e)| e.type_id == type_id)
            .map(|(_, e)| self.entity_view(e))
            .collect()
    }

    pub fn for_each_entity(&self, mut f: impl FnMut(&EntityView) -> bool) {
        for (_, e) in self.entities_by_id.iter() {
            let view = self.entity_view(e);
            if !f(&view) {
                break;
            }
        }
    }

    // ---- attributes ----------------------------------------------------

    fn attribute_view(&self, a: &Attribute) -> AttributeView {
        AttributeView {
            id: a.id,
            name: self.attribute_arena.get_str(a.name).to_string(),
            data_type: a.data_type,
        }
    }

    pub fn add_attribute(
        &mut self,
        id: u64,
        name: &str,
        data_type: DataType,
        hook: Option<Hook>,
    ) -> Result<AttributeView> {
        if self.attributes_by_name.get(name).is_some() {
            return Err(Error::DuplicateName(name.to_string()));
        }
        let name_handle = self.attribute_arena.alloc_str(name);
        let attribute = Attribute {
            id,
            name: name_handle,
            data_type,
            hook,
        };
        self.attributes_by_id.put(id, attribute.clone());
        self.attributes_by_name.put(name, id);
        tracing::debug!(id, name, ?data_type, "attribute added");
        Ok(self.attribute_view(&attribute))
    }

    pub fn find_attribute_by_id(&self, id: u64) -> Option<AttributeView> {
        self.attributes_by_id.get(id).map(|a| self.attribute_view(a))
    }

    pub fn find_attribute_by_name(&self, name: &str) -> Option<AttributeView> {
        let id = *self.attributes_by_name.get(name)?;
        self.find_attribute_by_id(id)
    }

    fn attribute_raw(&self, id: u64) -> Option<&Attribute> {
        self.attributes_by_id.get(id)
    }

    // ---- relation types --------------------------------------------------

    fn relation_type_view(&self, r: &RelationType) -> RelationTypeView {
        RelationTypeView {
            id: r.id,
            name: self.attribute_arena.get_str(r.name).to_string(),
        }
    }

    pub fn add_relation_type(&mut self, id: u64, name: &str) -> Result<RelationTypeView> {
        if self.relation_types_by_name.get(name).is_some() {
            return Err(Error::DuplicateName(name.to_string()));
        }
        let name_handle = self.attribute_arena.alloc_str(name);
        let relation_type = RelationType { id, name: name_handle };
        self.relation_types_by_id.put(id, relation_type);
        self.relation_types_by_name.put(name, id);
        tracing::debug!(id, name, "relation type added");
        Ok(self.relation_type_view(&relation_type))
    }

    pub fn find_relation_type_by_id(&self, id: u64) -> Option<RelationTypeView> {
        self.relation_types_by_id
            .get(id)
            .map(|r| self.relation_type_view(r))
    }

    pub fn find_relation_type_by_name(&self, name: &str) -> Option<RelationTypeView> {
        let id = *self.relation_types_by_name.get(name)?;
        self.find_relation_type_by_id(id)
    }

    /// Does not cascade to edges referencing this relation type, per spec;
    /// surviving edges keep a `relation_type_id` that no longer resolves.
    pub fn remove_relation_type(&mut self, id: u64) -> Result<RelationTypeView> {
        let relation_type = *self
            .relation_types_by_id
            .get(id)
            .ok_or(Error::NotFound(id))?;
        let view = self.relation_type_view(&relation_type);
        self.relation_types_by_name.remove(&view.name);
        self.relation_types_by_id.remove(id);
        tracing::debug!(id, "relation type removed (edges referencing it are not cascaded)");
        Ok(view)
    }

    pub fn for_each_attribute(&self, mut f: impl FnMut(&AttributeView) -> bool) {
        for (_, a) in self.attributes_by_id.iter() {
            let view = self.attribute_view(a);
            if !f(&view) {
                break;
            }
        }
    }

    pub fn for_each_relation_type(&self, mut f: impl FnMut(&RelationTypeView) -> bool) {
        for (_, r) in self.relation_types_by_id.iter() {
            let view = self.relation_type_view(r);
            if !f(&view) {
                break;
            }
        }
    }

    // ---- values ----------------------------------------------------------

    fn stored_to_view(&self, entity_id: u64, record: &ValueRecord) -> ValueView {
        let data = match record.data {
            StoredData::Int(v) => ValueData::Int(v),
            StoredData::Double(v) => ValueData::Double(v),
            StoredData::Str(h) => ValueData::String(self.value_arena.get_str(h).to_string()),
            StoredData::Binary(h) => ValueData::Binary(self.value_arena.get(h).to_vec()),
            StoredData::Entity(e) => ValueData::Entity(e),
        };
        ValueView {
            id: record.id,
            entity_id,
            attribute_id: record.attribute_id,
            data,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_value(
        &mut self,
        value_id: u64,
        entity_id: u64,
        attribute_id: u64,
        data_type: DataType,
        raw: ValueInput<'_>,
    ) -> Result<ValueView> {
        if !self.entity_exists(entity_id) {
            return Err(Error::NotFound(entity_id));
        }
        let attribute = self
            .attribute_raw(attribute_id)
            .ok_or(Error::NotFound(attribute_id))?;
        if attribute.data_type != data_type {
            return Err(Error::TypeMismatch {
                expected: attribute.data_type,
                actual: data_type,
            });
        }
        let hook = attribute.hook.clone();
        let attribute_view = self.attribute_view(attribute);

        let stored = match raw {
            ValueInput::Int(v) => StoredData::Int(v),
            ValueInput::Double(v) => StoredData::Double(v),
            ValueInput::Str(s) => StoredData::Str(self.value_arena.alloc_str(s)),
            ValueInput::Binary(b) => StoredData::Binary(self.value_arena.alloc_bytes(b)),
            ValueInput::Entity(e) => StoredData::Entity(e),
        };
        let record = ValueRecord {
            id: value_id,
            attribute_id,
            data: stored,
        };
        let view = self.stored_to_view(entity_id, &record);

        match self.values_by_entity.get_mut(entity_id) {
            Some(list) => list.push(record),
            None => self.values_by_entity.put(entity_id, vec![record]),
        }

        if let Some(hook) = hook {
            hook(&attribute_view, &view);
        }
        tracing::debug!(value_id, entity_id, attribute_id, "value added");
        Ok(view)
    }

    /// Linear scan across every entity's value list; O(total values), per spec.
    pub fn remove_value(&mut self, value_id: u64) -> Result<ValueView> {
        let mut found = None;
        for (entity_id, list) in self.values_by_entity.iter_mut() {
            if let Some(pos) = list.iter().position(|r| r.id == value_id) {
                found = Some((entity_id, list.remove(pos)));
                break;
            }
        }
        match found {
            Some((entity_id, record)) => {
                let view = self.stored_to_view(entity_id, &record);
                tracing::debug!(value_id, "value removed");
                Ok(view)
            }
            None => {
                tracing::warn!(value_id, "remove_value: not found");
                Err(Error::NotFound(value_id))
            }
        }
    }

    pub fn values_for_entity(&self, entity_id: u64) -> Vec<ValueView> {
        self.values_by_entity
            .get(entity_id)
            .map(|list| {
                list.iter()
                    .map(|r| self.stored_to_view(entity_id, r))
                    .collect()
            })
            .unwrap_or_default()
    }

}

/// Tagged payload supplied by a typed value-adder before it is arena-copied.
pub(crate) enum ValueInput<'a> {
    Int(i64),
    Double(f64),
    Str(&'a str),
    Binary(&'a [u8]),
    Entity(u64),
}

