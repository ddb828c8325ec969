//! Dual adjacency index over a single central edge table.
//!
//! The original design keeps two copies of each edge record, one filed under
//! its source and one under its target, and has to replicate every mutation
//! to both. This port keeps one [`Edge`] per id in a central
//! [`crate::intmap::IntMap`] and has the forward/reverse indexes hold only
//! the id — see the Design Notes' own recommended refactor.

pub mod edge;

pub use edge::{Direction, EdgeView};

use crate::arena::Arena;
use crate::error::{Error, Result};
use crate::intmap::IntMap;
use crate::strmap::StrMap;
use edge::Edge;

pub(crate) struct AdjacencyEngine {
    edges: IntMap<Edge>,
    forward: IntMap<Vec<u64>>,
    reverse: IntMap<Vec<u64>>,
    edge_arena: Arena,
    label_intern: StrMap<crate::arena::ArenaHandle>,
}

impl AdjacencyEngine {
    pub fn new(capacity_hint: usize, arena_block_size: usize) -> Self {
        Self {
            edges: IntMap::with_capacity_hint(capacity_hint),
            forward: IntMap::with_capacity_hint(capacity_hint),
            reverse: IntMap::with_capacity_hint(capacity_hint),
            edge_arena: Arena::new(arena_block_size),
            label_intern: StrMap::with_capacity_hint(capacity_hint),
        }
    }

    fn intern_label(&mut self, label: &str) -> crate::arena::ArenaHandle {
        if let Some(handle) = self.label_intern.get(label) {
            return *handle;
        }
        let handle = self.edge_arena.alloc_str(label);
        self.label_intern.put(label, handle);
        handle
    }

    fn edge_view(&self, edge: &Edge) -> EdgeView {
        EdgeView {
            id: edge.id,
            source: edge.source,
            target: edge.target,
            relation_type_id: edge.relation_type_id,
            weight: edge.weight,
            direction: edge.direction,
            label: edge.label.map(|h| self.edge_arena.get_str(h).to_string()),
            timestamp: edge.timestamp,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_edge_ex(
        &mut self,
        id: u64,
        source: u64,
        target: u64,
        relation_type_id: u64,
        weight: f64,
        direction: Direction,
        label: Option<&str>,
        timestamp: u64,
    ) -> EdgeView {
        let label_handle = label.map(|l| self.intern_label(l));
        let edge = Edge {
            id,
            source,
            target,
            relation_type_id,
            weight,
            direction,
            label: label_handle,
            timestamp,
        };
        self.edges.put(id, edge);

        match self.forward.get_mut(source) {
            Some(list) => list.push(id),
            None => self.forward.put(source, vec![id]),
        }
        match self.reverse.get_mut(target) {
            Some(list) => list.push(id),
            None => self.reverse.put(target, vec![id]),
        }

        tracing::debug!(id, source, target, relation_type_id, "edge added");
        self.edge_view(&edge)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_edge(
        &mut self,
        id: u64,
        source: u64,
        target: u64,
        relation_type_id: u64,
        relation_name: &str,
        weight: f64,
        timestamp: u64,
    ) -> EdgeView {
        self.add_edge_ex(
            id,
            source,
            target,
            relation_type_id,
            weight,
            Direction::Out,
            Some(relation_name),
            timestamp,
        )
    }

    pub fn update_edge_label(&mut self, id: u64, new_label: Option<&str>) -> Result<EdgeView> {
        let handle = new_label.map(|l| self.intern_label(l));
        let edge = self.edges.get_mut(id).ok_or(Error::NotFound(id))?;
        edge.label = handle;
        let edge = *edge;
        tracing::debug!(id, "edge label updated");
        Ok(self.edge_view(&edge))
    }

    pub fn update_edge_weight(&mut self, id: u64, new_weight: f64) -> Result<EdgeView> {
        let edge = self.edges.get_mut(id).ok_or(Error::NotFound(id))?;
        edge.weight = new_weight;
        let edge = *edge;
        tracing::debug!(id, new_weight, "edge weight updated");
        Ok(self.edge_view(&edge))
    }

    fn remove_id_from_list(list: &mut Vec<u64>, id: u64) {
        if let Some(pos) = list.iter().position(|&e| e == id) {
            list.remove(pos);
        }
    }

    pub fn remove_edge(&mut self, id: u64) -> Result<EdgeView> {
        let edge = self.edges.remove(id).ok_or(Error::NotFound(id))?;
        if let Some(list) = self.forward.get_mut(edge.source) {
            Self::remove_id_from_list(list, id);
        }
        if let Some(list) = self.reverse.get_mut(edge.target) {
            Self::remove_id_from_list(list, id);
        }
        tracing::debug!(id, "edge removed");
        Ok(self.edge_view(&edge))
    }

    /// Sweeps every edge incident to `entity_id` (as source or target) out of
    /// the central table and both adjacency indexes. Used by entity removal.
    pub fn remove_entity_edges(&mut self, entity_id: u64) -> Vec<EdgeView> {
        let outgoing = self.forward.remove(entity_id).unwrap_or_default();
        let incoming = self.reverse.remove(entity_id).unwrap_or_default();

        let mut removed = Vec::with_capacity(outgoing.len() + incoming.len());
        for id in outgoing {
            if let Some(edge) = self.edges.remove(id) {
                if let Some(list) = self.reverse.get_mut(edge.target) {
                    Self::remove_id_from_list(list, id);
                }
                removed.push(self.edge_view(&edge));
            }
        }
        for id in incoming {
            if let Some(edge) = self.edges.remove(id) {
                if let Some(list) = self.forward.get_mut(edge.source) {
                    Self::remove_id_from_list(list, id);
                }
                removed.push(self.edge_view(&edge));
            }
        }
        tracing::debug!(entity_id, removed = removed.len(), "entity edges swept");
        removed
    }

    pub fn get_adj_list(&self, source: u64) -> Vec<EdgeView> {
        self.forward
            .get(source)
            .map(|ids| {
                ids.iter()
                    .filter_map(|&id| self.edges.get(id))
                    .map(|e| self.edge_view(e))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get_reverse_adj_list(&self, target: u64) -> Vec<EdgeView> {
        self.reverse
            .get(target)
            .map(|ids| {
                ids.iter()
                    .filter_map(|&id| self.edges.get(id))
                    .map(|e| self.edge_view(e))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `direction` selects which index(es) to walk: `Out` -> forward list
    /// only, `In` -> reverse list only, `Both` -> forward entries precede
    /// reverse entries. `filter`, if given, is applied to each candidate.
    pub fn get_filtered_edges(
        &self,
        entity_id: u64,
        direction: Direction,
        filter: Option<&dyn Fn(&EdgeView) -> bool>,
    ) -> Vec<EdgeView> {
        let mut out = Vec::new();
        if matches!(direction, Direction::Out | Direction::Both) {
            out.extend(self.get_adj_list(entity_id));
        }
        if matches!(direction, Direction::In | Direction::Both) {
            out.extend(self.get_reverse_adj_list(entity_id));
        }
        match filter {
            Some(f) => out.into_iter().filter(|e| f(e)).collect(),
            None => out,
        }
    }

    pub fn for_each_edge(&self, mut f: impl FnMut(&EdgeView) -> bool) {
        for (_, edge) in self.edges.iter() {
            let view = self.edge_view(edge);
            if !f(&view) {
                break;
            }
        }
    }

}
