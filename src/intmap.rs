//! Open-addressed map from `u64` to an opaque value.
//!
//! Key `0` is reserved as the empty-slot sentinel (legal because every
//! object id the store hands out starts at 1). Capacity is always a power
//! of two; the index of a key is its top bits after Fibonacci multiplication
//! by `0x9E3779B97F4A7C15`. The map grows (doubling) once
//! `count * 100 >= capacity * 70`. Removal never leaves tombstones: the
//! found slot is cleared, then the contiguous run of occupied slots that
//! follows it is unwound and reinserted through the ordinary `put` path,
//! re-homing any entry whose probe sequence passed through the hole.

const FIBONACCI_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

struct Entry<V> {
    key: u64,
    value: V,
}

/// Open-addressed `u64 -> V` map, tombstone-free on removal.
pub struct IntMap<V> {
    slots: Vec<Option<Entry<V>>>,
    count: usize,
}

impl<V> IntMap<V> {
    /// Creates a map sized for at least `hint` entries before its first grow.
    #[must_use]
    pub fn with_capacity_hint(hint: usize) -> Self {
        let capacity = hint.max(8).next_power_of_two();
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            count: 0,
        }
    }

    fn index_for(&self, key: u64) -> usize {
        let capacity = self.slots.len() as u64;
        let shift = 64 - capacity.trailing_zeros();
        (key.wrapping_mul(FIBONACCI_MULTIPLIER) >> shift) as usize
    }

    fn should_grow(&self) -> bool {
        self.count * 100 >= self.slots.len() * 70
    }

    fn grow(&mut self) {
        let new_capacity = self.slots.len() * 2;
        let old = std::mem::replace(
            &mut self.slots,
            (0..new_capacity).map(|_| None).collect(),
        );
        self.count = 0;
        for entry in old.into_iter().flatten() {
            self.put_no_grow(entry.key, entry.value);
        }
    }

    fn put_no_grow(&mut self, key: u64, value: V) {
        let mut idx = self.index_for(key);
        loop {
            match &mut self.slots[idx] {
                Some(entry) if entry.key == key => {
                    entry.value = value;
                    return;
                }
                Some(_) => idx = (idx + 1) % self.slots.len(),
                None => {
                    self.slots[idx] = Some(Entry { key, value });
                    self.count += 1;
                    return;
                }
            }
        }
    }

    /// Inserts or updates `key`. Updating an existing key does not change `len()`.
    ///
    /// # Panics
    ///
    /// Panics if `key == 0`; that value is the map's reserved empty-slot sentinel.
    pub fn put(&mut self, key: u64, value: V) {
        assert!(key != 0, "0 is the reserved empty-slot key");
        if self.should_grow() {
            self.grow();
        }
        self.put_no_grow(key, value);
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: u64) -> Option<&V> {
        if self.slots.is_empty() || key == 0 {
            return None;
        }
        let mut idx = self.index_for(key);
        for _ in 0..self.slots.len() {
            match &self.slots[idx] {
                Some(entry) if entry.key == key => return Some(&entry.value),
                Some(_) => idx = (idx + 1) % self.slots.len(),
                None => return None,
            }
        }
        None
    }

    /// Returns a mutable reference to the value for `key`, if present.
    pub fn get_mut(&mut self, key: u64) -> Option<&mut V> {
        if self.slots.is_empty() || key == 0 {
            return None;
        }
        let mut idx = self.index_for(key);
        for _ in 0..self.slots.len() {
            match self.slots[idx] {
                Some(ref entry) if entry.key == key => {
                    return self.slots[idx].as_mut().map(|e| &mut e.value)
                }
                Some(_) => idx = (idx + 1) % self.slots.len(),
                None => return None,
            }
        }
        None
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains(&self, key: u64) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, re-homing any entries whose probe sequence passed
    /// through the vacated slot. Returns the removed value, if any.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        if self.slots.is_empty() || key == 0 {
            return None;
        }
        let capacity = self.slots.len();
        let mut idx = self.index_for(key);
        let hole = 'search: {
            for _ in 0..capacity {
                match &self.slots[idx] {
                    Some(entry) if entry.key == key => break 'search Some(idx),
                    Some(_) => idx = (idx + 1) % capacity,
                    None => break 'search None,
                }
            }
            None
        }?;

        let removed = self.slots[hole].take().map(|e| e.value);
        self.count -= 1;

        let mut walk = (hole + 1) % capacity;
        while let Some(entry) = self.slots[walk].take() {
            self.count -= 1;
            self.put_no_grow(entry.key, entry.value);
            walk = (walk + 1) % capacity;
        }

        removed
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the map has no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterates over all live `(key, &value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &V)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|e| (e.key, &e.value)))
    }

    /// Iterates over all live `(key, &mut value)` pairs in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u64, &mut V)> {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.as_mut().map(|e| (e.key, &mut e.value)))
    }

    /// Current slot capacity (always a power of two).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl<V> Default for IntMap<V> {
    fn default() -> Self {
        Self::with_capacity_hint(8)
    }
}

#[cfg(test)]
#[path = "intmap_tests.rs"]
mod tests;
