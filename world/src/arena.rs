//! Slot storage handing out generation-checked entity handles.

use dronewell_core::EntityId;

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Dense slot arena; removed slots are recycled with a bumped generation so
/// stale handles never resolve to a newer occupant.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Stores `value` and returns its handle.
    pub(crate) fn insert(&mut self, value: T) -> EntityId {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                slot.value = Some(value);
                return EntityId::new(index, slot.generation);
            }
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX - 1);
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        EntityId::new(index, 0)
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<&T> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.value.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.value.as_mut())
    }

    /// Removes the value behind `id`, invalidating every copy of the handle.
    pub(crate) fn remove(&mut self, id: EntityId) -> Option<T> {
        let slot = self
            .slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        Some(value)
    }

    /// Occupied slots in index order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let index = u32::try_from(index).ok()?;
            slot.value
                .as_ref()
                .map(|value| (EntityId::new(index, slot.generation), value))
        })
    }

    /// Handles of occupied slots matching `filter`, collected so the caller
    /// may mutate the arena while walking them.
    pub(crate) fn ids_where(&self, mut filter: impl FnMut(&T) -> bool) -> Vec<EntityId> {
        self.iter()
            .filter(|(_, value)| filter(value))
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_handles_do_not_resolve_after_reuse() {
        let mut arena = Arena::new();
        let first = arena.insert("drone");
        assert_eq!(arena.remove(first), Some("drone"));
        let second = arena.insert("enemy");

        assert_eq!(first.index(), second.index());
        assert_ne!(first, second);
        assert_eq!(arena.get(first), None);
        assert_eq!(arena.get(second), Some(&"enemy"));
        assert_eq!(arena.remove(first), None);
    }

    #[test]
    fn iteration_follows_slot_order() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        let b = arena.insert(2);
        let c = arena.insert(3);
        let _ = arena.remove(b);
        let ids: Vec<_> = arena.iter().map(|(id, value)| (id, *value)).collect();
        assert_eq!(ids, vec![(a, 1), (c, 3)]);
        assert_eq!(arena.ids_where(|value| *value > 1), vec![c]);
    }
}
