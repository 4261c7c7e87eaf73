//! Generational handles for non-owning references
//!
//! A handle names a slot in a [`HandleMap`] together with the generation the
//! slot had when the value was inserted. Once the value is removed the slot's
//! generation moves on, so every outstanding handle to it resolves to `None`
//! instead of dangling.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A type-safe handle to a value of type `T` stored in a [`HandleMap`]
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Create a handle from raw parts
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            _marker: PhantomData,
        }
    }

    /// Slot index
    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot when this handle was issued
    #[inline]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

// Manual impls so `T` needs no bounds
impl<T> Clone for Handle<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

enum Slot<T> {
    Vacant,
    Occupied(T),
    /// Value temporarily moved out with [`HandleMap::lend`]
    Lent,
}

struct Entry<T> {
    generation: u32,
    slot: Slot<T>,
}

/// Slot map keyed by generational handles
///
/// Values can be *lent* out: the slot stays reserved (its handle remains
/// valid for [`HandleMap::contains`]) but lookups return `None` until the
/// value is given back. This lets one value be mutated while the rest of
/// the map is read.
pub struct HandleMap<T> {
    entries: Vec<Entry<T>>,
    free_list: Vec<u32>,
    len: usize,
}

impl<T> HandleMap<T> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Insert a value and get a handle to it
    pub fn insert(&mut self, value: T) -> Handle<T> {
        self.len += 1;
        if let Some(index) = self.free_list.pop() {
            let entry = &mut self.entries[index as usize];
            entry.slot = Slot::Occupied(value);
            return Handle::new(index, entry.generation);
        }

        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            generation: 0,
            slot: Slot::Occupied(value),
        });
        Handle::new(index, 0)
    }

    fn entry(&self, handle: Handle<T>) -> Option<&Entry<T>> {
        self.entries
            .get(handle.index as usize)
            .filter(|e| e.generation == handle.generation)
    }

    fn entry_mut(&mut self, handle: Handle<T>) -> Option<&mut Entry<T>> {
        self.entries
            .get_mut(handle.index as usize)
            .filter(|e| e.generation == handle.generation)
    }

    /// Remove a value, invalidating every handle to it
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        let entry = self.entry_mut(handle)?;
        let value = match std::mem::replace(&mut entry.slot, Slot::Vacant) {
            Slot::Occupied(value) => value,
            other => {
                entry.slot = other;
                return None;
            }
        };
        entry.generation = entry.generation.wrapping_add(1);
        self.free_list.push(handle.index);
        self.len -= 1;
        Some(value)
    }

    /// Get a reference to a value
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        match &self.entry(handle)?.slot {
            Slot::Occupied(value) => Some(value),
            _ => None,
        }
    }

    /// Get a mutable reference to a value
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        match &mut self.entry_mut(handle)?.slot {
            Slot::Occupied(value) => Some(value),
            _ => None,
        }
    }

    /// Move a value out while keeping its slot reserved
    pub fn lend(&mut self, handle: Handle<T>) -> Option<T> {
        let entry = self.entry_mut(handle)?;
        match std::mem::replace(&mut entry.slot, Slot::Lent) {
            Slot::Occupied(value) => Some(value),
            other => {
                entry.slot = other;
                None
            }
        }
    }

    /// Return a value previously taken with [`HandleMap::lend`]
    ///
    /// Gives the value back to the caller if the slot is not waiting for it.
    pub fn give_back(&mut self, handle: Handle<T>, value: T) -> Result<(), T> {
        match self.entry_mut(handle) {
            Some(entry) if matches!(entry.slot, Slot::Lent) => {
                entry.slot = Slot::Occupied(value);
                Ok(())
            }
            _ => Err(value),
        }
    }

    /// Check whether a handle still refers to a live (possibly lent) value
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.entry(handle)
            .map(|e| !matches!(e.slot, Slot::Vacant))
            .unwrap_or(false)
    }

    /// Number of live values, lent ones included
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over present values in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.entries.iter().enumerate().filter_map(|(i, e)| match &e.slot {
            Slot::Occupied(value) => Some((Handle::new(i as u32, e.generation), value)),
            _ => None,
        })
    }
}

impl<T> Default for HandleMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
