//! Fixed-size per-plane storage
//!
//! Decoded frames keep one entry per plane (Y/U/V, or one per audio channel
//! for planar sample formats). Plane indices are small and bounded, so the
//! table is a fixed array of optional slots rather than a map.

use mediaroute_core::{MediaResult, MediaRouteError};

/// Number of plane slots per frame. Matches the widest planar layout we
/// carry: 7.1 planar audio.
pub const MAX_PLANES: usize = 8;

/// Plane index used where a single contiguous buffer is meant
pub const PRIMARY_PLANE: usize = 0;

/// Fail with `PlaneOutOfRange` unless `plane` addresses a slot
pub fn check_plane_index(plane: usize) -> MediaResult<()> {
    if plane < MAX_PLANES {
        Ok(())
    } else {
        Err(MediaRouteError::PlaneOutOfRange {
            plane,
            max: MAX_PLANES,
        })
    }
}

/// Table of optional per-plane values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planes<T> {
    slots: [Option<T>; MAX_PLANES],
}

impl<T> Planes<T> {
    /// Create a table with every slot unset
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Value of a plane, if set. Out-of-range indices read as unset.
    pub fn get(&self, plane: usize) -> Option<&T> {
        self.slots.get(plane).and_then(Option::as_ref)
    }

    /// Mutable value of a plane, if set
    pub fn get_mut(&mut self, plane: usize) -> Option<&mut T> {
        self.slots.get_mut(plane).and_then(Option::as_mut)
    }

    /// Whether a plane has an entry
    pub fn is_set(&self, plane: usize) -> bool {
        self.get(plane).is_some()
    }

    /// Store a value for a plane
    pub fn set(&mut self, plane: usize, value: T) -> MediaResult<()> {
        *self.slot_mut(plane)? = Some(value);
        Ok(())
    }

    /// Remove a plane's entry, returning the old value
    pub fn remove(&mut self, plane: usize) -> Option<T> {
        self.slots.get_mut(plane).and_then(Option::take)
    }

    /// Number of planes with an entry
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Set planes in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(plane, slot)| slot.as_ref().map(|value| (plane, value)))
    }

    fn slot_mut(&mut self, plane: usize) -> MediaResult<&mut Option<T>> {
        check_plane_index(plane)?;
        Ok(&mut self.slots[plane])
    }
}

impl<T: Default> Planes<T> {
    /// Value of a plane, creating an empty entry on first use
    pub fn get_or_insert_default(&mut self, plane: usize) -> MediaResult<&mut T> {
        Ok(self.slot_mut(plane)?.get_or_insert_with(T::default))
    }
}

impl<T> Default for Planes<T> {
    fn default() -> Self {
        Self::new()
    }
}
