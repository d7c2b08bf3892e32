//! Persistent ordered sequence with identity-based lookup.
//!
//! [`OrderedStore`] is shared by the column and task sequences. Every
//! mutation consumes the store and returns the next value; a mutation that
//! changes nothing hands back the very same backing allocation, so callers
//! can skip re-rendering and re-persisting with [`OrderedStore::same_as`].
//! Mutations on a uniquely owned store happen in place; a store that is
//! still shared is copied first.

use std::sync::Arc;

use tackboard_proto::{Id, Identified};

/// Where [`OrderedStore::move_to`] reinserts an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement<'a> {
    /// Immediately before the entity holding this id.
    Before(&'a Id),
    /// After every other entity.
    End,
}

/// An ordered sequence of uniquely identified entities.
#[derive(Debug, Clone)]
pub struct OrderedStore<T> {
    items: Arc<Vec<T>>,
}

impl<T> Default for OrderedStore<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
        }
    }
}

impl<T: PartialEq> PartialEq for OrderedStore<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items) || self.items == other.items
    }
}

impl<T: Eq> Eq for OrderedStore<T> {}

impl<T> OrderedStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the entities in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Borrows the entities as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns `true` if both stores share one backing sequence, i.e. one
    /// was produced from the other by a no-op mutation.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// Projects the entities matching `predicate` without copying them.
    ///
    /// The view is lazy and restartable: iterate it as many times as needed.
    pub fn filter<P>(&self, predicate: P) -> Filtered<'_, T, P>
    where
        P: Fn(&T) -> bool,
    {
        Filtered {
            items: &self.items,
            predicate,
        }
    }
}

impl<T: Identified + Clone> OrderedStore<T> {
    /// Builds a store from an already ordered vector.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }

    /// Copies the entities out into a vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.as_ref().clone()
    }

    /// Position of the entity with `id`, if present.
    #[must_use]
    pub fn position(&self, id: &Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Looks up the entity with `id`.
    #[must_use]
    pub fn get(&self, id: &Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Returns `true` if an entity with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.position(id).is_some()
    }

    /// Appends `item` after every existing entity.
    #[must_use]
    pub fn insert_at_end(mut self, item: T) -> Self {
        Arc::make_mut(&mut self.items).push(item);
        self
    }

    /// Removes the entity with `id`. Absent ids leave the store unchanged.
    #[must_use]
    pub fn remove_by_id(mut self, id: &Id) -> Self {
        let Some(index) = self.position(id) else {
            return self;
        };
        Arc::make_mut(&mut self.items).remove(index);
        self
    }

    /// Keeps only the entities matching `keep`.
    ///
    /// Returns the store unchanged when every entity is kept.
    #[must_use]
    pub fn retain(mut self, keep: impl Fn(&T) -> bool) -> Self {
        if self.items.iter().all(&keep) {
            return self;
        }
        Arc::make_mut(&mut self.items).retain(|item| keep(item));
        self
    }

    /// Moves the entity with `id` to `placement`.
    ///
    /// The entity is taken out first, then reinserted before whatever entity
    /// holds the `Before` id, or at the end. Absent ids, a placement relative
    /// to the entity itself, and moves that leave the order as it was all
    /// return the store unchanged.
    #[must_use]
    pub fn move_to(mut self, id: &Id, placement: Placement<'_>) -> Self {
        let Some(from) = self.position(id) else {
            return self;
        };
        let to = match placement {
            Placement::End => self.items.len() - 1,
            Placement::Before(before) => {
                if before == id {
                    return self;
                }
                match self.position(before) {
                    Some(anchor) if anchor > from => anchor - 1,
                    Some(anchor) => anchor,
                    None => return self,
                }
            }
        };
        if to == from {
            return self;
        }
        let items = Arc::make_mut(&mut self.items);
        let item = items.remove(from);
        items.insert(to, item);
        self
    }
}

impl<T: Identified + Clone + PartialEq> OrderedStore<T> {
    /// Applies `patch` to the entity with `id`.
    ///
    /// Absent ids, and patches that leave the entity value-equal, return the
    /// store unchanged.
    #[must_use]
    pub fn update_by_id(mut self, id: &Id, patch: impl FnOnce(&mut T)) -> Self {
        let Some(index) = self.position(id) else {
            return self;
        };
        let mut next = self.items[index].clone();
        patch(&mut next);
        if next == self.items[index] {
            return self;
        }
        Arc::make_mut(&mut self.items)[index] = next;
        self
    }
}

impl<'a, T> IntoIterator for &'a OrderedStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A lazy, restartable view over the entities matching a predicate.
#[derive(Clone)]
pub struct Filtered<'a, T, P> {
    items: &'a [T],
    predicate: P,
}

impl<'a, T, P> Filtered<'a, T, P>
where
    P: Fn(&T) -> bool,
{
    /// Iterates the matching entities in store order.
    pub fn iter(&self) -> FilterIter<'a, '_, T, P> {
        FilterIter {
            inner: self.items.iter(),
            predicate: &self.predicate,
        }
    }

    /// Number of matching entities.
    #[must_use]
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if nothing matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// The last matching entity in store order.
    #[must_use]
    pub fn last(&self) -> Option<&'a T> {
        self.items.iter().rev().find(|item| (self.predicate)(*item))
    }
}

impl<'a, 'f, T, P> IntoIterator for &'f Filtered<'a, T, P>
where
    P: Fn(&T) -> bool,
{
    type Item = &'a T;
    type IntoIter = FilterIter<'a, 'f, T, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`Filtered::iter`].
pub struct FilterIter<'a, 'f, T, P> {
    inner: std::slice::Iter<'a, T>,
    predicate: &'f P,
}

impl<'a, T, P> Iterator for FilterIter<'a, '_, T, P>
where
    P: Fn(&T) -> bool,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let predicate = self.predicate;
        self.inner.by_ref().find(|item| predicate(*item))
    }
}
