//! Page-local entity collections
//!
//! List pages keep the last fetched collection and patch it locally after
//! creates, edits and deletes. Order is display order.

use crate::models::{Announcement, Employee, Feedback, Holiday, Task, Ticket};

/// Records addressed by a string id
pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified_by_id_field {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

identified_by_id_field!(Announcement, Task, Ticket, Feedback, Employee, Holiday);

#[derive(Debug, Clone, PartialEq)]
pub struct EntityList<T> {
    items: Vec<T>,
}

impl<T> Default for EntityList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> EntityList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Swap in a freshly fetched collection
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    /// Apply `edit` to the record with `id`; false if there is none
    pub fn update<F>(&mut self, id: &str, edit: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                edit(item);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Identified::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed_holidays;

    #[test]
    fn test_prepend_and_append() {
        let mut list = EntityList::from_items(seed_holidays());
        let mut first = list.items()[0].clone();
        first.id = "100".into();
        let mut last = first.clone();
        last.id = "101".into();

        list.prepend(first);
        list.append(last);

        assert_eq!(list.len(), 11);
        assert_eq!(list.items()[0].id, "100");
        assert_eq!(list.items()[10].id, "101");
    }

    #[test]
    fn test_update_and_remove_by_id() {
        let mut list = EntityList::from_items(seed_holidays());
        assert!(list.update("3", |h| h.name = "Holi Festival".into()));
        assert_eq!(list.get("3").unwrap().name, "Holi Festival");
        assert!(!list.update("missing", |h| h.name.clear()));

        let removed = list.remove("3").unwrap();
        assert_eq!(removed.name, "Holi Festival");
        assert!(!list.contains("3"));
        assert!(list.remove("3").is_none());
        assert_eq!(list.len(), 8);
    }

    #[test]
    fn test_replace_all_keeps_given_order() {
        let mut list = EntityList::from_items(seed_holidays());
        let mut reversed = seed_holidays();
        reversed.reverse();
        list.replace_all(reversed);
        let ids: Vec<_> = list.ids().collect();
        assert_eq!(ids, vec!["9", "8", "7", "6", "5", "4", "3", "2", "1"]);
    }
}
