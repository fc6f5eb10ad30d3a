//! The token queue.
//!
//! A `Queue` is a value: every operation borrows the current queue and
//! returns a new one, leaving the original untouched. The first entry holds
//! the token; everything behind it is waiting in line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One place in the queue.
///
/// Field names match the snapshot files written by earlier releases.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Item {
    /// Holder identifier (transport user id)
    #[serde(rename = "ID")]
    pub id: String,

    /// Why the holder wants the token
    #[serde(rename = "Reason")]
    pub reason: String,
}

impl Item {
    pub fn new(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.reason)
    }
}

/// Ordered waiting line. Index 0 is the active holder.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Queue(Vec<Item>);

impl Queue {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.0.iter()
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    /// The entry holding the token.
    pub fn active(&self) -> Option<&Item> {
        self.0.first()
    }

    /// Everyone behind the active holder, in the order they get the token.
    pub fn waiting(&self) -> &[Item] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn position(&self, item: &Item) -> Option<usize> {
        self.0.iter().position(|i| i == item)
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.0.contains(item)
    }

    /// Append an entry unless an identical one is already queued.
    pub fn add(&self, item: Item) -> Queue {
        if self.contains(&item) {
            return self.clone();
        }
        let mut items = self.0.clone();
        items.push(item);
        Queue(items)
    }

    /// Drop the first entry equal to `item`.
    pub fn remove(&self, item: &Item) -> Queue {
        let mut items = self.0.clone();
        if let Some(idx) = self.position(item) {
            items.remove(idx);
        }
        Queue(items)
    }

    /// Drop the entry at `index`; out of range leaves the queue as is.
    pub fn remove_at(&self, index: usize) -> Queue {
        let mut items = self.0.clone();
        if index < items.len() {
            items.remove(index);
        }
        Queue(items)
    }

    /// Pass the token to the next in line; the old holder goes to the back.
    pub fn yield_token(&self) -> Queue {
        let mut items = self.0.clone();
        if items.len() > 1 {
            items.rotate_left(1);
        }
        Queue(items)
    }

    /// Put `item` directly behind the active holder.
    ///
    /// The first waiting copy of `item` is moved forward; if there is none a
    /// new entry is inserted. Other copies stay where they are. The active
    /// holder never changes, except that barging into an empty queue takes
    /// the token.
    pub fn barge(&self, item: Item) -> Queue {
        if self.0.is_empty() {
            return Queue(vec![item]);
        }
        if self.active() == Some(&item) {
            return self.clone();
        }

        let mut items = self.0.clone();
        if let Some(idx) = self.waiting().iter().position(|i| *i == item) {
            items.remove(idx + 1);
        }
        items.insert(1, item);
        Queue(items)
    }

    /// Insert `item` at `index`, clamped to the end of the queue.
    pub fn insert_at(&self, index: usize, item: Item) -> Queue {
        let mut items = self.0.clone();
        items.insert(index.min(items.len()), item);
        Queue(items)
    }

    /// Hand the slot held by `from` over to `to`, keeping its position.
    pub fn delegate(&self, from: &Item, to: Item) -> Queue {
        match self.position(from) {
            Some(idx) => self.delegate_at(idx, to),
            None => self.clone(),
        }
    }

    /// Hand the slot at `index` over to `to`; out of range leaves the queue
    /// as is.
    pub fn delegate_at(&self, index: usize, to: Item) -> Queue {
        let mut items = self.0.clone();
        if let Some(slot) = items.get_mut(index) {
            *slot = to;
        }
        Queue(items)
    }
}

impl From<Vec<Item>> for Queue {
    fn from(items: Vec<Item>) -> Self {
        Queue(items)
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, item) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}
