//! A list that reports its mutations to subscribers, with range operations
//! that coalesce into as few notifications as possible.
//!
//! Every mutation raises its collection change(s) first and then the property
//! changes: `Count` followed by `Indexer` when the length changed, `Indexer`
//! alone when only contents were replaced.
//!
//! Handlers receive `&Notification<T>` while the collection is mutably
//! borrowed, so they cannot reenter it.

use std::{fmt, mem};

use tracing::trace;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChange<T> {
    Added {
        items: Vec<T>,
        index: usize,
    },
    /// `index` is `None` when the removed items were not contiguous
    Removed {
        items: Vec<T>,
        index: Option<usize>,
    },
    Replaced {
        new_items: Vec<T>,
        old_items: Vec<T>,
        index: usize,
    },
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyChange {
    Count,
    Indexer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<T> {
    Collection(CollectionChange<T>),
    Property(PropertyChange),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<T> = Box<dyn FnMut(&Notification<T>)>;

pub struct ObservableRangeCollection<T> {
    items: Vec<T>,
    allow_duplicates: bool,
    subscribers: Vec<(SubscriptionId, Handler<T>)>,
    next_subscription: u64,
    deferred: Option<Vec<Notification<T>>>,
}

impl<T> Default for ObservableRangeCollection<T> {
    fn default() -> Self {
        Self::with_policy(true)
    }
}

impl<T> ObservableRangeCollection<T> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Empty collection; `allow_duplicates = false` makes inserts skip items already present
    pub fn with_policy(allow_duplicates: bool) -> Self {
        Self {
            items: Vec::new(),
            allow_duplicates,
            subscribers: Vec::new(),
            next_subscription: 0,
            deferred: None,
        }
    }

    pub fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Register a handler. Handlers run in registration order.
    pub fn subscribe(&mut self, handler: impl FnMut(&Notification<T>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Run `f` with notifications held back, then deliver them in the order they
    /// were raised. Nested calls deliver when the outermost one returns.
    pub fn defer_events<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        if self.deferred.is_some() {
            return f(self);
        }

        self.deferred = Some(Vec::new());
        let result = f(self);
        if let Some(pending) = self.deferred.take() {
            trace!(pending = pending.len(), "delivering deferred notifications");
            for notification in pending {
                self.raise(notification);
            }
        }
        result
    }

    fn raise(&mut self, notification: Notification<T>) {
        if let Some(deferred) = &mut self.deferred {
            deferred.push(notification);
            return;
        }
        for (_, handler) in &mut self.subscribers {
            handler(&notification);
        }
    }

    fn raise_changed(&mut self, change: CollectionChange<T>) {
        self.raise(Notification::Collection(change));
    }

    fn raise_count_changed(&mut self) {
        self.raise(Notification::Property(PropertyChange::Count));
        self.raise(Notification::Property(PropertyChange::Indexer));
    }

    fn check_index(&self, index: usize, inclusive_end: bool) -> Result<()> {
        let len = self.items.len();
        if index > len || (!inclusive_end && index == len) {
            return Err(Error::OutOfRange { index, len });
        }
        Ok(())
    }

    fn check_span(&self, index: usize, count: usize) -> Result<()> {
        let len = self.items.len();
        match index.checked_add(count) {
            Some(end) if end <= len => Ok(()),
            _ => Err(Error::OutOfRange {
                index: index.saturating_add(count),
                len,
            }),
        }
    }

    /// Remove everything, raising `Reset`. Nothing is raised when already empty.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.raise_changed(CollectionChange::Reset);
        self.raise_count_changed();
    }

    pub fn remove_at(&mut self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        self.check_index(index, false)?;
        let item = self.items.remove(index);
        self.raise_changed(CollectionChange::Removed {
            items: vec![item.clone()],
            index: Some(index),
        });
        self.raise_count_changed();
        Ok(item)
    }

    /// Remove `count` items starting at `index` as one notification
    pub fn remove_range_at(&mut self, index: usize, count: usize) -> Result<()>
    where
        T: Clone,
    {
        self.check_span(index, count)?;
        self.remove_span(index, count);
        Ok(())
    }

    fn remove_span(&mut self, index: usize, count: usize)
    where
        T: Clone,
    {
        if count == 0 {
            return;
        }
        if self.items.len() == 1 {
            let item = self.items.remove(index);
            self.raise_changed(CollectionChange::Removed {
                items: vec![item],
                index: Some(index),
            });
            self.raise_count_changed();
            return;
        }
        if index == 0 && count == self.items.len() {
            self.clear();
            return;
        }

        let removed = self.items.drain(index..index + count).collect();
        self.raise_changed(CollectionChange::Removed {
            items: removed,
            index: Some(index),
        });
        self.raise_count_changed();
    }

    pub fn remove_all(&mut self, predicate: impl FnMut(&T) -> bool) -> usize {
        let len = self.items.len();
        self.remove_clusters(0, len, predicate)
    }

    /// Remove matching items among `count` items from `index`, raising one
    /// `Removed` per contiguous run. Returns the number removed.
    pub fn remove_all_in(
        &mut self,
        index: usize,
        count: usize,
        predicate: impl FnMut(&T) -> bool,
    ) -> Result<usize> {
        self.check_span(index, count)?;
        Ok(self.remove_clusters(index, count, predicate))
    }

    fn remove_clusters(
        &mut self,
        index: usize,
        count: usize,
        mut predicate: impl FnMut(&T) -> bool,
    ) -> usize {
        if count == 0 || self.items.is_empty() {
            return 0;
        }

        let removed = self.defer_events(|this| {
            let mut removed = 0;
            let mut cluster = Vec::new();
            let mut cluster_index = index;
            let mut position = index;
            for _ in 0..count {
                if predicate(&this.items[position]) {
                    if cluster.is_empty() {
                        cluster_index = position;
                    }
                    cluster.push(this.items.remove(position));
                    removed += 1;
                } else {
                    if !cluster.is_empty() {
                        this.raise_changed(CollectionChange::Removed {
                            items: mem::take(&mut cluster),
                            index: Some(cluster_index),
                        });
                    }
                    position += 1;
                }
            }
            if !cluster.is_empty() {
                this.raise_changed(CollectionChange::Removed {
                    items: cluster,
                    index: Some(cluster_index),
                });
            }
            removed
        });

        if removed > 0 {
            self.raise_count_changed();
        }
        removed
    }

    fn flush_replaced(&mut self, following: usize, new_cluster: &mut Vec<T>, old_cluster: &mut Vec<T>) {
        if old_cluster.is_empty() {
            return;
        }
        let index = following - old_cluster.len();
        self.raise_changed(CollectionChange::Replaced {
            new_items: mem::take(new_cluster),
            old_items: mem::take(old_cluster),
            index,
        });
    }
}

impl<T> ObservableRangeCollection<T>
where
    T: Clone + PartialEq,
{
    /// Collection seeded with `items`, which raise no notifications
    pub fn from_items(items: impl IntoIterator<Item = T>, allow_duplicates: bool) -> Self {
        let mut collection = Self::with_policy(allow_duplicates);
        let items = items.into_iter().collect();
        collection.items = if allow_duplicates {
            items
        } else {
            distinct(items)
        };
        collection
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Append, returning false when skipped by the duplicate policy
    pub fn push(&mut self, item: T) -> bool {
        let index = self.items.len();
        self.insert_item(index, item)
    }

    /// Append only when the item is not already present
    pub fn add_if_absent(&mut self, item: T) -> bool {
        if self.contains(&item) {
            return false;
        }
        self.push(item)
    }

    pub fn insert(&mut self, index: usize, item: T) -> Result<bool> {
        self.check_index(index, true)?;
        Ok(self.insert_item(index, item))
    }

    fn insert_item(&mut self, index: usize, item: T) -> bool {
        if !self.allow_duplicates && self.items.contains(&item) {
            return false;
        }
        self.items.insert(index, item.clone());
        self.raise_changed(CollectionChange::Added {
            items: vec![item],
            index,
        });
        self.raise_count_changed();
        true
    }

    /// Remove the first occurrence of `item`
    pub fn remove(&mut self, item: &T) -> bool {
        match self.items.iter().position(|existing| existing == item) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }

    /// Replace the item at `index`. Returns false when the new item is equal to
    /// the old one or, without duplicates, already present elsewhere.
    pub fn set(&mut self, index: usize, item: T) -> Result<bool> {
        self.check_index(index, false)?;
        if self.allow_duplicates {
            if self.items[index] == item {
                return Ok(false);
            }
        } else if self.items.contains(&item) {
            return Ok(false);
        }

        let old = mem::replace(&mut self.items[index], item.clone());
        self.raise_changed(CollectionChange::Replaced {
            new_items: vec![item],
            old_items: vec![old],
            index,
        });
        self.raise(Notification::Property(PropertyChange::Indexer));
        Ok(true)
    }

    pub fn add_range(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let index = self.items.len();
        self.insert_span(index, items.into_iter().collect())
    }

    /// Insert `items` at `index` as one `Added` notification. Returns how many
    /// were inserted after applying the duplicate policy.
    pub fn insert_range(&mut self, index: usize, items: impl IntoIterator<Item = T>) -> Result<usize> {
        self.check_index(index, true)?;
        Ok(self.insert_span(index, items.into_iter().collect()))
    }

    fn insert_span(&mut self, index: usize, items: Vec<T>) -> usize {
        let items = if self.allow_duplicates {
            items
        } else {
            distinct(items)
                .into_iter()
                .filter(|item| !self.items.contains(item))
                .collect()
        };
        if items.is_empty() {
            return 0;
        }

        let added = items.len();
        self.items.splice(index..index, items.iter().cloned());
        self.raise_changed(CollectionChange::Added { items, index });
        self.raise_count_changed();
        added
    }

    /// Remove the first occurrence of each item. Raises `Reset` if this empties
    /// the collection, otherwise one index-less `Removed` with what was removed.
    pub fn remove_range(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        let mut items = items.into_iter().collect::<Vec<_>>();
        match items.len() {
            0 => return 0,
            1 => return usize::from(items.pop().is_some_and(|item| self.remove(&item))),
            _ => {}
        }

        let mut removed = Vec::new();
        for item in items {
            if let Some(position) = self.items.iter().position(|existing| *existing == item) {
                removed.push(self.items.remove(position));
            }
        }
        if removed.is_empty() {
            return 0;
        }

        let count = removed.len();
        if self.items.is_empty() {
            self.raise_changed(CollectionChange::Reset);
        } else {
            self.raise_changed(CollectionChange::Removed {
                items: removed,
                index: None,
            });
        }
        self.raise_count_changed();
        count
    }

    /// Replace the whole contents with a single item
    pub fn replace(&mut self, item: T) -> isize {
        let count = self.items.len();
        self.replace_span(0, count, vec![item])
    }

    pub fn replace_range(&mut self, items: impl IntoIterator<Item = T>) -> isize {
        let count = self.items.len();
        self.replace_span(0, count, items.into_iter().collect())
    }

    /// Replace `count` items from `index` with `items`, raising notifications
    /// only for positions that actually change. Returns the change in length.
    pub fn replace_range_at(
        &mut self,
        index: usize,
        count: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Result<isize> {
        self.check_span(index, count)?;
        Ok(self.replace_span(index, count, items.into_iter().collect()))
    }

    fn replace_span(&mut self, index: usize, count: usize, items: Vec<T>) -> isize {
        let old_len = self.items.len();
        if items.is_empty() {
            self.remove_span(index, count);
            return self.items.len() as isize - old_len as isize;
        }

        let items = if self.allow_duplicates {
            items
        } else {
            distinct(items)
        };
        if index + count == 0 {
            return self.insert_span(0, items) as isize;
        }

        self.defer_events(|this| {
            let end = index + count;
            let added = items.len();
            let mut new_cluster = Vec::new();
            let mut old_cluster = Vec::new();
            let mut changed = false;

            let mut i = index;
            while i < end && i - index < added {
                let new_item = &items[i - index];
                if this.items[i] == *new_item {
                    this.flush_replaced(i, &mut new_cluster, &mut old_cluster);
                } else {
                    let old_item = mem::replace(&mut this.items[i], new_item.clone());
                    new_cluster.push(new_item.clone());
                    old_cluster.push(old_item);
                    changed = true;
                }
                i += 1;
            }
            this.flush_replaced(i, &mut new_cluster, &mut old_cluster);

            if count > added {
                let removed = this.items.drain(i..end).collect();
                this.raise_changed(CollectionChange::Removed {
                    items: removed,
                    index: Some(i),
                });
                this.raise_count_changed();
            } else if count < added {
                let extra = items[i - index..].to_vec();
                this.items.splice(i..i, extra.iter().cloned());
                this.raise_changed(CollectionChange::Added {
                    items: extra,
                    index: i,
                });
                this.raise_count_changed();
            } else if changed {
                this.raise(Notification::Property(PropertyChange::Indexer));
            }
        });

        self.items.len() as isize - old_len as isize
    }
}

fn distinct<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        if !result.contains(&item) {
            result.push(item);
        }
    }
    result
}

impl<'a, T> IntoIterator for &'a ObservableRangeCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableRangeCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableRangeCollection")
            .field("items", &self.items)
            .field("allow_duplicates", &self.allow_duplicates)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::{CollectionChange, Notification, ObservableRangeCollection, PropertyChange};
    use crate::error::Error;

    type Log<T> = Rc<RefCell<Vec<Notification<T>>>>;

    fn record<T: Clone + 'static>(collection: &mut ObservableRangeCollection<T>) -> Log<T> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        collection.subscribe(move |notification| sink.borrow_mut().push(notification.clone()));
        log
    }

    fn changed<T>(change: CollectionChange<T>) -> Notification<T> {
        Notification::Collection(change)
    }

    const COUNT: Notification<i32> = Notification::Property(PropertyChange::Count);
    const INDEXER: Notification<i32> = Notification::Property(PropertyChange::Indexer);

    #[test]
    fn add_range_raises_single_notification() {
        let mut collection = ObservableRangeCollection::from_items([1, 2], true);
        let log = record(&mut collection);

        assert_eq!(collection.add_range([3, 4, 5]), 3);
        assert_eq!(collection.as_slice(), &[1, 2, 3, 4, 5]);
        assert_eq!(
            *log.borrow(),
            vec![
                changed(CollectionChange::Added {
                    items: vec![3, 4, 5],
                    index: 2
                }),
                COUNT,
                INDEXER
            ]
        );
    }

    #[test]
    fn insert_range_skips_duplicates_when_disallowed() {
        let mut collection = ObservableRangeCollection::from_items([1, 2], false);
        let log = record(&mut collection);

        assert_eq!(collection.insert_range(1, [2, 7, 7, 8]), Ok(2));
        assert_eq!(collection.as_slice(), &[1, 7, 8, 2]);
        assert_eq!(
            log.borrow()[0],
            changed(CollectionChange::Added {
                items: vec![7, 8],
                index: 1
            })
        );

        assert!(!collection.push(7));
        assert_eq!(collection.insert_range(0, [1, 2]), Ok(0));
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn remove_all_raises_one_notification_per_cluster() {
        let mut collection = ObservableRangeCollection::from_items([1, 2, 2, 3, 4, 4, 5], true);
        let log = record(&mut collection);

        assert_eq!(collection.remove_all(|item| item % 2 == 0), 4);
        assert_eq!(collection.as_slice(), &[1, 3, 5]);
        assert_eq!(
            *log.borrow(),
            vec![
                changed(CollectionChange::Removed {
                    items: vec![2, 2],
                    index: Some(1)
                }),
                changed(CollectionChange::Removed {
                    items: vec![4, 4],
                    index: Some(2)
                }),
                COUNT,
                INDEXER
            ]
        );
    }

    #[test]
    fn remove_all_in_stays_inside_span() {
        let mut collection = ObservableRangeCollection::from_items([2, 2, 2, 2], true);
        assert_eq!(collection.remove_all_in(1, 2, |_| true), Ok(2));
        assert_eq!(collection.as_slice(), &[2, 2]);
        assert_eq!(
            collection.remove_all_in(1, 5, |_| true),
            Err(Error::OutOfRange { index: 6, len: 2 })
        );
    }

    #[test]
    fn remove_range_resets_when_emptied() {
        let mut collection = ObservableRangeCollection::from_items([1, 2, 3], true);
        let log = record(&mut collection);

        assert_eq!(collection.remove_range([3, 9, 1]), 2);
        assert_eq!(
            log.borrow()[0],
            changed(CollectionChange::Removed {
                items: vec![3, 1],
                index: None
            })
        );

        log.borrow_mut().clear();
        collection.push(4);
        log.borrow_mut().clear();
        assert_eq!(collection.remove_range([2, 4]), 2);
        assert!(collection.is_empty());
        assert_eq!(*log.borrow(), vec![changed(CollectionChange::Reset), COUNT, INDEXER]);
    }

    #[test]
    fn remove_range_at_reports_index() {
        let mut collection = ObservableRangeCollection::from_items([1, 2, 3, 4], true);
        let log = record(&mut collection);

        collection.remove_range_at(1, 2).unwrap();
        assert_eq!(collection.as_slice(), &[1, 4]);
        assert_eq!(
            log.borrow()[0],
            changed(CollectionChange::Removed {
                items: vec![2, 3],
                index: Some(1)
            })
        );

        collection.remove_range_at(0, 2).unwrap();
        assert_eq!(log.borrow()[3], changed(CollectionChange::Reset));
        assert_eq!(
            collection.remove_range_at(0, 1),
            Err(Error::OutOfRange { index: 1, len: 0 })
        );
    }

    #[test]
    fn replace_range_coalesces_changes_and_trims() {
        let mut collection = ObservableRangeCollection::from_items([1, 2, 3, 4, 5], true);
        let log = record(&mut collection);

        assert_eq!(collection.replace_range([1, 9, 9, 4]), -1);
        assert_eq!(collection.as_slice(), &[1, 9, 9, 4]);
        assert_eq!(
            *log.borrow(),
            vec![
                changed(CollectionChange::Replaced {
                    new_items: vec![9, 9],
                    old_items: vec![2, 3],
                    index: 1
                }),
                changed(CollectionChange::Removed {
                    items: vec![5],
                    index: Some(4)
                }),
                COUNT,
                INDEXER
            ]
        );
    }

    #[test]
    fn replace_range_at_appends_surplus() {
        let mut collection = ObservableRangeCollection::from_items([0, 1, 2], true);
        let log = record(&mut collection);

        assert_eq!(collection.replace_range_at(1, 2, [1, 3, 7]), Ok(1));
        assert_eq!(collection.as_slice(), &[0, 1, 3, 7]);
        assert_eq!(
            *log.borrow(),
            vec![
                changed(CollectionChange::Replaced {
                    new_items: vec![3],
                    old_items: vec![2],
                    index: 2
                }),
                changed(CollectionChange::Added {
                    items: vec![7],
                    index: 3
                }),
                COUNT,
                INDEXER
            ]
        );
    }

    #[test]
    fn replace_of_same_length_only_touches_indexer() {
        let mut collection = ObservableRangeCollection::from_items([1, 2], true);
        let log = record(&mut collection);

        assert_eq!(collection.replace_range([1, 5]), 0);
        assert_eq!(log.borrow().last(), Some(&INDEXER));
        assert_eq!(log.borrow().len(), 2);

        log.borrow_mut().clear();
        assert_eq!(collection.replace_range([1, 5]), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn replace_with_nothing_removes_span() {
        let mut collection = ObservableRangeCollection::from_items([1, 2, 3], true);
        assert_eq!(collection.replace_range_at(0, 2, Vec::new()), Ok(-2));
        assert_eq!(collection.as_slice(), &[3]);

        assert_eq!(collection.replace(8), 0);
        assert_eq!(collection.as_slice(), &[8]);
    }

    #[test]
    fn replace_on_empty_collection_inserts() {
        let mut collection = ObservableRangeCollection::new();
        let log = record(&mut collection);

        assert_eq!(collection.replace_range([4, 5]), 2);
        assert_eq!(
            log.borrow()[0],
            changed(CollectionChange::Added {
                items: vec![4, 5],
                index: 0
            })
        );
    }

    #[test]
    fn set_skips_equal_item() {
        let mut collection = ObservableRangeCollection::from_items([1, 2], true);
        let log = record(&mut collection);

        assert_eq!(collection.set(0, 1), Ok(false));
        assert!(log.borrow().is_empty());

        assert_eq!(collection.set(0, 3), Ok(true));
        assert_eq!(
            *log.borrow(),
            vec![
                changed(CollectionChange::Replaced {
                    new_items: vec![3],
                    old_items: vec![1],
                    index: 0
                }),
                INDEXER
            ]
        );
        assert_eq!(collection.set(2, 3), Err(Error::OutOfRange { index: 2, len: 2 }));
    }

    #[test]
    fn deferred_notifications_arrive_after_scope() {
        let mut collection = ObservableRangeCollection::new();
        let log = record(&mut collection);

        let observed_inside = collection.defer_events(|this| {
            this.push(1);
            this.defer_events(|this| this.push(2));
            log.borrow().len()
        });

        assert_eq!(observed_inside, 0);
        assert_eq!(log.borrow().len(), 6);
        assert_eq!(
            log.borrow()[3],
            changed(CollectionChange::Added {
                items: vec![2],
                index: 1
            })
        );
    }

    #[test]
    fn clear_on_empty_is_silent() {
        let mut collection = ObservableRangeCollection::<i32>::new();
        let log = record(&mut collection);
        collection.clear();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unsubscribed_handler_is_not_called() {
        let mut collection = ObservableRangeCollection::new();
        let log = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&log);
        let id = collection.subscribe(move |_| *sink.borrow_mut() += 1);

        collection.push(1);
        assert!(collection.unsubscribe(id));
        assert!(!collection.unsubscribe(id));
        collection.push(2);

        assert_eq!(*log.borrow(), 3);
    }

    #[test]
    fn add_if_absent_and_remove() {
        let mut collection = ObservableRangeCollection::new();
        assert!(collection.add_if_absent("a"));
        assert!(!collection.add_if_absent("a"));
        assert!(collection.remove(&"a"));
        assert!(!collection.remove(&"a"));
        assert_eq!(collection.remove_at(0), Err(Error::OutOfRange { index: 0, len: 0 }));
    }
}
