//! One-to-one map with lookup in both directions.
//!
//! [`DoubleMap`] keeps a forward `K -> V` map and a backward `V -> K` map that
//! are always exact transposes of each other. The backward direction is exposed
//! through [`Reverse`] and [`ReverseMut`], which borrow the owning map and carry
//! no storage of their own.
//!
//! The map is not synchronized. Sharing it between threads needs an external
//! lock, the same as a plain `HashMap`.

use std::{
    borrow::Borrow,
    collections::{hash_map, HashMap},
    fmt,
    hash::Hash,
    ops::Index,
};

use tracing::{debug, trace};

use crate::error::{Error, Result, Side};

pub struct DoubleMap<K, V> {
    forward: HashMap<K, V>,
    backward: HashMap<V, K>,
}

/// Which half of a pair was already taken during a strict insert.
enum Collision {
    Key,
    Value,
}

impl Collision {
    /// `key_side` is the side the inserting view is keyed by
    fn into_error(self, key_side: Side) -> Error {
        match self {
            Collision::Key => Error::DuplicateKey(key_side),
            Collision::Value => Error::DuplicateKey(key_side.opposite()),
        }
    }
}

fn insert_strict<A, B>(
    there: &mut HashMap<A, B>,
    back: &mut HashMap<B, A>,
    key: A,
    value: B,
) -> Result<(), Collision>
where
    A: Hash + Eq + Clone,
    B: Hash + Eq + Clone,
{
    if there.contains_key(&key) {
        return Err(Collision::Key);
    }
    if back.contains_key(&value) {
        return Err(Collision::Value);
    }
    there.insert(key.clone(), value.clone());
    back.insert(value, key);
    Ok(())
}

/// Overwrites both halves, dropping whatever either half was paired with before.
fn upsert<A, B>(there: &mut HashMap<A, B>, back: &mut HashMap<B, A>, key: A, value: B) -> Option<B>
where
    A: Hash + Eq + Clone,
    B: Hash + Eq + Clone,
{
    if let Some(previous_key) = back.remove(&value) {
        if previous_key != key {
            trace!("upsert displaced the key previously paired with the value");
            there.remove(&previous_key);
        }
    }

    let previous_value = there.insert(key.clone(), value.clone());
    if let Some(stale) = &previous_value {
        if *stale != value {
            trace!("upsert displaced the value previously paired with the key");
            back.remove(stale);
        }
    }
    back.insert(value, key);

    previous_value
}

fn take_pair<A, B, Q>(there: &mut HashMap<A, B>, back: &mut HashMap<B, A>, key: &Q) -> Option<B>
where
    A: Hash + Eq + Borrow<Q>,
    B: Hash + Eq,
    Q: Hash + Eq + ?Sized,
{
    let value = there.remove(key)?;
    back.remove(&value);
    Some(value)
}

impl<K, V> Default for DoubleMap<K, V> {
    fn default() -> Self {
        Self {
            forward: Default::default(),
            backward: Default::default(),
        }
    }
}

impl<K, V> DoubleMap<K, V> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.backward.clear();
    }

    /// Iterator over `(first, second)` pairs in unspecified order
    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.forward.iter()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, K, V> {
        self.forward.keys()
    }

    /// Values in the same order as [`keys`](Self::keys)
    pub fn values(&self) -> hash_map::Values<'_, K, V> {
        self.forward.values()
    }

    /// Read-only view of the `V -> K` direction
    pub fn reverse(&self) -> Reverse<'_, K, V> {
        Reverse { owner: self }
    }

    /// Mutable view of the `V -> K` direction. Mutations go through the same
    /// paired updates as the forward ones.
    pub fn reverse_mut(&mut self) -> ReverseMut<'_, K, V> {
        ReverseMut { owner: self }
    }

    /// Swap the two directions without copying anything
    pub fn into_reversed(self) -> DoubleMap<V, K> {
        DoubleMap {
            forward: self.backward,
            backward: self.forward,
        }
    }
}

impl<K, V> DoubleMap<K, V>
where
    K: Hash + Eq,
    V: Hash + Eq,
{
    pub fn get_forward<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.get(key)
    }

    pub fn get_backward<Q>(&self, key: &Q) -> Option<&K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.backward.get(key)
    }

    /// Forward lookup that requires the key to be present
    pub fn lookup<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.get(key).ok_or(Error::NotFound)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.contains_key(key)
    }

    pub fn contains_value<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.backward.contains_key(value)
    }

    /// Remove the pair keyed by `key`, returning its value
    pub fn take<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        take_pair(&mut self.forward, &mut self.backward, key)
    }

    /// Remove the pair keyed by `key`, indicating if it was there
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.take(key).is_some()
    }
}

impl<K, V> DoubleMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    /// Add a new pair. Fails without touching the map if either half is already used.
    pub fn insert(&mut self, first: K, second: V) -> Result<()> {
        insert_strict(&mut self.forward, &mut self.backward, first, second)
            .map_err(|collision| collision.into_error(Side::First))
    }

    /// Pair `first` with `second`, unpairing whatever either of them was paired with.
    /// Returns the value `first` was previously paired with.
    pub fn set(&mut self, first: K, second: V) -> Option<V> {
        upsert(&mut self.forward, &mut self.backward, first, second)
    }

    /// Build a map from forward pairs, rejecting a value used by two different keys.
    pub fn rebuild<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs = pairs.into_iter();
        let mut result = Self::with_capacity(pairs.size_hint().0);
        for (first, second) in pairs {
            if result
                .backward
                .get(&second)
                .is_some_and(|existing| *existing != first)
            {
                debug!(
                    rebuilt = result.len(),
                    "rejecting forward map: value is mapped from more than one key"
                );
                return Err(Error::DuplicateValue);
            }
            result.set(first, second);
        }

        Ok(result)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: HashMap::with_capacity(capacity),
            backward: HashMap::with_capacity(capacity),
        }
    }
}

impl<K, V> TryFrom<HashMap<K, V>> for DoubleMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    type Error = Error;

    fn try_from(value: HashMap<K, V>) -> Result<Self, Self::Error> {
        Self::rebuild(value)
    }
}

/// Collects with upsert semantics: a later pair wins over an earlier one sharing either half.
impl<K, V> FromIterator<(K, V)> for DoubleMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}

impl<K, V> Extend<(K, V)> for DoubleMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (first, second) in iter {
            self.set(first, second);
        }
    }
}

impl<K, V> IntoIterator for DoubleMap<K, V> {
    type Item = (K, V);
    type IntoIter = hash_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.forward.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a DoubleMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.forward.iter()
    }
}

impl<K, V, Q> Index<&Q> for DoubleMap<K, V>
where
    K: Hash + Eq + Borrow<Q>,
    V: Hash + Eq,
    Q: Hash + Eq + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        &self.forward[key]
    }
}

impl<K: Clone, V: Clone> Clone for DoubleMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            forward: self.forward.clone(),
            backward: self.backward.clone(),
        }
    }
}

impl<K, V> PartialEq for DoubleMap<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}

impl<K: Hash + Eq, V: Eq> Eq for DoubleMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for DoubleMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.forward.iter()).finish()
    }
}

/// Borrowed `V -> K` view of a [`DoubleMap`].
pub struct Reverse<'a, K, V> {
    owner: &'a DoubleMap<K, V>,
}

impl<K, V> Clone for Reverse<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Reverse<'_, K, V> {}

impl<'a, K, V> Reverse<'a, K, V> {
    pub fn len(&self) -> usize {
        self.owner.backward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner.backward.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'a, V, K> {
        self.owner.backward.iter()
    }

    pub fn keys(&self) -> hash_map::Keys<'a, V, K> {
        self.owner.backward.keys()
    }

    pub fn values(&self) -> hash_map::Values<'a, V, K> {
        self.owner.backward.values()
    }
}

impl<'a, K, V> Reverse<'a, K, V>
where
    K: Hash + Eq,
    V: Hash + Eq,
{
    pub fn get<Q>(&self, key: &Q) -> Option<&'a K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.owner.backward.get(key)
    }

    pub fn lookup<Q>(&self, key: &Q) -> Result<&'a K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(Error::NotFound)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.owner.backward.contains_key(key)
    }

    pub fn contains_value<Q>(&self, value: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.owner.forward.contains_key(value)
    }
}

impl<'a, K, V> IntoIterator for Reverse<'a, K, V> {
    type Item = (&'a V, &'a K);
    type IntoIter = hash_map::Iter<'a, V, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.owner.backward.iter()
    }
}

impl<K, V, Q> Index<&Q> for Reverse<'_, K, V>
where
    K: Hash + Eq,
    V: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = K;

    fn index(&self, key: &Q) -> &K {
        &self.owner.backward[key]
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Reverse<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.owner.backward.iter()).finish()
    }
}

/// Mutably borrowed `V -> K` view of a [`DoubleMap`].
pub struct ReverseMut<'a, K, V> {
    owner: &'a mut DoubleMap<K, V>,
}

impl<K, V> ReverseMut<'_, K, V> {
    pub fn as_view(&self) -> Reverse<'_, K, V> {
        Reverse { owner: &*self.owner }
    }

    pub fn len(&self) -> usize {
        self.owner.backward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner.backward.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, V, K> {
        self.owner.backward.iter()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, V, K> {
        self.owner.backward.keys()
    }

    pub fn values(&self) -> hash_map::Values<'_, V, K> {
        self.owner.backward.values()
    }

    pub fn clear(&mut self) {
        self.owner.clear();
    }
}

impl<K, V> ReverseMut<'_, K, V>
where
    K: Hash + Eq,
    V: Hash + Eq,
{
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.owner.backward.get(key)
    }

    pub fn lookup<Q>(&self, key: &Q) -> Result<&K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(Error::NotFound)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.owner.backward.contains_key(key)
    }

    pub fn contains_value<Q>(&self, value: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.owner.forward.contains_key(value)
    }

    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let DoubleMap { forward, backward } = &mut *self.owner;
        take_pair(backward, forward, key)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.take(key).is_some()
    }
}

impl<K, V, Q> Index<&Q> for ReverseMut<'_, K, V>
where
    K: Hash + Eq,
    V: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = K;

    fn index(&self, key: &Q) -> &K {
        &self.owner.backward[key]
    }
}

impl<K, V> ReverseMut<'_, K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    pub fn insert(&mut self, second: V, first: K) -> Result<()> {
        let DoubleMap { forward, backward } = &mut *self.owner;
        insert_strict(backward, forward, second, first)
            .map_err(|collision| collision.into_error(Side::Second))
    }

    pub fn set(&mut self, second: V, first: K) -> Option<K> {
        let DoubleMap { forward, backward } = &mut *self.owner;
        upsert(backward, forward, second, first)
    }
}
