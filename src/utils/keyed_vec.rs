use std::iter::Zip;

use crate::Error;

/// Insertion-ordered mapping from names to values.
///
/// Iteration always follows insertion order, so accumulations over the
/// values are deterministic.
#[derive(Debug)]
pub struct KeyedVec<K, V>
where
    K: PartialEq,
{
    keys: Vec<K>,
    values: Vec<V>,
}
impl<K, V> KeyedVec<K, V>
where
    K: PartialEq,
{
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }
    pub fn len(&self) -> usize {
        self.keys.len()
    }
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
    pub fn contains(&self, key: &K) -> bool {
        self.position(key).is_some()
    }
    pub fn get(&self, key: &K) -> Option<&V> {
        self.position(key).map(|idx| &self.values[idx])
    }
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.position(key).map(|idx| &mut self.values[idx])
    }
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.values.iter()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.keys.iter().zip(self.values.iter())
    }
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.keys.iter().zip(self.values.iter_mut())
    }
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.position(key)?;
        self.keys.remove(idx);
        Some(self.values.remove(idx))
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.keys.iter().position(|k| *k == *key)
    }
}

impl<V> KeyedVec<String, V> {
    /// Append a value under a new name
    pub fn add(&mut self, key: &str, value: V) -> Result<(), Error> {
        if self.keys.iter().any(|k| k == key) {
            return Err(Error::DuplicateName(key.to_string()));
        }
        self.keys.push(key.to_string());
        self.values.push(value);
        Ok(())
    }
}

impl<K: PartialEq, V> Default for KeyedVec<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> IntoIterator for KeyedVec<K, V>
where
    K: PartialEq,
{
    type IntoIter = Zip<std::vec::IntoIter<K>, std::vec::IntoIter<V>>;
    type Item = (K, V);
    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter().zip(self.values.into_iter())
    }
}
