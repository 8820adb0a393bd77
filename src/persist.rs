//! Persistence for [`DoubleMap`]. Only the forward pairs are written; the
//! backward direction is rebuilt on load.

use std::{
    collections::HashMap,
    hash::Hash,
    io::{Read, Write},
};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::doublemap::DoubleMap;

impl<K, V> Serialize for DoubleMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<'de, K, V> Deserialize<'de> for DoubleMap<K, V>
where
    K: Hash + Eq + Clone + Deserialize<'de>,
    V: Hash + Eq + Clone + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let forward = HashMap::<K, V>::deserialize(deserializer)?;
        DoubleMap::try_from(forward).map_err(D::Error::custom)
    }
}

impl<K, V> DoubleMap<K, V>
where
    K: Hash + Eq + Clone + Serialize + for<'de> Deserialize<'de>,
    V: Hash + Eq + Clone + Serialize + for<'de> Deserialize<'de>,
{
    /// Write the forward pairs as MessagePack
    pub fn dump(&self, buffer: &mut impl Write) -> Result<(), rmp_serde::encode::Error> {
        rmp_serde::encode::write(buffer, self)
    }

    pub fn read(buffer: &mut impl Read) -> Result<Self, rmp_serde::decode::Error> {
        rmp_serde::decode::from_read(buffer)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::doublemap::DoubleMap;

    #[test]
    fn state_is_stored_and_loaded() {
        let mut map = DoubleMap::new();
        map.insert("term".to_string(), 1u8).unwrap();
        map.insert("term2".to_string(), 2u8).unwrap();

        let mut storage = vec![];
        map.dump(&mut storage).unwrap();

        let mut reader = storage.as_slice();
        let loaded = DoubleMap::<String, u8>::read(&mut reader).unwrap();

        assert_eq!(loaded, map);
        assert_eq!(loaded.get_backward(&2), Some(&"term2".to_string()));
    }

    #[test]
    fn loading_duplicate_values_fails() {
        let mut forward = HashMap::new();
        forward.insert("a".to_string(), 7u8);
        forward.insert("b".to_string(), 7u8);

        let storage = rmp_serde::to_vec(&forward).unwrap();
        let mut reader = storage.as_slice();
        let error = DoubleMap::<String, u8>::read(&mut reader).unwrap_err();

        assert!(error.to_string().contains("more than one key"));
    }

    #[test]
    fn only_forward_pairs_are_written() {
        let map: DoubleMap<u8, u8> = [(1, 10), (2, 20)].into_iter().collect();
        let plain: HashMap<u8, u8> = [(1, 10), (2, 20)].into_iter().collect();

        let decoded: HashMap<u8, u8> =
            rmp_serde::from_slice(&rmp_serde::to_vec(&map).unwrap()).unwrap();
        assert_eq!(decoded, plain);
    }
}
