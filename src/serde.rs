//! Serialization and Deserialization implementation

use ::serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use super::*;

impl Serialize for NetworkNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NetworkNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

impl<E: Serialize> Serialize for PrefixTrie<E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self)
    }
}

/// A trie is read from a sequence of entries. The address family is taken from the first entry;
/// an entry of the other family, or an empty sequence, is rejected.
impl<'de, E: RangerEntry + Deserialize<'de>> Deserialize<'de> for PrefixTrie<E> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries: Vec<E> = Vec::deserialize(deserializer)?;
        let version = entries
            .first()
            .map(|e| e.network().version())
            .ok_or_else(|| D::Error::custom("cannot infer the address family of an empty trie"))?;
        let mut trie = PrefixTrie::new(version);
        for entry in entries {
            trie.insert(entry).map_err(D::Error::custom)?;
        }
        Ok(trie)
    }
}

impl<E: Serialize> Serialize for VersionedRanger<E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self)
    }
}

impl<'de, E: RangerEntry + Deserialize<'de>> Deserialize<'de> for VersionedRanger<E> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries: Vec<E> = Vec::deserialize(deserializer)?;
        Ok(Self::from_iter(entries))
    }
}
