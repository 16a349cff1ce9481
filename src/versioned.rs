//! A ranger holding one [`PrefixTrie`] per address family.

use crate::{Error, IpVersion, Network, NetworkNumber, PrefixTrie, RangerEntry};

macro_rules! fork {
    ($self:ident, $version:expr, $func:ident $(, $args:expr)*) => {
        match $version {
            IpVersion::V4 => $self.v4.$func($($args),*),
            IpVersion::V6 => $self.v6.$func($($args),*),
        }
    };
}

/// A ranger for both IPv4 and IPv6 entries. Every operation is forwarded to the trie matching the
/// address family of its argument, so mixing families is never an error here.
///
/// ```
/// # use cidr_ranger::*;
/// let mut ranger = VersionedRanger::new();
/// ranger.insert("192.168.0.0/16".parse::<Network>()?)?;
/// ranger.insert("2001:db8::/32".parse::<Network>()?)?;
/// assert_eq!(ranger.len(), 2);
/// assert!(ranger.contains(&"192.168.10.1".parse()?)?);
/// assert!(ranger.contains(&"2001:db8::1".parse()?)?);
/// assert!(!ranger.contains(&"::1".parse()?)?);
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct VersionedRanger<E> {
    pub(crate) v4: PrefixTrie<E>,
    pub(crate) v6: PrefixTrie<E>,
}

impl<E> Default for VersionedRanger<E> {
    fn default() -> Self {
        Self {
            v4: PrefixTrie::new(IpVersion::V4),
            v6: PrefixTrie::new(IpVersion::V6),
        }
    }
}

impl<E> VersionedRanger<E> {
    /// Create an empty ranger.
    pub fn new() -> Self {
        Self::default()
    }

    /// The trie holding all IPv4 entries.
    pub fn ipv4(&self) -> &PrefixTrie<E> {
        &self.v4
    }

    /// The trie holding all IPv6 entries.
    pub fn ipv6(&self) -> &PrefixTrie<E> {
        &self.v6
    }

    /// The number of entries of both families.
    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    /// Returns `true` if neither family has any entries.
    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }

    /// Remove all entries of both families.
    pub fn clear(&mut self) {
        self.v4.clear();
        self.v6.clear();
    }

    /// Get the entry stored for exactly `network`.
    pub fn get(&self, network: &Network) -> Result<Option<&E>, Error> {
        fork!(self, network.version(), get, network)
    }

    /// Check whether any entry contains `number`.
    pub fn contains(&self, number: &NetworkNumber) -> Result<bool, Error> {
        fork!(self, number.version(), contains, number)
    }

    /// Get all entries whose network contains `number`, from the least to the most specific one.
    pub fn containing_networks(&self, number: &NetworkNumber) -> Result<Vec<&E>, Error> {
        fork!(self, number.version(), containing_networks, number)
    }

    /// Get the most specific entry whose network contains `number`.
    pub fn longest_match(&self, number: &NetworkNumber) -> Result<Option<&E>, Error> {
        fork!(self, number.version(), longest_match, number)
    }

    /// Get all entries whose network is covered by `network`.
    pub fn covered_networks(&self, network: &Network) -> Result<Vec<&E>, Error> {
        fork!(self, network.version(), covered_networks, network)
    }

    /// Iterate over all IPv4 entries in depth order, followed by all IPv6 entries.
    pub fn iter(&self) -> std::iter::Chain<crate::Iter<'_, E>, crate::Iter<'_, E>> {
        self.v4.iter().chain(self.v6.iter())
    }
}

impl<E: RangerEntry> VersionedRanger<E> {
    /// Insert an entry into the trie of its family, returning the entry it replaced.
    pub fn insert(&mut self, entry: E) -> Result<Option<E>, Error> {
        fork!(self, entry.network().version(), insert, entry)
    }

    /// Remove the entry stored for exactly `network`.
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let mut ranger = VersionedRanger::new();
    /// let net: Network = "2001:db8::/32".parse()?;
    /// ranger.insert((net, "doc"))?;
    /// assert_eq!(ranger.remove(&net)?, Some((net, "doc")));
    /// assert_eq!(ranger.remove(&net)?, None);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn remove(&mut self, network: &Network) -> Result<Option<E>, Error> {
        fork!(self, network.version(), remove, network)
    }
}

impl<E: RangerEntry> Extend<E> for VersionedRanger<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for entry in iter {
            match self.insert(entry) {
                Ok(_) => {}
                Err(e) => unreachable!("the trie of the entry's own family rejected it: {e}"),
            }
        }
    }
}

impl<E: RangerEntry> FromIterator<E> for VersionedRanger<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut ranger = Self::new();
        ranger.extend(iter);
        ranger
    }
}

impl<'a, E> IntoIterator for &'a VersionedRanger<E> {
    type Item = &'a E;
    type IntoIter = std::iter::Chain<crate::Iter<'a, E>, crate::Iter<'a, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E> IntoIterator for VersionedRanger<E> {
    type Item = E;
    type IntoIter = std::iter::Chain<crate::IntoIter<E>, crate::IntoIter<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.v4.into_iter().chain(self.v6.into_iter())
    }
}
