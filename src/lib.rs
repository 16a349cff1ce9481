//! This crate provides a path-compressed binary prefix trie for IP networks (CIDR blocks). Given a
//! set of registered networks, it answers whether an address falls inside any of them, which of
//! them contain an address (from the least to the most specific one), and which of them are
//! covered by a given network. IPv4 and IPv6 are both supported, either through a single
//! [`PrefixTrie`] per address family, or through a [`VersionedRanger`] that holds one trie per
//! family and dispatches every call on the family of its argument.
//!
//! Networks can be built from raw words or bytes, from `std::net` addresses, or (with the
//! corresponding features) converted from [ipnet](https://docs.rs/ipnet),
//! [ipnetwork](https://crates.io/crates/ipnetwork) and [cidr](https://crates.io/crates/cidr)
//! types.
//!
//! ```
//! # use cidr_ranger::*;
//! let mut ranger = VersionedRanger::new();
//! ranger.insert("10.0.0.0/8".parse::<Network>()?)?;
//! ranger.insert("10.0.0.0/16".parse::<Network>()?)?;
//! ranger.insert("2001:db8::/32".parse::<Network>()?)?;
//!
//! let addr: NetworkNumber = "10.0.1.1".parse()?;
//! assert_eq!(
//!     ranger.containing_networks(&addr)?,
//!     vec![&"10.0.0.0/8".parse::<Network>()?, &"10.0.0.0/16".parse()?],
//! );
//! assert_eq!(ranger.covered_networks(&"10.0.0.0/12".parse()?)?.len(), 1);
//! # Ok::<(), Error>(())
//! ```
//!
//! # Comparison with related projects
//!
//! [`ip_network_table-deps-treebitmap`](https://crates.io/crates/ip_network_table-deps-treebitmap)
//! provides an IP lookup table answering longest-prefix matches. See `benches/benchmark.rs` for a
//! comparison of both in the case of *dense* and *sparse* workloads. In addition to the longest
//! match, the [`PrefixTrie`] answers all containing networks of an address and all networks below
//! a given prefix.
//!
//! # Description of the Tree
//!
//! Each node consists of a network, an optional entry, a link to its parent, and two optional
//! children. The root holds the zero network of its family and is never removed. To move from a
//! node into one of its children, we look at the most significant bit that is **not** part of the
//! node's network (the *target bit position*). If it is not set, we take the `0` (left) branch,
//! and otherwise the `1` (right) one. Host routes (`/32` and `/128`) have no target bit position
//! and thus never have children.
//!
//! The tree is path compressed: a child may skip an arbitrary number of bits below its parent.
//! Except for the root, every node either carries an entry, or joins two subtrees. Inserting a
//! network whose path diverges from an existing edge inserts such a joining node at the longest
//! common prefix; removing an entry splices out the nodes that become superfluous.
//!
//! All nodes live in a single arena owned by the trie. Children and parents are referenced by
//! their index into that arena, and freed slots are recycled by later inserts.
//!
//! # Operations on the tree
//!
//! The following are the computational complexities of the functions, where `w` is the width of
//! the address family (32 or 128), `n` is the number of entries in the tree, and `k` is the
//! number of returned entries.
//!
//! | Operation                       | Complexity     |
//! |---------------------------------|----------------|
//! | `insert`, `remove`              | `O(w)`         |
//! | `get`, `contains`               | `O(w)`         |
//! | `longest_match`                 | `O(w)`         |
//! | `containing_networks`           | `O(w)`         |
//! | `covered_networks`              | `O(w + k)`     |
//! | `iter`, `clear`                 | `O(n)`         |
//! | `len` and `is_empty`            | `O(1)`         |
//!
//! [`PrefixTrie::remove`] always exactly reverts [`PrefixTrie::insert`]: the tree structure after
//! inserting and removing a network is indistinguishable from the tree before.

#![deny(missing_docs)]

mod entry;
mod error;
mod fmt;
mod inner;
mod network;
mod number;
#[cfg(feature = "serde")]
mod serde;
mod trie;
mod versioned;

#[cfg(test)]
mod brute;
#[cfg(test)]
mod fuzzing;

pub use entry::RangerEntry;
pub use error::Error;
pub use network::Network;
pub use number::{IpVersion, NetworkNumber, BITS_PER_WORD};
pub use trie::{IntoIter, Iter, PrefixTrie};
pub use versioned::VersionedRanger;

/// Common interface of all rangers: a set of entries, keyed by their network, that can be queried
/// by address or by network.
pub trait Ranger<E: RangerEntry> {
    /// Insert an entry. An entry with the same network is replaced.
    fn insert(&mut self, entry: E) -> Result<(), Error>;

    /// Remove the entry with exactly this network. Returns `Ok(None)` if there is none.
    fn remove(&mut self, network: &Network) -> Result<Option<E>, Error>;

    /// Check whether any entry contains `number`.
    fn contains(&self, number: &NetworkNumber) -> Result<bool, Error>;

    /// Get all entries containing `number`, ordered by ascending prefix length.
    fn containing_networks(&self, number: &NetworkNumber) -> Result<Vec<&E>, Error>;

    /// Get all entries covered by `network`.
    fn covered_networks(&self, network: &Network) -> Result<Vec<&E>, Error>;

    /// The number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! impl_ranger {
    ($t:ident) => {
        impl<E: RangerEntry> Ranger<E> for $t<E> {
            fn insert(&mut self, entry: E) -> Result<(), Error> {
                $t::insert(self, entry).map(|_| ())
            }

            fn remove(&mut self, network: &Network) -> Result<Option<E>, Error> {
                $t::remove(self, network)
            }

            fn contains(&self, number: &NetworkNumber) -> Result<bool, Error> {
                $t::contains(self, number)
            }

            fn containing_networks(&self, number: &NetworkNumber) -> Result<Vec<&E>, Error> {
                $t::containing_networks(self, number)
            }

            fn covered_networks(&self, network: &Network) -> Result<Vec<&E>, Error> {
                $t::covered_networks(self, network)
            }

            fn len(&self) -> usize {
                $t::len(self)
            }

            fn is_empty(&self) -> bool {
                $t::is_empty(self)
            }
        }
    };
}

impl_ranger!(PrefixTrie);
impl_ranger!(VersionedRanger);
