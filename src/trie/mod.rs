//! Implementation of the path-compressed prefix trie for a single address family.

use log::trace;

use crate::inner::{Direction, DirectionForInsert, Node};
use crate::{Error, IpVersion, Network, NetworkNumber, RangerEntry};

mod iter;

pub use iter::*;

/// Path-compressed binary trie holding entries of a single address family.
///
/// Every node of the trie stores a network. The root stores the zero network (`0.0.0.0/0` or
/// `::/0`), and each child is covered by its parent. A node without an entry is kept only if it
/// is the root, or if it joins two subtrees.
///
/// ```
/// # use cidr_ranger::*;
/// let mut trie = PrefixTrie::new(IpVersion::V4);
/// trie.insert("10.0.0.0/8".parse::<Network>()?)?;
/// trie.insert("10.0.0.0/16".parse::<Network>()?)?;
/// assert!(trie.contains(&"10.0.1.1".parse()?)?);
/// assert!(!trie.contains(&"11.0.0.1".parse()?)?);
/// assert_eq!(trie.len(), 2);
/// assert_eq!(trie.contains(&"::1".parse()?), Err(Error::VersionMismatch));
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone)]
pub struct PrefixTrie<E> {
    pub(crate) table: Vec<Node<E>>,
    free: Vec<usize>,
    count: usize,
    version: IpVersion,
}

impl<E> PrefixTrie<E> {
    /// Create an empty trie for the given address family.
    pub fn new(version: IpVersion) -> Self {
        Self {
            table: vec![Node::new(Network::zero(version), None, None)],
            free: Vec::new(),
            count: 0,
            version,
        }
    }

    /// The address family of this trie.
    pub fn version(&self) -> IpVersion {
        self.version
    }

    /// The number of entries in the trie.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the trie holds no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Remove all entries, keeping the allocated memory.
    pub fn clear(&mut self) {
        self.table.truncate(1);
        self.table[0] = Node::new(Network::zero(self.version), None, None);
        self.free.clear();
        self.count = 0;
    }

    /// Get the entry stored for exactly `network`.
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let mut trie = PrefixTrie::new(IpVersion::V4);
    /// let net: Network = "192.168.1.0/24".parse()?;
    /// trie.insert((net, 1))?;
    /// assert_eq!(trie.get(&net)?, Some(&(net, 1)));
    /// assert_eq!(trie.get(&"192.168.0.0/23".parse()?)?, None);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn get(&self, network: &Network) -> Result<Option<&E>, Error> {
        self.check_version(network.version())?;
        let mut idx = 0;
        loop {
            match self.get_direction(idx, network) {
                Direction::Reached => return Ok(self.table[idx].entry.as_ref()),
                Direction::Enter { next } => idx = next,
                Direction::Missing => return Ok(None),
            }
        }
    }

    /// Check whether any entry of the trie contains `number`.
    pub fn contains(&self, number: &NetworkNumber) -> Result<bool, Error> {
        self.check_version(number.version())?;
        let mut idx = 0;
        loop {
            let node = &self.table[idx];
            if !node.network.contains(number) {
                return Ok(false);
            }
            if node.entry.is_some() {
                return Ok(true);
            }
            match self.next_towards(idx, number)? {
                Some(next) => idx = next,
                None => return Ok(false),
            }
        }
    }

    /// Get all entries whose network contains `number`, from the least to the most specific one.
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let mut trie = PrefixTrie::new(IpVersion::V4);
    /// trie.insert("10.0.0.0/16".parse::<Network>()?)?;
    /// trie.insert("10.0.0.0/8".parse::<Network>()?)?;
    /// trie.insert("10.1.0.0/16".parse::<Network>()?)?;
    /// assert_eq!(
    ///     trie.containing_networks(&"10.0.0.1".parse()?)?,
    ///     vec![&"10.0.0.0/8".parse::<Network>()?, &"10.0.0.0/16".parse()?],
    /// );
    /// # Ok::<(), Error>(())
    /// ```
    pub fn containing_networks(&self, number: &NetworkNumber) -> Result<Vec<&E>, Error> {
        self.check_version(number.version())?;
        let mut result = Vec::new();
        let mut idx = 0;
        loop {
            let node = &self.table[idx];
            if !node.network.contains(number) {
                return Ok(result);
            }
            if let Some(entry) = node.entry.as_ref() {
                result.push(entry);
            }
            match self.next_towards(idx, number)? {
                Some(next) => idx = next,
                None => return Ok(result),
            }
        }
    }

    /// Get the most specific entry whose network contains `number`.
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let mut trie = PrefixTrie::new(IpVersion::V6);
    /// trie.insert("2001:db8::/32".parse::<Network>()?)?;
    /// trie.insert("2001:db8:1::/48".parse::<Network>()?)?;
    /// assert_eq!(
    ///     trie.longest_match(&"2001:db8:1::1".parse()?)?,
    ///     Some(&"2001:db8:1::/48".parse()?),
    /// );
    /// assert_eq!(trie.longest_match(&"2001:db9::1".parse()?)?, None);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn longest_match(&self, number: &NetworkNumber) -> Result<Option<&E>, Error> {
        self.check_version(number.version())?;
        let mut best = None;
        let mut idx = 0;
        loop {
            let node = &self.table[idx];
            if !node.network.contains(number) {
                return Ok(best);
            }
            if let Some(entry) = node.entry.as_ref() {
                best = Some(entry);
            }
            match self.next_towards(idx, number)? {
                Some(next) => idx = next,
                None => return Ok(best),
            }
        }
    }

    /// Get all entries whose network is covered by `network` (including `network` itself), in
    /// the same depth order as [`PrefixTrie::iter`].
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let mut trie = PrefixTrie::new(IpVersion::V4);
    /// trie.insert("192.168.0.0/24".parse::<Network>()?)?;
    /// trie.insert("192.168.0.0/25".parse::<Network>()?)?;
    /// trie.insert("10.0.0.0/8".parse::<Network>()?)?;
    /// assert_eq!(
    ///     trie.covered_networks(&"192.168.0.0/16".parse()?)?,
    ///     vec![&"192.168.0.0/24".parse::<Network>()?, &"192.168.0.0/25".parse()?],
    /// );
    /// # Ok::<(), Error>(())
    /// ```
    pub fn covered_networks(&self, network: &Network) -> Result<Vec<&E>, Error> {
        self.check_version(network.version())?;
        let mut idx = 0;
        loop {
            let node = &self.table[idx];
            if network.covers(&node.network) {
                return Ok(self.iter_from(idx).collect());
            }
            if !node.network.covers(network) {
                return Ok(Vec::new());
            }
            match self.next_towards(idx, network.number())? {
                Some(next) => idx = next,
                None => return Ok(Vec::new()),
            }
        }
    }

    /// Iterate over all entries of the trie in depth order: a node first, then everything on its
    /// `0` branch, then everything on its `1` branch.
    pub fn iter(&self) -> Iter<'_, E> {
        self.iter_from(0)
    }

    /// Number of nodes in the trie, including the root and all entry-less nodes.
    #[inline(always)]
    pub(crate) fn node_count(&self) -> usize {
        self.table.len() - self.free.len()
    }

    fn iter_from(&self, idx: usize) -> Iter<'_, E> {
        Iter {
            trie: self,
            nodes: vec![idx],
        }
    }

    #[inline(always)]
    fn check_version(&self, version: IpVersion) -> Result<(), Error> {
        if version == self.version {
            Ok(())
        } else {
            Err(Error::VersionMismatch)
        }
    }

    /// Get the child of `idx` on the side of `number`, or `None` if the path ends at `idx`.
    #[inline(always)]
    fn next_towards(&self, idx: usize, number: &NetworkNumber) -> Result<Option<usize>, Error> {
        let node = &self.table[idx];
        if node.target_bit_position().is_none() {
            return Ok(None);
        }
        Ok(node.child(node.branch(number)?))
    }

    /// set the child of a node (either to the left or the right), and return the index of the old child.
    #[inline(always)]
    fn set_child(&mut self, idx: usize, child: Option<usize>, right: bool) -> Option<usize> {
        if let Some(child) = child {
            self.table[child].parent = Some(idx);
        }
        let slot = if right {
            &mut self.table[idx].right
        } else {
            &mut self.table[idx].left
        };
        std::mem::replace(slot, child)
    }

    fn new_node(&mut self, network: Network, entry: Option<E>, parent: usize) -> usize {
        let node = Node::new(network, entry, Some(parent));
        if let Some(idx) = self.free.pop() {
            self.table[idx] = node;
            idx
        } else {
            self.table.push(node);
            self.table.len() - 1
        }
    }

    /// Get the directions from some node `idx` to get to `network`.
    #[inline(always)]
    fn get_direction(&self, cur: usize, network: &Network) -> Direction {
        let node = &self.table[cur];
        if node.network == *network {
            return Direction::Reached;
        }
        let Ok(right) = node.branch(network.number()) else {
            return Direction::Missing;
        };
        match node.child(right) {
            Some(child) if self.table[child].network.covers(network) => {
                Direction::Enter { next: child }
            }
            _ => Direction::Missing,
        }
    }

    /// Get the directions from some node `idx` to get to `network`. The caller must ensure that
    /// `network` is covered by the node at `cur`.
    #[inline(always)]
    fn get_direction_for_insert(
        &self,
        cur: usize,
        network: &Network,
    ) -> Result<DirectionForInsert, Error> {
        let node = &self.table[cur];
        if node.network == *network {
            return Ok(DirectionForInsert::Reached);
        }
        let right = node.branch(network.number())?;
        let Some(child) = node.child(right) else {
            return Ok(DirectionForInsert::NewLeaf { right });
        };
        let child_net = &self.table[child].network;
        if child_net.covers(network) {
            return Ok(DirectionForInsert::Enter { next: child });
        }
        // the child diverges from `network` somewhere above its own prefix length.
        let path = network.masked(network.common_prefix_len(child_net)?)?;
        let child_right = child_net
            .number()
            .bit(path.total_bits() - path.prefix_len() - 1)?;
        Ok(DirectionForInsert::NewPath {
            path,
            right,
            child_right,
        })
    }
}

impl<E: RangerEntry> PrefixTrie<E> {
    /// Insert an entry, replacing and returning the entry previously stored for the same network.
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let mut trie = PrefixTrie::new(IpVersion::V4);
    /// let net: Network = "192.168.1.0/24".parse()?;
    /// assert_eq!(trie.insert((net, 1))?, None);
    /// assert_eq!(trie.insert((net, 2))?, Some((net, 1)));
    /// assert_eq!(trie.len(), 1);
    /// assert_eq!(trie.insert(("::/0".parse()?, 3)), Err(Error::VersionMismatch));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn insert(&mut self, entry: E) -> Result<Option<E>, Error> {
        let network = entry.network();
        self.check_version(network.version())?;
        let mut idx = 0;
        loop {
            match self.get_direction_for_insert(idx, &network)? {
                DirectionForInsert::Enter { next } => idx = next,
                DirectionForInsert::Reached => {
                    let old = self.table[idx].entry.replace(entry);
                    if old.is_none() {
                        self.count += 1;
                    } else {
                        trace!("replace the entry of {network}");
                    }
                    return Ok(old);
                }
                DirectionForInsert::NewLeaf { right } => {
                    trace!("new leaf {network} below {}", self.table[idx].network);
                    let new = self.new_node(network, Some(entry), idx);
                    self.set_child(idx, Some(new), right);
                    self.count += 1;
                    return Ok(None);
                }
                DirectionForInsert::NewPath {
                    path,
                    right,
                    child_right,
                } => {
                    trace!("new path node {path} below {}", self.table[idx].network);
                    let new = self.new_node(path, None, idx);
                    let child = self.set_child(idx, Some(new), right);
                    self.set_child(new, child, child_right);
                    idx = new;
                }
            }
        }
    }

    /// Remove the entry stored for exactly `network`. Removing a network that is not in the trie
    /// returns `Ok(None)`.
    ///
    /// Afterwards, nodes that neither carry an entry nor join two subtrees are spliced out of the
    /// trie, so removing all entries leaves only the root behind.
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let mut trie = PrefixTrie::new(IpVersion::V4);
    /// let net: Network = "192.168.1.0/24".parse()?;
    /// trie.insert(net)?;
    /// assert_eq!(trie.remove(&net)?, Some(net));
    /// assert_eq!(trie.remove(&net)?, None);
    /// assert!(trie.is_empty());
    /// # Ok::<(), Error>(())
    /// ```
    pub fn remove(&mut self, network: &Network) -> Result<Option<E>, Error> {
        self.check_version(network.version())?;
        let mut idx = 0;
        loop {
            match self.get_direction(idx, network) {
                Direction::Reached => break,
                Direction::Enter { next } => idx = next,
                Direction::Missing => {
                    trace!("cannot remove {network}: not found");
                    return Ok(None);
                }
            }
        }
        let Some(entry) = self.table[idx].entry.take() else {
            trace!("cannot remove {network}: no entry");
            return Ok(None);
        };
        self.count -= 1;
        self.compress(idx);
        Ok(Some(entry))
    }

    /// Splice out `idx` and its ancestors while they carry no entry and have at most one child.
    fn compress(&mut self, mut idx: usize) {
        loop {
            let node = &self.table[idx];
            let Some(parent) = node.parent else {
                // the root always stays in the trie
                return;
            };
            if node.entry.is_some() || node.num_children() > 1 {
                return;
            }
            let child = node.left.or(node.right);
            let right = match self.table[parent].right {
                Some(x) if x == idx => true,
                _ => {
                    debug_assert_eq!(self.table[parent].left, Some(idx));
                    false
                }
            };
            trace!(
                "splice {} out from below {}",
                self.table[idx].network,
                self.table[parent].network
            );
            self.set_child(parent, child, right);
            self.table[idx].parent = None;
            self.table[idx].left = None;
            self.table[idx].right = None;
            self.free.push(idx);
            idx = parent;
        }
    }
}

impl<E: PartialEq> PartialEq for PrefixTrie<E> {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && self.iter().eq(other.iter())
    }
}

impl<E: Eq> Eq for PrefixTrie<E> {}

/// Insert all entries. Entries of the other address family are skipped silently (logged at trace
/// level); use [`PrefixTrie::insert`] to observe [`Error::VersionMismatch`], or a
/// [`VersionedRanger`](crate::VersionedRanger) to keep both families.
impl<E: RangerEntry> Extend<E> for PrefixTrie<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for entry in iter {
            if self.insert(entry).is_err() {
                trace!("skip an entry of the wrong address family");
            }
        }
    }
}
