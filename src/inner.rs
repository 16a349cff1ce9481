//! The nodes stored in the arena of a [`crate::PrefixTrie`].

use crate::{Error, Network, NetworkNumber};

#[derive(Clone)]
pub(crate) struct Node<E> {
    pub(crate) network: Network,
    pub(crate) entry: Option<E>,
    /// Non-owning link used when splicing nodes out during removal. `None` only for the root.
    pub(crate) parent: Option<usize>,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

impl<E> Node<E> {
    pub(crate) fn new(network: Network, entry: Option<E>, parent: Option<usize>) -> Self {
        Self {
            network,
            entry,
            parent,
            left: None,
            right: None,
        }
    }

    /// Number of leading bits shared by everything below this node.
    #[inline(always)]
    pub(crate) fn num_bits_skipped(&self) -> u8 {
        self.network.prefix_len()
    }

    /// Bit index (counted from the least significant bit) that decides between the two children.
    /// Host routes have no such bit, and can therefore never have any children.
    #[inline(always)]
    pub(crate) fn target_bit_position(&self) -> Option<u8> {
        self.network
            .total_bits()
            .checked_sub(self.num_bits_skipped() + 1)
    }

    /// Whether `number` continues on the right (`1`) branch below this node.
    #[inline(always)]
    pub(crate) fn branch(&self, number: &NetworkNumber) -> Result<bool, Error> {
        let position = self
            .target_bit_position()
            .ok_or(Error::InvalidBitPosition)?;
        number.bit(position)
    }

    #[inline(always)]
    pub(crate) fn child(&self, right: bool) -> Option<usize> {
        if right {
            self.right
        } else {
            self.left
        }
    }

    #[inline(always)]
    pub(crate) fn num_children(&self) -> usize {
        self.left.is_some() as usize + self.right.is_some() as usize
    }
}

pub(crate) enum Direction {
    /// The network is already reached.
    Reached,
    /// Enter the next index and search again.
    Enter { next: usize },
    /// The network is not in the trie.
    Missing,
}

pub(crate) enum DirectionForInsert {
    /// The network is already reached.
    Reached,
    /// Enter the next index and search again.
    Enter { next: usize },
    /// Insert a new leaf at the given position.
    NewLeaf { right: bool },
    /// Split the edge to the child at the given position with an entry-less node for `path`. The
    /// old child is moved below the new node, on the side given by `child_right`.
    NewPath {
        path: Network,
        right: bool,
        child_right: bool,
    },
}
