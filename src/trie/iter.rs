//! Module that contains the implementation for the iterators

use super::PrefixTrie;

/// An iterator over all entries of a [`PrefixTrie`] in depth order.
#[derive(Clone)]
pub struct Iter<'a, E> {
    pub(crate) trie: &'a PrefixTrie<E>,
    pub(crate) nodes: Vec<usize>,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        while let Some(cur) = self.nodes.pop() {
            let node = &self.trie.table[cur];
            if let Some(right) = node.right {
                self.nodes.push(right);
            }
            if let Some(left) = node.left {
                self.nodes.push(left);
            }
            if let Some(entry) = &node.entry {
                return Some(entry);
            }
        }
        None
    }
}

impl<'a, E> IntoIterator for &'a PrefixTrie<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over all owned entries of a [`PrefixTrie`] in depth order.
#[derive(Clone)]
pub struct IntoIter<E> {
    trie: PrefixTrie<E>,
    nodes: Vec<usize>,
}

impl<E> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        while let Some(cur) = self.nodes.pop() {
            let node = &mut self.trie.table[cur];
            if let Some(right) = node.right {
                self.nodes.push(right);
            }
            if let Some(left) = node.left {
                self.nodes.push(left);
            }
            if let Some(entry) = node.entry.take() {
                return Some(entry);
            }
        }
        None
    }
}

impl<E> IntoIterator for PrefixTrie<E> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            trie: self,
            nodes: vec![0],
        }
    }
}
