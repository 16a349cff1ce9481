//! Formatting implementation for the PrefixTrie

use std::fmt::{Debug, Display, Formatter, Result};

use super::*;

/// Render the tree structure, one node per line:
///
/// ```text
/// 0.0.0.0/0 (target_pos:31:has_entry:false)
/// | 1--> 192.168.0.0/23 (target_pos:8:has_entry:false)
/// | | 0--> 192.168.0.0/24 (target_pos:7:has_entry:true)
/// | | 1--> 192.168.1.0/24 (target_pos:7:has_entry:true)
/// ```
///
/// Host routes, which cannot branch any further, are shown with a target position of `-1`.
impl<E> Display for PrefixTrie<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        DisplayNode(self, 0, 0).fmt(f)
    }
}

struct DisplayNode<'a, E>(&'a PrefixTrie<E>, usize, usize);

impl<E> Display for DisplayNode<'_, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let DisplayNode(trie, idx, level) = *self;
        let node = &trie.table[idx];
        let target = node
            .target_bit_position()
            .map(i16::from)
            .unwrap_or(-1);
        write!(
            f,
            "{} (target_pos:{}:has_entry:{})",
            node.network,
            target,
            node.entry.is_some()
        )?;
        for (bit, child) in [(0, node.left), (1, node.right)] {
            if let Some(child) = child {
                writeln!(f)?;
                for _ in 0..=level {
                    f.write_str("| ")?;
                }
                write!(f, "{bit}--> {}", DisplayNode(trie, child, level + 1))?;
            }
        }
        Ok(())
    }
}

impl<E: Debug> Debug for PrefixTrie<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        DebugPrefixTrie(self, 0).fmt(f)
    }
}

struct DebugPrefixTrie<'a, E>(&'a PrefixTrie<E>, usize);

impl<E: Debug> Debug for DebugPrefixTrie<'_, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let trie = self.0;
        let idx = self.1;
        let node = &trie.table[idx];
        match (node.entry.as_ref(), node.left, node.right) {
            (None, None, None) => Debug::fmt(&node.network, f),
            (None, None, Some(child)) | (None, Some(child), None) => f
                .debug_map()
                .entry(&node.network, &Self(trie, child))
                .finish(),
            (None, Some(left), Some(right)) => f
                .debug_map()
                .entry(&node.network, &(Self(trie, left), Self(trie, right)))
                .finish(),
            (Some(e), None, None) => f.debug_map().entry(&node.network, e).finish(),
            (Some(e), None, Some(child)) | (Some(e), Some(child), None) => f
                .debug_map()
                .entry(&node.network, &(e, Self(trie, child)))
                .finish(),
            (Some(e), Some(left), Some(right)) => f
                .debug_map()
                .entry(&node.network, &(e, Self(trie, left), Self(trie, right)))
                .finish(),
        }
    }
}

impl<E: Debug> Debug for VersionedRanger<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("VersionedRanger")
            .field("ipv4", &self.v4)
            .field("ipv6", &self.v6)
            .finish()
    }
}
