//! A linear-scan ranger, used as the reference for all other rangers in the tests.

use std::collections::HashMap;

use crate::{Error, IpVersion, Network, NetworkNumber, Ranger, RangerEntry};

#[derive(Clone, Debug)]
pub(crate) struct BruteRanger<E> {
    v4: HashMap<Network, E>,
    v6: HashMap<Network, E>,
}

impl<E> Default for BruteRanger<E> {
    fn default() -> Self {
        Self {
            v4: HashMap::new(),
            v6: HashMap::new(),
        }
    }
}

impl<E> BruteRanger<E> {
    fn family(&self, version: IpVersion) -> &HashMap<Network, E> {
        match version {
            IpVersion::V4 => &self.v4,
            IpVersion::V6 => &self.v6,
        }
    }

    fn family_mut(&mut self, version: IpVersion) -> &mut HashMap<Network, E> {
        match version {
            IpVersion::V4 => &mut self.v4,
            IpVersion::V6 => &mut self.v6,
        }
    }
}

impl<E: RangerEntry> Ranger<E> for BruteRanger<E> {
    fn insert(&mut self, entry: E) -> Result<(), Error> {
        let network = entry.network();
        self.family_mut(network.version()).insert(network, entry);
        Ok(())
    }

    fn remove(&mut self, network: &Network) -> Result<Option<E>, Error> {
        Ok(self.family_mut(network.version()).remove(network))
    }

    fn contains(&self, number: &NetworkNumber) -> Result<bool, Error> {
        Ok(self
            .family(number.version())
            .keys()
            .any(|n| n.contains(number)))
    }

    fn containing_networks(&self, number: &NetworkNumber) -> Result<Vec<&E>, Error> {
        let mut result: Vec<(&Network, &E)> = self
            .family(number.version())
            .iter()
            .filter(|(n, _)| n.contains(number))
            .collect();
        result.sort_by_key(|(n, _)| n.prefix_len());
        Ok(result.into_iter().map(|(_, e)| e).collect())
    }

    fn covered_networks(&self, network: &Network) -> Result<Vec<&E>, Error> {
        let mut result: Vec<(&Network, &E)> = self
            .family(network.version())
            .iter()
            .filter(|(n, _)| network.covers(n))
            .collect();
        result.sort_by_key(|(n, _)| **n);
        Ok(result.into_iter().map(|(_, e)| e).collect())
    }

    fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }
}
