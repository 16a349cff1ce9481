//! Store a custom payload next to each network: here, the autonomous system announcing it.

use cidr_ranger::*;

/// A network together with the number of the autonomous system announcing it.
struct AsnEntry {
    network: Network,
    asn: String,
}

impl AsnEntry {
    fn new(network: &str, asn: &str) -> Result<Self, Error> {
        Ok(Self {
            network: network.parse()?,
            asn: asn.to_string(),
        })
    }
}

impl RangerEntry for AsnEntry {
    fn network(&self) -> Network {
        self.network
    }
}

fn main() -> Result<(), Error> {
    let mut ranger = VersionedRanger::new();

    ranger.insert(AsnEntry::new("192.168.1.0/24", "0001")?)?;
    ranger.insert(AsnEntry::new("128.168.1.0/24", "0002")?)?;

    let contains = ranger.contains(&"128.168.1.7".parse()?)?;
    println!("Contains: {contains}");

    let ip: NetworkNumber = "192.168.1.42".parse()?;
    println!("Entries for {ip}:");
    for entry in ranger.containing_networks(&ip)? {
        println!("{}, {}", entry.network, entry.asn);
    }

    Ok(())
}
