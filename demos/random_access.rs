use std::net::Ipv4Addr;

use cidr_ranger::*;

use rand::prelude::*;

fn main() -> Result<(), Error> {
    let mut ranger = VersionedRanger::<(Network, u32)>::new();

    let mut rng = thread_rng();
    let mut hits = 0usize;

    for _ in 0..1_000_000 {
        let addr = NetworkNumber::from(Ipv4Addr::new(rng.gen(), rng.gen(), 0, 0));
        let network = Network::new(addr, rng.gen_range(1..=16))?;

        if rng.gen_bool(0.6) {
            let value: u32 = rng.gen::<u8>() as u32;
            ranger.insert((network, value))?;
        } else if rng.gen_bool(0.5) {
            ranger.remove(&network)?;
        } else {
            let probe = NetworkNumber::from(Ipv4Addr::from(rng.gen::<u32>()));
            hits += ranger.containing_networks(&probe)?.len();
        }
    }

    println!("{} networks left, {hits} containing hits", ranger.len());
    Ok(())
}
