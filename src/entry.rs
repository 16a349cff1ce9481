//! The [`RangerEntry`] trait for values that can be stored in a ranger.

use crate::Network;

/// A value stored in a ranger. The only thing the rangers ever look at is the network of an
/// entry; everything else is an opaque payload that is handed back by the queries.
///
/// ```
/// # use cidr_ranger::*;
/// struct Asn {
///     net: Network,
///     asn: u32,
/// }
///
/// impl RangerEntry for Asn {
///     fn network(&self) -> Network {
///         self.net
///     }
/// }
///
/// let mut ranger = VersionedRanger::new();
/// ranger.insert(Asn { net: "10.0.0.0/8".parse()?, asn: 64512 })?;
/// let hits = ranger.containing_networks(&"10.1.2.3".parse()?)?;
/// assert_eq!(hits.iter().map(|e| e.asn).collect::<Vec<_>>(), vec![64512]);
/// # Ok::<(), Error>(())
/// ```
pub trait RangerEntry {
    /// The network this entry belongs to.
    fn network(&self) -> Network;
}

/// The basic entry, storing only the network itself.
impl RangerEntry for Network {
    #[inline(always)]
    fn network(&self) -> Network {
        *self
    }
}

/// A network with an attached payload.
impl<T> RangerEntry for (Network, T) {
    #[inline(always)]
    fn network(&self) -> Network {
        self.0
    }
}

impl<E: RangerEntry + ?Sized> RangerEntry for Box<E> {
    fn network(&self) -> Network {
        (**self).network()
    }
}

impl<E: RangerEntry + ?Sized> RangerEntry for std::rc::Rc<E> {
    fn network(&self) -> Network {
        (**self).network()
    }
}

impl<E: RangerEntry + ?Sized> RangerEntry for std::sync::Arc<E> {
    fn network(&self) -> Network {
        (**self).network()
    }
}

macro_rules! impl_entry_via_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl RangerEntry for $t {
                #[inline(always)]
                fn network(&self) -> Network {
                    Network::from(*self)
                }
            }
        )*
    };
}

#[cfg(feature = "ipnet")]
impl_entry_via_from!(ipnet::IpNet, ipnet::Ipv4Net, ipnet::Ipv6Net);

#[cfg(feature = "ipnetwork")]
impl_entry_via_from!(
    ipnetwork::IpNetwork,
    ipnetwork::Ipv4Network,
    ipnetwork::Ipv6Network,
);

#[cfg(feature = "cidr")]
impl_entry_via_from!(cidr::IpCidr, cidr::Ipv4Cidr, cidr::Ipv6Cidr);
