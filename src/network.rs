//! Description of a [`Network`], a masked network number together with its prefix length.

use std::fmt::{Debug, Display, Formatter};

use crate::{Error, IpVersion, NetworkNumber};

/// An IP network (CIDR block): a [`NetworkNumber`] masked to a prefix length.
///
/// The address bits beyond the prefix length are always zero, so two networks are equal if and
/// only if they have the same family, the same prefix length, and the same masked address.
///
/// ```
/// # use cidr_ranger::*;
/// let net = Network::new("192.168.0.1".parse()?, 24)?;
/// assert_eq!(net.to_string(), "192.168.0.0/24");
/// assert_eq!(Network::new("10.0.0.0".parse()?, 33), Err(Error::InvalidNetworkInput));
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Network {
    number: NetworkNumber,
    len: u8,
}

impl Network {
    /// Create a new network, masking `number` to `len` bits. Fails with
    /// [`Error::InvalidNetworkInput`] if `len` is larger than the width of the address family.
    pub fn new(number: NetworkNumber, len: u8) -> Result<Self, Error> {
        if len > number.total_bits() {
            return Err(Error::InvalidNetworkInput);
        }
        Ok(Self::new_unchecked(number, len))
    }

    /// Create a network whose prefix length is known to be valid.
    #[inline(always)]
    pub(crate) fn new_unchecked(number: NetworkNumber, len: u8) -> Self {
        Self {
            number: number.mask(len),
            len,
        }
    }

    /// The network that contains every address of the given family (`0.0.0.0/0` or `::/0`).
    pub fn zero(version: IpVersion) -> Self {
        let number = match version {
            IpVersion::V4 => NetworkNumber::from(std::net::Ipv4Addr::UNSPECIFIED),
            IpVersion::V6 => NetworkNumber::from(std::net::Ipv6Addr::UNSPECIFIED),
        };
        Self { number, len: 0 }
    }

    /// The network that contains only `number` (a `/32` or `/128` host route).
    pub fn host(number: NetworkNumber) -> Self {
        Self {
            number,
            len: number.total_bits(),
        }
    }

    /// The (masked) network address.
    #[inline(always)]
    pub fn number(&self) -> &NetworkNumber {
        &self.number
    }

    /// The prefix length.
    #[inline(always)]
    pub fn prefix_len(&self) -> u8 {
        self.len
    }

    /// The address family.
    #[inline(always)]
    pub fn version(&self) -> IpVersion {
        self.number.version()
    }

    /// Width of the address family in bits.
    #[inline(always)]
    pub fn total_bits(&self) -> u8 {
        self.number.total_bits()
    }

    /// Mask the network address to a different prefix length. The new length may be shorter or
    /// longer than the current one; masking to the current length returns `self`.
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let net: Network = "192.168.0.0/16".parse()?;
    /// assert_eq!(net.masked(8)?, "192.0.0.0/8".parse::<Network>()?);
    /// assert_eq!(net.masked(18)?, "192.168.0.0/18".parse::<Network>()?);
    /// assert!(net.masked(33).is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn masked(&self, len: u8) -> Result<Self, Error> {
        Self::new(self.number, len)
    }

    /// Check whether `number` lies within this network. Numbers of a different family are never
    /// contained.
    #[inline(always)]
    pub fn contains(&self, number: &NetworkNumber) -> bool {
        number.version() == self.version() && number.mask(self.len) == self.number
    }

    /// Check whether `self` is a prefix ancestor of `other` (or equal to it), i.e., whether the
    /// address range of `self` includes the whole address range of `other`.
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let a: Network = "10.0.0.0/15".parse()?;
    /// let b: Network = "10.0.0.0/16".parse()?;
    /// assert!(a.covers(&b));
    /// assert!(a.covers(&a));
    /// assert!(!b.covers(&a));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline(always)]
    pub fn covers(&self, other: &Network) -> bool {
        self.len <= other.len && self.contains(&other.number)
    }

    /// Return the bit position just above the most significant bit in which the two networks
    /// differ, considering at most the shorter of both prefix lengths. The length of the longest
    /// common prefix is `total_bits - position`.
    ///
    /// Fails with [`Error::VersionMismatch`] if the families differ, and with
    /// [`Error::NoGreatestCommonBit`] if the most significant bit already differs.
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let a: Network = "0.0.1.0/24".parse()?;
    /// let b: Network = "0.0.0.0/24".parse()?;
    /// assert_eq!(a.least_common_bit_position(&b)?, 9);
    /// let c: Network = "128.0.0.0/24".parse()?;
    /// assert_eq!(c.least_common_bit_position(&b), Err(Error::NoGreatestCommonBit));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn least_common_bit_position(&self, other: &Network) -> Result<u8, Error> {
        let lcb = self.number.least_common_bit_position(&other.number)?;
        let mask_position = self.total_bits() - self.len.min(other.len);
        Ok(lcb.max(mask_position))
    }

    /// The length of the longest prefix shared by both networks.
    #[inline(always)]
    pub(crate) fn common_prefix_len(&self, other: &Network) -> Result<u8, Error> {
        Ok(self.total_bits() - self.least_common_bit_position(other)?)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.number, self.len)
    }
}

impl Debug for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.number, self.len)
    }
}

impl From<NetworkNumber> for Network {
    fn from(number: NetworkNumber) -> Self {
        Self::host(number)
    }
}

#[cfg(feature = "ipnet")]
mod ipnet_impl {
    use ipnet::{IpNet, Ipv4Net, Ipv6Net};

    use super::*;

    impl From<Ipv4Net> for Network {
        fn from(net: Ipv4Net) -> Self {
            Network::new_unchecked(net.addr().into(), net.prefix_len())
        }
    }

    impl From<Ipv6Net> for Network {
        fn from(net: Ipv6Net) -> Self {
            Network::new_unchecked(net.addr().into(), net.prefix_len())
        }
    }

    impl From<IpNet> for Network {
        fn from(net: IpNet) -> Self {
            Network::new_unchecked(net.addr().into(), net.prefix_len())
        }
    }

    impl From<Network> for IpNet {
        fn from(net: Network) -> Self {
            let len = net.prefix_len();
            debug_assert!(len <= net.total_bits());
            match IpNet::new(net.number().ip_addr(), len) {
                Ok(ipnet) => ipnet,
                Err(_) => unreachable!("prefix length {len} exceeds the width of {net:?}"),
            }
        }
    }

    /// Parse a network in CIDR notation. Host bits are masked away, so `"192.168.0.1/24"` is
    /// parsed as `192.168.0.0/24`.
    impl std::str::FromStr for Network {
        type Err = Error;

        fn from_str(s: &str) -> Result<Self, Error> {
            s.parse::<IpNet>()
                .map(Network::from)
                .map_err(|_| Error::InvalidNetworkInput)
        }
    }
}

#[cfg(feature = "ipnetwork")]
mod ipnetwork_impl {
    use ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};

    use super::*;

    impl From<Ipv4Network> for Network {
        fn from(net: Ipv4Network) -> Self {
            Network::new_unchecked(net.ip().into(), net.prefix())
        }
    }

    impl From<Ipv6Network> for Network {
        fn from(net: Ipv6Network) -> Self {
            Network::new_unchecked(net.ip().into(), net.prefix())
        }
    }

    impl From<IpNetwork> for Network {
        fn from(net: IpNetwork) -> Self {
            Network::new_unchecked(net.ip().into(), net.prefix())
        }
    }
}

#[cfg(feature = "cidr")]
mod cidr_impl {
    use cidr::{IpCidr, Ipv4Cidr, Ipv6Cidr};

    use super::*;

    impl From<Ipv4Cidr> for Network {
        fn from(net: Ipv4Cidr) -> Self {
            Network::new_unchecked(net.first_address().into(), net.network_length())
        }
    }

    impl From<Ipv6Cidr> for Network {
        fn from(net: Ipv6Cidr) -> Self {
            Network::new_unchecked(net.first_address().into(), net.network_length())
        }
    }

    impl From<IpCidr> for Network {
        fn from(net: IpCidr) -> Self {
            Network::new_unchecked(net.first_address().into(), net.network_length())
        }
    }
}
