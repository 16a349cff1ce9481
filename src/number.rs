//! Fixed-width network numbers: IPv4 and IPv6 addresses as big-endian sequences of 32-bit words.

use std::{
    fmt::{Debug, Display, Formatter},
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

use num_traits::{PrimInt, Zero};

use crate::Error;

/// Number of bits in a single word of a [`NetworkNumber`].
pub const BITS_PER_WORD: u8 = 32;

/// The address family of a network number or a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IpVersion {
    /// 32 bit addresses, stored in one word.
    V4,
    /// 128 bit addresses, stored in four words.
    V6,
}

impl IpVersion {
    /// Number of 32-bit words that make up an address of this family.
    #[inline(always)]
    pub const fn word_count(self) -> usize {
        match self {
            IpVersion::V4 => 1,
            IpVersion::V6 => 4,
        }
    }

    /// Width of an address of this family in bits.
    #[inline(always)]
    pub const fn total_bits(self) -> u8 {
        match self {
            IpVersion::V4 => 32,
            IpVersion::V6 => 128,
        }
    }
}

/// A single IPv4 or IPv6 address, stored as 32-bit words with the most significant word first.
///
/// IPv4 numbers use one word, IPv6 numbers use four. Any other length is rejected when
/// constructing the number:
///
/// ```
/// # use cidr_ranger::*;
/// let v4 = NetworkNumber::new(&[0x8000_0000])?;
/// assert_eq!(v4.version(), IpVersion::V4);
/// assert_eq!(v4.to_string(), "128.0.0.0");
/// assert_eq!(NetworkNumber::new(&[1, 2]), Err(Error::InvalidNetworkNumberInput));
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetworkNumber {
    version: IpVersion,
    // unused trailing words of an IPv4 number are always zero.
    words: [u32; 4],
}

impl NetworkNumber {
    /// Create a network number from its words, most significant first. Exactly one word (IPv4) or
    /// four words (IPv6) are accepted.
    pub fn new(words: &[u32]) -> Result<Self, Error> {
        match *words {
            [w] => Ok(Self::from_u32(w)),
            [a, b, c, d] => Ok(Self {
                version: IpVersion::V6,
                words: [a, b, c, d],
            }),
            _ => Err(Error::InvalidNetworkNumberInput),
        }
    }

    /// Create a network number from its big-endian byte representation. Only 4-byte (IPv4) or
    /// 16-byte (IPv6) slices are accepted. A 16-byte IPv4-mapped address (`::ffff:a.b.c.d`)
    /// yields an IPv4 number.
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let nn = NetworkNumber::from_bytes(&[192, 168, 0, 1])?;
    /// assert_eq!(nn.words(), &[0xc0a8_0001]);
    /// let mapped = NetworkNumber::from_bytes(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 255, 255, 192, 168, 0, 1])?;
    /// assert_eq!(mapped, nn);
    /// assert!(NetworkNumber::from_bytes(&[1, 1, 1, 1, 1]).is_err());
    /// # Ok::<(), Error>(())
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
            Ok(Ipv4Addr::from(octets).into())
        } else if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
            Ok(Self::from_ipv6_unmapped(Ipv6Addr::from(octets)))
        } else {
            Err(Error::InvalidNetworkNumberInput)
        }
    }

    /// Turn an IPv4-mapped address into an IPv4 number.
    #[inline(always)]
    fn from_ipv6_unmapped(addr: Ipv6Addr) -> Self {
        match addr.to_ipv4_mapped() {
            Some(addr) => addr.into(),
            None => addr.into(),
        }
    }

    #[inline(always)]
    fn from_u32(repr: u32) -> Self {
        Self {
            version: IpVersion::V4,
            words: [repr, 0, 0, 0],
        }
    }

    #[inline(always)]
    fn from_u128(repr: u128) -> Self {
        Self {
            version: IpVersion::V6,
            words: [
                (repr >> 96) as u32,
                (repr >> 64) as u32,
                (repr >> 32) as u32,
                repr as u32,
            ],
        }
    }

    /// The address family of the number.
    #[inline(always)]
    pub fn version(&self) -> IpVersion {
        self.version
    }

    /// The words of this number, most significant first.
    #[inline(always)]
    pub fn words(&self) -> &[u32] {
        &self.words[..self.version.word_count()]
    }

    /// Width of the number in bits (32 or 128).
    #[inline(always)]
    pub fn total_bits(&self) -> u8 {
        self.version.total_bits()
    }

    /// The number as one unsigned integer. IPv4 numbers occupy the lower 32 bits.
    #[inline(always)]
    pub(crate) fn repr(&self) -> u128 {
        self.words()
            .iter()
            .fold(0u128, |acc, w| (acc << BITS_PER_WORD) | *w as u128)
    }

    /// Check whether the bit at `position` is set. Positions are counted from the least
    /// significant bit, so bit 31 of an IPv4 number is its most significant bit.
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let nn = NetworkNumber::from_bytes(&[128, 0, 0, 0])?;
    /// assert_eq!(nn.bit(31), Ok(true));
    /// assert_eq!(nn.bit(30), Ok(false));
    /// assert_eq!(nn.bit(32), Err(Error::InvalidBitPosition));
    /// # Ok::<(), Error>(())
    /// ```
    #[inline(always)]
    pub fn bit(&self, position: u8) -> Result<bool, Error> {
        if position >= self.total_bits() {
            return Err(Error::InvalidBitPosition);
        }
        let words = self.words();
        let word = words[words.len() - 1 - (position / BITS_PER_WORD) as usize];
        Ok((word >> (position % BITS_PER_WORD)) & 1 == 1)
    }

    /// Zero all bits except the `len` most significant ones. `len` must not exceed the width.
    pub(crate) fn mask(&self, len: u8) -> Self {
        debug_assert!(len <= self.total_bits());
        let mut words = self.words;
        for (i, word) in words
            .iter_mut()
            .take(self.version.word_count())
            .enumerate()
        {
            let covered = len
                .saturating_sub(i as u8 * BITS_PER_WORD)
                .min(BITS_PER_WORD);
            *word &= mask_from_prefix_len::<u32>(covered);
        }
        Self {
            version: self.version,
            words,
        }
    }

    /// The next number, treating all words as one big-endian unsigned integer. Incrementing the
    /// largest address of a family wraps around to the zero address; use
    /// [`NetworkNumber::checked_next`] to detect that boundary.
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let nn = NetworkNumber::from_bytes(&[0, 255, 255, 255])?;
    /// assert_eq!(nn.next(), NetworkNumber::from_bytes(&[1, 0, 0, 0])?);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn next(&self) -> Self {
        match self.version {
            IpVersion::V4 => Self::from_u32(self.words[0].wrapping_add(1)),
            IpVersion::V6 => Self::from_u128(self.repr().wrapping_add(1)),
        }
    }

    /// The previous number, treating all words as one big-endian unsigned integer. Decrementing
    /// the zero address wraps around to the largest address of the family; use
    /// [`NetworkNumber::checked_previous`] to detect that boundary.
    pub fn previous(&self) -> Self {
        match self.version {
            IpVersion::V4 => Self::from_u32(self.words[0].wrapping_sub(1)),
            IpVersion::V6 => Self::from_u128(self.repr().wrapping_sub(1)),
        }
    }

    /// The next number, or `None` if `self` is the largest address of its family.
    pub fn checked_next(&self) -> Option<Self> {
        match self.version {
            IpVersion::V4 => self.words[0].checked_add(1).map(Self::from_u32),
            IpVersion::V6 => self.repr().checked_add(1).map(Self::from_u128),
        }
    }

    /// The previous number, or `None` if `self` is the zero address.
    pub fn checked_previous(&self) -> Option<Self> {
        match self.version {
            IpVersion::V4 => self.words[0].checked_sub(1).map(Self::from_u32),
            IpVersion::V6 => self.repr().checked_sub(1).map(Self::from_u128),
        }
    }

    /// Scan both numbers from the most significant bit downwards and return the position just
    /// above the first bit in which they differ, or `0` if they are equal. The result is the
    /// number of trailing bits *not* shared by both numbers.
    ///
    /// Fails with [`Error::VersionMismatch`] if the families differ, and with
    /// [`Error::NoGreatestCommonBit`] if the most significant bit already differs.
    ///
    /// ```
    /// # use cidr_ranger::*;
    /// let a = NetworkNumber::new(&[0x8000_0000])?;
    /// let b = NetworkNumber::new(&[0xc000_0000])?;
    /// assert_eq!(a.least_common_bit_position(&b), Ok(31));
    /// assert_eq!(a.least_common_bit_position(&a), Ok(0));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn least_common_bit_position(&self, other: &Self) -> Result<u8, Error> {
        if self.version != other.version {
            return Err(Error::VersionMismatch);
        }
        let diff = self.repr() ^ other.repr();
        if diff == 0 {
            return Ok(0);
        }
        let position = (127 - diff.leading_zeros()) as u8;
        if position + 1 == self.total_bits() {
            Err(Error::NoGreatestCommonBit)
        } else {
            Ok(position + 1)
        }
    }

    /// Get the address as a [`std::net::IpAddr`].
    pub fn ip_addr(&self) -> IpAddr {
        match self.version {
            IpVersion::V4 => IpAddr::V4(self.words[0].into()),
            IpVersion::V6 => IpAddr::V6(self.repr().into()),
        }
    }
}

/// Create a mask in which the `len` most significant bits are set.
pub(crate) fn mask_from_prefix_len<R>(len: u8) -> R
where
    R: PrimInt + Zero,
{
    if len as u32 == R::zero().count_zeros() {
        !R::zero()
    } else if len == 0 {
        R::zero()
    } else {
        !((!R::zero()) >> len as usize)
    }
}

impl From<Ipv4Addr> for NetworkNumber {
    fn from(addr: Ipv4Addr) -> Self {
        Self::from_u32(addr.into())
    }
}

/// The number keeps the IPv6 family, even for IPv4-mapped addresses. Parsing and
/// [`NetworkNumber::from_bytes`] map those to IPv4 instead.
impl From<Ipv6Addr> for NetworkNumber {
    fn from(addr: Ipv6Addr) -> Self {
        Self::from_u128(addr.into())
    }
}

impl From<IpAddr> for NetworkNumber {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(addr) => addr.into(),
            IpAddr::V6(addr) => addr.into(),
        }
    }
}

impl From<NetworkNumber> for IpAddr {
    fn from(nn: NetworkNumber) -> Self {
        nn.ip_addr()
    }
}

impl TryFrom<&[u8]> for NetworkNumber {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u32]> for NetworkNumber {
    type Error = Error;

    fn try_from(words: &[u32]) -> Result<Self, Error> {
        Self::new(words)
    }
}

impl FromStr for NetworkNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.parse::<IpAddr>() {
            Ok(IpAddr::V4(addr)) => Ok(addr.into()),
            Ok(IpAddr::V6(addr)) => Ok(Self::from_ipv6_unmapped(addr)),
            Err(_) => Err(Error::InvalidNetworkNumberInput),
        }
    }
}

impl Display for NetworkNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.ip_addr(), f)
    }
}

impl Debug for NetworkNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.ip_addr(), f)
    }
}
