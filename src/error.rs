//! Errors returned by network arithmetic and by the rangers.

use thiserror::Error;

/// Error that can occur when constructing networks or when querying a ranger.
///
/// Removing a network that was never inserted is not an error, neither is inserting a network
/// twice.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The prefix length does not fit into the address family.
    #[error("invalid network input")]
    InvalidNetworkInput,
    /// The address is neither in IPv4 form (4 bytes, 1 word) nor in IPv6 form (16 bytes, 4
    /// words).
    #[error("invalid network number input")]
    InvalidNetworkNumberInput,
    /// A bit outside of the address width was requested.
    #[error("bit position not valid")]
    InvalidBitPosition,
    /// An IPv4 value was combined with an IPv6 value.
    #[error("network number versions do not match")]
    VersionMismatch,
    /// The two networks differ in their most significant bit, so there is no common prefix
    /// other than the whole address space.
    #[error("no greatest common bit")]
    NoGreatestCommonBit,
}
