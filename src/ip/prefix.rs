//! CIDR block parsing and capacity.

use super::address::{address_to_integer, integer_to_address, AddressError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An IPv4 block written as `address/length`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4Prefix {
    network: u32,
    length: u8,
}

impl Ipv4Prefix {
    /// Build a prefix from an integer address and a length in `0..=32`
    pub fn new(network: u32, length: u8) -> Result<Self, AddressError> {
        if length > 32 {
            return Err(AddressError::Range(format!("prefix length /{} exceeds /32", length)));
        }
        Ok(Ipv4Prefix { network, length })
    }

    /// Base address as given, host bits included
    pub fn network(&self) -> u32 {
        self.network
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    /// Number of addresses covered by the block
    pub fn block_size(&self) -> u64 {
        1u64 << (32 - u32::from(self.length))
    }

    /// Number of `/subnet_length` subnets that fit in this block.
    ///
    /// Zero when `subnet_length` is shorter than the block itself.
    pub fn subnet_count(&self, subnet_length: u8) -> u64 {
        if subnet_length > 32 || subnet_length < self.length {
            return 0;
        }
        self.block_size() / (1u64 << (32 - u32::from(subnet_length)))
    }

    fn mask(&self) -> u32 {
        if self.length == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(self.length))
        }
    }

    /// True when the base address has bits set below the prefix length
    pub fn has_host_bits(&self) -> bool {
        self.network & !self.mask() != 0
    }

    /// The enclosing block of a shorter length, with host bits cleared
    pub fn widened(&self, length: u8) -> Ipv4Prefix {
        let length = length.min(self.length);
        let mask = if length == 0 { 0 } else { u32::MAX << (32 - u32::from(length)) };
        Ipv4Prefix {
            network: self.network & mask,
            length,
        }
    }
}

impl FromStr for Ipv4Prefix {
    type Err = AddressError;

    /// Parse `a.b.c.d/len`. Trailing octets may be omitted and are taken as
    /// zero, so `192.168/16` reads as `192.168.0.0/16`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (address, length) = s
            .split_once('/')
            .ok_or_else(|| AddressError::Format(format!("'{}' is missing a '/length' suffix", s)))?;

        let length: u8 = length
            .parse()
            .map_err(|_| AddressError::Format(format!("'{}' has a non-numeric prefix length", s)))?;

        let octets = address.split('.').count();
        if octets == 0 || octets > 4 {
            return Err(AddressError::Format(format!("'{}' has {} octets", s, octets)));
        }
        let mut expanded = address.to_string();
        for _ in octets..4 {
            expanded.push_str(".0");
        }

        Ipv4Prefix::new(address_to_integer(&expanded)?, length)
    }
}

impl fmt::Display for Ipv4Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", integer_to_address(self.network), self.length)
    }
}
