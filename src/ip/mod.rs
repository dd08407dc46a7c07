//! IPv4 address arithmetic.
//!
//! This module converts between dotted-quad text and 32-bit integers,
//! steps from one subnet to the next, and parses the CIDR blocks used
//! as point-to-point address pools.

pub mod address;
pub mod prefix;

// Re-export commonly used items
pub use address::{address_to_integer, integer_to_address, next_subnet, AddressError};
pub use prefix::Ipv4Prefix;
