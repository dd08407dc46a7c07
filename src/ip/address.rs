//! Dotted-quad conversion and subnet stepping.
//!
//! All functions here are pure. Overflow past `255.255.255.255` is
//! reported as an error instead of wrapping around to `0.0.0.0`.

/// Errors raised by address arithmetic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Invalid IPv4 address format: {0}")]
    Format(String),

    #[error("IPv4 address out of range: {0}")]
    Range(String),
}

/// Number of addresses in the IPv4 space
const ADDRESS_SPACE: u64 = 1 << 32;

/// Convert dotted-quad text to its 32-bit integer value.
///
/// The text must contain exactly four `.`-separated decimal octets, each in
/// `0..=255`. The result is `16777216*o1 + 65536*o2 + 256*o3 + o4`.
///
/// # Examples
/// ```
/// use closfab::ip::address::address_to_integer;
///
/// assert_eq!(address_to_integer("192.168.1.1"), Ok(3232235777));
/// assert!(address_to_integer("192.168.1").is_err());
/// assert!(address_to_integer("10.0.0.256").is_err());
/// ```
pub fn address_to_integer(text: &str) -> Result<u32, AddressError> {
    let components: Vec<&str> = text.trim().split('.').collect();
    if components.len() != 4 {
        return Err(AddressError::Format(format!(
            "'{}' has {} component(s), expected 4",
            text,
            components.len()
        )));
    }

    let mut value: u32 = 0;
    for component in components {
        let octet = parse_octet(component)
            .ok_or_else(|| AddressError::Format(format!(
                "'{}' in '{}' is not an octet between 0 and 255",
                component, text
            )))?;
        value = (value << 8) | octet;
    }

    Ok(value)
}

/// Parse a single decimal octet, rejecting signs, whitespace and values above 255
fn parse_octet(component: &str) -> Option<u32> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    component.parse::<u32>().ok().filter(|octet| *octet <= 255)
}

/// Format a 32-bit integer as dotted-quad text, most significant octet first.
///
/// # Examples
/// ```
/// use closfab::ip::address::integer_to_address;
///
/// assert_eq!(integer_to_address(3232235777), "192.168.1.1");
/// assert_eq!(integer_to_address(0), "0.0.0.0");
/// ```
pub fn integer_to_address(value: u32) -> String {
    let o1 = (value / 16_777_216) % 256;
    let o2 = (value / 65_536) % 256;
    let o3 = (value / 256) % 256;
    let o4 = value % 256;
    format!("{}.{}.{}.{}", o1, o2, o3, o4)
}

/// Return the network address of the block that follows `network` when the
/// space is cut into blocks of `2^(32 - prefix_length)` addresses.
///
/// Fails with [`AddressError::Range`] when `prefix_length` exceeds 32 or the
/// next block would start beyond `255.255.255.255`.
///
/// # Examples
/// ```
/// use closfab::ip::address::next_subnet;
///
/// assert_eq!(next_subnet("192.168.0.0", 24).unwrap(), "192.168.1.0");
/// assert_eq!(next_subnet("10.0.0.0", 8).unwrap(), "11.0.0.0");
/// assert!(next_subnet("255.0.0.0", 8).is_err());
/// ```
pub fn next_subnet(network: &str, prefix_length: u8) -> Result<String, AddressError> {
    if prefix_length > 32 {
        return Err(AddressError::Range(format!(
            "prefix length /{} exceeds /32",
            prefix_length
        )));
    }

    let base = u64::from(address_to_integer(network)?);
    let step = 1u64 << (32 - u32::from(prefix_length));
    let next = base + step;

    if next >= ADDRESS_SPACE {
        return Err(AddressError::Range(format!(
            "subnet after {}/{} would exceed 255.255.255.255",
            network, prefix_length
        )));
    }

    // next < 2^32 was checked above
    Ok(integer_to_address(next as u32))
}
