//! Fabric parameter validation.
//!
//! Checks run in a fixed order and the first failure is returned, so the
//! same bad input always reports the same error:
//!
//! 1. exactly one of spine count / leaf count
//! 2. minimum device counts
//! 3. port speed ranges
//! 4. port count minimums
//! 5. spine and leaf uplink speeds match
//! 6. point-to-point mask range
//! 7. derive the missing dimension and check uplink capacity
//! 8. AS number budget
//! 9. point-to-point address capacity

use super::error::FabricError;
use super::params::{Dimension, FabricParameters};
use crate::ip::Ipv4Prefix;
use log::{debug, info, warn};

/// Largest 2-byte AS number
pub const MAX_ASN: u32 = 65_535;

const MIN_DEVICES: u32 = 2;
const MIN_SPEED: u32 = 1;
const MAX_SPEED: u32 = 400;
const MIN_SPINE_PORTS: u32 = 4;
const MIN_LEAF_UP_PORTS: u32 = 2;
const MIN_P2P_MASK: u8 = 24;
const MAX_P2P_MASK: u8 = 31;
const SUGGESTED_PREFIX_LENGTH: u8 = 16;

/// Validate `params` and return it with both counts filled in.
///
/// Takes the record by value: on failure nothing half-derived escapes.
/// Validating an already validated record yields the same record.
pub fn validate(mut params: FabricParameters) -> Result<FabricParameters, FabricError> {
    let supplied = supplied_dimension(&params)?;
    debug!("Validating fabric from supplied {:?}", supplied);

    check_min_devices(supplied)?;
    check_speeds(&params)?;
    check_ports(&params)?;
    check_speed_symmetry(&params)?;
    check_p2p_mask(params.p2p_mask)?;

    let (spine_count, leaf_count) = derive_dimensions(&params, supplied)?;
    check_asn_budget(params.asn, spine_count, leaf_count)?;
    check_address_capacity(&params, spine_count, leaf_count)?;

    params.spine_count = Some(spine_count);
    params.leaf_count = Some(leaf_count);
    params.derived = Some(match supplied {
        Supplied::Spines(_) => Dimension::Leaf,
        Supplied::Leaves(_) => Dimension::Spine,
    });

    debug!("Fabric parameters valid: {} spines, {} leaves", spine_count, leaf_count);
    Ok(params)
}

/// The one dimension the caller fixed
#[derive(Debug, Clone, Copy)]
enum Supplied {
    Spines(u32),
    Leaves(u32),
}

fn supplied_dimension(params: &FabricParameters) -> Result<Supplied, FabricError> {
    match params.supplied_counts() {
        (Some(spines), None) => Ok(Supplied::Spines(spines)),
        (None, Some(leaves)) => Ok(Supplied::Leaves(leaves)),
        _ => Err(FabricError::Configuration(
            "must specify exactly one of spine count or leaf count".to_string(),
        )),
    }
}

fn check_min_devices(supplied: Supplied) -> Result<(), FabricError> {
    let (name, count) = match supplied {
        Supplied::Spines(count) => ("spine count", count),
        Supplied::Leaves(count) => ("leaf count", count),
    };
    if count < MIN_DEVICES {
        return Err(FabricError::Configuration(format!(
            "{} {} is too small (must be at least {})",
            name, count, MIN_DEVICES
        )));
    }
    Ok(())
}

fn check_range(field: &str, value: u32, low: u32, high: u32) -> Result<(), FabricError> {
    if value < low || value > high {
        return Err(FabricError::Configuration(format!(
            "{} {} out of valid range (must be {}-{})",
            field, value, low, high
        )));
    }
    Ok(())
}

fn check_speeds(params: &FabricParameters) -> Result<(), FabricError> {
    check_range("leaf down speed", params.leaf_down_speed, MIN_SPEED, MAX_SPEED)?;
    check_range("leaf up speed", params.leaf_up_speed, MIN_SPEED, MAX_SPEED)?;
    check_range("spine speed", params.spine_speed, MIN_SPEED, MAX_SPEED)
}

fn check_ports(params: &FabricParameters) -> Result<(), FabricError> {
    if params.spine_ports < MIN_SPINE_PORTS {
        return Err(FabricError::Configuration(format!(
            "spine ports {} is too small (must be at least {})",
            params.spine_ports, MIN_SPINE_PORTS
        )));
    }
    if params.leaf_up_ports < MIN_LEAF_UP_PORTS {
        return Err(FabricError::Configuration(format!(
            "leaf up ports {} is too small (must be at least {})",
            params.leaf_up_ports, MIN_LEAF_UP_PORTS
        )));
    }
    Ok(())
}

fn check_speed_symmetry(params: &FabricParameters) -> Result<(), FabricError> {
    if params.spine_speed != params.leaf_up_speed {
        return Err(FabricError::Configuration(format!(
            "spine speed {} does not match leaf up speed {} (both ends of a spine-leaf link must run at the same speed)",
            params.spine_speed, params.leaf_up_speed
        )));
    }
    Ok(())
}

fn check_p2p_mask(p2p_mask: u8) -> Result<(), FabricError> {
    if p2p_mask < MIN_P2P_MASK || p2p_mask > MAX_P2P_MASK {
        return Err(FabricError::Configuration(format!(
            "p2p mask /{} out of valid range (must be {}-{})",
            p2p_mask, MIN_P2P_MASK, MAX_P2P_MASK
        )));
    }
    Ok(())
}

/// Exact integer ceiling division; `divisor` is non-zero after the port checks
fn ceil_div(dividend: u64, divisor: u64) -> u64 {
    (dividend + divisor - 1) / divisor
}

/// Fill in the missing count and check no leaf needs more spines than it has uplinks
fn derive_dimensions(params: &FabricParameters, supplied: Supplied) -> Result<(u32, u32), FabricError> {
    let spine_ports = u64::from(params.spine_ports);
    let leaf_up_ports = u64::from(params.leaf_up_ports);

    match supplied {
        Supplied::Spines(spine_count) => {
            let leaf_count = ceil_div(u64::from(spine_count) * spine_ports, leaf_up_ports);

            if u64::from(spine_count) > leaf_up_ports {
                return Err(FabricError::Capacity(format!(
                    "spine count {} exceeds the {} uplink ports available on each leaf (leaf up ports); \
                     every leaf must connect to every spine",
                    spine_count, params.leaf_up_ports
                )));
            }

            let leaf_count = u32::try_from(leaf_count).map_err(|_| {
                FabricError::Capacity(format!("derived leaf count {} is too large", leaf_count))
            })?;

            info!(
                "Derived {} leaves from {} spines with {} ports each ({} uplinks per leaf)",
                leaf_count, spine_count, params.spine_ports, params.leaf_up_ports
            );
            Ok((spine_count, leaf_count))
        }
        Supplied::Leaves(leaf_count) => {
            let spine_count = ceil_div(u64::from(leaf_count) * leaf_up_ports, spine_ports);

            if spine_count > leaf_up_ports {
                return Err(FabricError::Capacity(format!(
                    "{} leaves need {} spines, but each leaf has only {} uplink ports (leaf up ports); \
                     increase spine ports or leaf up ports, or decrease the leaf count",
                    leaf_count, spine_count, params.leaf_up_ports
                )));
            }

            // Bounded by leaf_up_ports above
            let spine_count = spine_count as u32;

            info!(
                "Derived {} spines from {} leaves with {} uplinks each ({} ports per spine)",
                spine_count, leaf_count, params.leaf_up_ports, params.spine_ports
            );
            Ok((spine_count, leaf_count))
        }
    }
}

/// Starting ASN that leaves roughly 10% headroom below [`MAX_ASN`] for a
/// fabric of `node_count` devices.
///
/// Computed as `65535 - ceil(node_count * 1.1)` in integer arithmetic.
/// Returns `None` when no starting ASN of at least 1 would leave that room.
///
/// # Examples
/// ```
/// use closfab::fabric::recommended_asn;
///
/// assert_eq!(recommended_asn(20), Some(65513));
/// assert_eq!(recommended_asn(70_000), None);
/// ```
pub fn recommended_asn(node_count: u64) -> Option<u32> {
    let headroom = ceil_div(node_count.saturating_mul(11), 10);
    let recommended = u64::from(MAX_ASN).checked_sub(headroom)?;
    if recommended < 1 {
        return None;
    }
    u32::try_from(recommended).ok()
}

fn check_asn_budget(asn: u32, spine_count: u32, leaf_count: u32) -> Result<(), FabricError> {
    let node_count = u64::from(spine_count) + u64::from(leaf_count);

    if u64::from(asn) + node_count > u64::from(MAX_ASN) {
        let recommendation = match recommended_asn(node_count) {
            Some(recommended) => format!("recommended starting AS number: {}", recommended),
            None => "the fabric is too large for the 2-byte AS number space at any starting AS number".to_string(),
        };
        return Err(FabricError::Capacity(format!(
            "AS number {} cannot number {} nodes ({} spines, {} leaves) without exceeding {}; {}",
            asn, node_count, spine_count, leaf_count, MAX_ASN, recommendation
        )));
    }

    if asn < 1 {
        return Err(FabricError::Configuration(format!(
            "autonomous system number {} is invalid (must be at least 1)",
            asn
        )));
    }

    Ok(())
}

/// Longest prefix able to hold `links` subnets of length `p2p_mask`
fn required_prefix_length(links: u64, p2p_mask: u8) -> Option<u8> {
    let bits = 64 - links.saturating_sub(1).leading_zeros();
    u8::try_from(u32::from(p2p_mask).checked_sub(bits)?).ok()
}

fn check_address_capacity(
    params: &FabricParameters,
    spine_count: u32,
    leaf_count: u32,
) -> Result<(), FabricError> {
    let prefix: Ipv4Prefix = params.base_prefix.parse().map_err(|e| {
        FabricError::Configuration(format!("invalid base prefix '{}': {}", params.base_prefix, e))
    })?;

    if prefix.has_host_bits() {
        warn!(
            "Base prefix {} has host bits set; capacity is computed from its /{} length",
            params.base_prefix,
            prefix.length()
        );
    }

    let p2p_links = u64::from(params.leaf_up_ports) * u64::from(leaf_count);
    let usable_subnets = prefix.subnet_count(params.p2p_mask);
    debug!(
        "{} p2p links needed, {} /{} subnets available in {}",
        p2p_links, usable_subnets, params.p2p_mask, prefix
    );

    if usable_subnets < p2p_links {
        let suggestion = match required_prefix_length(p2p_links, params.p2p_mask) {
            Some(required) => format!(
                "use a wider base prefix such as {}",
                prefix.widened(required.min(SUGGESTED_PREFIX_LENGTH))
            ),
            None => "no IPv4 block is large enough; use a longer p2p mask".to_string(),
        };
        return Err(FabricError::Capacity(format!(
            "{} spines and {} leaves need {} point-to-point links, but base prefix {} \
             holds only {} /{} subnets; {}",
            spine_count, leaf_count, p2p_links, params.base_prefix, usable_subnets, params.p2p_mask, suggestion
        )));
    }

    Ok(())
}
