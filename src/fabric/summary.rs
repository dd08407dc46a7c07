//! Capacity summary of a validated fabric.
//!
//! Reports how much of each budget (spine ports, AS numbers, point-to-point
//! address pool) the fabric consumes. No per-link addressing is produced.

use super::error::FabricError;
use super::params::FabricParameters;
use crate::ip::{integer_to_address, next_subnet, Ipv4Prefix};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived figures for a validated fabric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricSummary {
    pub spine_count: u32,
    pub leaf_count: u32,
    pub node_count: u64,
    pub first_asn: u32,
    pub last_asn: u32,
    /// One per leaf uplink port
    pub p2p_links: u64,
    pub p2p_mask: u8,
    /// Number of `/p2p_mask` subnets in the base prefix
    pub p2p_subnets_available: u64,
    pub p2p_first_subnet: String,
    pub p2p_last_subnet: String,
    /// First subnet after the fabric's p2p range; absent at the top of the address space
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_free_subnet: Option<String>,
    pub spine_ports_used: u64,
    pub spine_ports_available: u64,
    pub server_ports: u64,
    /// Server-facing bandwidth over spine-facing bandwidth per leaf
    pub oversubscription: f64,
}

impl FabricSummary {
    /// Summarise a record returned by [`FabricParameters::validate`]
    pub fn from_validated(params: &FabricParameters) -> Result<Self, FabricError> {
        if !params.is_validated() {
            return Err(FabricError::Configuration(
                "fabric parameters must be validated before they can be summarised".to_string(),
            ));
        }

        // Re-validating a derived record is a no-op unless it was edited since
        let params = params.validate()?;
        let (spine_count, leaf_count) = params
            .spine_count
            .zip(params.leaf_count)
            .ok_or_else(|| FabricError::Configuration("validated fabric is missing a device count".to_string()))?;

        let prefix: Ipv4Prefix = params.base_prefix.parse().map_err(|e| {
            FabricError::Configuration(format!("invalid base prefix '{}': {}", params.base_prefix, e))
        })?;

        let node_count = u64::from(spine_count) + u64::from(leaf_count);
        let p2p_links = u64::from(params.leaf_up_ports) * u64::from(leaf_count);
        let step = 1u64 << (32 - u32::from(params.p2p_mask));

        // The range fits inside the base block after validation
        let pool_start = prefix.widened(prefix.length()).network();
        let first = u64::from(pool_start);
        let last = first + (p2p_links - 1) * step;
        let p2p_last_subnet = integer_to_address(last as u32);
        let next_free_subnet = next_subnet(&p2p_last_subnet, params.p2p_mask).ok();

        let down_bandwidth = u64::from(params.leaf_down_ports) * u64::from(params.leaf_down_speed);
        let up_bandwidth = u64::from(params.leaf_up_ports) * u64::from(params.leaf_up_speed);

        Ok(FabricSummary {
            spine_count,
            leaf_count,
            node_count,
            first_asn: params.asn,
            // node_count >= 1 and asn + node_count <= 65535 after validation
            last_asn: params.asn + (node_count as u32) - 1,
            p2p_links,
            p2p_mask: params.p2p_mask,
            p2p_subnets_available: prefix.subnet_count(params.p2p_mask),
            p2p_first_subnet: integer_to_address(pool_start),
            p2p_last_subnet,
            next_free_subnet,
            spine_ports_used: p2p_links,
            spine_ports_available: u64::from(spine_count) * u64::from(params.spine_ports),
            server_ports: u64::from(leaf_count) * u64::from(params.leaf_down_ports),
            oversubscription: down_bandwidth as f64 / up_bandwidth as f64,
        })
    }
}

impl fmt::Display for FabricSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Spines:              {}", self.spine_count)?;
        writeln!(f, "Leaves:              {}", self.leaf_count)?;
        writeln!(f, "AS numbers:          {}-{} ({} nodes)", self.first_asn, self.last_asn, self.node_count)?;
        writeln!(f, "P2P links:           {} (/{} each)", self.p2p_links, self.p2p_mask)?;
        writeln!(f, "P2P subnets:         {} available", self.p2p_subnets_available)?;
        writeln!(f, "P2P range:           {} - {}", self.p2p_first_subnet, self.p2p_last_subnet)?;
        if let Some(next) = &self.next_free_subnet {
            writeln!(f, "Next free subnet:    {}", next)?;
        }
        writeln!(f, "Spine ports:         {}/{} used", self.spine_ports_used, self.spine_ports_available)?;
        writeln!(f, "Server ports:        {}", self.server_ports)?;
        write!(f, "Oversubscription:    {:.2}:1", self.oversubscription)
    }
}
