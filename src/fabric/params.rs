//! The fabric parameter record.

use serde::{Deserialize, Serialize};

/// Which fabric dimension a count refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Spine,
    Leaf,
}

/// Inputs describing a two-tier Clos fabric.
///
/// Exactly one of `spine_count` / `leaf_count` is supplied by the caller;
/// validation fills in the other. Speeds share one unit (Gb/s in the CLI
/// help) and `leaf_up_speed` must equal `spine_speed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spine_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf_count: Option<u32>,
    pub spine_speed: u32,
    /// Ports per spine available for leaf uplinks
    pub spine_ports: u32,
    /// Server-facing port speed
    pub leaf_down_speed: u32,
    /// Server-facing port count
    pub leaf_down_ports: u32,
    pub leaf_up_speed: u32,
    /// Spine-facing ports per leaf
    pub leaf_up_ports: u32,
    /// Point-to-point address pool in CIDR form, e.g. `192.168/16`
    pub base_prefix: String,
    /// Prefix length of each point-to-point subnet
    pub p2p_mask: u8,
    /// First AS number to assign, one per spine or leaf
    pub asn: u32,
    /// Dimension filled in by validation; `None` on caller-built records
    #[serde(skip)]
    pub derived: Option<Dimension>,
}

impl FabricParameters {
    /// Validate and complete the record, returning the derived copy.
    ///
    /// `self` is never modified, so a rejected record is left exactly as
    /// the caller built it.
    pub fn validate(&self) -> Result<FabricParameters, super::FabricError> {
        super::validation::validate(self.clone())
    }

    /// True once both counts are present and one of them was derived
    pub fn is_validated(&self) -> bool {
        self.derived.is_some() && self.spine_count.is_some() && self.leaf_count.is_some()
    }

    /// Spines plus leaves, when both are known
    pub fn node_count(&self) -> Option<u64> {
        Some(u64::from(self.spine_count?) + u64::from(self.leaf_count?))
    }

    /// The dimension the caller supplied, ignoring any derived count
    pub(crate) fn supplied_counts(&self) -> (Option<u32>, Option<u32>) {
        match self.derived {
            Some(Dimension::Spine) => (None, self.leaf_count),
            Some(Dimension::Leaf) => (self.spine_count, None),
            None => (self.spine_count, self.leaf_count),
        }
    }
}
