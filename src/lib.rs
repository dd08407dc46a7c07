//! # Closfab - Parameter derivation and validation for Clos fabrics
//!
//! This library checks the high-level inputs of a two-tier Clos
//! (spine-leaf) network fabric before any topology is generated.
//!
//! ## Overview
//!
//! A fabric is described by its port counts, port speeds, a point-to-point
//! address pool and a starting autonomous system number. The caller fixes
//! either the number of spines or the number of leaves; validation derives
//! the other and then checks that the fabric fits in the available uplink
//! ports, the 2-byte AS number space and the address pool.
//!
//! ## Architecture
//!
//! - `ip`: IPv4 address arithmetic and CIDR block capacity
//! - `fabric`: the parameter record, its validator, errors and summary
//!
//! ## Example Usage
//!
//! ```rust
//! use closfab::fabric::{FabricParameters, FabricSummary};
//!
//! let params = FabricParameters {
//!     spine_count: Some(4),
//!     spine_speed: 40,
//!     spine_ports: 16,
//!     leaf_down_speed: 10,
//!     leaf_down_ports: 48,
//!     leaf_up_speed: 40,
//!     leaf_up_ports: 4,
//!     base_prefix: "192.168/16".to_string(),
//!     p2p_mask: 31,
//!     asn: 64512,
//!     ..Default::default()
//! };
//!
//! let fabric = params.validate()?;
//! assert_eq!(fabric.leaf_count, Some(16));
//!
//! let summary = FabricSummary::from_validated(&fabric)?;
//! assert_eq!(summary.p2p_links, 64);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Validation returns a [`fabric::FabricError`]: `Configuration` for values
//! out of range or contradictory inputs, `Capacity` for fabrics that do not
//! fit. Checks run in a fixed order and the first failure wins.

pub mod fabric;
pub mod ip;
