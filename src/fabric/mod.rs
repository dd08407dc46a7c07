//! Two-tier Clos fabric parameters.
//!
//! A [`FabricParameters`] record is built by the caller, checked and
//! completed by [`FabricParameters::validate`], and can then be summarised
//! with [`FabricSummary::from_validated`].

pub mod error;
pub mod params;
pub mod summary;
pub mod validation;

// Re-export commonly used types
pub use error::FabricError;
pub use params::{Dimension, FabricParameters};
pub use summary::FabricSummary;
pub use validation::{recommended_asn, validate, MAX_ASN};
