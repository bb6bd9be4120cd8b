//! Utility modules for Sui integration.
//!
//! ## Modules
//!
//! - [`conversion`]: identifier, transaction and object-change conversions

pub mod conversion;

// Re-export commonly used items
pub use conversion::{object_change, parse_address, parse_object_id, to_programmable};
