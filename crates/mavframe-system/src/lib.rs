//! Addressing for mavframe frames.
//!
//! A [`System`] owns a system id, a component table and a per-system
//! sequence counter. Frames it creates are stamped with all three and handed
//! back ready for payload appends.

pub mod component;
pub mod config;
pub mod error;
pub mod system;

pub use component::Component;
pub use config::{load_capacity_table, parse_capacity_table, SystemConfig};
pub use error::{Result, SystemError};
pub use system::{
    System, SystemSummary, DEFAULT_COMPONENT_ID, DEFAULT_SYSTEM_ID, MAX_COMPONENT_ID,
};
