//! # Workflows Module
//!
//! High-level procedures built on the engine. Workflows take an already loaded
//! [`ReferenceData`](crate::engine::context::ReferenceData) and return plain result values.
//!
//! - **Identification** ([`identify`]) - Candidate gamma lines for a measured peak energy,
//!   searched across every registered library and ranked by distance.

pub mod identify;
