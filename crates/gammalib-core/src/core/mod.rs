//! # Core Module
//!
//! Stateless building blocks of the reference database.
//!
//! ## Key Components
//!
//! - [`measured`] - Physical quantities with an optional value and optional uncertainty
//! - [`models`] - Element, nuclide and gamma-line records
//! - [`io`] - Delimited reference-file reader and gamma-line file formats
//! - [`tables`] - The periodic table and the two-level nuclide index
//!
//! Tables are constructed once from static files and never mutated afterwards, so they
//! can be shared between threads without synchronization.

pub mod io;
pub mod measured;
pub mod models;
pub mod tables;

#[cfg(test)]
pub(crate) mod fixtures;
