//! # Core Models Module
//!
//! The immutable records of the reference database.
//!
//! ## Key Components
//!
//! - [`element`] - One chemical element, identified by its atomic number
//! - [`nuclide`] - One isotope, holding a shared reference to its parent element
//! - [`gamma`] - One gamma-ray emission line, holding a shared reference to its nuclide
//!
//! Derived attributes (a nuclide's symbol, a line's mass number) are always read through
//! the shared reference and never copied, so each fact lives in exactly one record.
//! Every record renders a fixed multi-line text block through [`std::fmt::Display`].

pub mod element;
pub mod gamma;
pub mod nuclide;
