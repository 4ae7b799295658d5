//! # gammalib Core Library
//!
//! An in-memory reference database of chemical elements, their nuclides and
//! gamma-ray emission lines, built for identifying lines in measured spectra.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Immutable records (`Element`, `Nuclide`, `GammaLine`),
//!   the `MeasuredValue` quantity type, delimited-file loaders and the two reference
//!   tables (`ElementTable`, `NuclideTable`).
//!
//! - **[`engine`]: The Query Core.** Gamma libraries with their lazily opened line sets,
//!   the schema-driven fuzzy query engine, database configuration and the injected
//!   `ReferenceData` context that ties the tables and libraries together.
//!
//! - **[`workflows`]: The Public API.** Complete procedures built on top of the engine,
//!   such as identifying candidate lines for a measured peak energy.
//!
//! Data flows one way: flat reference files are loaded once into read-only tables, and
//! every consumer afterwards only queries them.

pub mod core;
pub mod engine;
pub mod workflows;
