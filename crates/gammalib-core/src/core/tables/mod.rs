//! The two reference tables.
//!
//! - [`elements`] - The periodic table, indexed by atomic number with symbol and name lookup
//! - [`nuclides`] - The nuclide chart, a two-level index from atomic number to mass number
//!
//! Both tables are built once from their delimited files and are read-only afterwards.
//! A structural error in any row aborts the whole load and reports the file and line.

pub mod elements;
pub mod nuclides;
