//! # Engine Module
//!
//! Query machinery over the reference tables: named gamma libraries, their field registries
//! and the typed filter/sort engine that runs keyword queries against them.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Table paths, library definitions and default fuzziness
//! - **Reference Data** ([`context`]) - Loaded tables plus the registered libraries
//! - **Libraries** ([`library`]) - Lazily opened line sets with `find`/`query`
//! - **Queries** ([`query`]) - Filter literals, conversion, matching and ordering
//! - **Field Registries** ([`schema`]) - Static per-kind maps from field name to comparison
//! - **Error Handling** ([`error`]) - Engine-level error aggregation
//!
//! ## Matching Rules
//!
//! Each field declares how it compares. Integer fields match exactly, text fields match
//! case-insensitively, and measured fields match when the record's central value lies
//! within the fuzziness of the requested value (inclusive). A record whose quantity is
//! unknown never matches a filter on that quantity.

pub mod config;
pub mod context;
pub mod error;
pub mod library;
pub mod query;
pub mod schema;
