//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, reporting period, errors)
//! - `emission` - Emission classes, process groups and line items
//! - `hierarchy` - Organization paths and the arena-backed tree
//! - `aggregation` - Category recomposition, roll-up and results

pub mod aggregation;
pub mod emission;
pub mod foundation;
pub mod hierarchy;
