//! Emission Rollup - Hierarchical GHG Emission Aggregation
//!
//! This crate rolls emission line items up a headquarters/partner tree and
//! recomposes them into the four special reporting categories that blend
//! Direct, Indirect-Energy and Other-Indirect buckets.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
