//! Serde models for the subset of the Marathon REST API used by the deployer.

pub mod models;
