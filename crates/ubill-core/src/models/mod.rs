//! Data models for bill records and pipeline configuration.

pub mod bill;
pub mod config;
