//! Shared infrastructure for the Internal ID Manager service: env config loading,
//! tracing setup, health probes, request-id middleware and sea-orm helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
