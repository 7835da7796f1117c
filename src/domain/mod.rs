//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains some of:
//! - `mod.rs`: Domain types and the logic that needs no network
//! - `wire.rs`: Raw serde structs matching provider responses
//! - `convert.rs`: `From`/`TryFrom` conversions from wire to domain types
//! - `client.rs`: Sub-client with the HTTP-backed operations

pub mod analysis;
pub mod pool;
pub mod portfolio;
pub mod price_history;
pub mod token;
pub mod trade;
