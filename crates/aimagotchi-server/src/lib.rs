//! AImagotchi Server - SpacetimeDB Module
//!
//! Multiplayer virtual-pet game running as a SpacetimeDB module. Every
//! care action is one reducer, a single atomic transaction over the pet row
//! and, for deaths and claims, the singleton coin pool row, so
//! concurrent requests against the same pet serialize instead of racing a
//! stale snapshot. All stat decay is projected lazily from stored anchor
//! timestamps by `aimagotchi-logic`; there is no background decay tick.
//!
//! Reads are subscriptions: the tables are public and clients project live
//! stats with the same logic crate the reducers use.

mod reducers;
mod tables;

pub use reducers::*;
pub use tables::*;
