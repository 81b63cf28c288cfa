//! Pure game logic for AImagotchi.
//!
//! This crate contains all pet-care and economy logic that is independent
//! of any database or runtime. Functions take plain data and return
//! results, making them unit-testable and portable across SpacetimeDB
//! (WASM) and native tools.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`activity`] | Append-only feed records, kinds, and display messages |
//! | [`actions`] | Care action validation and effects (feed, play, claim, death check) |
//! | [`constants`] | Decay rates, action costs, and economy bounds |
//! | [`pool`] | Shared coin pool arithmetic (credits from deaths, bounded claims) |
//! | [`stats`] | Lazy time projection of stored vitals to live stats |
//! | [`views`] | Leaderboard sort/slice contract |

pub mod actions;
pub mod activity;
pub mod constants;
pub mod pool;
pub mod stats;
pub mod views;
