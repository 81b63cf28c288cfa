//! SpacetimeDB table definitions for the AImagotchi game.
//!
//! Vitals are stored as "last known value + anchor timestamp" pairs and
//! projected forward on read; rows never carry continuously updated
//! values. Dead pet rows are retained forever, never deleted.

use spacetimedb::{table, Identity, Timestamp};

/// The coin pool singleton row id.
pub const POOL_ROW_ID: u32 = 0;

/// One virtual pet. At most one row per owner may have `is_alive = true`.
#[table(name = pet, public)]
#[derive(Clone)]
pub struct Pet {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    /// Owning user, immutable after creation.
    #[index(btree)]
    pub owner: Identity,
    pub name: String,
    /// Personality as u8 (see `aimagotchi_logic::actions::Personality`).
    pub personality: u8,
    /// Visual variant, already reduced modulo the sprite count.
    pub sprite_index: u8,
    // Vitals, clamped to [0, 100] at every write.
    pub hunger: f32,
    pub happiness: f32,
    pub energy: f32,
    pub coins: u64,
    // Anchor timestamps decay/regen is projected from.
    pub last_fed: Timestamp,
    pub last_played: Timestamp,
    pub last_energy_regen: Timestamp,
    #[index(btree)]
    pub is_alive: bool,
    pub created_at: Timestamp,
    pub death_time: Option<Timestamp>,
}

/// Shared ledger fed by dead pets, drained by bounded claims.
/// Singleton (id always [`POOL_ROW_ID`]); guarded by the store's
/// per-transaction isolation, never cached in-process.
#[table(name = coin_pool, public)]
#[derive(Clone)]
pub struct CoinPool {
    #[primary_key]
    pub id: u32,
    pub total_coins: u64,
    pub last_distribution: Timestamp,
}

/// Append-only activity feed. Rows are immutable once written; display
/// order is `created_at` descending.
#[table(name = activity, public)]
#[derive(Clone)]
pub struct Activity {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    /// Kind as u8 (see `aimagotchi_logic::activity::activity_kinds`).
    pub kind: u8,
    pub owner: Identity,
    pub pet_name: String,
    pub message: String,
    pub coins_involved: Option<u64>,
    #[index(btree)]
    pub created_at: Timestamp,
}

/// Best-effort per-user aggregate; not authoritative for gameplay.
#[table(name = user_stats, public)]
pub struct UserStats {
    #[primary_key]
    pub owner: Identity,
    pub pets_created: u32,
}
