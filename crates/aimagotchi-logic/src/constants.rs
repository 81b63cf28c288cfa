//! Game tuning constants: decay rates, action costs, economy bounds.
//!
//! These are plain numbers with no database dependency. Both the
//! SpacetimeDB server and the native simtest harness use these.

/// Hunger lost per hour since the pet was last fed.
pub const HUNGER_DECAY_PER_HOUR: f32 = 2.0;

/// Happiness lost per hour since the pet last played.
pub const HAPPINESS_DECAY_PER_HOUR: f32 = 1.5;

/// Energy regained per hour since the energy anchor was last reset.
pub const ENERGY_REGEN_PER_HOUR: f32 = 5.0;

/// Passive coins earned per hour since the last feed, while happy.
pub const COIN_EARN_PER_HOUR: f32 = 5.0;

/// Stored happiness must exceed this for passive coin accrual.
pub const COIN_EARN_HAPPINESS_GATE: f32 = 50.0;

/// Vitals are clamped into [0.0, STAT_MAX] at every persist.
pub const STAT_MAX: f32 = 100.0;

/// Coins debited by one feeding.
pub const FEED_COST: u64 = 10;

/// Hunger restored by one feeding (capped at STAT_MAX).
pub const FEED_HUNGER_BOOST: f32 = 30.0;

/// Energy required (and spent) to play.
pub const PLAY_ENERGY_COST: f32 = 20.0;

/// Happiness gained by playing (capped at STAT_MAX).
pub const PLAY_HAPPINESS_BOOST: f32 = 25.0;

/// Play reward is drawn uniformly from [PLAY_REWARD_MIN, PLAY_REWARD_MAX].
pub const PLAY_REWARD_MIN: u64 = 5;
pub const PLAY_REWARD_MAX: u64 = 14;

/// Coins granted to a freshly created pet.
pub const STARTING_COINS: u64 = 50;

/// Projected happiness required to claim from the coin pool.
pub const CLAIM_HAPPINESS_MIN: f32 = 80.0;

/// The pool must hold at least this many coins before any claim.
pub const POOL_CLAIM_MIN: u64 = 10;

/// A claim takes one tenth of the pool, never more than this.
pub const CLAIM_CAP: u64 = 50;

/// Pet names are limited to this many characters.
pub const NAME_MAX_CHARS: usize = 20;

/// Sprite indexes are reduced modulo this many visual variants.
pub const SPRITE_VARIANTS: u8 = 6;

/// Leaderboard returns at most this many pets.
pub const LEADERBOARD_LIMIT: usize = 10;

/// Activity feed returns at most this many entries.
pub const ACTIVITY_FEED_LIMIT: usize = 20;

/// Milliseconds per hour, for anchor-to-now projection.
pub const MS_PER_HOUR: f32 = 3_600_000.0;
