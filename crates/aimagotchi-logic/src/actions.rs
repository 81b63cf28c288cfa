//! Care action validation and effects.
//!
//! Each action is validated against the *projected* live stats of the pet,
//! then described as a plain-data [`ActionOutcome`]: the new persisted pet
//! fields, an optional pool credit/debit, and the activity record to emit.
//! Callers (the SpacetimeDB reducers, the simtest harness) own loading,
//! authorization, time, randomness, and the actual writes; everything here
//! is a pure function of its arguments.

use crate::activity::activity_kinds;
use crate::constants::*;
use crate::pool;
use crate::stats::{LiveStats, PetVitals};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of care actions. Randomness (the play reward) is drawn by
/// the caller and injected as payload so tests stay deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareAction {
    Feed,
    Play { reward: u64 },
    Claim,
    DeathCheck,
}

/// Terminal failures surfaced to the caller. None is retried automatically
/// and none leaves partial state behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    Unauthenticated,
    Unauthorized,
    NotFound,
    PetNotAlive,
    DuplicateLivingPet,
    InvalidName,
    InsufficientFunds,
    InsufficientEnergy,
    HappinessTooLow,
    PoolInsufficient,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Unauthenticated => "Not authenticated",
            Self::Unauthorized => "This AImagotchi belongs to someone else",
            Self::NotFound => "Pet not found",
            Self::PetNotAlive => "This AImagotchi has passed away",
            Self::DuplicateLivingPet => "You already have a living AImagotchi!",
            Self::InvalidName => "AImagotchi names must be 1-20 characters",
            Self::InsufficientFunds => "Not enough coins to feed",
            Self::InsufficientEnergy => "Not enough energy to play",
            Self::HappinessTooLow => {
                "Your AImagotchi needs to be very happy (80+) to claim from the pool!"
            }
            Self::PoolInsufficient => "Not enough coins in the pool",
        };
        f.write_str(msg)
    }
}

/// The five personalities, one drawn uniformly at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Personality {
    Quirky,
    Brave,
    Lazy,
    Curious,
    Mischievous,
}

impl Personality {
    pub const COUNT: u8 = 5;

    /// Maps a uniform draw in [0, COUNT) to a personality. Reduces modulo
    /// COUNT so any `u8` is a valid (if non-uniform) input.
    pub fn from_index(index: u8) -> Self {
        match index % Self::COUNT {
            0 => Self::Quirky,
            1 => Self::Brave,
            2 => Self::Lazy,
            3 => Self::Curious,
            _ => Self::Mischievous,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Self::Quirky => 0,
            Self::Brave => 1,
            Self::Lazy => 2,
            Self::Curious => 3,
            Self::Mischievous => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quirky => "quirky",
            Self::Brave => "brave",
            Self::Lazy => "lazy",
            Self::Curious => "curious",
            Self::Mischievous => "mischievous",
        }
    }
}

/// New persisted pet fields produced by one action, plus which anchor
/// timestamps the caller must stamp with "now". The asymmetry (feeding
/// resets the energy anchor but not happiness's; playing resets the energy
/// anchor but not hunger's) is deliberate game behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct PetWrite {
    pub hunger: f32,
    pub happiness: f32,
    pub energy: f32,
    pub coins: u64,
    pub reset_last_fed: bool,
    pub reset_last_played: bool,
    pub reset_energy_anchor: bool,
    pub dies: bool,
}

/// Economy side effect on the shared coin pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolDelta {
    None,
    Credit(u64),
    Debit(u64),
}

/// Everything one successful action changes, as data. The caller applies
/// the pet write, the pool delta, and the activity row in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub write: PetWrite,
    pub pool: PoolDelta,
    pub activity_kind: u8,
    pub coins_involved: Option<u64>,
}

/// Dispatch a care action against projected stats and a freshly read pool
/// total. `Ok(None)` is the one side-effect-free case: a death check on a
/// pet that is not dying.
pub fn apply(
    action: CareAction,
    live: &LiveStats,
    pool_total: u64,
) -> Result<Option<ActionOutcome>, ActionError> {
    match action {
        CareAction::Feed => feed(live).map(Some),
        CareAction::Play { reward } => play(live, reward).map(Some),
        CareAction::Claim => claim(live, pool_total).map(Some),
        CareAction::DeathCheck => Ok(death_check(live)),
    }
}

/// Feed: costs coins, restores hunger, and re-anchors both the hunger decay
/// and the energy regen clocks to now.
pub fn feed(live: &LiveStats) -> Result<ActionOutcome, ActionError> {
    if live.coins < FEED_COST {
        return Err(ActionError::InsufficientFunds);
    }
    Ok(ActionOutcome {
        write: PetWrite {
            hunger: (live.hunger + FEED_HUNGER_BOOST).min(STAT_MAX),
            happiness: live.happiness,
            energy: live.energy,
            coins: live.coins - FEED_COST,
            reset_last_fed: true,
            reset_last_played: false,
            reset_energy_anchor: true,
            dies: false,
        },
        pool: PoolDelta::None,
        activity_kind: activity_kinds::FED,
        coins_involved: Some(FEED_COST),
    })
}

/// Play: spends energy, lifts happiness, pays out the injected reward.
/// Re-anchors the happiness decay and energy regen clocks; the hunger
/// anchor stays where it was.
pub fn play(live: &LiveStats, reward: u64) -> Result<ActionOutcome, ActionError> {
    debug_assert!((PLAY_REWARD_MIN..=PLAY_REWARD_MAX).contains(&reward));
    if live.energy < PLAY_ENERGY_COST {
        return Err(ActionError::InsufficientEnergy);
    }
    Ok(ActionOutcome {
        write: PetWrite {
            hunger: live.hunger,
            happiness: (live.happiness + PLAY_HAPPINESS_BOOST).min(STAT_MAX),
            energy: live.energy - PLAY_ENERGY_COST,
            coins: live.coins.saturating_add(reward),
            reset_last_fed: false,
            reset_last_played: true,
            reset_energy_anchor: true,
            dies: false,
        },
        pool: PoolDelta::None,
        activity_kind: activity_kinds::PLAYED,
        coins_involved: Some(reward),
    })
}

/// Death check: idempotent and side-effect-free unless the projected hunger
/// has hit zero. On death the pet's live balance (including passive
/// earnings accrued up to this instant) moves into the pool, and the row
/// becomes immutable with all vitals and coins zeroed.
pub fn death_check(live: &LiveStats) -> Option<ActionOutcome> {
    if !live.is_dying {
        return None;
    }
    Some(ActionOutcome {
        write: PetWrite {
            hunger: 0.0,
            happiness: 0.0,
            energy: 0.0,
            coins: 0,
            reset_last_fed: false,
            reset_last_played: false,
            reset_energy_anchor: false,
            dies: true,
        },
        pool: PoolDelta::Credit(live.coins),
        activity_kind: activity_kinds::DIED,
        coins_involved: Some(live.coins),
    })
}

/// Claim: a very happy pet takes a bounded share from the pool. Only the
/// energy regen anchor resets; hunger and happiness keep decaying from
/// their existing anchors.
pub fn claim(live: &LiveStats, pool_total: u64) -> Result<ActionOutcome, ActionError> {
    if live.happiness < CLAIM_HAPPINESS_MIN {
        return Err(ActionError::HappinessTooLow);
    }
    if !pool::can_claim(pool_total) {
        return Err(ActionError::PoolInsufficient);
    }
    let amount = pool::claim_amount(pool_total);
    Ok(ActionOutcome {
        write: PetWrite {
            hunger: live.hunger,
            happiness: live.happiness,
            energy: live.energy,
            coins: live.coins.saturating_add(amount),
            reset_last_fed: false,
            reset_last_played: false,
            reset_energy_anchor: true,
            dies: false,
        },
        pool: PoolDelta::Debit(amount),
        activity_kind: activity_kinds::DISTRIBUTED,
        coins_involved: Some(amount),
    })
}

/// Creation name rule: non-empty after trimming, at most 20 characters.
pub fn validate_name(name: &str) -> Result<(), ActionError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > NAME_MAX_CHARS {
        return Err(ActionError::InvalidName);
    }
    Ok(())
}

/// Reduce a raw sprite choice to one of the fixed visual variants.
pub fn sprite_variant(raw: u8) -> u8 {
    raw % SPRITE_VARIANTS
}

/// Apply an outcome's pet fields to a stored snapshot, stamping whichever
/// anchors the action resets with `now_ms`. The server mirrors this over
/// its own row type; the harness and tests use it directly.
pub fn apply_write(vitals: &mut PetVitals, write: &PetWrite, now_ms: i64) {
    vitals.hunger = write.hunger;
    vitals.happiness = write.happiness;
    vitals.energy = write.energy;
    vitals.coins = write.coins;
    if write.reset_last_fed {
        vitals.last_fed = now_ms;
    }
    if write.reset_last_played {
        vitals.last_played = now_ms;
    }
    if write.reset_energy_anchor {
        vitals.last_energy_regen = now_ms;
    }
    if write.dies {
        vitals.is_alive = false;
    }
}
