//! Client-facing reducers: one atomic transaction per care action.
//!
//! Every reducer follows the same shape: load the pet, assert ownership
//! and liveness, project stored anchors to now, let the logic crate
//! validate and describe the effects, then apply pet patch + pool delta +
//! activity row together. Every failure returns before the first write, so
//! no partial state is ever observable.

use crate::tables::*;
use crate::tables::activity as activity_table_trait;
use aimagotchi_logic::actions::{
    self, ActionError, ActionOutcome, PetWrite, Personality, PoolDelta,
};
use aimagotchi_logic::activity::{self, activity_kinds};
use aimagotchi_logic::constants::{PLAY_REWARD_MAX, PLAY_REWARD_MIN, STARTING_COINS, STAT_MAX};
use aimagotchi_logic::stats::{self, LiveStats, PetVitals};
use spacetimedb::{rand::Rng, reducer, ReducerContext, Table, Timestamp};

/// Seed the coin pool singleton so credits and debits always patch one row.
#[reducer(init)]
pub fn init(ctx: &ReducerContext) {
    if ctx.db.coin_pool().id().find(POOL_ROW_ID).is_none() {
        ctx.db.coin_pool().insert(CoinPool {
            id: POOL_ROW_ID,
            total_coins: 0,
            last_distribution: ctx.timestamp,
        });
        log::info!("coin pool initialized");
    }
}

// ============================================================================
// CARE ACTION REDUCERS
// ============================================================================

/// Create a pet for the caller. Fails while the caller already has a
/// living one; after a death the same user may create again.
#[reducer]
pub fn create_pet(ctx: &ReducerContext, name: String, sprite_index: u8) -> Result<(), String> {
    let name = name.trim().to_string();
    actions::validate_name(&name).map_err(stringify)?;

    let has_living_pet = ctx
        .db
        .pet()
        .owner()
        .filter(ctx.sender)
        .any(|p| p.is_alive);
    if has_living_pet {
        return Err(ActionError::DuplicateLivingPet.to_string());
    }

    let personality = Personality::from_index(ctx.rng().gen_range(0..Personality::COUNT));

    let pet = ctx.db.pet().insert(Pet {
        id: 0,
        owner: ctx.sender,
        name,
        personality: personality.as_u8(),
        sprite_index: actions::sprite_variant(sprite_index),
        hunger: STAT_MAX,
        happiness: STAT_MAX,
        energy: STAT_MAX,
        coins: STARTING_COINS,
        last_fed: ctx.timestamp,
        last_played: ctx.timestamp,
        last_energy_regen: ctx.timestamp,
        is_alive: true,
        created_at: ctx.timestamp,
        death_time: None,
    });

    log_activity(ctx, activity_kinds::CREATED, &pet.name, None);

    match ctx.db.user_stats().owner().find(ctx.sender) {
        Some(mut stats_row) => {
            stats_row.pets_created += 1;
            ctx.db.user_stats().owner().update(stats_row);
        }
        None => {
            ctx.db.user_stats().insert(UserStats {
                owner: ctx.sender,
                pets_created: 1,
            });
        }
    }

    log::info!(
        "pet {} ({}) created for {:?}",
        pet.id,
        personality.as_str(),
        ctx.sender
    );
    Ok(())
}

/// Feed the pet: costs 10 coins, restores hunger, re-anchors the hunger
/// and energy clocks.
#[reducer]
pub fn feed_pet(ctx: &ReducerContext, pet_id: u64) -> Result<(), String> {
    let pet = owned_living_pet(ctx, pet_id).map_err(stringify)?;
    let live = project_now(ctx, &pet);
    let outcome = actions::feed(&live).map_err(stringify)?;
    commit(ctx, pet, &outcome);
    Ok(())
}

/// Play with the pet: spends energy, lifts happiness, pays out a random
/// reward drawn inside this transaction.
#[reducer]
pub fn play_with_pet(ctx: &ReducerContext, pet_id: u64) -> Result<(), String> {
    let pet = owned_living_pet(ctx, pet_id).map_err(stringify)?;
    let live = project_now(ctx, &pet);
    let reward = ctx.rng().gen_range(PLAY_REWARD_MIN..=PLAY_REWARD_MAX);
    let outcome = actions::play(&live, reward).map_err(stringify)?;
    commit(ctx, pet, &outcome);
    Ok(())
}

/// Death check, polled by clients. Idempotent: a pet that is not dying
/// (or already dead) is left untouched. A dying pet's live balance moves
/// into the pool in the same transaction that marks it dead.
#[reducer]
pub fn check_death(ctx: &ReducerContext, pet_id: u64) -> Result<(), String> {
    let Some(pet) = ctx.db.pet().id().find(pet_id) else {
        return Err(ActionError::NotFound.to_string());
    };
    if !pet.is_alive {
        return Ok(());
    }
    let live = project_now(ctx, &pet);
    match actions::death_check(&live) {
        None => Ok(()),
        Some(outcome) => {
            log::info!("pet {} starved; {} coins to the pool", pet.id, live.coins);
            commit(ctx, pet, &outcome);
            Ok(())
        }
    }
}

/// Claim a bounded share of the pool for a very happy pet. The pool total
/// is read fresh inside this transaction, never from a cached value.
#[reducer]
pub fn claim_from_pool(ctx: &ReducerContext, pet_id: u64) -> Result<(), String> {
    let pet = owned_living_pet(ctx, pet_id).map_err(stringify)?;
    let live = project_now(ctx, &pet);
    let pool_total = ctx
        .db
        .coin_pool()
        .id()
        .find(POOL_ROW_ID)
        .map(|p| p.total_coins)
        .unwrap_or(0);
    let outcome = actions::claim(&live, pool_total).map_err(stringify)?;
    commit(ctx, pet, &outcome);
    Ok(())
}

// ============================================================================
// HELPERS
// ============================================================================

fn stringify(e: ActionError) -> String {
    e.to_string()
}

fn timestamp_ms(t: Timestamp) -> i64 {
    t.to_micros_since_unix_epoch() / 1_000
}

fn pet_vitals(pet: &Pet) -> PetVitals {
    PetVitals {
        hunger: pet.hunger,
        happiness: pet.happiness,
        energy: pet.energy,
        coins: pet.coins,
        last_fed: timestamp_ms(pet.last_fed),
        last_played: timestamp_ms(pet.last_played),
        last_energy_regen: timestamp_ms(pet.last_energy_regen),
        is_alive: pet.is_alive,
    }
}

fn project_now(ctx: &ReducerContext, pet: &Pet) -> LiveStats {
    stats::project(&pet_vitals(pet), timestamp_ms(ctx.timestamp))
}

/// Load a pet the caller is allowed to act on.
fn owned_living_pet(ctx: &ReducerContext, pet_id: u64) -> Result<Pet, ActionError> {
    let pet = ctx.db.pet().id().find(pet_id).ok_or(ActionError::NotFound)?;
    if pet.owner != ctx.sender {
        return Err(ActionError::Unauthorized);
    }
    if !pet.is_alive {
        return Err(ActionError::PetNotAlive);
    }
    Ok(pet)
}

/// Apply one outcome (pet patch, pool delta, activity row) within the
/// current transaction.
fn commit(ctx: &ReducerContext, pet: Pet, outcome: &ActionOutcome) {
    let name = pet.name.clone();
    apply_pet_write(ctx, pet, &outcome.write);
    apply_pool_delta(ctx, outcome.pool);
    log_activity(ctx, outcome.activity_kind, &name, outcome.coins_involved);
}

fn apply_pet_write(ctx: &ReducerContext, mut pet: Pet, write: &PetWrite) {
    pet.hunger = write.hunger;
    pet.happiness = write.happiness;
    pet.energy = write.energy;
    pet.coins = write.coins;
    if write.reset_last_fed {
        pet.last_fed = ctx.timestamp;
    }
    if write.reset_last_played {
        pet.last_played = ctx.timestamp;
    }
    if write.reset_energy_anchor {
        pet.last_energy_regen = ctx.timestamp;
    }
    if write.dies {
        pet.is_alive = false;
        pet.death_time = Some(ctx.timestamp);
    }
    ctx.db.pet().id().update(pet);
}

fn apply_pool_delta(ctx: &ReducerContext, delta: PoolDelta) {
    match delta {
        PoolDelta::None => {}
        PoolDelta::Credit(amount) => match ctx.db.coin_pool().id().find(POOL_ROW_ID) {
            Some(mut pool) => {
                pool.total_coins = aimagotchi_logic::pool::credit(pool.total_coins, amount);
                ctx.db.coin_pool().id().update(pool);
            }
            // Pre-init fallback: the first credit creates the row.
            None => {
                ctx.db.coin_pool().insert(CoinPool {
                    id: POOL_ROW_ID,
                    total_coins: amount,
                    last_distribution: ctx.timestamp,
                });
            }
        },
        // A debit cannot precede the row: claims require a pool of at
        // least 10, and only credits grow it.
        PoolDelta::Debit(amount) => {
            if let Some(mut pool) = ctx.db.coin_pool().id().find(POOL_ROW_ID) {
                pool.total_coins = aimagotchi_logic::pool::debit(pool.total_coins, amount);
                pool.last_distribution = ctx.timestamp;
                ctx.db.coin_pool().id().update(pool);
            }
        }
    }
}

fn log_activity(ctx: &ReducerContext, kind: u8, pet_name: &str, coins_involved: Option<u64>) {
    ctx.db.activity().insert(Activity {
        id: 0,
        kind,
        owner: ctx.sender,
        pet_name: pet_name.to_string(),
        message: activity::message(kind, pet_name, coins_involved.unwrap_or(0)),
        coins_involved,
        created_at: ctx.timestamp,
    });
}
