//! Integration tests for the full pet lifecycle.
//!
//! Exercises: creation → lazy decay → feed/play → starvation death →
//! pool credit → claim by a second pet. All tests are pure logic: no
//! SpacetimeDB, no rendering.

use aimagotchi_logic::actions::{
    self, apply_write, ActionError, ActionOutcome, CareAction, PoolDelta,
};
use aimagotchi_logic::constants::*;
use aimagotchi_logic::stats::{new_pet_vitals, project, PetVitals};

const HOUR_MS: i64 = 3_600_000;

/// Apply one successful action to a stored snapshot and a pool total,
/// the way a reducer transaction would.
fn commit(vitals: &mut PetVitals, pool_total: &mut u64, outcome: &ActionOutcome, now_ms: i64) {
    apply_write(vitals, &outcome.write, now_ms);
    match outcome.pool {
        PoolDelta::None => {}
        PoolDelta::Credit(amount) => *pool_total = aimagotchi_logic::pool::credit(*pool_total, amount),
        PoolDelta::Debit(amount) => *pool_total = aimagotchi_logic::pool::debit(*pool_total, amount),
    }
}

#[test]
fn neglected_pet_starves_and_funds_the_pool() {
    let mut pet = new_pet_vitals(0);
    let mut pool = 0u64;

    // Five hours in: decayed but healthy, passively earning.
    let live = project(&pet, 5 * HOUR_MS);
    assert!((live.hunger - 90.0).abs() < 0.001);
    assert_eq!(live.coins, 75);
    assert!(actions::death_check(&live).is_none());

    // Fifty hours in: starved.
    let now = 50 * HOUR_MS;
    let live = project(&pet, now);
    assert!(live.is_dying);
    let balance_at_death = live.coins;
    assert_eq!(balance_at_death, 300); // 50 + floor(50*5)

    let outcome = actions::death_check(&live).expect("starved pet must die");
    commit(&mut pet, &mut pool, &outcome, now);

    // Conservation: the pool gained exactly the live balance; the row is
    // dead, zeroed, and frozen.
    assert_eq!(pool, balance_at_death);
    assert!(!pet.is_alive);
    assert_eq!(pet.coins, 0);
    assert_eq!(pet.hunger, 0.0);
    let after = project(&pet, now + 1000 * HOUR_MS);
    assert_eq!(after.coins, 0);
    assert!(!after.is_dying);

    // A second death check is a no-op: dead pets project as not dying.
    assert!(actions::death_check(&after).is_none());
}

#[test]
fn cared_for_pet_survives_and_claims() {
    let mut pet = new_pet_vitals(0);
    let mut pool = 37u64;
    let mut now = 0i64;

    // Feed and play every 12 hours for 10 days.
    for _ in 0..20 {
        now += 12 * HOUR_MS;
        let live = project(&pet, now);
        assert!(!live.is_dying, "regular feeding must keep the pet alive");

        let outcome = actions::feed(&live).expect("passive earnings cover the feed cost");
        commit(&mut pet, &mut pool, &outcome, now);

        let live = project(&pet, now);
        if live.energy >= PLAY_ENERGY_COST {
            let outcome = actions::play(&live, 9).unwrap();
            commit(&mut pet, &mut pool, &outcome, now);
        }
    }

    // Played recently, so happiness is high enough to claim.
    let live = project(&pet, now);
    assert!(live.happiness >= CLAIM_HAPPINESS_MIN);

    let coins_before = live.coins;
    let pool_before = pool;
    let outcome = actions::claim(&live, pool).unwrap();
    commit(&mut pet, &mut pool, &outcome, now);

    let amount = pool_before / 10;
    assert_eq!(pool, pool_before - amount);
    assert_eq!(pet.coins, coins_before + amount);
}

#[test]
fn claim_conserves_coins_across_both_ledgers() {
    let pet = new_pet_vitals(0);
    // Just-created pet: happiness 100, eligible immediately.
    let live = project(&pet, 0);
    for pool_before in [10u64, 37, 123, 499, 500, 100_000] {
        let outcome = actions::claim(&live, pool_before).unwrap();
        let PoolDelta::Debit(amount) = outcome.pool else {
            panic!("claim must debit the pool");
        };
        assert_eq!(amount, (pool_before / 10).min(CLAIM_CAP));
        assert_eq!(outcome.write.coins, live.coins + amount);
        assert_eq!(outcome.coins_involved, Some(amount));
    }
}

#[test]
fn failed_actions_change_nothing() {
    let mut pet = new_pet_vitals(0);
    pet.coins = 9;
    pet.happiness = 60.0;
    let snapshot = pet.clone();

    let live = project(&pet, 0);
    assert_eq!(actions::feed(&live).unwrap_err(), ActionError::InsufficientFunds);
    assert_eq!(
        actions::claim(&live, 1000).unwrap_err(),
        ActionError::HappinessTooLow
    );
    // Nothing was committed, so the stored snapshot is untouched.
    assert_eq!(pet, snapshot);
}

#[test]
fn feed_at_exactly_ten_coins_succeeds() {
    let mut pet = new_pet_vitals(0);
    pet.coins = 10;
    pet.happiness = 40.0; // below the earn gate, no passive accrual
    pet.hunger = 50.0;
    let mut pool = 0u64;

    let now = HOUR_MS / 2;
    let live = project(&pet, now);
    assert_eq!(live.coins, 10);
    let outcome = actions::feed(&live).unwrap();
    commit(&mut pet, &mut pool, &outcome, now);

    assert_eq!(pet.coins, 0);
    assert!((pet.hunger - (50.0 - 0.5 * HUNGER_DECAY_PER_HOUR + FEED_HUNGER_BOOST)).abs() < 0.01);
    assert_eq!(pet.last_fed, now);
    assert_eq!(pet.last_energy_regen, now);
    assert_eq!(pet.last_played, 0); // hunger anchor moved, happiness anchor did not
}

#[test]
fn death_after_claim_returns_claimed_coins_to_pool() {
    let mut pet = new_pet_vitals(0);
    let mut pool = 500u64;

    // Claim the cap right away.
    let live = project(&pet, 0);
    let outcome = actions::claim(&live, pool).unwrap();
    commit(&mut pet, &mut pool, &outcome, 0);
    assert_eq!(pool, 450);
    assert_eq!(pet.coins, 100);

    // Starve the pet; its whole balance (claim included) flows back.
    let now = 60 * HOUR_MS;
    let live = project(&pet, now);
    assert!(live.is_dying);
    let outcome = actions::death_check(&live).unwrap();
    commit(&mut pet, &mut pool, &outcome, now);
    assert_eq!(pool, 450 + 100 + 300); // balance + floor(60h * 5)/h passive
}

#[test]
fn dispatcher_matches_direct_functions() {
    let live = project(&new_pet_vitals(0), 0);
    assert_eq!(
        actions::apply(CareAction::Feed, &live, 0).unwrap(),
        Some(actions::feed(&live).unwrap())
    );
    assert_eq!(
        actions::apply(CareAction::Play { reward: 11 }, &live, 0).unwrap(),
        Some(actions::play(&live, 11).unwrap())
    );
    assert_eq!(
        actions::apply(CareAction::Claim, &live, 37).unwrap(),
        Some(actions::claim(&live, 37).unwrap())
    );
    assert_eq!(actions::apply(CareAction::DeathCheck, &live, 0).unwrap(), None);
}
