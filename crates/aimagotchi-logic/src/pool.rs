//! Coin pool arithmetic for the shared ledger fed by dead pets.
//!
//! Credits happen exactly once per pet, as part of its death transition.
//! Debits happen only through claims, bounded so the pool can never go
//! negative.

use crate::constants::{CLAIM_CAP, POOL_CLAIM_MIN};

/// Whether the pool holds enough coins for any claim at all.
pub fn can_claim(total: u64) -> bool {
    total >= POOL_CLAIM_MIN
}

/// Coins released by one claim: a tenth of the pool (integer floor),
/// capped at [`CLAIM_CAP`]. Always <= `total` by construction.
pub fn claim_amount(total: u64) -> u64 {
    (total / 10).min(CLAIM_CAP)
}

/// Credit a dead pet's balance into the pool.
pub fn credit(total: u64, amount: u64) -> u64 {
    total.saturating_add(amount)
}

/// Debit a claim from the pool. The amount comes from [`claim_amount`],
/// so this cannot underflow; saturate anyway rather than wrap.
pub fn debit(total: u64, amount: u64) -> u64 {
    total.saturating_sub(amount)
}
