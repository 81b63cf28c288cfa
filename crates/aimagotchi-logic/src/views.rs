//! Read-side views: the leaderboard sort/slice contract.
//!
//! The server keeps its tables public and clients subscribe, so these
//! helpers define the ordering contract once for every consumer (harness,
//! native tools, client SDKs).

use crate::constants::LEADERBOARD_LIMIT;
use crate::stats::LiveStats;
use serde::{Deserialize, Serialize};

/// One leaderboard candidate: a pet with its stats projected to query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub pet_id: u64,
    pub name: String,
    pub is_alive: bool,
    pub live: LiveStats,
}

/// Top living pets by projected coins, descending, at most
/// [`LEADERBOARD_LIMIT`] entries. Dead entries are dropped here, so the
/// board never shows a dead pet no matter what callers pass in. The sort
/// is stable, so ties keep the caller's order.
pub fn leaderboard(entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<_> = entries.into_iter().filter(|e| e.is_alive).collect();
    entries.sort_by(|a, b| b.live.coins.cmp(&a.live.coins));
    entries.truncate(LEADERBOARD_LIMIT);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pet_id: u64, coins: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            pet_id,
            name: format!("pet-{}", pet_id),
            is_alive: true,
            live: LiveStats {
                hunger: 50.0,
                happiness: 50.0,
                energy: 50.0,
                coins,
                is_dying: false,
            },
        }
    }

    #[test]
    fn test_orders_by_coins_descending() {
        let board = leaderboard(vec![entry(1, 10), entry(2, 99), entry(3, 40)]);
        let coins: Vec<u64> = board.iter().map(|e| e.live.coins).collect();
        assert_eq!(coins, vec![99, 40, 10]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let entries: Vec<_> = (0..25).map(|i| entry(i, i)).collect();
        let board = leaderboard(entries);
        assert_eq!(board.len(), LEADERBOARD_LIMIT);
        assert_eq!(board[0].live.coins, 24);
    }

    #[test]
    fn test_excludes_dead_pets() {
        let mut dead = entry(4, 999);
        dead.is_alive = false;
        let board = leaderboard(vec![entry(1, 10), dead, entry(2, 40)]);
        assert_eq!(board.len(), 2);
        assert!(board.iter().all(|e| e.pet_id != 4));
        assert_eq!(board[0].pet_id, 2); // richest living pet leads
    }

    #[test]
    fn test_stable_on_ties() {
        let board = leaderboard(vec![entry(7, 40), entry(8, 40), entry(9, 40)]);
        let ids: Vec<u64> = board.iter().map(|e| e.pet_id).collect();
        assert_eq!(ids, vec![7, 8, 9]);
    }

    #[test]
    fn test_ordering_is_non_increasing() {
        let entries: Vec<_> = [3u64, 50, 7, 50, 2, 91].iter().enumerate()
            .map(|(i, &c)| entry(i as u64, c))
            .collect();
        let board = leaderboard(entries);
        for pair in board.windows(2) {
            assert!(pair[0].live.coins >= pair[1].live.coins);
        }
    }
}
