//! Optimal single-day slotting for a fixed set of players.
//!
//! Given the players who play on a day, [`optimal_lineup`] assigns them to slots so
//! that the most restrictive slots are filled first. Each filled slot contributes its
//! [`Slot::weight`] to the placement score, so a lineup that puts players into rigid
//! positions scores higher than one that spends the flexible slots. The flexible
//! capacity left over is what the streaming search later works with.
//!
//! # Search
//!
//! Recursive backtracking over `(remaining players, slot index)`:
//!
//! - Slots are visited in catalog order (most restrictive first, bench last)
//! - Players are tried most-constrained first (fewest eligible slots)
//! - At each slot every remaining eligible player is tried and undone afterwards; if
//!   nobody is eligible the slot is skipped
//! - A complete placement (no players left, or no slots left) is scored and kept if it
//!   beats the best so far
//!
//! The best achievable score for `n` players has a closed form ([`max_score`]). Once a
//! placement reaches it, an early-exit flag stops every pending branch.
//!
//! The first placement to reach the best score wins; the search is deterministic for
//! a given player order.

use arrayvec::ArrayVec;

use crate::{Lineup, Player, Slot, WeekWindow};

/// Upper bound on the number of players one solver call accepts.
pub const MAX_SLOTTING_PLAYERS: usize = 32;

/// Best achievable placement score for `count` players.
///
/// Follows the slot weights: four slots of 5, two of 4, one of 3, three of 2 and
/// then 1 for every further player.
///
/// ```
/// use rostream_engine::slotting::max_score;
///
/// assert_eq!(max_score(4), 20);
/// assert_eq!(max_score(7), 31);
/// assert_eq!(max_score(12), 39);
/// ```
#[must_use]
pub const fn max_score(count: usize) -> u32 {
    #[expect(clippy::cast_possible_truncation)]
    let n = count as u32;
    match count {
        0..=4 => n * 5,
        5..=6 => 20 + (n - 4) * 4,
        7 => 28 + (n - 6) * 3,
        8..=10 => 31 + (n - 7) * 2,
        _ => 37 + (n - 10),
    }
}

/// Search state shared by every level of the recursion.
#[derive(Debug)]
struct SlottingContext<'a> {
    players: &'a [Player],
    placement: [Option<usize>; Slot::LEN],
    best: [Option<usize>; Slot::LEN],
    top_score: u32,
    max_score: u32,
    early_exit: bool,
}

impl<'a> SlottingContext<'a> {
    fn new(players: &'a [Player]) -> Self {
        Self {
            players,
            placement: [None; Slot::LEN],
            best: [None; Slot::LEN],
            top_score: 0,
            max_score: max_score(players.len()),
            early_exit: false,
        }
    }

    fn placement_score(&self) -> u32 {
        Slot::ALL
            .into_iter()
            .zip(self.placement)
            .filter_map(|(slot, player)| player.map(|_| slot.weight()))
            .sum()
    }

    fn record_placement(&mut self) {
        let score = self.placement_score();
        if score > self.top_score {
            self.top_score = score;
            self.best = self.placement;
        }
        if score == self.max_score {
            self.early_exit = true;
        }
    }

    fn into_lineup(self) -> Lineup {
        let mut lineup = Lineup::new();
        for slot in Slot::STARTING {
            let player = self.best[slot.index()].map(|i| self.players[i].clone());
            lineup.set(slot, player);
        }
        lineup
    }
}

fn fit_players(
    ctx: &mut SlottingContext<'_>,
    remaining: &mut ArrayVec<usize, MAX_SLOTTING_PLAYERS>,
    slot_index: usize,
) {
    if ctx.early_exit {
        return;
    }
    if remaining.is_empty() || slot_index == Slot::LEN {
        ctx.record_placement();
        return;
    }

    let slot = Slot::ALL[slot_index];
    let mut found_player = false;
    for i in 0..remaining.len() {
        let player = remaining[i];
        if !ctx.players[player].plays(slot) {
            continue;
        }
        found_player = true;

        remaining.remove(i);
        ctx.placement[slot_index] = Some(player);
        fit_players(ctx, remaining, slot_index + 1);
        ctx.placement[slot_index] = None;
        remaining.insert(i, player);
    }

    if !found_player {
        fit_players(ctx, remaining, slot_index + 1);
    }
}

/// Computes the highest-scoring lineup for `players`.
///
/// All given players are assumed to be playing. The result has an entry for every
/// starting slot; players the search put on the bench (or could not place) do not
/// appear in it.
///
/// # Panics
///
/// Panics if more than [`MAX_SLOTTING_PLAYERS`] players are given.
///
/// # Example
///
/// ```
/// use rostream_engine::{Player, Slot, slotting::optimal_lineup};
///
/// let players = [
///     Player::new("Flex", 30.0, "BOS", &[Slot::PointGuard, Slot::Guard, Slot::Utility1]),
///     Player::new("Rigid", 25.0, "BOS", &[Slot::PointGuard]),
/// ];
/// let lineup = optimal_lineup(&players);
/// assert_eq!(lineup.get(Slot::PointGuard).map(|p| p.id()), Some("Rigid"));
/// assert_eq!(lineup.get(Slot::Guard).map(|p| p.id()), Some("Flex"));
/// ```
#[must_use]
pub fn optimal_lineup(players: &[Player]) -> Lineup {
    assert!(
        players.len() <= MAX_SLOTTING_PLAYERS,
        "cannot slot {} players (limit {MAX_SLOTTING_PLAYERS})",
        players.len()
    );

    let mut sorted = players.to_vec();
    sorted.sort_by_key(|p| p.eligible_slots().len());

    let mut ctx = SlottingContext::new(&sorted);
    let mut remaining = (0..sorted.len()).collect();
    fit_players(&mut ctx, &mut remaining, 0);

    log::trace!(
        "slotted {} players: score {}/{}{}",
        sorted.len(),
        ctx.top_score,
        ctx.max_score,
        if ctx.early_exit { " (early exit)" } else { "" }
    );
    ctx.into_lineup()
}

/// Computes the optimal lineup for the players of `players` who play on `day`.
///
/// # Panics
///
/// Panics if `day` lies outside the week or too many players play that day.
#[must_use]
pub fn optimal_lineup_for_day(players: &[Player], week: &WeekWindow, day: usize) -> Lineup {
    let playing = players
        .iter()
        .filter(|p| week.is_playing(day, &p.team))
        .cloned()
        .collect::<Vec<_>>();
    optimal_lineup(&playing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, positions: &[Slot]) -> Player {
        Player::new(name, 30.0, "BOS", positions)
    }

    fn slot_of(lineup: &Lineup, name: &str) -> Option<Slot> {
        lineup
            .occupied()
            .find_map(|(slot, p)| (p.id() == name).then_some(slot))
    }

    #[test]
    fn test_max_score_table() {
        let expected = [0, 5, 10, 15, 20, 24, 28, 31, 33, 35, 37, 38, 39, 40];
        for (count, score) in expected.into_iter().enumerate() {
            assert_eq!(max_score(count), score, "count = {count}");
        }
    }

    #[test]
    fn test_rigid_players_take_rigid_slots() {
        let players = [
            player(
                "Guard Flex",
                &[
                    Slot::PointGuard,
                    Slot::ShootingGuard,
                    Slot::Guard,
                    Slot::Utility1,
                    Slot::Utility2,
                    Slot::Utility3,
                ],
            ),
            player("Point", &[Slot::PointGuard]),
            player("Shooter", &[Slot::ShootingGuard]),
        ];
        let lineup = optimal_lineup(&players);

        assert_eq!(slot_of(&lineup, "Point"), Some(Slot::PointGuard));
        assert_eq!(slot_of(&lineup, "Shooter"), Some(Slot::ShootingGuard));
        assert_eq!(slot_of(&lineup, "Guard Flex"), Some(Slot::Guard));
        assert_eq!(lineup.unused_slots().len(), Slot::STARTING_LEN - 3);
    }

    #[test]
    fn test_every_player_fills_at_most_one_slot() {
        let all = &Slot::STARTING;
        let players = (0..8)
            .map(|i| player(&format!("P{i}"), all))
            .collect::<Vec<_>>();
        let lineup = optimal_lineup(&players);

        let mut names = lineup.occupied().map(|(_, p)| p.id()).collect::<Vec<_>>();
        assert_eq!(names.len(), 8);
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn test_overflow_players_go_to_bench() {
        let bigs = [Slot::Center, Slot::Utility1, Slot::Utility2, Slot::Utility3];
        let players = (0..6)
            .map(|i| player(&format!("C{i}"), &bigs))
            .collect::<Vec<_>>();
        let lineup = optimal_lineup(&players);

        // one center, three utility spots; the rest are benched
        assert_eq!(lineup.occupied().count(), 4);
        assert!(lineup.get(Slot::Center).is_some());
        assert!(lineup.get(Slot::PointGuard).is_none());
    }

    #[test]
    fn test_empty_player_set_yields_empty_lineup() {
        let lineup = optimal_lineup(&[]);
        assert_eq!(lineup, Lineup::new());
    }

    #[test]
    fn test_slotting_is_deterministic() {
        let players = [
            player("A", &[Slot::PointGuard, Slot::Guard, Slot::Utility1]),
            player("B", &[Slot::ShootingGuard, Slot::Guard, Slot::Forward]),
            player("C", &[Slot::SmallForward, Slot::PowerForward, Slot::Forward]),
            player("D", &[Slot::PowerForward, Slot::Center, Slot::Forward]),
            player("E", &[Slot::Center]),
            player("F", &[Slot::Guard, Slot::Forward, Slot::Utility1]),
            player("G", &Slot::STARTING),
        ];
        let first = optimal_lineup(&players);
        for _ in 0..10 {
            assert_eq!(optimal_lineup(&players), first);
        }
    }

    #[test]
    fn test_for_day_only_slots_playing_players() {
        let week = WeekWindow::new(2)
            .with_games("BOS", [0])
            .with_games("NYK", [1]);
        let players = [
            Player::new("Celtic", 30.0, "BOS", &[Slot::PointGuard]),
            Player::new("Knick", 30.0, "NYK", &[Slot::PointGuard]),
        ];

        let day0 = optimal_lineup_for_day(&players, &week, 0);
        assert_eq!(day0.get(Slot::PointGuard).map(Player::id), Some("Celtic"));

        let day1 = optimal_lineup_for_day(&players, &week, 1);
        assert_eq!(day1.get(Slot::PointGuard).map(Player::id), Some("Knick"));

        let day2 = optimal_lineup_for_day(&players, &week, 2);
        assert_eq!(day2.occupied().count(), 0);
    }
}
