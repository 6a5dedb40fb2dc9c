use std::collections::HashSet;

use rostream_engine::{Player, RosterSetup, Slot, WeekWindow};

use crate::{COOLDOWN_DAYS, Chromosome, SearchContext};

const GUARD: &[Slot] = &[
    Slot::PointGuard,
    Slot::ShootingGuard,
    Slot::Guard,
    Slot::Utility1,
    Slot::Utility2,
    Slot::Utility3,
];
const WING: &[Slot] = &[
    Slot::SmallForward,
    Slot::PowerForward,
    Slot::Forward,
    Slot::Utility1,
    Slot::Utility2,
    Slot::Utility3,
];
const BIG: &[Slot] = &[
    Slot::PowerForward,
    Slot::Center,
    Slot::Forward,
    Slot::Utility1,
    Slot::Utility2,
    Slot::Utility3,
];

/// A six-day week with three core players, four streamers and a small free-agent pool.
pub(crate) fn fixture() -> (WeekWindow, RosterSetup) {
    let week = WeekWindow::new(5)
        .with_games("BOS", [0, 1, 2, 3, 4, 5])
        .with_games("NYK", [0, 2, 4])
        .with_games("LAL", [1, 3, 5])
        .with_games("MIA", [0, 1, 3, 4])
        .with_games("DEN", [2, 3, 5])
        .with_games("PHX", [0, 5])
        .with_games("CHI", [1, 2, 4]);

    let roster = vec![
        Player::new("Core Guard", 45.0, "BOS", GUARD),
        Player::new("Core Wing", 40.0, "MIA", WING),
        Player::new("Core Big", 38.0, "DEN", BIG),
        Player::new("Stream Guard", 25.0, "NYK", GUARD),
        Player::new("Stream Wing", 22.0, "LAL", WING),
        Player::new("Stream Big", 18.0, "PHX", BIG),
        Player::new("Stream Flex", 15.0, "CHI", &Slot::STARTING),
    ];
    let free_agents = vec![
        Player::new("FA Guard 1", 28.0, "BOS", GUARD),
        Player::new("FA Guard 2", 20.0, "MIA", GUARD),
        Player::new("FA Wing 1", 24.0, "DEN", WING),
        Player::new("FA Wing 2", 17.0, "CHI", WING),
        Player::new("FA Big 1", 26.0, "LAL", BIG),
        Player::new("FA Big 2", 14.0, "NYK", BIG),
        Player::new("FA Hurt", 35.0, "BOS", BIG).injured(),
    ];

    let setup = RosterSetup::new("1", &week, roster, free_agents, 30.0).unwrap();
    (week, setup)
}

/// Checks the bookkeeping every chromosome must keep after any operation.
pub(crate) fn assert_consistent(ctx: SearchContext<'_>, chromosome: &Chromosome) {
    let genes = chromosome.genes();
    assert_eq!(genes.len(), ctx.day_count());
    assert_eq!(chromosome.streamers().len(), ctx.setup().streamers().len());

    let mut total = 0;
    for (day, gene) in genes.iter().enumerate() {
        assert_eq!(gene.day(), day);
        assert_eq!(gene.added().len(), gene.removed().len(), "day {day}");
        total += gene.acquisitions();

        let ids = gene.players().map(Player::id).collect::<Vec<_>>();
        let unique = ids.iter().collect::<HashSet<_>>();
        assert_eq!(ids.len(), unique.len(), "day {day}: duplicate player");

        let occupied = gene.occupied().map(|(slot, _)| slot).collect();
        assert_eq!(
            gene.free(),
            ctx.setup().unused_slots(day).difference(occupied),
            "day {day}: free slots out of sync"
        );
        for (slot, player) in gene.occupied() {
            assert!(player.plays(slot), "day {day}: {} cannot play {slot}", player.name);
            assert!(ctx.is_playing(day, player), "day {day}: {} is idle", player.name);
        }
    }
    assert_eq!(total, chromosome.total_acquisitions());
    assert_real_transactions(ctx, chromosome);

    let last = genes.last().unwrap();
    let active = chromosome
        .streamers()
        .iter()
        .map(Player::id)
        .collect::<HashSet<_>>();
    let rostered = last.players().map(Player::id).collect::<HashSet<_>>();
    assert_eq!(active, rostered, "last day differs from active streamers");
}

/// Checks that every recorded add and drop changes the roster, and that nobody is
/// re-added while cooling down.
fn assert_real_transactions(ctx: SearchContext<'_>, chromosome: &Chromosome) {
    let genes = chromosome.genes();
    let cooldown = usize::from(COOLDOWN_DAYS);
    for (day, gene) in genes.iter().enumerate() {
        for dropped in gene.removed() {
            assert!(!gene.contains(dropped.id()), "day {day}: {} still rostered", dropped.name);
            let was_rostered = match day.checked_sub(1) {
                Some(prev) => genes[prev].contains(dropped.id()),
                None => ctx.setup().streamers().iter().any(|p| p.id() == dropped.id()),
            };
            assert!(was_rostered, "day {day}: {} dropped but never rostered", dropped.name);
        }
        for added in gene.added() {
            assert!(gene.contains(added.id()), "day {day}: {} not rostered", added.name);
            if let Some(prev) = day.checked_sub(1) {
                assert!(
                    !genes[prev].contains(added.id()),
                    "day {day}: {} was already rostered",
                    added.name
                );
            }
            let first = (day + 1).saturating_sub(cooldown);
            for recent in &genes[first..=day] {
                assert!(
                    !recent.removed().iter().any(|p| p.id() == added.id()),
                    "day {day}: {} re-added within a cooldown of day {}",
                    added.name,
                    recent.day()
                );
            }
        }
    }
}
