use rostream_engine::{Player, by_points};

/// Players on a day's roster without a starting slot, ordered by points ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bench {
    players: Vec<Player>,
}

impl Bench {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `player` after every bench player with the same or fewer points.
    pub fn insert(&mut self, player: Player) {
        let index = self
            .players
            .partition_point(|p| by_points(p, &player).is_le());
        self.players.insert(index, player);
    }

    pub fn remove(&mut self, id: &str) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id() == id)?;
        Some(self.players.remove(index))
    }

    /// Removes and returns the lowest-scoring player.
    pub fn pop_worst(&mut self) -> Option<Player> {
        if self.players.is_empty() {
            return None;
        }
        Some(self.players.remove(0))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.players.iter().any(|p| p.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }
}
