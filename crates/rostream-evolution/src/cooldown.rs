use std::collections::HashMap;

/// Days a dropped player stays ineligible for re-acquisition.
pub const COOLDOWN_DAYS: u8 = 3;

/// Recently dropped players and the days left until they may be added again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cooldowns {
    remaining: HashMap<String, u8>,
}

impl Cooldowns {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the countdown for `id`.
    pub fn start(&mut self, id: &str) {
        self.remaining.insert(id.to_owned(), COOLDOWN_DAYS);
    }

    #[must_use]
    pub fn is_cooling(&self, id: &str) -> bool {
        self.remaining.contains_key(id)
    }

    #[must_use]
    pub fn remaining(&self, id: &str) -> Option<u8> {
        self.remaining.get(id).copied()
    }

    /// Advances one day: every countdown drops by one and finished ones are evicted.
    pub fn tick(&mut self) {
        self.remaining.retain(|_, days| {
            *days = days.saturating_sub(1);
            *days > 0
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_evicts_at_zero() {
        let mut cooldowns = Cooldowns::new();
        cooldowns.start("A");
        assert_eq!(cooldowns.remaining("A"), Some(COOLDOWN_DAYS));

        for left in (1..COOLDOWN_DAYS).rev() {
            cooldowns.tick();
            assert_eq!(cooldowns.remaining("A"), Some(left));
        }
        cooldowns.tick();
        assert!(!cooldowns.is_cooling("A"));
        assert!(cooldowns.is_empty());
    }

    #[test]
    fn test_restart_resets_countdown() {
        let mut cooldowns = Cooldowns::new();
        cooldowns.start("A");
        cooldowns.tick();
        cooldowns.start("A");
        assert_eq!(cooldowns.remaining("A"), Some(COOLDOWN_DAYS));
        assert_eq!(cooldowns.len(), 1);
    }
}
