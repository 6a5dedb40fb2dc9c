use chrono::{DateTime, Utc};
use rostream_engine::{Lineup, Player, SlotSet};
use rostream_evolution::StreamingPlan;
use serde::{Deserialize, Serialize};

/// Contents of a league file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LeagueFile {
    pub(crate) roster: Vec<Player>,
    #[serde(default)]
    pub(crate) free_agents: Vec<Player>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct StreamingReport {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) seed: u64,
    pub(crate) plan: StreamingPlan,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SlottingReport {
    pub(crate) week: String,
    pub(crate) core_points: f64,
    pub(crate) days: Vec<DaySlotting>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DaySlotting {
    pub(crate) day: usize,
    pub(crate) lineup: Lineup,
    pub(crate) unused_slots: SlotSet,
}

#[cfg(test)]
mod tests {
    use rostream_engine::Slot;

    use super::*;

    #[test]
    fn test_league_file_defaults_free_agents() {
        let json = r#"{
            "roster": [
                { "name": "A", "avg_points": 40.0, "team": "BOS", "positions": ["PG", "G"] },
                { "name": "B", "avg_points": 18.5, "team": "NYK", "positions": ["C"], "injured": true }
            ]
        }"#;
        let league: LeagueFile = serde_json::from_str(json).unwrap();
        assert_eq!(league.roster.len(), 2);
        assert!(league.free_agents.is_empty());
        assert!(league.roster[0].plays(Slot::Guard));
        assert!(league.roster[1].injured);
    }
}
