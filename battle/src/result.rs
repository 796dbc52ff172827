use models::{LevelId, Rewards};

use crate::StatsSnapshot;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

impl std::fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleOutcome::Victory => write!(f, "Victory"),
            BattleOutcome::Defeat => write!(f, "Defeat"),
        }
    }
}

/// Everything the outer game needs once a battle is over. Rewards are only
/// present on victory.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub level: LevelId,
    pub stats: StatsSnapshot,
    pub rewards: Option<Rewards>,
    /// Player health when the battle ended.
    pub player_health: u32,
}

impl BattleReport {
    pub fn is_victory(&self) -> bool {
        self.outcome == BattleOutcome::Victory
    }
}

impl std::fmt::Display for BattleReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[level {}] {} ({})", self.level, self.outcome, self.stats)?;
        if let Some(rewards) = &self.rewards {
            write!(f, " +{} gold +{} xp", rewards.gold, rewards.experience)?;
            for card in &rewards.cards {
                write!(f, " +{card}")?;
            }
        }
        Ok(())
    }
}
