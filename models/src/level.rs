use serde::{Deserialize, Serialize};

use super::{CardId, Effect, EffectTarget};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(pub u32);

impl LevelId {
    pub fn next(&self) -> LevelId {
        LevelId(self.0 + 1)
    }
}

impl std::fmt::Display for LevelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub name: String,
    pub enemy: EnemyStats,
    #[serde(default)]
    pub rewards: Rewards,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnemyStats {
    pub name: String,
    pub health: u32,
    pub attack: u32,
    #[serde(default)]
    pub script: Vec<Effect>,
}

impl EnemyStats {
    /// The action taken on the enemy's `turn_index`-th turn (0-based). An
    /// unscripted enemy always attacks for its attack value.
    pub fn action_for_turn(&self, turn_index: usize) -> Effect {
        if self.script.is_empty() {
            return Effect::DealDamage(EffectTarget::Opponent, self.attack);
        }
        self.script[turn_index % self.script.len()].clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub cards: Vec<CardId>,
}
