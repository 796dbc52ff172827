use models::EffectTarget;

use crate::BattleOutcome;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Resolves an effect target relative to `self` acting.
    pub fn resolve(&self, target: EffectTarget) -> Side {
        match target {
            EffectTarget::Caster => *self,
            EffectTarget::Opponent => self.other(),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    PlayerTurnStart,
    PlayerActing,
    PlayerTurnEnd,
    EnemyTurnStart,
    EnemyActing,
    EnemyTurnEnd,
    BattleOver(BattleOutcome),
    Aborted,
}

impl TurnPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnPhase::BattleOver(..) | TurnPhase::Aborted)
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            TurnPhase::PlayerTurnStart | TurnPhase::PlayerActing | TurnPhase::PlayerTurnEnd => {
                Some(Side::Player)
            }
            TurnPhase::EnemyTurnStart | TurnPhase::EnemyActing | TurnPhase::EnemyTurnEnd => {
                Some(Side::Enemy)
            }
            TurnPhase::BattleOver(..) | TurnPhase::Aborted => None,
        }
    }
}
