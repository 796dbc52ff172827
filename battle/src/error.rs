use models::{CardId, ItemId, LevelId};

use crate::{CardInstanceId, TurnPhase};

/// Input the battle refuses without touching any state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalAction {
    #[error("card {0} is not in hand")]
    CardNotInHand(CardInstanceId),
    #[error("card costs {required} mana but only {available} is available")]
    InsufficientMana { required: u32, available: u32 },
    #[error("not allowed during {0:?}")]
    OutOfPhase(TurnPhase),
    #[error("the battle is already over")]
    BattleOver,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),
    #[error("{kind} {id:?} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("invalid deck: {0}")]
    InvalidDeck(String),
    #[error("battle invariant violated: {0}")]
    Invariant(String),
    #[error("battle aborted after an invariant violation")]
    Aborted,
}

impl BattleError {
    pub fn card_not_found(id: &CardId) -> Self {
        BattleError::NotFound {
            kind: "card",
            id: id.to_string(),
        }
    }

    pub fn level_not_found(id: LevelId) -> Self {
        BattleError::NotFound {
            kind: "level",
            id: id.to_string(),
        }
    }

    /// Fatal errors mean the session is aborted and takes no further input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BattleError::Invariant(..) | BattleError::Aborted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("card {0} not found")]
    CardNotFound(CardId),
    #[error("card {0} is already owned")]
    AlreadyOwned(CardId),
    #[error("card {0} is not owned")]
    NotOwned(CardId),
    #[error("card {0} is already equipped")]
    AlreadyEquipped(CardId),
    #[error("card {0} is not equipped")]
    NotEquipped(CardId),
    #[error("deck is full ({0} cards)")]
    DeckFull(usize),
    #[error("not enough gold: need {required}, have {available}")]
    NotEnoughGold { required: u32, available: u32 },
    #[error("level {0} is locked")]
    LevelLocked(LevelId),
    #[error("item {0} not found")]
    ItemNotFound(ItemId),
    #[error("item {0} is not owned")]
    ItemNotOwned(ItemId),
}
