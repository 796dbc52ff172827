use indexmap::IndexMap;
use models::{CardId, Catalog, ItemId, LevelId};
use serde::{Deserialize, Serialize};

use crate::{
    Attributes, BattleRules, BattleTemplate, PlayerTemplate, ProgressError, MAX_DECK_SIZE,
    STARTER_CARDS, STARTING_HEALTH, STARTING_MANA,
};

/// Totals accumulated over every recorded battle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeStats {
    pub total_damage_dealt: u64,
    pub total_healing: u64,
    pub total_gold_earned: u64,
    pub total_battles_won: u64,
    pub total_cards_played: u64,
    pub total_damage_taken: u64,
}

/// Everything that outlives a single battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressState {
    pub unlocked_levels: Vec<LevelId>,
    pub owned_cards: Vec<CardId>,
    pub equipped_cards: Vec<CardId>,
    pub gold: u32,
    pub level: u32,
    pub experience: u32,
    /// Health carried between battles, never above `max_health`.
    pub health: u32,
    pub max_health: u32,
    pub max_mana: u32,
    pub attributes: Attributes,
    pub stats: LifetimeStats,
    /// Owned consumables and how many of each.
    pub items: IndexMap<ItemId, u32>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl ProgressState {
    /// Level 1 unlocked with the starter cards owned and equipped.
    pub fn new_game() -> Self {
        let starter: Vec<CardId> = STARTER_CARDS.iter().map(|c| CardId::from(*c)).collect();
        Self {
            unlocked_levels: vec![LevelId(1)],
            owned_cards: starter.clone(),
            equipped_cards: starter,
            gold: 0,
            level: 1,
            experience: 0,
            health: *STARTING_HEALTH,
            max_health: *STARTING_HEALTH,
            max_mana: *STARTING_MANA,
            attributes: Attributes::default(),
            stats: LifetimeStats::default(),
            items: IndexMap::new(),
        }
    }

    pub fn is_unlocked(&self, level: LevelId) -> bool {
        self.unlocked_levels.contains(&level)
    }

    pub fn owns(&self, card: &CardId) -> bool {
        self.owned_cards.contains(card)
    }

    pub fn is_equipped(&self, card: &CardId) -> bool {
        self.equipped_cards.contains(card)
    }

    pub fn player_template(&self) -> PlayerTemplate {
        PlayerTemplate {
            health: self.max_health,
            mana: self.max_mana,
            attributes: self.attributes,
            cards: self.equipped_cards.clone(),
            current_health: Some(self.health.min(self.max_health)),
        }
    }

    pub fn battle_template(&self, level: LevelId) -> Result<BattleTemplate, ProgressError> {
        if !self.is_unlocked(level) {
            return Err(ProgressError::LevelLocked(level));
        }
        Ok(BattleTemplate {
            seed: None,
            level,
            player: self.player_template(),
            rules: BattleRules::default(),
        })
    }

    pub fn buy_card(&mut self, card_id: &CardId, catalog: &dyn Catalog) -> Result<(), ProgressError> {
        let card = catalog
            .card_by_id(card_id)
            .ok_or_else(|| ProgressError::CardNotFound(card_id.clone()))?;
        if self.owns(card_id) {
            return Err(ProgressError::AlreadyOwned(card_id.clone()));
        }
        if self.gold < card.price {
            return Err(ProgressError::NotEnoughGold {
                required: card.price,
                available: self.gold,
            });
        }
        self.gold -= card.price;
        self.owned_cards.push(card_id.clone());
        tracing::info!(card = %card_id, price = card.price, gold = self.gold, "card bought");
        Ok(())
    }

    pub fn equip_card(&mut self, card_id: &CardId) -> Result<(), ProgressError> {
        if !self.owns(card_id) {
            return Err(ProgressError::NotOwned(card_id.clone()));
        }
        if self.is_equipped(card_id) {
            return Err(ProgressError::AlreadyEquipped(card_id.clone()));
        }
        if self.equipped_cards.len() >= *MAX_DECK_SIZE {
            return Err(ProgressError::DeckFull(*MAX_DECK_SIZE));
        }
        self.equipped_cards.push(card_id.clone());
        tracing::debug!(card = %card_id, "card equipped");
        Ok(())
    }

    pub fn unequip_card(&mut self, card_id: &CardId) -> Result<(), ProgressError> {
        let Some(index) = self.equipped_cards.iter().position(|c| c == card_id) else {
            return Err(ProgressError::NotEquipped(card_id.clone()));
        };
        self.equipped_cards.remove(index);
        tracing::debug!(card = %card_id, "card unequipped");
        Ok(())
    }
}
