use models::CardId;
use serde::Deserialize;

use crate::{Attributes, STARTING_HEALTH, STARTING_MANA};

#[derive(Clone, Debug, Deserialize)]
pub struct PlayerTemplate {
    #[serde(default = "default_health")]
    pub health: u32,
    #[serde(default = "default_mana")]
    pub mana: u32,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub cards: Vec<CardId>,
    /// Health carried in from earlier battles; `None` starts at full.
    #[serde(default)]
    pub current_health: Option<u32>,
}

fn default_health() -> u32 {
    *STARTING_HEALTH
}

fn default_mana() -> u32 {
    *STARTING_MANA
}

impl PlayerTemplate {
    pub fn with_cards(cards: &[&str]) -> Self {
        Self {
            health: default_health(),
            mana: default_mana(),
            attributes: Attributes::default(),
            cards: cards.iter().map(|c| CardId::from(*c)).collect(),
            current_health: None,
        }
    }
}
