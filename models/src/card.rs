use std::sync::Arc;

use heck::ToTitleCase;
use serde::{Deserialize, Serialize};

use super::{CardType, Effect, Rarity};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable card definition as loaded from a catalog. Battles share these
/// through `Arc` and never mutate them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "CardRecord")]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub cost: u32,
    pub rarity: Rarity,
    pub card_type: CardType,
    pub price: u32,
    pub effects: Arc<[Effect]>,
    pub description: String,
}

#[derive(Deserialize)]
struct CardRecord {
    id: CardId,
    #[serde(default)]
    name: Option<String>,
    cost: u32,
    #[serde(default)]
    rarity: Rarity,
    #[serde(rename = "type")]
    card_type: CardType,
    #[serde(default)]
    price: u32,
    effects: Vec<Effect>,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<CardRecord> for Card {
    type Error = anyhow::Error;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        if record.effects.is_empty() {
            anyhow::bail!("card {} has no effects", record.id);
        }
        let name = record
            .name
            .unwrap_or_else(|| record.id.0.to_title_case());
        let description = record
            .description
            .unwrap_or_else(|| describe_effects(&record.effects));
        Ok(Card {
            id: record.id,
            name,
            cost: record.cost,
            rarity: record.rarity,
            card_type: record.card_type,
            price: record.price,
            effects: record.effects.into(),
            description,
        })
    }
}

fn describe_effects(effects: &[Effect]) -> String {
    effects
        .iter()
        .map(|effect| {
            let phrase = effect.to_string();
            let mut chars = phrase.chars();
            match chars.next() {
                Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
                None => phrase,
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

impl Card {
    pub fn is_affordable(&self, mana: u32) -> bool {
        self.cost <= mana
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{} {}, cost {}] {}",
            self.name, self.rarity, self.card_type, self.cost, self.description
        )
    }
}
