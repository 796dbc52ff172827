use heck::ToTitleCase;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What using an item does to the player, scaled by [`Item::value`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Heal,
    MaxHealthUp,
    MaxManaUp,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Heal => write!(f, "heal"),
            ItemKind::MaxHealthUp => write!(f, "max health up"),
            ItemKind::MaxManaUp => write!(f, "max mana up"),
        }
    }
}

/// Consumable sold in the shop and used between battles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ItemRecord")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub value: u32,
    pub price: u32,
}

#[derive(Deserialize)]
struct ItemRecord {
    id: ItemId,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    kind: ItemKind,
    value: u32,
    #[serde(default)]
    price: u32,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        let name = record
            .name
            .unwrap_or_else(|| record.id.0.to_title_case());
        Item {
            id: record.id,
            name,
            kind: record.kind,
            value: record.value,
            price: record.price,
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{} {}, {} gold]", self.name, self.kind, self.value, self.price)
    }
}
