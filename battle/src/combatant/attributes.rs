use serde::{Deserialize, Serialize};

/// Player attributes. Strength adds to card damage, dexterity to block
/// from cards, intelligence to healing from cards and vitality to max
/// health.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub vitality: u32,
}
