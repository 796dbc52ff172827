use std::sync::Arc;

use indexmap::IndexMap;
use models::{Card, CardId, Catalog, Item, ItemId, Level, LevelId};
use serde::Deserialize;

#[derive(Deserialize)]
struct CardFile {
    #[serde(default)]
    cards: Vec<Card>,
}

#[derive(Deserialize)]
struct LevelFile {
    #[serde(default)]
    levels: Vec<Level>,
}

#[derive(Deserialize)]
struct ItemFile {
    #[serde(default)]
    items: Vec<Item>,
}

/// Catalog held entirely in memory, keyed in declaration order.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    cards: IndexMap<CardId, Arc<Card>>,
    levels: Vec<Level>,
    items: IndexMap<ItemId, Item>,
}

impl StaticCatalog {
    pub fn from_toml_str(cards_source: &str, levels_source: &str) -> anyhow::Result<Self> {
        let card_file = toml::from_str::<CardFile>(cards_source)
            .map_err(|error| anyhow::anyhow!("unable to parse card catalog: {error}"))?;
        let level_file = toml::from_str::<LevelFile>(levels_source)
            .map_err(|error| anyhow::anyhow!("unable to parse level catalog: {error}"))?;

        let mut cards: IndexMap<CardId, Arc<Card>> = IndexMap::new();
        for card in card_file.cards {
            if cards.contains_key(&card.id) {
                anyhow::bail!("duplicate card id {}", card.id);
            }
            cards.insert(card.id.clone(), Arc::new(card));
        }

        let mut levels = level_file.levels;
        levels.sort_by_key(|level| level.id);
        for (index, level) in levels.iter().enumerate() {
            let expected = LevelId(index as u32 + 1);
            if level.id != expected {
                anyhow::bail!("level ids must be contiguous from 1, found {} at {expected}", level.id);
            }
            if level.enemy.health == 0 {
                anyhow::bail!("enemy {} of level {} has no health", level.enemy.name, level.id);
            }
            if let Some(missing) = level
                .rewards
                .cards
                .iter()
                .find(|id| !cards.contains_key(*id))
            {
                anyhow::bail!("level {} rewards unknown card {missing}", level.id);
            }
        }

        Ok(Self {
            cards,
            levels,
            items: IndexMap::new(),
        })
    }

    /// Adds the shop's items. Catalogs built without them sell nothing.
    pub fn with_items(mut self, items_source: &str) -> anyhow::Result<Self> {
        let item_file = toml::from_str::<ItemFile>(items_source)
            .map_err(|error| anyhow::anyhow!("unable to parse item catalog: {error}"))?;
        for item in item_file.items {
            if self.items.contains_key(&item.id) {
                anyhow::bail!("duplicate item id {}", item.id);
            }
            if item.value == 0 {
                anyhow::bail!("item {} has no effect", item.id);
            }
            self.items.insert(item.id.clone(), item);
        }
        Ok(self)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Arc<Card>> {
        self.cards.values()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}

impl Catalog for StaticCatalog {
    fn card_by_id(&self, id: &CardId) -> Option<Arc<Card>> {
        self.cards.get(id).cloned()
    }

    fn level_by_id(&self, id: LevelId) -> Option<&Level> {
        self.levels.iter().find(|level| level.id == id)
    }

    fn level_count(&self) -> usize {
        self.levels.len()
    }

    fn item_by_id(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }
}
