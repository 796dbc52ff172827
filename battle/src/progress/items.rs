use models::{Catalog, ItemId, ItemKind};
use tracing::Level;

use crate::{ProgressError, ProgressEvent, ProgressState};

impl ProgressState {
    pub fn item_count(&self, item: &ItemId) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn buy_item(&mut self, item_id: &ItemId, catalog: &dyn Catalog) -> Result<(), ProgressError> {
        let item = catalog
            .item_by_id(item_id)
            .ok_or_else(|| ProgressError::ItemNotFound(item_id.clone()))?;
        if self.gold < item.price {
            return Err(ProgressError::NotEnoughGold {
                required: item.price,
                available: self.gold,
            });
        }
        self.gold -= item.price;
        let count = self.items.entry(item_id.clone()).or_insert(0);
        *count = count.saturating_add(1);
        tracing::info!(item = %item_id, price = item.price, gold = self.gold, owned = *count, "item bought");
        Ok(())
    }

    /// Consumes one of an owned item. The returned event carries what the
    /// item actually changed, so a potion used at full health reports 0.
    pub fn use_item(&mut self, item_id: &ItemId, catalog: &dyn Catalog) -> Result<ProgressEvent, ProgressError> {
        let item = catalog
            .item_by_id(item_id)
            .ok_or_else(|| ProgressError::ItemNotFound(item_id.clone()))?;
        let Some(count) = self.items.get_mut(item_id).filter(|count| **count > 0) else {
            return Err(ProgressError::ItemNotOwned(item_id.clone()));
        };
        *count -= 1;
        if *count == 0 {
            self.items.shift_remove(item_id);
        }

        let amount = match item.kind {
            ItemKind::Heal => {
                let before = self.health;
                self.health = self.health.saturating_add(item.value).min(self.max_health);
                self.health - before
            }
            ItemKind::MaxHealthUp => {
                self.max_health = self.max_health.saturating_add(item.value);
                self.health = self.health.saturating_add(item.value).min(self.max_health);
                item.value
            }
            ItemKind::MaxManaUp => {
                self.max_mana = self.max_mana.saturating_add(item.value);
                item.value
            }
        };
        tracing::event!(
            name: "item used",
            Level::INFO,
            item = %item_id,
            kind = %item.kind,
            amount,
            health = self.health,
            max_health = self.max_health,
            max_mana = self.max_mana,
        );
        Ok(ProgressEvent::ItemUsed {
            item: item_id.clone(),
            kind: item.kind,
            amount,
        })
    }
}
