use std::sync::Arc;

use super::{Card, CardId, Item, ItemId, Level, LevelId};

/// Read-only lookups for card, item and level definitions.
pub trait Catalog {
    fn card_by_id(&self, id: &CardId) -> Option<Arc<Card>>;

    fn level_by_id(&self, id: LevelId) -> Option<&Level>;

    fn level_count(&self) -> usize;

    fn item_by_id(&self, id: &ItemId) -> Option<&Item>;
}
