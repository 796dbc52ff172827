use models::{CardId, Catalog, ItemId, ItemKind, LevelId};
use tracing::Level;

use crate::{BattleReport, ProgressState, EXPERIENCE_PER_LEVEL, LEVEL_UP_HEALTH, LEVEL_UP_MANA};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    LevelUp { level: u32 },
    LevelUnlocked(LevelId),
    CardUnlocked(CardId),
    ItemUsed { item: ItemId, kind: ItemKind, amount: u32 },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewardSummary {
    pub gold: u32,
    pub experience: u32,
    pub leveled_up_to: Option<u32>,
    pub events: Vec<ProgressEvent>,
}

impl ProgressState {
    /// Folds a finished battle into the progress. Stats always count; gold,
    /// experience, unlocks and cards only come with a victory. A win keeps
    /// the health the player finished with, a loss sends them back at full.
    pub fn record_battle(&mut self, report: &BattleReport, catalog: &dyn Catalog) -> RewardSummary {
        let stats = &mut self.stats;
        stats.total_damage_dealt += u64::from(report.stats.damage_dealt);
        stats.total_healing += u64::from(report.stats.healing);
        stats.total_cards_played += u64::from(report.stats.cards_played);
        stats.total_damage_taken += u64::from(report.stats.damage_taken);

        let mut summary = RewardSummary::default();
        if !report.is_victory() {
            self.health = self.max_health;
            return summary;
        }
        self.health = report.player_health.min(self.max_health);
        let rewards = report
            .rewards
            .clone()
            .or_else(|| catalog.level_by_id(report.level).map(|l| l.rewards.clone()))
            .unwrap_or_default();

        self.stats.total_battles_won += 1;
        self.gold = self.gold.saturating_add(rewards.gold);
        self.stats.total_gold_earned += u64::from(rewards.gold);
        self.experience = self.experience.saturating_add(rewards.experience);
        summary.gold = rewards.gold;
        summary.experience = rewards.experience;

        loop {
            let needed = self.level * *EXPERIENCE_PER_LEVEL;
            if self.experience < needed {
                break;
            }
            self.experience -= needed;
            self.level += 1;
            self.max_health += *LEVEL_UP_HEALTH;
            self.max_mana += *LEVEL_UP_MANA;
            tracing::event!(name: "level up", Level::INFO, level = self.level);
            summary.leveled_up_to = Some(self.level);
            summary.events.push(ProgressEvent::LevelUp { level: self.level });
        }

        let next = report.level.next();
        if (next.0 as usize) <= catalog.level_count() && !self.is_unlocked(next) {
            self.unlocked_levels.push(next);
            tracing::event!(name: "level unlocked", Level::INFO, level = %next);
            summary.events.push(ProgressEvent::LevelUnlocked(next));
        }

        for card_id in &rewards.cards {
            if catalog.card_by_id(card_id).is_none() {
                tracing::warn!(card = %card_id, "skipping unknown reward card");
                continue;
            }
            if self.owns(card_id) {
                continue;
            }
            self.owned_cards.push(card_id.clone());
            tracing::event!(name: "card unlocked", Level::INFO, card = %card_id);
            summary.events.push(ProgressEvent::CardUnlocked(card_id.clone()));
        }
        summary
    }
}
