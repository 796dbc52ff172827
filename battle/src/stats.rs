use serde::{Deserialize, Serialize};

/// Running per-battle counters, only ever increased by successful actions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BattleStats {
    damage_dealt: u32,
    healing: u32,
    cards_played: u32,
    damage_taken: u32,
}

impl BattleStats {
    pub fn record_damage(&mut self, amount: u32) {
        self.damage_dealt = self.damage_dealt.saturating_add(amount);
    }

    pub fn record_healing(&mut self, amount: u32) {
        self.healing = self.healing.saturating_add(amount);
    }

    pub fn record_card_played(&mut self) {
        self.cards_played += 1;
    }

    pub fn record_damage_taken(&mut self, amount: u32) {
        self.damage_taken = self.damage_taken.saturating_add(amount);
    }

    pub fn snapshot(&self, turn: u32) -> StatsSnapshot {
        StatsSnapshot {
            damage_dealt: self.damage_dealt,
            healing: self.healing,
            cards_played: self.cards_played,
            turn_count: turn,
            damage_taken: self.damage_taken,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub damage_dealt: u32,
    pub healing: u32,
    pub cards_played: u32,
    pub turn_count: u32,
    pub damage_taken: u32,
}

impl std::fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "turns={} cards={} dealt={} taken={} healed={}",
            self.turn_count, self.cards_played, self.damage_dealt, self.damage_taken, self.healing
        )
    }
}
