use models::{EnemyStats, StatusKind};

use crate::{ActiveEffect, Attributes, BattleError, PlayerTemplate, Pool, Side, VITALITY_HEALTH_BONUS};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DamageReport {
    pub absorbed: u32,
    pub lost: u32,
}

#[derive(Clone, Debug)]
pub struct Combatant {
    pub side: Side,
    pub name: String,
    pub health: Pool,
    pub mana: Pool,
    pub block: u32,
    pub attack: u32,
    pub attributes: Attributes,
    pub effects: Vec<ActiveEffect>,
}

impl Combatant {
    pub fn player(template: &PlayerTemplate) -> Self {
        let bonus = template
            .attributes
            .vitality
            .saturating_mul(*VITALITY_HEALTH_BONUS);
        let max_health = template.health.saturating_add(bonus);
        let health = match template.current_health {
            Some(current) => Pool::new(current, max_health),
            None => Pool::full(max_health),
        };
        Self {
            side: Side::Player,
            name: "Player".to_string(),
            health,
            mana: Pool::full(template.mana),
            block: 0,
            attack: 0,
            attributes: template.attributes,
            effects: Vec::new(),
        }
    }

    pub fn enemy(stats: &EnemyStats) -> Self {
        Self {
            side: Side::Enemy,
            name: stats.name.clone(),
            health: Pool::full(stats.health),
            mana: Pool::full(0),
            block: 0,
            attack: stats.attack,
            attributes: Attributes::default(),
            effects: Vec::new(),
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_empty()
    }

    /// Block soaks damage first, whatever is left comes off health.
    pub fn take_damage(&mut self, amount: u32) -> DamageReport {
        let absorbed = amount.min(self.block);
        self.block -= absorbed;
        let before = self.health.current();
        self.health -= amount - absorbed;
        DamageReport {
            absorbed,
            lost: before - self.health.current(),
        }
    }

    /// Returns the health actually restored; overheal is dropped.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health.current();
        self.health += amount;
        self.health.current() - before
    }

    pub fn gain_block(&mut self, amount: u32) {
        self.block = self.block.saturating_add(amount);
    }

    pub fn gain_mana(&mut self, amount: u32) -> u32 {
        let before = self.mana.current();
        self.mana += amount;
        self.mana.current() - before
    }

    pub fn status_magnitude(&self, kind: StatusKind) -> u32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .fold(0u32, |total, e| total.saturating_add(e.magnitude))
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Damage this combatant deals with an action of `base` damage.
    pub fn outgoing_damage(&self, base: u32) -> u32 {
        base.saturating_add(self.attributes.strength)
            .saturating_add(self.status_magnitude(StatusKind::Strength))
            .saturating_sub(self.status_magnitude(StatusKind::Weakness))
    }

    pub fn check_invariants(&self) -> Result<(), BattleError> {
        if self.health.current() > self.health.max() {
            return Err(BattleError::Invariant(format!(
                "{} health {} exceeds max",
                self.name, self.health
            )));
        }
        if self.mana.current() > self.mana.max() {
            return Err(BattleError::Invariant(format!(
                "{} mana {} exceeds max",
                self.name, self.mana
            )));
        }
        if let Some(effect) = self.effects.iter().find(|e| e.duration == 0) {
            return Err(BattleError::Invariant(format!(
                "{} carries an expired {} effect",
                self.name, effect.kind
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Combatant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let effects = self
            .effects
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        write!(
            f,
            "{}(❤️ {}, 💧:{}, 🛡️:{}) [{effects}]",
            self.name, self.health, self.mana, self.block,
        )
    }
}
