use models::{Effect, EffectTarget, StackPolicy, StatusKind};
use tracing::Level;

use crate::{ActiveEffect, BattleError, Combatant, Side};

/// One observable state change produced while resolving an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delta {
    Damaged { side: Side, absorbed: u32, lost: u32 },
    Healed { side: Side, amount: u32 },
    BlockGained { side: Side, amount: u32 },
    ManaGained { side: Side, amount: u32 },
    StatusApplied { side: Side, kind: StatusKind, magnitude: u32, duration: u32 },
    StatusExpired { side: Side, kind: StatusKind },
    /// Card draw is resolved by the session, which owns the piles.
    Draw(u32),
}

/// Resolves every effect of a card in order and checks both combatants
/// afterwards.
pub fn apply_card_effects(
    effects: &[Effect],
    source: &mut Combatant,
    target: &mut Combatant,
    turn: u32,
) -> Result<Vec<Delta>, BattleError> {
    let mut deltas = Vec::with_capacity(effects.len());
    for effect in effects {
        deltas.extend(apply_effect(effect, source, target, turn));
    }
    source.check_invariants()?;
    target.check_invariants()?;
    Ok(deltas)
}

pub fn apply_effect(
    effect: &Effect,
    source: &mut Combatant,
    target: &mut Combatant,
    turn: u32,
) -> Vec<Delta> {
    tracing::event!(
        name: "apply effect",
        Level::DEBUG,
        source = %source.name,
        target = %target.name,
        %effect,
    );
    match effect {
        Effect::DealDamage(EffectTarget::Opponent, base) => {
            let amount = source.outgoing_damage(*base);
            let report = target.take_damage(amount);
            vec![Delta::Damaged {
                side: target.side,
                absorbed: report.absorbed,
                lost: report.lost,
            }]
        }
        Effect::DealDamage(EffectTarget::Caster, amount) => {
            let report = source.take_damage(*amount);
            vec![Delta::Damaged {
                side: source.side,
                absorbed: report.absorbed,
                lost: report.lost,
            }]
        }
        Effect::Heal(base) => {
            let bonus = source.attributes.intelligence;
            let amount = source.heal(base.saturating_add(bonus));
            vec![Delta::Healed {
                side: source.side,
                amount,
            }]
        }
        Effect::GainBlock(base) => {
            let amount = base.saturating_add(source.attributes.dexterity);
            source.gain_block(amount);
            vec![Delta::BlockGained {
                side: source.side,
                amount,
            }]
        }
        Effect::GainMana(amount) => {
            let amount = source.gain_mana(*amount);
            vec![Delta::ManaGained {
                side: source.side,
                amount,
            }]
        }
        Effect::Draw(n) => vec![Delta::Draw(*n)],
        Effect::ApplyStatus(effect_target, kind, magnitude, duration) => {
            let bearer = if source.side.resolve(*effect_target) == source.side {
                source
            } else {
                target
            };
            add_effect(bearer, *kind, *magnitude, *duration, turn)
                .into_iter()
                .collect()
        }
    }
}

/// Attaches a status, merging with an existing one of the same kind
/// according to [`StatusKind::stack_policy`]. A zero duration is a no-op.
pub fn add_effect(
    combatant: &mut Combatant,
    kind: StatusKind,
    magnitude: u32,
    duration: u32,
    turn: u32,
) -> Option<Delta> {
    if duration == 0 {
        tracing::debug!(%kind, "ignoring status with zero duration");
        return None;
    }
    let side = combatant.side;
    let effect = match combatant.effects.iter_mut().find(|e| e.kind == kind) {
        Some(existing) => {
            match kind.stack_policy() {
                StackPolicy::Intensify => {
                    existing.magnitude = existing.magnitude.saturating_add(magnitude);
                    existing.duration = existing.duration.max(duration);
                }
                StackPolicy::Replace => {
                    existing.magnitude = magnitude;
                    existing.duration = duration;
                    existing.applied_turn = turn;
                }
                StackPolicy::Refresh => {
                    existing.magnitude = existing.magnitude.max(magnitude);
                    existing.duration = existing.duration.max(duration);
                }
            }
            *existing
        }
        None => {
            let effect = ActiveEffect {
                kind,
                magnitude,
                duration,
                applied_turn: turn,
            };
            combatant.effects.push(effect);
            effect
        }
    };
    tracing::event!(
        name: "apply status",
        Level::INFO,
        bearer = %combatant.name,
        %kind,
        magnitude = effect.magnitude,
        duration = effect.duration,
    );
    Some(Delta::StatusApplied {
        side,
        kind,
        magnitude: effect.magnitude,
        duration: effect.duration,
    })
}

/// Runs once at the start of the bearer's turn: applies each effect's
/// per-turn magnitude, counts its duration down and drops expired ones.
/// Effects applied during `turn` itself are left alone.
pub fn tick_status_effects(combatant: &mut Combatant, turn: u32) -> Vec<Delta> {
    let side = combatant.side;
    let mut deltas = Vec::new();
    for index in 0..combatant.effects.len() {
        let effect = combatant.effects[index];
        if effect.applied_turn >= turn {
            continue;
        }
        match effect.kind {
            StatusKind::Poison => {
                let report = combatant.take_damage(effect.magnitude);
                deltas.push(Delta::Damaged {
                    side,
                    absorbed: report.absorbed,
                    lost: report.lost,
                });
            }
            StatusKind::Regeneration => {
                let amount = combatant.heal(effect.magnitude);
                deltas.push(Delta::Healed { side, amount });
            }
            StatusKind::Armor => {
                combatant.gain_block(effect.magnitude);
                deltas.push(Delta::BlockGained {
                    side,
                    amount: effect.magnitude,
                });
            }
            StatusKind::Strength | StatusKind::Weakness => {}
        }
        combatant.effects[index].duration = effect.duration.saturating_sub(1);
    }

    let mut expired: Vec<StatusKind> = Vec::new();
    combatant.effects.retain(|e| {
        if e.duration == 0 {
            expired.push(e.kind);
            false
        } else {
            true
        }
    });
    for kind in expired {
        tracing::event!(name: "status expired", Level::INFO, bearer = %combatant.name, %kind);
        deltas.push(Delta::StatusExpired { side, kind });
    }
    deltas
}

#[cfg(test)]
mod tests {
    use models::EnemyStats;

    use super::*;
    use crate::{Attributes, PlayerTemplate};

    fn player() -> Combatant {
        Combatant::player(&PlayerTemplate {
            health: 50,
            mana: 3,
            attributes: Attributes::default(),
            cards: vec![],
            current_health: None,
        })
    }

    fn enemy(health: u32) -> Combatant {
        Combatant::enemy(&EnemyStats {
            name: "Dummy".to_string(),
            health,
            attack: 5,
            script: vec![],
        })
    }

    #[test]
    fn damage_goes_through_block_first() {
        let mut source = player();
        let mut target = enemy(30);
        target.gain_block(4);
        let deltas = apply_card_effects(
            &[Effect::DealDamage(EffectTarget::Opponent, 10)],
            &mut source,
            &mut target,
            1,
        )
        .unwrap();
        assert_eq!(
            deltas,
            vec![Delta::Damaged {
                side: Side::Enemy,
                absorbed: 4,
                lost: 6
            }]
        );
        assert_eq!(target.health.current(), 24);
    }

    #[test]
    fn strength_and_weakness_modulate_outgoing_damage() {
        let mut source = player();
        source.attributes.strength = 1;
        add_effect(&mut source, StatusKind::Strength, 2, 2, 1);
        add_effect(&mut source, StatusKind::Weakness, 4, 2, 1);
        let mut target = enemy(30);
        apply_effect(
            &Effect::DealDamage(EffectTarget::Opponent, 6),
            &mut source,
            &mut target,
            1,
        );
        assert_eq!(target.health.current(), 25);
    }

    #[test]
    fn self_damage_lands_on_the_caster() {
        let mut source = player();
        let mut target = enemy(30);
        apply_effect(
            &Effect::DealDamage(EffectTarget::Caster, 4),
            &mut source,
            &mut target,
            1,
        );
        assert_eq!(source.health.current(), 46);
        assert_eq!(target.health.current(), 30);
    }

    #[test]
    fn attributes_boost_heal_and_block() {
        let mut source = player();
        source.attributes.intelligence = 2;
        source.attributes.dexterity = 3;
        source.take_damage(20);
        let mut target = enemy(30);
        let deltas = apply_card_effects(
            &[Effect::Heal(5), Effect::GainBlock(5)],
            &mut source,
            &mut target,
            1,
        )
        .unwrap();
        assert_eq!(source.health.current(), 37);
        assert_eq!(source.block, 8);
        assert_eq!(
            deltas,
            vec![
                Delta::Healed {
                    side: Side::Player,
                    amount: 7
                },
                Delta::BlockGained {
                    side: Side::Player,
                    amount: 8
                },
            ]
        );
    }

    #[test]
    fn stacking_follows_the_policy_of_each_kind() {
        let mut target = enemy(30);
        add_effect(&mut target, StatusKind::Poison, 3, 2, 1);
        add_effect(&mut target, StatusKind::Poison, 2, 1, 2);
        add_effect(&mut target, StatusKind::Armor, 4, 3, 1);
        add_effect(&mut target, StatusKind::Armor, 1, 1, 2);
        add_effect(&mut target, StatusKind::Weakness, 3, 1, 1);
        add_effect(&mut target, StatusKind::Weakness, 1, 3, 2);
        assert_eq!(target.effects.len(), 3);

        let poison = target.effects[0];
        assert_eq!((poison.magnitude, poison.duration, poison.applied_turn), (5, 2, 1));
        let armor = target.effects[1];
        assert_eq!((armor.magnitude, armor.duration, armor.applied_turn), (1, 1, 2));
        let weakness = target.effects[2];
        assert_eq!((weakness.magnitude, weakness.duration), (3, 3));
    }

    #[test]
    fn zero_duration_is_ignored() {
        let mut target = enemy(30);
        assert_eq!(add_effect(&mut target, StatusKind::Poison, 3, 0, 1), None);
        assert!(target.effects.is_empty());
    }

    #[test]
    fn poison_ticks_then_expires() {
        let mut target = enemy(30);
        add_effect(&mut target, StatusKind::Poison, 3, 2, 1);

        assert!(tick_status_effects(&mut target, 1).is_empty());
        assert_eq!(target.health.current(), 30);

        tick_status_effects(&mut target, 2);
        assert_eq!(target.health.current(), 27);
        assert!(target.has_status(StatusKind::Poison));

        let deltas = tick_status_effects(&mut target, 3);
        assert_eq!(target.health.current(), 24);
        assert!(!target.has_status(StatusKind::Poison));
        assert!(deltas.contains(&Delta::StatusExpired {
            side: Side::Enemy,
            kind: StatusKind::Poison
        }));
    }

    #[test]
    fn poison_is_absorbed_by_block() {
        let mut target = enemy(30);
        add_effect(&mut target, StatusKind::Poison, 3, 1, 1);
        target.gain_block(2);
        tick_status_effects(&mut target, 2);
        assert_eq!(target.block, 0);
        assert_eq!(target.health.current(), 29);
    }

    #[test]
    fn strength_only_counts_down() {
        let mut source = player();
        add_effect(&mut source, StatusKind::Strength, 2, 2, 1);
        let deltas = tick_status_effects(&mut source, 2);
        assert!(deltas.is_empty());
        assert_eq!(source.effects[0].duration, 1);
        assert_eq!(source.health.current(), 50);
    }

    #[test]
    fn regeneration_and_armor_tick() {
        let mut source = player();
        source.take_damage(10);
        add_effect(&mut source, StatusKind::Regeneration, 3, 1, 1);
        add_effect(&mut source, StatusKind::Armor, 4, 1, 1);
        tick_status_effects(&mut source, 2);
        assert_eq!(source.health.current(), 43);
        assert_eq!(source.block, 4);
        assert!(source.effects.is_empty());
    }

    #[test]
    fn huge_attributes_saturate_instead_of_overflowing() {
        let mut source = player();
        source.attributes.strength = u32::MAX;
        source.attributes.intelligence = u32::MAX;
        source.attributes.dexterity = u32::MAX;
        source.take_damage(10);
        let mut target = enemy(30);
        let deltas = apply_card_effects(
            &[
                Effect::DealDamage(EffectTarget::Opponent, 1),
                Effect::Heal(5),
                Effect::GainBlock(5),
            ],
            &mut source,
            &mut target,
            1,
        )
        .unwrap();
        assert!(target.is_defeated());
        assert_eq!(source.health.current(), 50);
        assert_eq!(source.block, u32::MAX);
        assert!(deltas.contains(&Delta::BlockGained {
            side: Side::Player,
            amount: u32::MAX
        }));
    }

    #[test]
    fn statuses_land_on_the_chosen_side() {
        let mut source = player();
        let mut target = enemy(30);
        apply_effect(
            &Effect::ApplyStatus(EffectTarget::Caster, StatusKind::Armor, 2, 1),
            &mut source,
            &mut target,
            1,
        );
        apply_effect(
            &Effect::ApplyStatus(EffectTarget::Opponent, StatusKind::Poison, 3, 2),
            &mut source,
            &mut target,
            1,
        );
        assert!(source.has_status(StatusKind::Armor));
        assert!(!source.has_status(StatusKind::Poison));
        assert!(target.has_status(StatusKind::Poison));
    }
}
