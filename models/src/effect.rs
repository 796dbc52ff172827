use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    pub static ref EFFECT_DEAL_DAMAGE_REGEX: Regex = Regex::new(r"^deal (\d+) damage( to yourself)?\.?$").unwrap();
    pub static ref EFFECT_HEAL_REGEX: Regex = Regex::new(r"^heal (\d+)\.?$").unwrap();
    pub static ref EFFECT_GAIN_BLOCK_REGEX: Regex = Regex::new(r"^gain (\d+) block\.?$").unwrap();
    pub static ref EFFECT_GAIN_MANA_REGEX: Regex = Regex::new(r"^gain (\d+) mana\.?$").unwrap();
    pub static ref EFFECT_DRAW_REGEX: Regex = Regex::new(r"^draw (\d+) cards?\.?$").unwrap();
    pub static ref EFFECT_STATUS_REGEX: Regex = Regex::new(r"^(apply|gain) (\d+) ([a-z]+) for (\d+) turns?\.?$").unwrap();
}

/// Who an effect lands on, relative to whoever resolves it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    Caster,
    Opponent,
}

impl std::fmt::Display for EffectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectTarget::Caster => write!(f, "caster"),
            EffectTarget::Opponent => write!(f, "opponent"),
        }
    }
}

/// How a second application of a status merges with one already present.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StackPolicy {
    /// Magnitudes add up, the longer duration wins.
    Intensify,
    /// The new application overwrites magnitude and duration.
    Replace,
    /// Keeps the larger magnitude and the longer duration.
    Refresh,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Loses `magnitude` health (block first) at each turn start.
    Poison,
    /// Heals `magnitude` at each turn start.
    Regeneration,
    /// Gains `magnitude` block at each turn start.
    Armor,
    /// Adds `magnitude` to outgoing damage.
    Strength,
    /// Subtracts `magnitude` from outgoing damage.
    Weakness,
}

impl StatusKind {
    pub fn stack_policy(&self) -> StackPolicy {
        match self {
            StatusKind::Poison | StatusKind::Regeneration | StatusKind::Strength => {
                StackPolicy::Intensify
            }
            StatusKind::Armor => StackPolicy::Replace,
            StatusKind::Weakness => StackPolicy::Refresh,
        }
    }
}

impl FromStr for StatusKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "poison" => Ok(StatusKind::Poison),
            "regeneration" => Ok(StatusKind::Regeneration),
            "armor" => Ok(StatusKind::Armor),
            "strength" => Ok(StatusKind::Strength),
            "weakness" => Ok(StatusKind::Weakness),
            _ => anyhow::bail!("unknown status kind {s:?}"),
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusKind::Poison => write!(f, "poison"),
            StatusKind::Regeneration => write!(f, "regeneration"),
            StatusKind::Armor => write!(f, "armor"),
            StatusKind::Strength => write!(f, "strength"),
            StatusKind::Weakness => write!(f, "weakness"),
        }
    }
}

/// A single state change carried by a card or an enemy script step.
///
/// Effects are written in catalogs as short phrases (`"deal 6 damage"`,
/// `"apply 3 poison for 2 turns"`) and parsed with [`Effect::from_str`].
/// `Display` produces the same phrase back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Effect {
    DealDamage(EffectTarget, u32),
    Heal(u32),
    GainBlock(u32),
    GainMana(u32),
    Draw(u32),
    ApplyStatus(EffectTarget, StatusKind, u32, u32),
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::DealDamage(EffectTarget::Opponent, n) => write!(f, "deal {n} damage"),
            Effect::DealDamage(EffectTarget::Caster, n) => {
                write!(f, "deal {n} damage to yourself")
            }
            Effect::Heal(n) => write!(f, "heal {n}"),
            Effect::GainBlock(n) => write!(f, "gain {n} block"),
            Effect::GainMana(n) => write!(f, "gain {n} mana"),
            Effect::Draw(1) => write!(f, "draw 1 card"),
            Effect::Draw(n) => write!(f, "draw {n} cards"),
            Effect::ApplyStatus(target, kind, magnitude, duration) => {
                let verb = match target {
                    EffectTarget::Opponent => "apply",
                    EffectTarget::Caster => "gain",
                };
                let unit = if *duration == 1 { "turn" } else { "turns" };
                write!(f, "{verb} {magnitude} {kind} for {duration} {unit}")
            }
        }
    }
}

impl FromStr for Effect {
    type Err = anyhow::Error;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let descriptor = descriptor.trim().to_lowercase();
        if let Some(captures) = EFFECT_DEAL_DAMAGE_REGEX.captures(&descriptor) {
            let amount = captures[1].parse::<u32>()?;
            let target = match captures.get(2) {
                Some(_) => EffectTarget::Caster,
                None => EffectTarget::Opponent,
            };
            return Ok(Effect::DealDamage(target, amount));
        }
        if let Some(captures) = EFFECT_HEAL_REGEX.captures(&descriptor) {
            return Ok(Effect::Heal(captures[1].parse()?));
        }
        if let Some(captures) = EFFECT_GAIN_BLOCK_REGEX.captures(&descriptor) {
            return Ok(Effect::GainBlock(captures[1].parse()?));
        }
        if let Some(captures) = EFFECT_GAIN_MANA_REGEX.captures(&descriptor) {
            return Ok(Effect::GainMana(captures[1].parse()?));
        }
        if let Some(captures) = EFFECT_DRAW_REGEX.captures(&descriptor) {
            return Ok(Effect::Draw(captures[1].parse()?));
        }
        if let Some(captures) = EFFECT_STATUS_REGEX.captures(&descriptor) {
            let target = match &captures[1] {
                "apply" => EffectTarget::Opponent,
                _ => EffectTarget::Caster,
            };
            let magnitude = captures[2].parse::<u32>()?;
            let kind = StatusKind::from_str(&captures[3])?;
            let duration = captures[4].parse::<u32>()?;
            return Ok(Effect::ApplyStatus(target, kind, magnitude, duration));
        }
        anyhow::bail!("unrecognised effect descriptor {descriptor:?}")
    }
}

impl TryFrom<String> for Effect {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Effect::from_str(&value)
    }
}

impl From<Effect> for String {
    fn from(value: Effect) -> Self {
        value.to_string()
    }
}
