use std::path::Path;

use anyhow::Context;
use models::LevelId;
use serde::Deserialize;

use crate::{PlayerTemplate, HAND_SIZE, MAX_DECK_SIZE};

/// What happens to a combatant's block when its own turn starts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockDecay {
    #[default]
    Reset,
    Retain,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BattleRules {
    #[serde(default = "default_hand_size")]
    pub hand_size: usize,
    #[serde(default = "default_max_deck_size")]
    pub max_deck_size: usize,
    #[serde(default)]
    pub block: BlockDecay,
}

fn default_hand_size() -> usize {
    *HAND_SIZE
}

fn default_max_deck_size() -> usize {
    *MAX_DECK_SIZE
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            hand_size: default_hand_size(),
            max_deck_size: default_max_deck_size(),
            block: BlockDecay::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct BattleTemplate {
    pub seed: Option<u64>,
    pub level: LevelId,
    pub player: PlayerTemplate,
    #[serde(default)]
    pub rules: BattleRules,
}

impl BattleTemplate {
    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        toml::from_str::<BattleTemplate>(source).context("unable to parse battle template")
    }

    pub fn read(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read battle template {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_fall_back_to_defaults() {
        let template = BattleTemplate::from_toml_str(
            r#"
            level = 2

            [player]
            cards = ["strike", "defend"]
            "#,
        )
        .unwrap();
        assert_eq!(template.level, LevelId(2));
        assert_eq!(template.seed, None);
        assert_eq!(template.rules, BattleRules::default());
        assert_eq!(template.player.health, 100);
        assert_eq!(template.player.mana, 3);
        assert_eq!(template.player.cards.len(), 2);
    }

    #[test]
    fn block_policy_is_read_from_rules() {
        let template = BattleTemplate::from_toml_str(
            r#"
            seed = 7
            level = 1

            [player]
            health = 40
            cards = ["strike"]

            [player.attributes]
            strength = 2

            [rules]
            hand_size = 3
            block = "retain"
            "#,
        )
        .unwrap();
        assert_eq!(template.seed, Some(7));
        assert_eq!(template.rules.hand_size, 3);
        assert_eq!(template.rules.max_deck_size, 20);
        assert_eq!(template.rules.block, BlockDecay::Retain);
        assert_eq!(template.player.attributes.strength, 2);
    }

    #[test]
    fn missing_level_is_rejected() {
        assert!(BattleTemplate::from_toml_str("[player]\ncards = []\n").is_err());
    }
}
