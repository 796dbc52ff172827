use battle::{BattleRules, BattleSession, PlayerTemplate};
use gamedata::StaticCatalog;
use models::LevelId;
use rand::{rngs::StdRng, SeedableRng};

use super::SEED;

const CARDS: &str = r#"
[[cards]]
id = "one_mana_jab"
cost = 1
type = "attack"
effects = ["deal 5 damage"]

[[cards]]
id = "expensive"
cost = 2
type = "attack"
effects = ["deal 1 damage"]

[[cards]]
id = "toxin"
cost = 1
type = "skill"
effects = ["apply 3 poison for 2 turns"]

[[cards]]
id = "guard"
cost = 1
type = "skill"
effects = ["gain 5 block"]

[[cards]]
id = "recklessness"
cost = 0
type = "attack"
effects = ["deal 10 damage", "deal 10 damage to yourself"]

[[cards]]
id = "dig"
cost = 0
type = "skill"
effects = ["draw 1 card"]

[[cards]]
id = "bandage"
cost = 1
type = "skill"
effects = ["heal 5"]
"#;

const LEVELS: &str = r#"
[[levels]]
id = 1
name = "Training Yard"

[levels.enemy]
name = "Training Dummy"
health = 5
attack = 0

[levels.rewards]
gold = 10
experience = 10

[[levels]]
id = 2
name = "Pit"

[levels.enemy]
name = "Brute"
health = 100
attack = 15

[[levels]]
id = 3
name = "Gym"

[levels.enemy]
name = "Punching Bag"
health = 100
attack = 0
"#;

pub const DUMMY: LevelId = LevelId(1);
pub const BRUTE: LevelId = LevelId(2);
pub const PUNCHING_BAG: LevelId = LevelId(3);

lazy_static::lazy_static! {
    pub static ref TEST_CATALOG: StaticCatalog =
        StaticCatalog::from_toml_str(CARDS, LEVELS).expect("test catalog is valid");
}

pub fn player(health: u32, mana: u32, cards: &[&str]) -> PlayerTemplate {
    PlayerTemplate {
        health,
        mana,
        ..PlayerTemplate::with_cards(cards)
    }
}

pub fn session(template: &PlayerTemplate, level: LevelId, rules: BattleRules) -> BattleSession {
    BattleSession::new(
        template,
        level,
        &*TEST_CATALOG,
        rules,
        StdRng::seed_from_u64(SEED),
    )
    .expect("test session is valid")
}

/// A session that already went through its first turn start.
pub fn started(template: &PlayerTemplate, level: LevelId) -> BattleSession {
    let mut session = session(template, level, BattleRules::default());
    session.start().expect("battle starts");
    session
}
