pub mod catalog;

pub use catalog::*;

pub const CARDS_TOML: &str = include_str!("../res/cards.toml");
pub const LEVELS_TOML: &str = include_str!("../res/levels.toml");
pub const ITEMS_TOML: &str = include_str!("../res/items.toml");

lazy_static::lazy_static! {
    pub static ref CATALOG: StaticCatalog = StaticCatalog::from_toml_str(CARDS_TOML, LEVELS_TOML)
        .and_then(|catalog| catalog.with_items(ITEMS_TOML))
        .expect("embedded catalog resources are valid");
}
