pub mod card;
pub mod catalog;
pub mod effect;
pub mod item;
pub mod level;
pub mod rarity;

pub use card::*;
pub use catalog::*;
pub use effect::*;
pub use item::*;
pub use level::*;
pub use rarity::*;
