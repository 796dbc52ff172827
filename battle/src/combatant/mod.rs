pub mod attributes;
pub mod base_combatant;
pub mod pool;
pub mod status;
pub mod template;

pub use attributes::*;
pub use base_combatant::*;
pub use pool::*;
pub use status::*;
pub use template::*;
