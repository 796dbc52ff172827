pub mod autoplay;
pub mod card;
pub mod combatant;
pub mod dispatch;
pub mod effect;
pub mod error;
pub mod phase;
pub mod progress;
pub mod result;
pub mod session;
pub mod statics;
pub mod stats;
pub mod template;

pub use card::*;
pub use combatant::*;
pub use dispatch::*;
pub use effect::*;
pub use error::*;
pub use phase::*;
pub use progress::*;
pub use result::*;
pub use session::*;
pub use statics::*;
pub use stats::*;
pub use template::*;
