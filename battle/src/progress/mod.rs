pub mod items;
pub mod rewards;
pub mod state;
pub mod store;

pub use rewards::*;
pub use state::*;
pub use store::*;
