pub mod deck;
pub mod id;
pub mod pile;

pub use deck::*;
pub use id::*;
pub use pile::*;
