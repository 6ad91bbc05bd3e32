pub mod error;
pub mod events;
pub mod quote;
pub mod schedule;
pub mod watchlist;

pub use error::*;
pub use events::*;
pub use quote::*;
pub use schedule::*;
pub use watchlist::*;
