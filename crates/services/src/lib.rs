pub mod chat;
pub mod formatter;
pub mod price_source;
pub mod router;
pub mod scheduler;

pub use chat::*;
pub use formatter::*;
pub use price_source::*;
pub use router::*;
pub use scheduler::*;
