pub mod gateway;
pub mod routes;
pub mod signature;

pub use gateway::*;
pub use routes::*;
pub use signature::*;
