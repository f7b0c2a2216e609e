// HTTP routes
pub mod ask;
pub mod health;
pub mod log;
pub mod predict;
pub mod verify;

pub use ask::*;
pub use health::*;
pub use log::*;
pub use predict::*;
pub use verify::*;
