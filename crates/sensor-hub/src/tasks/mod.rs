mod acquire;
mod control;
mod display;

pub use acquire::*;
pub use control::*;
pub use display::*;
