//! Type definitions

pub mod log_sheet;
pub mod stop;
pub mod trip;

pub use log_sheet::*;
pub use stop::*;
pub use trip::*;
