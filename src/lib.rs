#[macro_use]
mod macros;

pub mod aggregate;
mod chain;
mod config;
pub mod describe;
mod device;
mod dump;
mod enums;
mod error;
mod extent;
mod flags;
mod group;
mod instance;
mod memory;
mod physical;
mod printer;
mod records;
mod render;
mod snapshot;
mod surface;

pub use chain::*;
pub use config::*;
pub use describe::{ConformanceVersion, Describe, Field, Luid, Uuid};
pub use dump::*;
pub use enums::*;
pub use error::*;
pub use extent::*;
pub use flags::*;
pub use group::*;
pub use instance::*;
pub use memory::*;
pub use physical::*;
pub use printer::*;
pub use records::*;
pub use snapshot::*;
pub use surface::*;

#[cfg(feature = "window")]
mod window;

#[cfg(feature = "window")]
pub use window::*;
