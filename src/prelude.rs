//! Convenient to `use` common components.

pub use crate::entry;

pub use crate::adi::*;
pub use crate::battery::*;
pub use crate::bot::*;
pub use crate::config::*;
pub use crate::controller::*;
pub use crate::edge::*;
pub use crate::error::*;
pub use crate::lcd::*;
pub use crate::motor::*;
pub use crate::peripherals::*;
pub use crate::robot::*;
pub use crate::rtos::*;
pub use crate::sim::*;
pub use crate::smart_port::*;
pub use crate::toggle::*;
