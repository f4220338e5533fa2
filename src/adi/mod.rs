//! Interfacing with ADI (three-wire) components of the Vex V5 robot.

mod digital_out;
mod port;

pub use digital_out::*;
pub use port::*;
