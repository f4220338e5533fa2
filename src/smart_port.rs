//! SmartPort.

use std::fmt::{self, Debug, Formatter};

use crate::{
    motor::{Gearset, MotorDevice, MotorError},
    peripherals::Platform,
};

/// A struct which represents an unconfigured smart port, handed out once by
/// [`Peripherals::smart_port()`](crate::peripherals::Peripherals::smart_port()).
pub struct SmartPort<'a> {
    port: u8,
    platform: &'a mut dyn Platform,
}

impl<'a> SmartPort<'a> {
    pub(crate) fn new(port: u8, platform: &'a mut dyn Platform) -> Self {
        Self { port, platform }
    }

    /// The port number (1-21).
    pub fn port(&self) -> u8 {
        self.port
    }

    /// Converts a `SmartPort` into a motor, configuring its cartridge and
    /// direction.
    pub fn into_motor(
        self,
        gearset: Gearset,
        reverse: bool,
    ) -> Result<Box<dyn MotorDevice>, MotorError> {
        let mut motor = self.platform.motor(self.port)?;
        motor.set_reversed(reverse)?;
        motor.set_gearing(gearset)?;
        log::debug!(
            "motor on port {}: {} rpm cartridge{}",
            self.port,
            gearset.max_rpm(),
            if reverse { ", reversed" } else { "" }
        );
        Ok(motor)
    }
}

impl Debug for SmartPort<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartPort").field("port", &self.port).finish()
    }
}
