//! Peripherals.

use std::fmt::{self, Debug, Formatter};

use crate::{
    adi::{AdiDigitalOutputError, AdiPort, DigitalOutput},
    battery::BatteryMonitor,
    controller::{Controller, InputSource},
    error::Error,
    lcd::{Lcd, LcdDevice},
    motor::{MotorDevice, MotorError},
    smart_port::SmartPort,
};

/// The hardware backend: constructs device handles for ports.
///
/// The V5 brain is one implementation; [`SimPlatform`](crate::sim::SimPlatform)
/// is another. [`Peripherals`] makes sure each port is handed out at most
/// once, so implementations need not.
pub trait Platform: Send {
    /// Configures the smart port `port` as a motor.
    fn motor(&mut self, port: u8) -> Result<Box<dyn MotorDevice>, MotorError>;

    /// Configures an ADI port as a digital output, initially low.
    fn digital_out(&mut self, port: AdiPort)
        -> Result<Box<dyn DigitalOutput>, AdiDigitalOutputError>;

    /// Connects to the master controller.
    fn controller(&mut self) -> Box<dyn InputSource>;

    /// Connects to the brain's LCD.
    fn lcd(&mut self) -> Box<dyn LcdDevice>;

    /// Connects to the battery.
    fn battery(&mut self) -> Box<dyn BatteryMonitor>;
}

/// A struct which represents all the peripherals on the V5 brain.
pub struct Peripherals {
    /// Primary Controller.
    pub master_controller: Controller,
    /// The brain's LCD.
    pub lcd: Lcd,
    /// The V5 battery.
    pub battery: Box<dyn BatteryMonitor>,
    platform: Box<dyn Platform>,
    smart_taken: u32,
    adi_taken: u8,
}

impl Peripherals {
    /// Takes ownership of a hardware backend.
    pub fn new(mut platform: Box<dyn Platform>) -> Self {
        Peripherals {
            master_controller: Controller::new(platform.controller()),
            lcd: Lcd::new(platform.lcd()),
            battery: platform.battery(),
            platform,
            smart_taken: 0,
            adi_taken: 0,
        }
    }

    /// Hands out smart port `port` (1-21). Each port can be taken once.
    pub fn smart_port(&mut self, port: u8) -> Result<SmartPort<'_>, PortError> {
        if !(1..22).contains(&port) {
            return Err(PortError::SmartOutOfRange(port));
        }
        let bit = 1u32 << port;
        if self.smart_taken & bit != 0 {
            return Err(PortError::SmartTaken(port));
        }
        self.smart_taken |= bit;
        Ok(SmartPort::new(port, self.platform.as_mut()))
    }

    /// Configures ADI port `port` as a digital output. Each port can be taken
    /// once.
    pub fn digital_out(&mut self, port: AdiPort) -> Result<Box<dyn DigitalOutput>, Error> {
        let bit = 1u8 << port.index();
        if self.adi_taken & bit != 0 {
            return Err(PortError::AdiTaken(port).into());
        }
        self.adi_taken |= bit;
        Ok(self.platform.digital_out(port)?)
    }
}

impl Debug for Peripherals {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Peripherals")
            .field("smart_taken", &format_args!("{:#010x}", self.smart_taken))
            .field("adi_taken", &format_args!("{:#010b}", self.adi_taken))
            .finish()
    }
}

/// Represents errors handing out ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortError {
    /// Smart port is out of range (1-21).
    SmartOutOfRange(u8),
    /// Smart port was already handed out.
    SmartTaken(u8),
    /// ADI port was already handed out.
    AdiTaken(AdiPort),
}

impl From<PortError> for Error {
    fn from(err: PortError) -> Self {
        match err {
            PortError::SmartOutOfRange(port) => {
                Error::Custom(format!("smart port {} out of range", port))
            }
            PortError::SmartTaken(port) => {
                Error::Custom(format!("smart port {} already in use", port))
            }
            PortError::AdiTaken(port) => Error::Custom(format!("adi port {} already in use", port)),
        }
    }
}
