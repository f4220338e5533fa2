//! # Motor API.

use std::fmt::{self, Debug, Formatter};

use crate::error::Error;

/// A device which accepts proportional power commands (a V5 smart motor).
pub trait MotorDevice: Send {
    /// The smart port the motor is plugged into.
    fn port(&self) -> u8;

    /// Sets the voltage for the motor from -127 to 127.
    ///
    /// This is designed to map easily to the input from the controller's
    /// analog stick for simple opcontrol use.
    fn move_i8(&mut self, voltage: i8) -> Result<(), MotorError>;

    /// Sets whether the motor runs in reverse.
    fn set_reversed(&mut self, reverse: bool) -> Result<(), MotorError>;

    /// Gets whether the motor runs in reverse.
    fn is_reversed(&self) -> Result<bool, MotorError>;

    /// Sets the gear cartridge the motor reports itself as using.
    fn set_gearing(&mut self, gearset: Gearset) -> Result<(), MotorError>;
}

/// How a motor is constructed: port, cartridge, and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorConfig {
    /// Smart port (1-21).
    pub port: u8,
    /// Gear cartridge.
    pub gearset: Gearset,
    /// Whether positive power spins the motor backwards.
    pub reversed: bool,
}

impl MotorConfig {
    /// A motor on `port` using `gearset`, not reversed.
    pub const fn new(port: u8, gearset: Gearset) -> Self {
        Self {
            port,
            gearset,
            reversed: false,
        }
    }

    /// The same motor, reversed.
    pub const fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }
}

/// Several motors which always receive the same command.
pub struct MotorGroup {
    name: &'static str,
    motors: Vec<Box<dyn MotorDevice>>,
}

impl MotorGroup {
    /// Groups `motors` under `name` (used in log output).
    pub fn new(name: &'static str, motors: Vec<Box<dyn MotorDevice>>) -> Self {
        Self { name, motors }
    }

    /// The group's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The smart ports of every motor in the group.
    pub fn ports(&self) -> Vec<u8> {
        self.motors.iter().map(|m| m.port()).collect()
    }

    /// Sends `voltage` to every motor. Every motor is commanded even if an
    /// earlier one fails; the first failure is returned.
    pub fn move_i8(&mut self, voltage: i8) -> Result<(), MotorError> {
        let mut result = Ok(());
        for motor in self.motors.iter_mut() {
            if let Err(err) = motor.move_i8(voltage) {
                log::trace!("{}: motor on port {} rejected {}", self.name, motor.port(), voltage);
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }
}

impl Debug for MotorGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotorGroup")
            .field("name", &self.name)
            .field("ports", &self.ports())
            .finish()
    }
}

/// Represents possible errors for motor operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// Port is out of range (1-21).
    PortOutOfRange,
    /// Port cannot be configured as a motor.
    PortNotMotor,
    /// The motor on the given port stopped responding.
    Disconnected(u8),
}

impl From<MotorError> for Error {
    fn from(err: MotorError) -> Self {
        match err {
            MotorError::PortOutOfRange => Error::Custom("port out of range".into()),
            MotorError::PortNotMotor => Error::Custom("port not a motor".into()),
            MotorError::Disconnected(port) => {
                Error::Hardware(format!("motor on port {} disconnected", port))
            }
        }
    }
}

/// Represents possible gear cartridges for a motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gearset {
    /// Blue 6:1 Gearset (600RPM).
    SixToOne,
    /// Green 18:1 Gearset (200RPM).
    EighteenToOne,
    /// Red 36:1 Gearset (100RPM).
    ThirtySixToOne,
}

impl Gearset {
    /// Free speed of the output shaft in RPM.
    pub fn max_rpm(self) -> u16 {
        match self {
            Gearset::SixToOne => 600,
            Gearset::EighteenToOne => 200,
            Gearset::ThirtySixToOne => 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Recording {
        port: u8,
        fail: bool,
        log: Arc<Mutex<Vec<(u8, i8)>>>,
    }

    impl MotorDevice for Recording {
        fn port(&self) -> u8 {
            self.port
        }

        fn move_i8(&mut self, voltage: i8) -> Result<(), MotorError> {
            self.log.lock().unwrap().push((self.port, voltage));
            if self.fail {
                Err(MotorError::Disconnected(self.port))
            } else {
                Ok(())
            }
        }

        fn set_reversed(&mut self, _reverse: bool) -> Result<(), MotorError> {
            Ok(())
        }

        fn is_reversed(&self) -> Result<bool, MotorError> {
            Ok(false)
        }

        fn set_gearing(&mut self, _gearset: Gearset) -> Result<(), MotorError> {
            Ok(())
        }
    }

    #[test]
    fn group_commands_every_motor_and_reports_first_failure() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let motors: [Box<dyn MotorDevice>; 3] = array_init::array_init(|i| {
            Box::new(Recording {
                port: i as u8 + 1,
                fail: i >= 1,
                log: log.clone(),
            }) as Box<dyn MotorDevice>
        });
        let mut group = MotorGroup::new("test", Vec::from(motors));
        assert_eq!(group.ports(), vec![1, 2, 3]);

        assert_eq!(group.move_i8(-64), Err(MotorError::Disconnected(2)));
        assert_eq!(*log.lock().unwrap(), vec![(1, -64), (2, -64), (3, -64)]);
    }

    #[test]
    fn config_builder() {
        let m = MotorConfig::new(21, Gearset::SixToOne).reversed();
        assert_eq!(m.port, 21);
        assert!(m.reversed);
        assert_eq!(m.gearset.max_rpm(), 600);
    }
}
