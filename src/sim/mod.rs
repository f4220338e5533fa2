//! Simulated hardware.
//!
//! [`SimPlatform`] implements [`Platform`] entirely in memory. Clones share
//! state, so a test keeps one clone to script controller input and inspect
//! outputs while the robot owns another through its
//! [`Peripherals`](crate::peripherals::Peripherals).
//!
//! # Example
//!
//! ```
//! use wsp_bot::prelude::*;
//!
//! let sim = SimPlatform::new();
//! let mut p = Peripherals::new(Box::new(sim.clone()));
//! let mut motor = p
//!     .smart_port(2)
//!     .unwrap()
//!     .into_motor(Gearset::SixToOne, false)
//!     .unwrap();
//! motor.move_i8(64).unwrap();
//! assert_eq!(sim.motor_power(2), Some(64));
//! ```

use spin::Mutex;
use std::{collections::BTreeMap, sync::Arc};

use crate::{
    adi::{AdiDigitalOutputError, AdiPort, DigitalOutput},
    battery::BatteryMonitor,
    controller::{AnalogChannel, Buttons, ControllerState, InputSource},
    lcd::{LcdDevice, LCD_LINES},
    motor::{Gearset, MotorDevice, MotorError},
    peripherals::Platform,
};

mod devices;

pub use devices::*;

/// Simulated state of one smart motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimMotorState {
    /// The last power commanded through [`MotorDevice::move_i8()`].
    pub power: i8,
    /// Whether the motor is configured to run in reverse.
    pub reversed: bool,
    /// The configured cartridge.
    pub gearset: Gearset,
    /// Number of power commands received.
    pub writes: u64,
    /// Whether the motor answers commands.
    pub connected: bool,
}

impl SimMotorState {
    /// The power actually applied, after reversal.
    pub fn output(&self) -> i8 {
        if self.reversed {
            self.power.saturating_neg()
        } else {
            self.power
        }
    }
}

impl Default for SimMotorState {
    fn default() -> Self {
        Self {
            power: 0,
            reversed: false,
            gearset: Gearset::EighteenToOne,
            writes: 0,
            connected: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SimAdiState {
    configured: bool,
    value: bool,
    writes: u64,
    connected: bool,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SimControllerState {
    state: ControllerState,
    connected: bool,
    reads: u64,
}

#[derive(Debug)]
pub(crate) struct SimState {
    motors: BTreeMap<u8, SimMotorState>,
    adi: [SimAdiState; 8],
    controller: SimControllerState,
    lcd: [Option<String>; LCD_LINES as usize],
    lcd_initialized: bool,
    battery_volts: f64,
    battery_amps: f64,
    battery_available: bool,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            motors: BTreeMap::new(),
            adi: [SimAdiState {
                connected: true,
                ..SimAdiState::default()
            }; 8],
            controller: SimControllerState {
                state: ControllerState::default(),
                connected: true,
                reads: 0,
            },
            lcd: Default::default(),
            lcd_initialized: false,
            battery_volts: 12.8,
            battery_amps: 0.0,
            battery_available: true,
        }
    }
}

/// An in-memory hardware backend.
#[derive(Debug, Clone, Default)]
pub struct SimPlatform {
    state: Arc<Mutex<SimState>>,
}

impl SimPlatform {
    /// Creates a platform with nothing plugged in, the controller centered
    /// and connected, and a charged battery.
    pub fn new() -> Self {
        Self::default()
    }

    // Controller scripting.

    /// Replaces the whole input state of the controller.
    pub fn set_controller(&self, state: ControllerState) {
        self.state.lock().controller.state = state;
    }

    /// Sets one axis on the controller.
    pub fn set_axis(&self, channel: AnalogChannel, value: i8) {
        self.state.lock().controller.state.set_axis(channel, value);
    }

    /// Holds `buttons` down on the controller.
    pub fn press(&self, buttons: Buttons) {
        self.state.lock().controller.state.buttons.insert(buttons);
    }

    /// Lets go of `buttons` on the controller.
    pub fn release(&self, buttons: Buttons) {
        self.state.lock().controller.state.buttons.remove(buttons);
    }

    /// Plugs or unplugs the controller.
    pub fn set_controller_connected(&self, connected: bool) {
        self.state.lock().controller.connected = connected;
    }

    /// Number of axis and button reads the controller has answered or
    /// refused.
    pub fn controller_reads(&self) -> u64 {
        self.state.lock().controller.reads
    }

    // Motor inspection.

    /// The full simulated state of the motor on `port`, if one was
    /// configured.
    pub fn motor_state(&self, port: u8) -> Option<SimMotorState> {
        self.state.lock().motors.get(&port).copied()
    }

    /// The last power commanded to the motor on `port`.
    pub fn motor_power(&self, port: u8) -> Option<i8> {
        self.motor_state(port).map(|m| m.power)
    }

    /// The power the motor on `port` applies after reversal.
    pub fn motor_output(&self, port: u8) -> Option<i8> {
        self.motor_state(port).map(|m| m.output())
    }

    /// The cartridge configured on `port`.
    pub fn motor_gearset(&self, port: u8) -> Option<Gearset> {
        self.motor_state(port).map(|m| m.gearset)
    }

    /// Makes the motor on `port` stop (or resume) answering commands.
    pub fn set_motor_connected(&self, port: u8, connected: bool) {
        self.state
            .lock()
            .motors
            .entry(port)
            .or_default()
            .connected = connected;
    }

    // ADI inspection.

    /// The level of the digital output on `port`, if it was configured.
    pub fn adi_value(&self, port: AdiPort) -> Option<bool> {
        let adi = self.state.lock().adi[port.index()];
        if adi.configured {
            Some(adi.value)
        } else {
            None
        }
    }

    /// Number of writes to the digital output on `port`.
    pub fn adi_writes(&self, port: AdiPort) -> u64 {
        self.state.lock().adi[port.index()].writes
    }

    /// Makes the digital output on `port` stop (or resume) answering.
    pub fn set_adi_connected(&self, port: AdiPort, connected: bool) {
        self.state.lock().adi[port.index()].connected = connected;
    }

    // LCD and battery.

    /// The text on LCD line `line`.
    pub fn lcd_line(&self, line: u8) -> Option<String> {
        self.state.lock().lcd.get(line as usize).cloned().flatten()
    }

    /// Whether the LCD was initialized.
    pub fn lcd_initialized(&self) -> bool {
        self.state.lock().lcd_initialized
    }

    /// Sets the battery telemetry, in volts and amperes.
    pub fn set_battery(&self, volts: f64, amps: f64) {
        let mut state = self.state.lock();
        state.battery_volts = volts;
        state.battery_amps = amps;
    }

    /// Makes battery telemetry unavailable (or available again).
    pub fn set_battery_available(&self, available: bool) {
        self.state.lock().battery_available = available;
    }
}

impl Platform for SimPlatform {
    fn motor(&mut self, port: u8) -> Result<Box<dyn MotorDevice>, MotorError> {
        if !(1..22).contains(&port) {
            return Err(MotorError::PortOutOfRange);
        }
        self.state.lock().motors.entry(port).or_default();
        Ok(Box::new(SimMotor::new(port, self.state.clone())))
    }

    fn digital_out(
        &mut self,
        port: AdiPort,
    ) -> Result<Box<dyn DigitalOutput>, AdiDigitalOutputError> {
        {
            let mut state = self.state.lock();
            let adi = &mut state.adi[port.index()];
            adi.configured = true;
            adi.value = false;
        }
        Ok(Box::new(SimDigitalOutput::new(port, self.state.clone())))
    }

    fn controller(&mut self) -> Box<dyn InputSource> {
        Box::new(SimController::new(self.state.clone()))
    }

    fn lcd(&mut self) -> Box<dyn LcdDevice> {
        Box::new(SimLcd::new(self.state.clone()))
    }

    fn battery(&mut self) -> Box<dyn BatteryMonitor> {
        Box::new(SimBattery::new(self.state.clone()))
    }
}
