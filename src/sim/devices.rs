use spin::Mutex;
use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};
use uom::si::{
    electric_current::ampere,
    electric_potential::volt,
    f64::{ElectricCurrent, ElectricPotential},
};

use super::{SimControllerState, SimState};
use crate::{
    adi::{AdiDigitalOutputError, AdiPort, DigitalOutput},
    battery::{BatteryError, BatteryMonitor},
    controller::{AnalogChannel, Buttons, ControllerError, InputSource},
    lcd::{LcdDevice, LcdError, LCD_LINES},
    motor::{Gearset, MotorDevice, MotorError},
};

/// A simulated smart motor.
pub struct SimMotor {
    port: u8,
    state: Arc<Mutex<SimState>>,
}

impl SimMotor {
    pub(crate) fn new(port: u8, state: Arc<Mutex<SimState>>) -> Self {
        Self { port, state }
    }

    fn with<T>(&self, f: impl FnOnce(&mut super::SimMotorState) -> T) -> Result<T, MotorError> {
        let mut state = self.state.lock();
        let motor = state
            .motors
            .get_mut(&self.port)
            .ok_or(MotorError::PortNotMotor)?;
        if !motor.connected {
            return Err(MotorError::Disconnected(self.port));
        }
        Ok(f(motor))
    }
}

impl MotorDevice for SimMotor {
    fn port(&self) -> u8 {
        self.port
    }

    fn move_i8(&mut self, voltage: i8) -> Result<(), MotorError> {
        self.with(|m| {
            m.power = voltage;
            m.writes += 1;
        })
    }

    fn set_reversed(&mut self, reverse: bool) -> Result<(), MotorError> {
        self.with(|m| m.reversed = reverse)
    }

    fn is_reversed(&self) -> Result<bool, MotorError> {
        self.with(|m| m.reversed)
    }

    fn set_gearing(&mut self, gearset: Gearset) -> Result<(), MotorError> {
        self.with(|m| m.gearset = gearset)
    }
}

impl Debug for SimMotor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimMotor").field("port", &self.port).finish()
    }
}

/// A simulated ADI digital output.
pub struct SimDigitalOutput {
    port: AdiPort,
    state: Arc<Mutex<SimState>>,
}

impl SimDigitalOutput {
    pub(crate) fn new(port: AdiPort, state: Arc<Mutex<SimState>>) -> Self {
        Self { port, state }
    }
}

impl DigitalOutput for SimDigitalOutput {
    fn port(&self) -> AdiPort {
        self.port
    }

    fn write(&mut self, value: bool) -> Result<(), AdiDigitalOutputError> {
        let mut state = self.state.lock();
        let adi = &mut state.adi[self.port.index()];
        if !adi.connected {
            return Err(AdiDigitalOutputError::Disconnected(self.port));
        }
        adi.value = value;
        adi.writes += 1;
        Ok(())
    }
}

impl Debug for SimDigitalOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimDigitalOutput")
            .field("port", &self.port)
            .finish()
    }
}

/// A simulated master controller.
pub struct SimController {
    state: Arc<Mutex<SimState>>,
}

impl SimController {
    pub(crate) fn new(state: Arc<Mutex<SimState>>) -> Self {
        Self { state }
    }

    fn read<T>(&self, f: impl FnOnce(&SimControllerState) -> T) -> Result<T, ControllerError> {
        let mut state = self.state.lock();
        let controller = &mut state.controller;
        controller.reads += 1;
        if !controller.connected {
            return Err(ControllerError::Disconnected);
        }
        Ok(f(controller))
    }
}

impl InputSource for SimController {
    fn analog(&self, channel: AnalogChannel) -> Result<i8, ControllerError> {
        self.read(|c| c.state.axis(channel))
    }

    fn digital(&self, button: Buttons) -> Result<bool, ControllerError> {
        self.read(|c| c.state.held(button))
    }
}

/// A simulated brain LCD.
pub struct SimLcd {
    state: Arc<Mutex<SimState>>,
}

impl SimLcd {
    pub(crate) fn new(state: Arc<Mutex<SimState>>) -> Self {
        Self { state }
    }
}

impl LcdDevice for SimLcd {
    fn initialize(&mut self) -> Result<(), LcdError> {
        let mut state = self.state.lock();
        state.lcd_initialized = true;
        state.lcd = Default::default();
        Ok(())
    }

    fn set_text(&mut self, line: u8, text: &str) -> Result<(), LcdError> {
        let mut state = self.state.lock();
        if !state.lcd_initialized {
            return Err(LcdError::NotInitialized);
        }
        if line >= LCD_LINES {
            return Err(LcdError::LineOutOfRange(line));
        }
        state.lcd[line as usize] = Some(text.to_owned());
        Ok(())
    }

    fn clear_line(&mut self, line: u8) -> Result<(), LcdError> {
        let mut state = self.state.lock();
        if !state.lcd_initialized {
            return Err(LcdError::NotInitialized);
        }
        if line >= LCD_LINES {
            return Err(LcdError::LineOutOfRange(line));
        }
        state.lcd[line as usize] = None;
        Ok(())
    }
}

/// A simulated V5 battery.
pub struct SimBattery {
    state: Arc<Mutex<SimState>>,
}

impl SimBattery {
    pub(crate) fn new(state: Arc<Mutex<SimState>>) -> Self {
        Self { state }
    }
}

impl SimBattery {
    fn read(&self, f: impl FnOnce(&SimState) -> f64) -> Result<f64, BatteryError> {
        let state = self.state.lock();
        if !state.battery_available {
            return Err(BatteryError::Unavailable);
        }
        Ok(f(&state))
    }
}

impl BatteryMonitor for SimBattery {
    fn voltage(&self) -> Result<ElectricPotential, BatteryError> {
        self.read(|s| s.battery_volts).map(|v| ElectricPotential::new::<volt>(v))
    }

    fn current(&self) -> Result<ElectricCurrent, BatteryError> {
        self.read(|s| s.battery_amps).map(|a| ElectricCurrent::new::<ampere>(a))
    }
}

#[cfg(test)]
mod tests {
    use super::super::SimPlatform;
    use super::*;
    use crate::peripherals::Platform;

    #[test]
    fn unplugged_motor_reports_its_port() {
        let sim = SimPlatform::new();
        let mut motor = sim.clone().motor(7).unwrap();
        motor.move_i8(-40).unwrap();
        sim.set_motor_connected(7, false);
        assert_eq!(motor.move_i8(10), Err(MotorError::Disconnected(7)));
        assert_eq!(sim.motor_power(7), Some(-40));
        sim.set_motor_connected(7, true);
        motor.move_i8(10).unwrap();
        assert_eq!(sim.motor_state(7).unwrap().writes, 2);
    }

    #[test]
    fn reversed_motor_output_is_negated() {
        let sim = SimPlatform::new();
        let mut motor = sim.clone().motor(15).unwrap();
        motor.set_reversed(true).unwrap();
        motor.move_i8(-128).unwrap();
        assert_eq!(sim.motor_output(15), Some(127));
    }

    #[test]
    fn digital_output_starts_low() {
        let sim = SimPlatform::new();
        let h = AdiPort::from_letter('h').unwrap();
        assert_eq!(sim.adi_value(h), None);
        let mut out = sim.clone().digital_out(h).unwrap();
        assert_eq!(sim.adi_value(h), Some(false));
        out.write(true).unwrap();
        assert_eq!(sim.adi_value(h), Some(true));
        sim.set_adi_connected(h, false);
        assert_eq!(out.write(false), Err(AdiDigitalOutputError::Disconnected(h)));
        assert_eq!(sim.adi_writes(h), 1);
    }

    #[test]
    fn disconnected_controller_fails_reads() {
        let sim = SimPlatform::new();
        let pad = sim.clone().controller();
        sim.press(Buttons::R2);
        assert_eq!(pad.digital(Buttons::R2), Ok(true));
        sim.set_controller_connected(false);
        assert_eq!(pad.digital(Buttons::R2), Err(ControllerError::Disconnected));
        assert_eq!(
            pad.analog(AnalogChannel::LeftY),
            Err(ControllerError::Disconnected)
        );
        assert_eq!(sim.controller_reads(), 3);
    }

    #[test]
    fn lcd_requires_initialization() {
        let sim = SimPlatform::new();
        let mut lcd = sim.clone().lcd();
        assert_eq!(lcd.set_text(1, "x"), Err(LcdError::NotInitialized));
        lcd.initialize().unwrap();
        lcd.set_text(1, "Intake: OFF").unwrap();
        assert_eq!(sim.lcd_line(1).as_deref(), Some("Intake: OFF"));
        assert_eq!(lcd.clear_line(8), Err(LcdError::LineOutOfRange(8)));
    }

    #[test]
    fn battery_reports_scripted_telemetry() {
        let sim = SimPlatform::new();
        sim.set_battery(12.5, 1.25);
        let battery = sim.clone().battery();
        assert_eq!(battery.voltage().unwrap().get::<volt>(), 12.5);
        assert_eq!(battery.current().unwrap().get::<ampere>(), 1.25);

        sim.set_battery_available(false);
        assert_eq!(battery.voltage().unwrap_err(), BatteryError::Unavailable);
    }
}
