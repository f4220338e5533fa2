//! The competition robot.
//!
//! [`WspBot`] owns the tank drive, intake, outtake, both pistons, the master
//! controller and the LCD. Its operator control loop samples the controller
//! once per tick, feeds the sample to [`OperatorControl`] and writes every
//! resulting command back out.

use log::{debug, info, trace, warn};

use crate::{
    adi::DigitalOutput,
    battery::{random_seed, BatteryMonitor},
    config::BotConfig,
    controller::{AnalogChannel, Buttons, Controller},
    error::Error,
    lcd::Lcd,
    motor::{MotorConfig, MotorDevice, MotorGroup},
    peripherals::Peripherals,
    robot::Robot,
    rtos::{time_since_start, Context, Loop, TickSource},
};

mod opcontrol;

pub use opcontrol::*;

const BOOT_LINE: u8 = 1;

/// The axes the tank drive reads.
const DRIVE_AXES: [AnalogChannel; 2] = [AnalogChannel::LeftY, AnalogChannel::RightY];

/// A piston solenoid which retries a level the device rejected.
struct Solenoid {
    name: &'static str,
    output: Box<dyn DigitalOutput>,
    pending: Option<bool>,
}

impl Solenoid {
    fn new(name: &'static str, output: Box<dyn DigitalOutput>) -> Self {
        Self {
            name,
            output,
            pending: None,
        }
    }

    fn set(&mut self, level: Option<bool>) -> Result<(), Error> {
        if level.is_some() {
            self.pending = level;
        }
        if let Some(level) = self.pending {
            self.output.write(level)?;
            trace!("{} on {}: {}", self.name, self.output.port(), level);
            self.pending = None;
        }
        Ok(())
    }
}

/// Records `next` into `result` unless an earlier failure is already there.
fn keep_first<E: Into<Error>>(result: &mut Result<(), Error>, next: Result<(), E>) {
    if let Err(err) = next {
        if result.is_ok() {
            *result = Err(err.into());
        }
    }
}

/// The competition robot ("Wsp Boy").
pub struct WspBot {
    config: BotConfig,
    left_drive: MotorGroup,
    right_drive: MotorGroup,
    intake: MotorGroup,
    outtake: MotorGroup,
    descore: Solenoid,
    scoop: Solenoid,
    controller: Controller,
    buttons: Buttons,
    lcd: Lcd,
    battery: Box<dyn BatteryMonitor>,
    control: OperatorControl,
    seed: Option<u32>,
    faulted: bool,
}

impl WspBot {
    /// Builds the robot described by `config` from `peripherals`.
    pub fn with_config(mut peripherals: Peripherals, config: BotConfig) -> Result<Self, Error> {
        config.validate()?;

        let mut motors = |name: &'static str, configs: &[MotorConfig]| -> Result<MotorGroup, Error> {
            let mut devices: Vec<Box<dyn MotorDevice>> = Vec::with_capacity(configs.len());
            for m in configs {
                devices.push(peripherals.smart_port(m.port)?.into_motor(m.gearset, m.reversed)?);
            }
            Ok(MotorGroup::new(name, devices))
        };
        let left_drive = motors("left drive", &config.left_drive)?;
        let right_drive = motors("right drive", &config.right_drive)?;
        let intake = motors("intake", &config.intake)?;
        let outtake = motors("outtake", &[config.outtake])?;

        let descore = Solenoid::new("descore", peripherals.digital_out(config.descore)?);
        let scoop = Solenoid::new("scoop", peripherals.digital_out(config.scoop)?);

        info!(
            "built: left {:?}, right {:?}, intake {:?}, outtake {:?}",
            left_drive.ports(),
            right_drive.ports(),
            intake.ports(),
            outtake.ports()
        );

        Ok(Self {
            control: OperatorControl::from_config(&config),
            buttons: config.bindings.buttons(),
            config,
            left_drive,
            right_drive,
            intake,
            outtake,
            descore,
            scoop,
            controller: peripherals.master_controller,
            lcd: peripherals.lcd,
            battery: peripherals.battery,
            seed: None,
            faulted: false,
        })
    }

    /// The configuration the robot was built with.
    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// The operator control state.
    pub fn control(&self) -> &OperatorControl {
        &self.control
    }

    /// The random seed computed during boot.
    pub fn seed(&self) -> Option<u32> {
        self.seed
    }

    /// Brings the robot up: shows the boot message, retracts both pistons,
    /// seeds from battery telemetry, then shows the ready message.
    ///
    /// Only an LCD that cannot be initialized stops the sequence. Any other
    /// failure is returned after the ready message.
    pub fn boot(&mut self) -> Result<(), Error> {
        self.lcd.initialize()?;

        let mut result = Ok(());
        keep_first(&mut result, self.lcd.print(BOOT_LINE, "System Booting..."));
        keep_first(&mut result, self.descore.set(Some(false)));
        keep_first(&mut result, self.scoop.set(Some(false)));

        match random_seed(time_since_start(), self.battery.as_ref()) {
            Ok(seed) => {
                info!("random seed {}", seed);
                self.seed = Some(seed);
            }
            Err(err) => keep_first(&mut result, Err(err)),
        }

        keep_first(&mut result, self.lcd.print(BOOT_LINE, "Wsp Boy - Ready"));
        result
    }

    /// Runs one tick of operator control and returns what was commanded.
    ///
    /// Every output is written even if an earlier one fails, and the first
    /// failure is returned. If the controller cannot be read, the drive is
    /// stopped while the toggles, edge detectors and pistons keep their
    /// state.
    pub fn tick(&mut self) -> Result<Commands, Error> {
        let mut result = Ok(());
        let commands = match self.controller.sample(&DRIVE_AXES, self.buttons) {
            Ok(input) => self.control.update(&input),
            Err(err) => {
                keep_first(&mut result, Err(err));
                self.control.hold()
            }
        };

        keep_first(&mut result, self.left_drive.move_i8(commands.left_drive));
        keep_first(&mut result, self.right_drive.move_i8(commands.right_drive));
        keep_first(&mut result, self.descore.set(commands.descore));
        keep_first(&mut result, self.scoop.set(commands.scoop));
        keep_first(&mut result, self.intake.move_i8(commands.intake));
        keep_first(&mut result, self.outtake.move_i8(commands.outtake));
        for (line, text) in (1..).zip(commands.status.iter()) {
            keep_first(&mut result, self.lcd.print(line, text));
        }

        result.map(|_| commands)
    }

    /// Runs [`WspBot::tick()`] once per tick of `ticks` until `ctx` is done.
    ///
    /// A failing tick does not stop the loop: the first failure of a streak
    /// is logged as a warning and the recovery as info.
    pub fn run_opcontrol(&mut self, ctx: &Context, ticks: &mut impl TickSource) {
        info!("opcontrol: {} ms period", ticks.period().as_millis());
        while !ctx.is_done_at(ticks.now()) {
            match self.tick() {
                Ok(_) if self.faulted => {
                    self.faulted = false;
                    info!("opcontrol recovered");
                }
                Ok(_) => {}
                Err(err) if self.faulted => trace!("opcontrol still failing: {}", err),
                Err(err) => {
                    self.faulted = true;
                    warn!("opcontrol tick failed: {}", err);
                }
            }
            ticks.delay();
        }
        debug!("opcontrol done: {}", ctx.name());
    }
}

impl Robot for WspBot {
    fn new(peripherals: Peripherals) -> Result<Self, Error> {
        Self::with_config(peripherals, BotConfig::default())
    }

    fn initialize(&mut self, _ctx: Context) {
        if let Err(err) = self.boot() {
            warn!("boot incomplete: {}", err);
        }
    }

    fn competition_initialize(&mut self, _ctx: Context) {
        info!("competition_initialize: nothing to do");
    }

    fn autonomous(&mut self, _ctx: Context) {
        info!("autonomous: nothing to do");
    }

    fn opcontrol(&mut self, ctx: Context) {
        let mut l = Loop::new(self.config.loop_period);
        self.run_opcontrol(&ctx, &mut l);
    }

    fn disabled(&mut self, _ctx: Context) {
        info!("disabled: nothing to do");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adi::AdiPort,
        motor::Gearset,
        sim::SimPlatform,
        toggle::Direction,
    };

    fn bot() -> (SimPlatform, WspBot) {
        let sim = SimPlatform::new();
        let bot = WspBot::new(Peripherals::new(Box::new(sim.clone()))).unwrap();
        (sim, bot)
    }

    #[test]
    fn motors_are_configured_like_the_competition_robot() {
        let (sim, _bot) = bot();
        for &(port, reversed) in [
            (2, false),
            (7, false),
            (21, true),
            (15, true),
            (6, true),
            (18, false),
            (8, true),
        ]
        .iter()
        {
            let motor = sim.motor_state(port).unwrap();
            assert_eq!(motor.reversed, reversed, "port {}", port);
            assert_eq!(motor.gearset, Gearset::SixToOne, "port {}", port);
        }
        for &port in [1, 9].iter() {
            let motor = sim.motor_state(port).unwrap();
            assert!(!motor.reversed);
            assert_eq!(motor.gearset, Gearset::EighteenToOne);
        }
        assert_eq!(sim.motor_state(16), None);
    }

    #[test]
    fn boot_shows_ready_and_retracts_pistons() {
        let (sim, mut bot) = bot();
        sim.set_battery(12.5, 1.25);
        bot.boot().unwrap();
        assert!(sim.lcd_initialized());
        assert_eq!(sim.lcd_line(1).as_deref(), Some("Wsp Boy - Ready"));
        assert_eq!(sim.adi_value(AdiPort::H), Some(false));
        assert_eq!(sim.adi_value(AdiPort::B), Some(false));
        assert!(bot.seed().is_some());
    }

    #[test]
    fn tick_writes_every_output() {
        let (sim, mut bot) = bot();
        bot.boot().unwrap();
        sim.press(Buttons::R2 | Buttons::A);
        let commands = bot.tick().unwrap();
        assert_eq!(commands.intake, 127);
        assert_eq!(sim.motor_power(1), Some(127));
        assert_eq!(sim.motor_power(9), Some(127));
        assert_eq!(sim.motor_power(8), Some(0));
        assert_eq!(sim.adi_value(AdiPort::H), Some(true));
        assert_eq!(sim.lcd_line(1).as_deref(), Some("Intake: FWD"));
        assert_eq!(sim.lcd_line(3).as_deref(), Some("Descore (A): OUT"));
    }

    #[test]
    fn unreadable_controller_stops_the_drive() {
        let (sim, mut bot) = bot();
        bot.boot().unwrap();
        sim.set_axis(AnalogChannel::LeftY, 90);
        sim.set_axis(AnalogChannel::RightY, 90);
        sim.press(Buttons::R2);
        bot.tick().unwrap();
        assert_eq!(sim.motor_power(2), Some(90));

        sim.press(Buttons::L1);
        sim.set_controller_connected(false);
        assert!(matches!(bot.tick(), Err(Error::Hardware(_))));
        for &port in [2u8, 7, 21, 15, 6, 18].iter() {
            assert_eq!(sim.motor_power(port), Some(0), "port {}", port);
        }
        assert_eq!(sim.motor_power(1), Some(127));
        assert_eq!(sim.motor_power(8), Some(0));
        assert_eq!(bot.control().outtake(), Direction::Off);
        assert_eq!(sim.lcd_line(1).as_deref(), Some("Intake: FWD"));

        sim.set_controller_connected(true);
        assert_eq!(bot.tick().unwrap().outtake, 127);
        assert_eq!(sim.motor_power(2), Some(90));
    }

    #[test]
    fn tick_reads_only_bound_inputs() {
        let (sim, mut bot) = bot();
        bot.boot().unwrap();
        bot.tick().unwrap();
        assert_eq!(sim.controller_reads(), 8);
        bot.tick().unwrap();
        assert_eq!(sim.controller_reads(), 16);
    }

    #[test]
    fn boot_finishes_after_a_piston_fault() {
        let (sim, mut bot) = bot();
        sim.set_adi_connected(AdiPort::B, false);
        assert!(bot.boot().is_err());
        assert!(bot.seed().is_some());
        assert_eq!(sim.lcd_line(1).as_deref(), Some("Wsp Boy - Ready"));
        assert_eq!(sim.adi_value(AdiPort::H), Some(false));

        // The rejected retract is retried by the first tick.
        sim.set_adi_connected(AdiPort::B, true);
        bot.tick().unwrap();
        assert_eq!(sim.adi_writes(AdiPort::B), 1);
    }

    #[test]
    fn boot_finishes_without_battery_telemetry() {
        let (sim, mut bot) = bot();
        sim.set_battery_available(false);
        assert!(matches!(bot.boot(), Err(Error::Hardware(_))));
        assert_eq!(bot.seed(), None);
        assert_eq!(sim.lcd_line(1).as_deref(), Some("Wsp Boy - Ready"));
        assert_eq!(sim.adi_writes(AdiPort::H), 1);
    }

    #[test]
    fn rejected_piston_write_is_retried() {
        let (sim, mut bot) = bot();
        bot.boot().unwrap();
        sim.set_adi_connected(AdiPort::B, false);
        sim.press(Buttons::B);
        assert!(bot.tick().is_err());
        assert!(bot.control().scoop());
        assert_eq!(sim.adi_value(AdiPort::B), Some(false));

        sim.set_adi_connected(AdiPort::B, true);
        bot.tick().unwrap();
        assert_eq!(sim.adi_value(AdiPort::B), Some(true));
    }

    #[test]
    fn invalid_config_is_rejected_before_any_port_is_taken() {
        let sim = SimPlatform::new();
        let mut config = BotConfig::default();
        config.right_drive[2].port = 2;
        let result = WspBot::with_config(Peripherals::new(Box::new(sim.clone())), config);
        assert!(result.is_err());
        assert_eq!(sim.motor_state(2), None);
    }
}
