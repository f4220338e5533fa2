//! Robot configuration.
//!
//! Everything that differs between two builds of the same robot lives in
//! [`BotConfig`]: smart ports and their cartridges, pneumatic ports, button
//! bindings, loop period and toggle power. [`BotConfig::default()`] is the
//! competition robot.

use std::{collections::BTreeSet, time::Duration};

use crate::{
    adi::AdiPort,
    controller::Buttons,
    error::Error,
    motor::{Gearset, MotorConfig},
    toggle::Direction,
};

/// Period of the operator control loop on the competition robot.
pub const DEFAULT_LOOP_PERIOD: Duration = Duration::from_millis(20);

/// Power applied by an active intake or outtake toggle.
pub const DEFAULT_TOGGLE_POWER: i8 = 127;

/// The two buttons driving one forward/reverse toggle pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TogglePairBinding {
    /// Toggles the forward direction.
    pub forward: Buttons,
    /// Toggles the reverse direction.
    pub reverse: Buttons,
    /// Which edge is applied first when both buttons rise on the same tick.
    pub first: Direction,
}

impl TogglePairBinding {
    /// The edges of this pair in application order, as `(button, direction)`.
    pub fn edge_order(&self) -> [(Buttons, Direction); 2] {
        let forward = (self.forward, Direction::Forward);
        let reverse = (self.reverse, Direction::Reverse);
        match self.first {
            Direction::Reverse => [reverse, forward],
            _ => [forward, reverse],
        }
    }
}

/// Which buttons drive which toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonBindings {
    /// Intake direction toggles.
    pub intake: TogglePairBinding,
    /// Outtake direction toggles.
    pub outtake: TogglePairBinding,
    /// Descore piston toggle.
    pub descore: Buttons,
    /// Scoop piston toggle.
    pub scoop: Buttons,
}

impl Default for ButtonBindings {
    fn default() -> Self {
        Self {
            intake: TogglePairBinding {
                forward: Buttons::R2,
                reverse: Buttons::R1,
                first: Direction::Reverse,
            },
            outtake: TogglePairBinding {
                forward: Buttons::L1,
                reverse: Buttons::L2,
                first: Direction::Forward,
            },
            descore: Buttons::A,
            scoop: Buttons::B,
        }
    }
}

impl ButtonBindings {
    /// Every bound button with the name of its binding.
    pub fn each(&self) -> [(&'static str, Buttons); 6] {
        [
            ("intake forward", self.intake.forward),
            ("intake reverse", self.intake.reverse),
            ("outtake forward", self.outtake.forward),
            ("outtake reverse", self.outtake.reverse),
            ("descore", self.descore),
            ("scoop", self.scoop),
        ]
    }

    /// Every bound button, as one set.
    pub fn buttons(&self) -> Buttons {
        self.each()
            .iter()
            .fold(Buttons::empty(), |all, &(_, button)| all | button)
    }
}

/// Full hardware and tuning configuration of the robot.
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    /// Left drive motors: top, bottom, bottom-top.
    pub left_drive: [MotorConfig; 3],
    /// Right drive motors: top, bottom, bottom-top.
    pub right_drive: [MotorConfig; 3],
    /// Intake motors: bottom, top.
    pub intake: [MotorConfig; 2],
    /// Outtake motor.
    pub outtake: MotorConfig,
    /// Descore piston solenoid.
    pub descore: AdiPort,
    /// Scoop piston solenoid.
    pub scoop: AdiPort,
    /// Period of the operator control loop.
    pub loop_period: Duration,
    /// Power applied by an active intake or outtake toggle.
    pub toggle_power: i8,
    /// Button bindings.
    pub bindings: ButtonBindings,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            left_drive: [
                MotorConfig::new(2, Gearset::SixToOne),
                MotorConfig::new(7, Gearset::SixToOne),
                MotorConfig::new(21, Gearset::SixToOne).reversed(),
            ],
            right_drive: [
                MotorConfig::new(15, Gearset::SixToOne).reversed(),
                MotorConfig::new(6, Gearset::SixToOne).reversed(),
                MotorConfig::new(18, Gearset::SixToOne),
            ],
            intake: [
                MotorConfig::new(1, Gearset::EighteenToOne),
                MotorConfig::new(9, Gearset::EighteenToOne),
            ],
            outtake: MotorConfig::new(8, Gearset::SixToOne).reversed(),
            descore: AdiPort::H,
            scoop: AdiPort::B,
            loop_period: DEFAULT_LOOP_PERIOD,
            toggle_power: DEFAULT_TOGGLE_POWER,
            bindings: ButtonBindings::default(),
        }
    }
}

impl BotConfig {
    /// Every motor, in construction order.
    pub fn motors(&self) -> impl Iterator<Item = &MotorConfig> + '_ {
        self.left_drive
            .iter()
            .chain(self.right_drive.iter())
            .chain(self.intake.iter())
            .chain(std::iter::once(&self.outtake))
    }

    /// Checks that the configuration describes a buildable robot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut smart = BTreeSet::new();
        for motor in self.motors() {
            if !(1..22).contains(&motor.port) {
                return Err(ConfigError::SmartPortOutOfRange(motor.port));
            }
            if !smart.insert(motor.port) {
                return Err(ConfigError::DuplicateSmartPort(motor.port));
            }
        }

        if self.descore == self.scoop {
            return Err(ConfigError::DuplicateAdiPort(self.scoop));
        }

        if self.toggle_power < 0 {
            return Err(ConfigError::NegativeTogglePower(self.toggle_power));
        }

        if self.loop_period == Duration::from_millis(0) {
            return Err(ConfigError::ZeroLoopPeriod);
        }

        let mut bound = Buttons::empty();
        for &(name, buttons) in self.bindings.each().iter() {
            if buttons.bits().count_ones() != 1 {
                return Err(ConfigError::InvalidBinding(name));
            }
            if bound.intersects(buttons) {
                return Err(ConfigError::DuplicateBinding(name));
            }
            bound |= buttons;
        }
        for &(name, pair) in [
            ("intake", &self.bindings.intake),
            ("outtake", &self.bindings.outtake),
        ]
        .iter()
        {
            if pair.first == Direction::Off {
                return Err(ConfigError::InvalidBinding(name));
            }
        }

        Ok(())
    }
}

/// Represents reasons a [`BotConfig`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A motor port is out of range (1-21).
    SmartPortOutOfRange(u8),
    /// Two motors share a smart port.
    DuplicateSmartPort(u8),
    /// Both pistons share an ADI port.
    DuplicateAdiPort(AdiPort),
    /// The toggle power is below zero.
    NegativeTogglePower(i8),
    /// The loop period is zero.
    ZeroLoopPeriod,
    /// A binding is not exactly one button, or a pair has no first edge.
    InvalidBinding(&'static str),
    /// A button is bound twice.
    DuplicateBinding(&'static str),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::SmartPortOutOfRange(port) => {
                Error::Custom(format!("motor port {} out of range", port))
            }
            ConfigError::DuplicateSmartPort(port) => {
                Error::Custom(format!("smart port {} configured twice", port))
            }
            ConfigError::DuplicateAdiPort(port) => {
                Error::Custom(format!("adi port {} configured twice", port))
            }
            ConfigError::NegativeTogglePower(power) => {
                Error::Custom(format!("toggle power {} is negative", power))
            }
            ConfigError::ZeroLoopPeriod => Error::Custom("loop period is zero".into()),
            ConfigError::InvalidBinding(name) => {
                Error::Custom(format!("invalid {} binding", name))
            }
            ConfigError::DuplicateBinding(name) => {
                Error::Custom(format!("{} binding reuses a button", name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = BotConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.motors().count(), 9);
        assert_eq!(config.loop_period, Duration::from_millis(20));
    }

    #[test]
    fn default_edge_order_matches_competition_robot() {
        let bindings = ButtonBindings::default();
        assert_eq!(
            bindings.intake.edge_order(),
            [
                (Buttons::R1, Direction::Reverse),
                (Buttons::R2, Direction::Forward)
            ]
        );
        assert_eq!(
            bindings.outtake.edge_order(),
            [
                (Buttons::L1, Direction::Forward),
                (Buttons::L2, Direction::Reverse)
            ]
        );
    }

    #[test]
    fn bound_buttons_are_the_six_defaults() {
        let bound = ButtonBindings::default().buttons();
        assert_eq!(
            bound,
            Buttons::R1 | Buttons::R2 | Buttons::L1 | Buttons::L2 | Buttons::A | Buttons::B
        );
        assert_eq!(Buttons::EACH.iter().filter(|&&b| bound.contains(b)).count(), 6);
    }

    #[test]
    fn rejects_shared_ports() {
        let mut config = BotConfig::default();
        config.outtake.port = 2;
        assert_eq!(config.validate(), Err(ConfigError::DuplicateSmartPort(2)));

        let mut config = BotConfig::default();
        config.intake[1].port = 22;
        assert_eq!(config.validate(), Err(ConfigError::SmartPortOutOfRange(22)));

        let mut config = BotConfig::default();
        config.scoop = AdiPort::H;
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateAdiPort(AdiPort::H))
        );
    }

    #[test]
    fn rejects_bad_tuning() {
        let mut config = BotConfig::default();
        config.toggle_power = -1;
        assert_eq!(config.validate(), Err(ConfigError::NegativeTogglePower(-1)));

        let mut config = BotConfig::default();
        config.loop_period = Duration::from_millis(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroLoopPeriod));
    }

    #[test]
    fn rejects_bad_bindings() {
        let mut config = BotConfig::default();
        config.bindings.scoop = Buttons::A;
        assert_eq!(config.validate(), Err(ConfigError::DuplicateBinding("scoop")));

        let mut config = BotConfig::default();
        config.bindings.descore = Buttons::X | Buttons::Y;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBinding("descore")));

        let mut config = BotConfig::default();
        config.bindings.outtake.first = Direction::Off;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBinding("outtake")));
    }
}
