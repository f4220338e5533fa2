//! Operator control state: edge detectors, toggles and the commands they
//! produce each tick.

use log::debug;

use crate::{
    config::{BotConfig, ButtonBindings, TogglePairBinding},
    controller::{Buttons, ControllerState},
    edge::RisingEdge,
    toggle::{Direction, DirectionToggle, Latch},
};

/// Everything the robot should do after one tick of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commands {
    /// Power for the three left drive motors (left stick Y, as read).
    pub left_drive: i8,
    /// Power for the three right drive motors (right stick Y, as read).
    pub right_drive: i8,
    /// Power for both intake motors.
    pub intake: i8,
    /// Power for the outtake motor.
    pub outtake: i8,
    /// New descore piston level, if it flipped this tick.
    pub descore: Option<bool>,
    /// New scoop piston level, if it flipped this tick.
    pub scoop: Option<bool>,
    /// Status text for LCD lines 1 to 4.
    pub status: [String; 4],
}

#[derive(Debug, Clone)]
struct TogglePair {
    name: &'static str,
    binding: TogglePairBinding,
    forward: RisingEdge,
    reverse: RisingEdge,
    toggle: DirectionToggle,
}

impl TogglePair {
    fn new(name: &'static str, binding: TogglePairBinding) -> Self {
        Self {
            name,
            binding,
            forward: RisingEdge::new(),
            reverse: RisingEdge::new(),
            toggle: DirectionToggle::new(),
        }
    }

    fn update(&mut self, input: &ControllerState) -> Direction {
        // Both detectors see every sample, whatever the other one reports.
        let forward = self.forward.update(input.held(self.binding.forward));
        let reverse = self.reverse.update(input.held(self.binding.reverse));
        let before = self.toggle.state();

        for &(_, direction) in self.binding.edge_order().iter() {
            let rose = match direction {
                Direction::Forward => forward,
                Direction::Reverse => reverse,
                Direction::Off => false,
            };
            if rose {
                self.toggle.toggle(direction);
            }
        }

        let after = self.toggle.state();
        if after != before {
            debug!("{}: {} -> {}", self.name, before, after);
        }
        after
    }
}

#[derive(Debug, Clone)]
struct Piston {
    name: &'static str,
    button: Buttons,
    edge: RisingEdge,
    latch: Latch,
}

impl Piston {
    fn new(name: &'static str, button: Buttons) -> Self {
        Self {
            name,
            button,
            edge: RisingEdge::new(),
            latch: Latch::new(),
        }
    }

    fn update(&mut self, input: &ControllerState) -> Option<bool> {
        if self.edge.update(input.held(self.button)) {
            let active = self.latch.toggle();
            debug!("{}: {}", self.name, self.latch.label());
            Some(active)
        } else {
            None
        }
    }
}

/// The operator control loop's state, independent of any hardware.
///
/// Feed it one [`ControllerState`] per tick with [`OperatorControl::update()`]
/// and apply the returned [`Commands`].
#[derive(Debug, Clone)]
pub struct OperatorControl {
    intake: TogglePair,
    outtake: TogglePair,
    descore: Piston,
    scoop: Piston,
    power: i8,
}

impl OperatorControl {
    /// Creates the loop state with every toggle off and every piston in.
    pub fn new(bindings: ButtonBindings, power: i8) -> Self {
        Self {
            intake: TogglePair::new("intake", bindings.intake),
            outtake: TogglePair::new("outtake", bindings.outtake),
            descore: Piston::new("descore", bindings.descore),
            scoop: Piston::new("scoop", bindings.scoop),
            power,
        }
    }

    /// Creates the loop state for `config`.
    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(config.bindings, config.toggle_power)
    }

    /// Processes one tick of input.
    pub fn update(&mut self, input: &ControllerState) -> Commands {
        let intake = self.intake.update(input);
        let outtake = self.outtake.update(input);
        let descore = self.descore.update(input);
        let scoop = self.scoop.update(input);

        Commands {
            left_drive: input.left_y,
            right_drive: input.right_y,
            intake: intake.power(self.power),
            outtake: outtake.power(self.power),
            descore,
            scoop,
            status: self.status(),
        }
    }

    /// The commands for a tick without input: the drive stops, the intake and
    /// outtake keep their toggle power and no piston flips.
    pub fn hold(&self) -> Commands {
        Commands {
            left_drive: 0,
            right_drive: 0,
            intake: self.intake().power(self.power),
            outtake: self.outtake().power(self.power),
            descore: None,
            scoop: None,
            status: self.status(),
        }
    }

    /// The intake toggle state.
    pub fn intake(&self) -> Direction {
        self.intake.toggle.state()
    }

    /// The outtake toggle state.
    pub fn outtake(&self) -> Direction {
        self.outtake.toggle.state()
    }

    /// Whether the descore piston is out.
    pub fn descore(&self) -> bool {
        self.descore.latch.is_active()
    }

    /// Whether the scoop piston is out.
    pub fn scoop(&self) -> bool {
        self.scoop.latch.is_active()
    }

    /// Status text for LCD lines 1 to 4.
    pub fn status(&self) -> [String; 4] {
        [
            format!("Intake: {}", self.intake()),
            format!("Outtake: {}", self.outtake()),
            format!("Descore (A): {}", self.descore.latch.label()),
            format!("Scoop (B): {}", self.scoop.latch.label()),
        ]
    }
}

impl Default for OperatorControl {
    fn default() -> Self {
        Self::from_config(&BotConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn held(buttons: Buttons) -> ControllerState {
        ControllerState {
            buttons,
            ..ControllerState::default()
        }
    }

    #[test]
    fn starts_off_and_retracted() {
        let mut control = OperatorControl::default();
        let commands = control.update(&ControllerState::default());
        assert_eq!(commands.intake, 0);
        assert_eq!(commands.outtake, 0);
        assert_eq!(commands.descore, None);
        assert_eq!(commands.scoop, None);
        assert_eq!(
            commands.status,
            [
                "Intake: OFF".to_owned(),
                "Outtake: OFF".to_owned(),
                "Descore (A): IN".to_owned(),
                "Scoop (B): IN".to_owned(),
            ]
        );
    }

    #[test]
    fn drive_axes_pass_through() {
        let mut control = OperatorControl::default();
        for (left, right) in [-128i8, -127, -64, -1, 0, 1, 37, 127]
            .iter()
            .copied()
            .tuple_combinations()
        {
            let input = ControllerState {
                left_y: left,
                right_y: right,
                left_x: 99,
                right_x: -99,
                buttons: Buttons::empty(),
            };
            let commands = control.update(&input);
            assert_eq!((commands.left_drive, commands.right_drive), (left, right));
        }
    }

    #[test]
    fn held_button_toggles_once() {
        let mut control = OperatorControl::default();
        let powers: Vec<i8> = std::iter::repeat(held(Buttons::L1))
            .take(10)
            .map(|input| control.update(&input).outtake)
            .collect();
        assert_eq!(powers, vec![127; 10]);
        control.update(&held(Buttons::empty()));
        assert_eq!(control.update(&held(Buttons::L1)).outtake, 0);
    }

    #[test]
    fn reverse_replaces_forward() {
        let mut control = OperatorControl::default();
        control.update(&held(Buttons::R2));
        assert_eq!(control.intake(), Direction::Forward);
        assert_eq!(control.update(&held(Buttons::R1)).intake, -127);
        assert_eq!(control.intake(), Direction::Reverse);
        control.update(&held(Buttons::empty()));
        assert_eq!(control.update(&held(Buttons::R1)).intake, 0);
    }

    #[test]
    fn simultaneous_edges_follow_pair_order() {
        // Intake applies reverse then forward: forward wins from off.
        let mut control = OperatorControl::default();
        let commands = control.update(&held(Buttons::R1 | Buttons::R2));
        assert_eq!(commands.intake, 127);

        // Outtake applies forward then reverse: reverse wins from off.
        let mut control = OperatorControl::default();
        let commands = control.update(&held(Buttons::L1 | Buttons::L2));
        assert_eq!(commands.outtake, -127);
    }

    #[test]
    fn pistons_report_only_flips() {
        let mut control = OperatorControl::default();
        let a = held(Buttons::A);
        let none = held(Buttons::empty());
        let flips: Vec<Option<bool>> = [a, a, none, a, none]
            .iter()
            .map(|input| control.update(input).descore)
            .collect();
        assert_eq!(flips, vec![Some(true), None, None, Some(false), None]);
        assert!(!control.descore());
        assert!(!control.scoop());

        let commands = control.update(&held(Buttons::B));
        assert_eq!(commands.scoop, Some(true));
        assert_eq!(commands.status[3], "Scoop (B): OUT");
    }

    #[test]
    fn hold_stops_the_drive_and_keeps_toggles() {
        let mut control = OperatorControl::default();
        let mut input = held(Buttons::R2 | Buttons::L2 | Buttons::A);
        input.left_y = 90;
        input.right_y = -90;
        control.update(&input);

        let commands = control.hold();
        assert_eq!((commands.left_drive, commands.right_drive), (0, 0));
        assert_eq!((commands.intake, commands.outtake), (127, -127));
        assert_eq!((commands.descore, commands.scoop), (None, None));
        assert_eq!(commands.status[2], "Descore (A): OUT");

        // Buttons still held after the gap are not fresh presses.
        assert_eq!(control.update(&input).intake, 127);
        assert!(control.descore());
    }

    #[test]
    fn custom_power_and_bindings() {
        let mut bindings = ButtonBindings::default();
        bindings.descore = Buttons::X;
        let mut control = OperatorControl::new(bindings, 90);
        assert_eq!(control.update(&held(Buttons::L2)).outtake, -90);
        assert_eq!(control.update(&held(Buttons::A)).descore, None);
        assert_eq!(control.update(&held(Buttons::X)).descore, Some(true));
    }

    #[test]
    fn toggles_stay_exclusive_under_any_input() {
        let buttons = [Buttons::R1, Buttons::R2, Buttons::L1, Buttons::L2];
        let samples = (0..16u16).map(|bits| {
            buttons
                .iter()
                .enumerate()
                .filter(|(i, _)| bits & (1 << *i) != 0)
                .fold(Buttons::empty(), |acc, (_, &b)| acc | b)
        });
        for sequence in itertools::repeat_n(samples, 3).multi_cartesian_product() {
            let mut control = OperatorControl::default();
            for &input in sequence.iter() {
                let commands = control.update(&held(input));
                assert!([-127, 0, 127].contains(&commands.intake));
                assert!([-127, 0, 127].contains(&commands.outtake));
                assert_eq!(commands.intake, control.intake().power(127));
            }
        }
    }
}
