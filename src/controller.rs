//! Controller API.

use bitflags::bitflags;
use std::fmt::{self, Debug, Formatter};

use crate::error::Error;

bitflags! {
    /// A set of controller buttons. A single flag names one button.
    pub struct Buttons: u16 {
        /// The top-left shoulder button.
        const L1 = 1 << 0;
        /// The bottom-left shoulder button.
        const L2 = 1 << 1;
        /// The top-right shoulder button.
        const R1 = 1 << 2;
        /// The bottom-right shoulder button.
        const R2 = 1 << 3;
        /// The up directional button.
        const UP = 1 << 4;
        /// The down directional button.
        const DOWN = 1 << 5;
        /// The left directional button.
        const LEFT = 1 << 6;
        /// The right directional button.
        const RIGHT = 1 << 7;
        /// The "X" button.
        const X = 1 << 8;
        /// The "Y" button.
        const Y = 1 << 9;
        /// The "A" button.
        const A = 1 << 10;
        /// The "B" button.
        const B = 1 << 11;
    }
}

impl Buttons {
    /// Every button, one flag each, in read order.
    pub const EACH: [Buttons; 12] = [
        Buttons::L1,
        Buttons::L2,
        Buttons::R1,
        Buttons::R2,
        Buttons::UP,
        Buttons::DOWN,
        Buttons::LEFT,
        Buttons::RIGHT,
        Buttons::X,
        Buttons::Y,
        Buttons::A,
        Buttons::B,
    ];
}

impl Default for Buttons {
    fn default() -> Self {
        Self::empty()
    }
}

/// One of the four analog stick axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalogChannel {
    /// The left stick's x-axis.
    LeftX,
    /// The left stick's y-axis.
    LeftY,
    /// The right stick's x-axis.
    RightX,
    /// The right stick's y-axis.
    RightY,
}

/// A snapshot of controller inputs, taken once per tick.
///
/// Axis values are on the range [-127, 127] with 0 centered; they are passed
/// through as read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerState {
    /// The left stick's x-axis.
    pub left_x: i8,
    /// The left stick's y-axis.
    pub left_y: i8,
    /// The right stick's x-axis.
    pub right_x: i8,
    /// The right stick's y-axis.
    pub right_y: i8,
    /// The buttons held down.
    pub buttons: Buttons,
}

impl ControllerState {
    /// Reads one axis of the snapshot.
    pub fn axis(&self, channel: AnalogChannel) -> i8 {
        match channel {
            AnalogChannel::LeftX => self.left_x,
            AnalogChannel::LeftY => self.left_y,
            AnalogChannel::RightX => self.right_x,
            AnalogChannel::RightY => self.right_y,
        }
    }

    /// Sets one axis of the snapshot.
    pub fn set_axis(&mut self, channel: AnalogChannel, value: i8) {
        match channel {
            AnalogChannel::LeftX => self.left_x = value,
            AnalogChannel::LeftY => self.left_y = value,
            AnalogChannel::RightX => self.right_x = value,
            AnalogChannel::RightY => self.right_y = value,
        }
    }

    /// Checks whether every button in `buttons` is held.
    pub fn held(&self, buttons: Buttons) -> bool {
        self.buttons.contains(buttons)
    }
}

/// A device which reports controller inputs.
pub trait InputSource: Send {
    /// Reads an analog stick axis. Returns a value on the range [-127, 127].
    fn analog(&self, channel: AnalogChannel) -> Result<i8, ControllerError>;

    /// Checks if a single button is pressed.
    fn digital(&self, button: Buttons) -> Result<bool, ControllerError>;
}

/// Represents the master Vex controller.
pub struct Controller {
    source: Box<dyn InputSource>,
}

impl Controller {
    /// Creates a new controller reading from `source`.
    pub fn new(source: Box<dyn InputSource>) -> Self {
        Self { source }
    }

    /// Samples `axes` and every button in `buttons` into one snapshot. Inputs
    /// not asked for read as centered or released.
    pub fn sample(
        &self,
        axes: &[AnalogChannel],
        buttons: Buttons,
    ) -> Result<ControllerState, ControllerError> {
        let mut state = ControllerState::default();
        for &channel in axes {
            state.set_axis(channel, self.source.analog(channel)?);
        }
        for &button in Buttons::EACH.iter().filter(|&&b| buttons.contains(b)) {
            state.buttons.set(button, self.source.digital(button)?);
        }
        Ok(state)
    }
}

impl Debug for Controller {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller").finish()
    }
}

/// Represents possible error states for a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    /// The controller is not connected to the brain.
    Disconnected,
}

impl From<ControllerError> for Error {
    fn from(err: ControllerError) -> Self {
        match err {
            ControllerError::Disconnected => Error::Hardware("controller disconnected".into()),
        }
    }
}
