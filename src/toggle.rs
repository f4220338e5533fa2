//! Two- and three-state toggles driven by button edges.

use std::fmt::{self, Display, Formatter};

/// The state of a forward/reverse toggle pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Neither direction is active.
    Off,
    /// The forward direction is active.
    Forward,
    /// The reverse direction is active.
    Reverse,
}

impl Direction {
    /// Short status label: `FWD`, `REV` or `OFF`.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Off => "OFF",
            Direction::Forward => "FWD",
            Direction::Reverse => "REV",
        }
    }

    /// Full positive `magnitude` when forward, full negative when reverse,
    /// zero when off.
    pub fn power(self, magnitude: i8) -> i8 {
        match self {
            Direction::Off => 0,
            Direction::Forward => magnitude,
            Direction::Reverse => magnitude.saturating_neg(),
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Off
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A pair of mutually exclusive forward/reverse flags.
///
/// Each direction is toggled independently by its own edge: toggling the
/// active direction turns it off, toggling the inactive one switches to it.
/// There is no direct "off" input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionToggle {
    state: Direction,
}

impl DirectionToggle {
    /// Creates a toggle in the [`Direction::Off`] state.
    pub const fn new() -> Self {
        Self {
            state: Direction::Off,
        }
    }

    /// Handles a forward edge and returns the new state.
    pub fn toggle_forward(&mut self) -> Direction {
        self.state = match self.state {
            Direction::Forward => Direction::Off,
            _ => Direction::Forward,
        };
        self.state
    }

    /// Handles a reverse edge and returns the new state.
    pub fn toggle_reverse(&mut self) -> Direction {
        self.state = match self.state {
            Direction::Reverse => Direction::Off,
            _ => Direction::Reverse,
        };
        self.state
    }

    /// Handles the edge for `direction`. [`Direction::Off`] is a no-op.
    pub fn toggle(&mut self, direction: Direction) -> Direction {
        match direction {
            Direction::Forward => self.toggle_forward(),
            Direction::Reverse => self.toggle_reverse(),
            Direction::Off => self.state,
        }
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> Direction {
        self.state
    }

    /// Whether the forward flag is set.
    #[inline]
    pub fn is_forward(&self) -> bool {
        self.state == Direction::Forward
    }

    /// Whether the reverse flag is set.
    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.state == Direction::Reverse
    }
}

/// A two-state toggle for a binary actuator such as a pneumatic piston.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latch {
    active: bool,
}

impl Latch {
    /// Creates an inactive (retracted) latch.
    pub const fn new() -> Self {
        Self { active: false }
    }

    /// Flips the latch and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    /// Whether the latch is active (extended).
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Short status label: `OUT` when active, `IN` otherwise.
    pub fn label(&self) -> &'static str {
        if self.active {
            "OUT"
        } else {
            "IN"
        }
    }
}
