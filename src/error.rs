//! Common error model.

use std::fmt::{self, Debug, Display, Formatter};

/// Represents a runtime error.
pub enum Error {
    /// Represents a fault reported by a device on the robot (a disconnected
    /// motor, an unplugged controller, etc.). It wraps a description of the
    /// fault.
    Hardware(String),
    /// Represents a runtime error which comes from within Rust. It wraps an
    /// error string.
    Custom(String),
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Hardware(s) => write!(f, "Hardware({:?})", s),
            Error::Custom(s) => write!(f, "Custom({:?})", s),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Hardware(s) => write!(f, "hardware fault: {}", s),
            Error::Custom(s) => Display::fmt(s, f),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_hardware_faults() {
        let err = Error::Hardware("motor on port 7 disconnected".into());
        assert_eq!(err.to_string(), "hardware fault: motor on port 7 disconnected");
        assert_eq!(Error::Custom("bad".into()).to_string(), "bad");
    }

    #[test]
    fn debug_names_the_variant() {
        let err = Error::Hardware("controller disconnected".into());
        assert_eq!(format!("{:?}", err), "Hardware(\"controller disconnected\")");
    }
}
