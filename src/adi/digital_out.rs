use super::AdiPort;
use crate::error::Error;

/// A device which represents a V5 ADI port configured as an ADI digital
/// output, such as a pneumatic solenoid.
pub trait DigitalOutput: Send {
    /// The ADI port the output is on.
    fn port(&self) -> AdiPort;

    /// Sets the digital value (true or false) of the output.
    fn write(&mut self, value: bool) -> Result<(), AdiDigitalOutputError>;
}

/// Represents possible errors for ADI digital output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdiDigitalOutputError {
    /// The output on the given port stopped responding.
    Disconnected(AdiPort),
}

impl From<AdiDigitalOutputError> for Error {
    fn from(err: AdiDigitalOutputError) -> Self {
        match err {
            AdiDigitalOutputError::Disconnected(port) => {
                Error::Hardware(format!("adi digital output {} disconnected", port))
            }
        }
    }
}
