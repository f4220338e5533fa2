//! ADIPort.

use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};

use crate::error::Error;

/// Identifies one of the brain's eight ADI ports.
///
/// Ports are numbered 1 to 8 and labelled 'A' to 'H' on the brain; both
/// spellings convert into an `AdiPort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AdiPort(u8);

impl AdiPort {
    /// Port 'A' (1).
    pub const A: AdiPort = AdiPort(1);
    /// Port 'B' (2).
    pub const B: AdiPort = AdiPort(2);
    /// Port 'C' (3).
    pub const C: AdiPort = AdiPort(3);
    /// Port 'D' (4).
    pub const D: AdiPort = AdiPort(4);
    /// Port 'E' (5).
    pub const E: AdiPort = AdiPort(5);
    /// Port 'F' (6).
    pub const F: AdiPort = AdiPort(6);
    /// Port 'G' (7).
    pub const G: AdiPort = AdiPort(7);
    /// Port 'H' (8).
    pub const H: AdiPort = AdiPort(8);

    /// Constructs an ADI port from its number (1-8).
    pub fn new(port: u8) -> Result<Self, AdiPortError> {
        if (1..9).contains(&port) {
            Ok(Self(port))
        } else {
            Err(AdiPortError::OutOfRange(port))
        }
    }

    /// Constructs an ADI port from its letter ('A'-'H', either case).
    pub fn from_letter(letter: char) -> Result<Self, AdiPortError> {
        match letter.to_ascii_uppercase() {
            c @ 'A'..='H' => Ok(Self(c as u8 - b'A' + 1)),
            _ => Err(AdiPortError::InvalidLetter(letter)),
        }
    }

    /// The port number (1-8).
    #[inline]
    pub fn number(self) -> u8 {
        self.0
    }

    /// The port letter ('A'-'H').
    #[inline]
    pub fn letter(self) -> char {
        (b'A' + self.0 - 1) as char
    }

    /// Zero-based index, for tables of eight ports.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl TryFrom<char> for AdiPort {
    type Error = AdiPortError;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        Self::from_letter(letter)
    }
}

impl TryFrom<u8> for AdiPort {
    type Error = AdiPortError;

    fn try_from(port: u8) -> Result<Self, Self::Error> {
        Self::new(port)
    }
}

impl Display for AdiPort {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Represents errors naming an ADI port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdiPortError {
    /// Port number is out of range (1-8).
    OutOfRange(u8),
    /// Port letter is not 'A'-'H'.
    InvalidLetter(char),
}

impl From<AdiPortError> for Error {
    fn from(err: AdiPortError) -> Self {
        match err {
            AdiPortError::OutOfRange(n) => Error::Custom(format!("adi port {} out of range", n)),
            AdiPortError::InvalidLetter(c) => Error::Custom(format!("invalid adi port {:?}", c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_numbers_agree() {
        let h = AdiPort::from_letter('H').unwrap();
        assert_eq!(h.number(), 8);
        assert_eq!(h, AdiPort::new(8).unwrap());
        assert_eq!(AdiPort::try_from('b').unwrap().letter(), 'B');
        assert_eq!(AdiPort::try_from(1u8).unwrap().index(), 0);
        assert_eq!(h.to_string(), "H");
    }

    #[test]
    fn rejects_bad_ports() {
        assert_eq!(AdiPort::new(0), Err(AdiPortError::OutOfRange(0)));
        assert_eq!(AdiPort::new(9), Err(AdiPortError::OutOfRange(9)));
        assert_eq!(AdiPort::from_letter('I'), Err(AdiPortError::InvalidLetter('I')));
    }
}
