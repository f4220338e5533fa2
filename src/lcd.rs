//! Brain LCD API.

use std::fmt::{self, Debug, Formatter};

use crate::error::Error;

/// Number of text lines on the brain's LCD emulator.
pub const LCD_LINES: u8 = 8;

/// A device which shows lines of text (the brain's LCD emulator).
pub trait LcdDevice: Send {
    /// Sets up the display. Must be called before any text is shown.
    fn initialize(&mut self) -> Result<(), LcdError>;

    /// Replaces the text of one line. Lines range from 0 to 7.
    fn set_text(&mut self, line: u8, text: &str) -> Result<(), LcdError>;

    /// Clears one line. Lines range from 0 to 7.
    fn clear_line(&mut self, line: u8) -> Result<(), LcdError>;
}

/// The brain's LCD, with a per-line cache so unchanged text is not resent.
pub struct Lcd {
    device: Box<dyn LcdDevice>,
    rows: [Option<String>; LCD_LINES as usize],
}

impl Lcd {
    /// Wraps an LCD device.
    pub fn new(device: Box<dyn LcdDevice>) -> Self {
        Self {
            device,
            rows: Default::default(),
        }
    }

    /// Initializes the underlying display and forgets cached text.
    pub fn initialize(&mut self) -> Result<(), LcdError> {
        self.rows = Default::default();
        self.device.initialize()
    }

    /// Prints `text` on `line`, skipping the write if the line already shows
    /// it.
    pub fn print(&mut self, line: u8, text: &str) -> Result<(), LcdError> {
        let row = self
            .rows
            .get_mut(line as usize)
            .ok_or(LcdError::LineOutOfRange(line))?;
        if row.as_deref() == Some(text) {
            return Ok(());
        }
        self.device.set_text(line, text)?;
        *row = Some(text.to_owned());
        Ok(())
    }

    /// Clears one line.
    pub fn clear_line(&mut self, line: u8) -> Result<(), LcdError> {
        let row = self
            .rows
            .get_mut(line as usize)
            .ok_or(LcdError::LineOutOfRange(line))?;
        self.device.clear_line(line)?;
        *row = None;
        Ok(())
    }
}

impl Debug for Lcd {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lcd").field("rows", &self.rows).finish()
    }
}

/// Represents possible errors for LCD operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcdError {
    /// Line is out of range (0-7).
    LineOutOfRange(u8),
    /// The LCD was used before being initialized.
    NotInitialized,
}

impl From<LcdError> for Error {
    fn from(err: LcdError) -> Self {
        match err {
            LcdError::LineOutOfRange(line) => Error::Custom(format!("lcd line {} out of range", line)),
            LcdError::NotInitialized => Error::Custom("lcd not initialized".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Writes(Arc<Mutex<Vec<(u8, String)>>>);

    impl LcdDevice for Writes {
        fn initialize(&mut self) -> Result<(), LcdError> {
            Ok(())
        }

        fn set_text(&mut self, line: u8, text: &str) -> Result<(), LcdError> {
            self.0.lock().unwrap().push((line, text.to_owned()));
            Ok(())
        }

        fn clear_line(&mut self, line: u8) -> Result<(), LcdError> {
            self.0.lock().unwrap().push((line, String::new()));
            Ok(())
        }
    }

    #[test]
    fn unchanged_lines_are_not_rewritten() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let mut lcd = Lcd::new(Box::new(Writes(writes.clone())));
        lcd.initialize().unwrap();
        lcd.print(1, "Intake: OFF").unwrap();
        lcd.print(1, "Intake: OFF").unwrap();
        lcd.print(1, "Intake: FWD").unwrap();
        lcd.clear_line(1).unwrap();
        lcd.print(1, "Intake: FWD").unwrap();
        assert_eq!(
            *writes.lock().unwrap(),
            vec![
                (1, "Intake: OFF".to_owned()),
                (1, "Intake: FWD".to_owned()),
                (1, String::new()),
                (1, "Intake: FWD".to_owned()),
            ]
        );
    }

    #[test]
    fn rejects_lines_past_the_end() {
        let mut lcd = Lcd::new(Box::new(Writes::default()));
        assert_eq!(lcd.print(LCD_LINES, "x"), Err(LcdError::LineOutOfRange(8)));
    }
}
