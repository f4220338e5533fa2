//! # V5 Battery API.

use uom::si::{
    electric_current::milliampere,
    electric_potential::millivolt,
    f64::{ElectricCurrent, ElectricPotential},
};

use crate::{error::Error, rtos::Instant};

/// A device which reports the state of the V5 battery, as reported by VEXos.
pub trait BatteryMonitor: Send {
    /// Gets the current voltage of the battery.
    fn voltage(&self) -> Result<ElectricPotential, BatteryError>;

    /// Gets the current drawn from the battery.
    fn current(&self) -> Result<ElectricCurrent, BatteryError>;
}

/// Derives a pseudo-random seed from the uptime and battery telemetry.
///
/// The seed is `(now_ms & 0x7FFFFFFF) + trunc(mV * 100) + trunc(mA * 100)` in
/// wrapping 32-bit arithmetic, so two boots seldom produce the same value.
pub fn random_seed(now: Instant, battery: &dyn BatteryMonitor) -> Result<u32, BatteryError> {
    let millivolts = battery.voltage()?.get::<millivolt>();
    let milliamps = battery.current()?.get::<milliampere>();
    let ms = (now.as_millis() & 0x7FFF_FFFF) as i32;
    Ok(ms
        .wrapping_add((millivolts * 100.0) as i32)
        .wrapping_add((milliamps * 100.0) as i32) as u32)
}

/// Represents possible errors for battery operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryError {
    /// VEXos is not reporting battery telemetry.
    Unavailable,
}

impl From<BatteryError> for Error {
    fn from(err: BatteryError) -> Self {
        match err {
            BatteryError::Unavailable => Error::Hardware("battery telemetry unavailable".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::{electric_current::ampere, electric_potential::volt};

    struct Fixed(f64, f64);

    impl BatteryMonitor for Fixed {
        fn voltage(&self) -> Result<ElectricPotential, BatteryError> {
            Ok(ElectricPotential::new::<volt>(self.0))
        }

        fn current(&self) -> Result<ElectricCurrent, BatteryError> {
            Ok(ElectricCurrent::new::<ampere>(self.1))
        }
    }

    #[test]
    fn seed_mixes_uptime_and_telemetry() {
        // 12.5 V and 1.25 A: 12500 mV * 100 + 1250 mA * 100.
        let seed = random_seed(Instant::from_millis(1500), &Fixed(12.5, 1.25)).unwrap();
        assert_eq!(seed, 1500 + 1_250_000 + 125_000);
    }

    #[test]
    fn seed_masks_the_sign_bit_of_uptime() {
        let now = Instant::from_millis(0x8000_0001);
        assert_eq!(random_seed(now, &Fixed(0.0, 0.0)).unwrap(), 1);
    }
}
