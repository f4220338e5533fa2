//! Operator control for the "Wsp Boy" VEX V5 competition robot.
//!
//! Devices sit behind small traits ([`motor::MotorDevice`],
//! [`adi::DigitalOutput`], [`controller::InputSource`], [`lcd::LcdDevice`],
//! [`battery::BatteryMonitor`]) constructed by a [`peripherals::Platform`].
//! [`sim::SimPlatform`] is an in-memory platform for running the robot on a
//! host.

#![warn(missing_docs)]

pub mod adi;
pub mod battery;
pub mod bot;
pub mod config;
pub mod controller;
pub mod edge;
pub mod error;
pub mod lcd;
pub mod logging;
pub mod macros;
pub mod motor;
pub mod peripherals;
pub mod prelude;
pub mod robot;
pub mod rtos;
pub mod sim;
pub mod smart_port;
pub mod toggle;
