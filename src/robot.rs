//! For use with the [`entry!`](crate::entry!) macro.

use log::{error, info};
use spin::Mutex;
use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
    thread::{self, JoinHandle},
};

use crate::{
    error::Error,
    peripherals::Peripherals,
    rtos::{time_since_start, Context},
};

/// A trait representing a competition-ready VEX Robot.
pub trait Robot: Send + Sized + 'static {
    /// Runs at startup, constructing your robot from the devices it needs.
    fn new(peripherals: Peripherals) -> Result<Self, Error>;

    /// Runs once, immediately after [`Robot::new`], before any competition
    /// mode starts.
    fn initialize(&mut self, _ctx: Context) {
        info!("initialize");
    }

    /// Runs after initialization when connected to field control, before
    /// autonomous.
    fn competition_initialize(&mut self, _ctx: Context) {
        info!("competition_initialize");
    }

    /// Runs during the autonomous period.
    fn autonomous(&mut self, _ctx: Context) {
        info!("autonomous");
    }

    /// Runs during the opcontrol period.
    fn opcontrol(&mut self, _ctx: Context) {
        info!("opcontrol");
    }

    /// Runs when the robot is disabled.
    fn disabled(&mut self, _ctx: Context) {
        info!("disabled");
    }
}

/// Competition modes selected by field control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Pre-match setup.
    CompetitionInitialize,
    /// The autonomous period.
    Autonomous,
    /// The driver control period.
    Opcontrol,
    /// The robot is disabled.
    Disabled,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::CompetitionInitialize => "competition_initialize",
            Mode::Autonomous => "autonomous",
            Mode::Opcontrol => "opcontrol",
            Mode::Disabled => "disabled",
        })
    }
}

struct Running {
    mode: Mode,
    ctx: Context,
    handle: JoinHandle<()>,
}

/// Competition state machine.
///
/// Owns the robot and runs one mode at a time on its own thread. Switching
/// mode cancels the running mode's [`Context`] and waits for it to return
/// before the next one starts.
pub struct Competition<R: Robot> {
    robot: Arc<Mutex<R>>,
    running: Option<Running>,
}

impl<R: Robot> Competition<R> {
    /// Constructs the robot and runs [`Robot::initialize`] to completion.
    pub fn new(peripherals: Peripherals) -> Result<Self, Error> {
        #[cfg(feature = "logging")]
        if let Err(err) = crate::logging::StderrLogger::init_stderr(log::STATIC_MAX_LEVEL) {
            eprintln!("Failed to initialize logging: {:?}", err);
        }
        time_since_start();

        let mut robot = R::new(peripherals)?;
        robot.initialize(Context::new_global_ext(None, Some("initialize".into())));
        info!("robot initialized");

        Ok(Self {
            robot: Arc::new(Mutex::new(robot)),
            running: None,
        })
    }

    /// The mode currently running, if any.
    pub fn mode(&self) -> Option<Mode> {
        self.running.as_ref().map(|r| r.mode)
    }

    /// Stops the running mode and starts `mode` on a new thread.
    pub fn switch(&mut self, mode: Mode) -> Result<(), Error> {
        self.stop();
        info!("entering {}", mode);

        let ctx = Context::new_global_ext(None, Some(mode.to_string()));
        let robot = self.robot.clone();
        let task_ctx = ctx.clone();
        let handle = thread::Builder::new()
            .name(mode.to_string())
            .spawn(move || {
                let mut robot = robot.lock();
                match mode {
                    Mode::CompetitionInitialize => robot.competition_initialize(task_ctx),
                    Mode::Autonomous => robot.autonomous(task_ctx),
                    Mode::Opcontrol => robot.opcontrol(task_ctx),
                    Mode::Disabled => robot.disabled(task_ctx),
                }
            })
            .map_err(|err| Error::Custom(format!("failed to spawn {}: {}", mode, err)))?;

        self.running = Some(Running { mode, ctx, handle });
        Ok(())
    }

    /// Blocks until the running mode returns on its own.
    pub fn wait(&mut self) {
        if let Some(running) = self.running.take() {
            Self::join(running);
        }
    }

    /// Cancels and joins the running mode, if any.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.ctx.cancel();
            Self::join(running);
        }
    }

    /// Stops the running mode and hands back the robot.
    pub fn shutdown(mut self) -> Result<R, Error> {
        self.stop();
        let robot = self.robot.clone();
        drop(self);
        Arc::try_unwrap(robot)
            .map(Mutex::into_inner)
            .map_err(|_| Error::Custom("robot still shared after shutdown".into()))
    }

    fn join(running: Running) {
        if running.handle.join().is_err() {
            error!("{} panicked", running.mode);
        } else {
            info!("left {}", running.mode);
        }
    }
}

impl<R: Robot> Drop for Competition<R> {
    fn drop(&mut self) {
        self.stop();
    }
}
