#[macro_export]
/// Specifies the entrypoint for the robot.
///
/// Generates a `main` which builds the robot on a platform (the simulator by
/// default), initializes it and runs operator control until the process is
/// stopped.
///
/// # Examples
///
/// ```no_run
/// use wsp_bot::prelude::*;
///
/// struct FooBot;
///
/// impl Robot for FooBot {
///     fn new(_p: Peripherals) -> Result<Self, Error> {
///         Ok(FooBot)
///     }
/// }
///
/// entry!(FooBot);
/// ```
macro_rules! entry {
    ($robot_type:ty) => {
        $crate::entry!($robot_type, $crate::sim::SimPlatform::new());
    };
    ($robot_type:ty, $platform:expr) => {
        fn main() {
            let peripherals = $crate::peripherals::Peripherals::new(::std::boxed::Box::new($platform));
            let mut competition =
                match $crate::robot::Competition::<$robot_type>::new(peripherals) {
                    Ok(competition) => competition,
                    Err(err) => {
                        ::std::eprintln!("failed to build robot: {}", err);
                        ::std::process::exit(1);
                    }
                };
            if let Err(err) = competition.switch($crate::robot::Mode::Opcontrol) {
                ::std::eprintln!("{}", err);
                ::std::process::exit(1);
            }
            competition.wait();
        }
    };
}
