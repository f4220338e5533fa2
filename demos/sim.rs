use std::time::Duration;
use wsp_bot::prelude::*;

fn step(sim: &SimPlatform, label: &str, buttons: Buttons) {
    sim.press(buttons);
    Task::delay(Duration::from_millis(60));
    sim.release(buttons);
    Task::delay(Duration::from_millis(60));
    println!(
        "{:<12} intake {:>4}  outtake {:>4}  | {} | {}",
        label,
        sim.motor_power(1).unwrap_or(0),
        sim.motor_power(8).unwrap_or(0),
        sim.lcd_line(1).unwrap_or_default(),
        sim.lcd_line(2).unwrap_or_default(),
    );
}

fn main() -> Result<(), Error> {
    let sim = SimPlatform::new();
    let mut competition = Competition::<WspBot>::new(Peripherals::new(Box::new(sim.clone())))?;
    println!("lcd: {}", sim.lcd_line(1).unwrap_or_default());

    competition.switch(Mode::Autonomous)?;
    competition.wait();
    competition.switch(Mode::Opcontrol)?;

    sim.set_axis(AnalogChannel::LeftY, 100);
    sim.set_axis(AnalogChannel::RightY, -100);
    step(&sim, "R2", Buttons::R2);
    step(&sim, "R1", Buttons::R1);
    step(&sim, "R1", Buttons::R1);
    step(&sim, "L1", Buttons::L1);
    step(&sim, "L2", Buttons::L2);
    step(&sim, "A", Buttons::A);
    println!(
        "drive left {:?} right {:?}, descore {:?}",
        sim.motor_output(2),
        sim.motor_output(15),
        sim.adi_value(AdiPort::H)
    );

    sim.set_motor_connected(9, false);
    step(&sim, "R2 (unplug)", Buttons::R2);
    sim.set_motor_connected(9, true);
    Task::delay(Duration::from_millis(60));

    competition.switch(Mode::Disabled)?;
    let bot = competition.shutdown()?;
    println!("seed {:?}, intake {}", bot.seed(), bot.control().intake());
    Ok(())
}
