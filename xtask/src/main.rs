use std::env;

use xshell::cmd;

type DynError = Box<dyn std::error::Error>;
type Result<T> = std::result::Result<T, DynError>;

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{}", e);
        std::process::exit(-1);
    }
}

fn try_main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_ref().map(|it| it.as_str()) {
        Some("ci") => ci()?,
        Some("check_fmt") => check_fmt()?,
        Some("build") => build()?,
        Some("clippy") => clippy()?,
        Some("test") => test()?,
        Some("sim") => sim()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        "Tasks:
ci              Runs CI locally.
check_fmt       Checks formatting.
build           Builds library and demos.
clippy          Lints library, demos and tests.
test            Runs unit, integration and doc tests.
sim             Runs the scripted simulation session.
"
    )
}

fn ci() -> Result<()> {
    check_fmt()?;
    build()?;
    clippy()?;
    test()?;

    eprintln!("Done!");

    Ok(())
}

fn check_fmt() -> Result<()> {
    eprintln!("Checking formatting...");
    cmd!("cargo fmt -- --check").run()?;
    Ok(())
}

fn build() -> Result<()> {
    eprintln!("Building library...");
    cmd!("cargo build -p wsp-bot")
        .env("RUSTFLAGS", "-D warnings")
        .run()?;

    eprintln!("Building without logging...");
    cmd!("cargo build -p wsp-bot --no-default-features")
        .env("RUSTFLAGS", "-D warnings")
        .run()?;

    eprintln!("Building demos...");
    cmd!("cargo build -p wsp-bot --examples")
        .env("RUSTFLAGS", "-D warnings")
        .run()?;

    Ok(())
}

fn clippy() -> Result<()> {
    eprintln!("Linting library...");
    cmd!("cargo clippy -p wsp-bot -- -D warnings").run()?;

    eprintln!("Linting demos and tests...");
    cmd!("cargo clippy -p wsp-bot --examples --tests -- -D warnings").run()?;

    Ok(())
}

fn test() -> Result<()> {
    eprintln!("Testing...");
    cmd!("cargo test -p wsp-bot").run()?;
    Ok(())
}

fn sim() -> Result<()> {
    eprintln!("Running simulation...");
    cmd!("cargo run -p wsp-bot --example sim").run()?;
    Ok(())
}
