use crate::step::{cargo, OnFailure};
use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking workspace...".cyan().bold());
    println!();

    let total_start = Instant::now();

    // The presentation core must stay no_std: build it for a bare-metal target.
    cargo(
        "Checking platform crate (no_std)",
        &["check", "-p", "platform", "--target", "thumbv7em-none-eabihf", "--no-default-features"],
        OnFailure::Fail,
    )?;
    cargo(
        "Checking ui crate (no_std)",
        &["check", "-p", "ui", "--target", "thumbv7em-none-eabihf", "--no-default-features"],
        OnFailure::Fail,
    )?;
    cargo(
        "Checking firmware library (no_std)",
        &["check", "-p", "firmware", "--lib", "--target", "thumbv7em-none-eabihf"],
        OnFailure::Fail,
    )?;
    cargo(
        "Checking emulator target (host)",
        &["check", "-p", "firmware", "--features", "emulator", "--all-targets"],
        OnFailure::Fail,
    )?;
    cargo(
        "Running clippy lints",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;
    if cargo("Checking code formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?.is_none() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
