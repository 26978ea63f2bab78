use anyhow::{Context, Result};
use colored::Colorize;
use platform::PanelConfig;
use std::path::{Path, PathBuf};
use std::process::Command;

pub struct SimOptions {
    pub seconds: u64,
    pub shots: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub dropout: Option<u32>,
}

/// Parse and validate a panel configuration file.
fn validate_config(path: &Path) -> Result<PanelConfig> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: PanelConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("{} is not a usable panel configuration", path.display()))?;
    Ok(config)
}

fn emulator_args(opts: &SimOptions) -> Vec<String> {
    let mut args: Vec<String> = [
        "run",
        "-p",
        "firmware",
        "--bin",
        "panel-emulator",
        "--features",
        "emulator",
        "--",
        "--seconds",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    args.push(opts.seconds.to_string());
    if let Some(dir) = &opts.shots {
        args.push("--shots".into());
        args.push(dir.display().to_string());
    }
    if let Some(config) = &opts.config {
        args.push("--config".into());
        args.push(config.display().to_string());
    }
    if let Some(n) = opts.dropout {
        args.push("--dropout".into());
        args.push(n.to_string());
    }
    args
}

pub fn run(opts: &SimOptions) -> Result<()> {
    println!();
    println!("{}", "🖥  Starting panel emulator...".cyan().bold());
    println!();

    if let Some(path) = &opts.config {
        validate_config(path)?;
        println!("{}", format!("  ✓ {} is valid", path.display()).green());
    }

    let status = Command::new("cargo")
        .args(emulator_args(opts))
        .status()
        .context("Failed to launch the emulator")?;

    if !status.success() {
        anyhow::bail!("Emulator exited with {status}");
    }
    Ok(())
}
