use crate::step::{cargo, OnFailure};
use anyhow::Result;
use colored::Colorize;

/// Crate whose docs are the entry point for the workspace.
const LANDING_PAGE: &str = "target/doc/ui/index.html";

fn doc_args(open: bool) -> Vec<&'static str> {
    let mut args = vec!["doc", "--workspace", "--no-deps", "--document-private-items"];
    if open {
        args.push("--open");
    }
    args
}

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    cargo("Building workspace docs", &doc_args(open), OnFailure::Fail)?;

    if !open {
        println!("   {}", format!("Open {LANDING_PAGE} in your browser").dimmed());
        println!("   {}", "Or run 'cargo run -p xtask -- doc --open'".dimmed());
        println!();
    }

    Ok(())
}
