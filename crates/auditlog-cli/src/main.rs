//! auditlog CLI
//!
//! Filters and sorts an exported audit log with a filter mask and a sort
//! order, printing the result as JSON or YAML.

use clap::Parser;

mod args;
mod run;

use args::Cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so stdout carries only the entries
    run::init_logging(args.log_level)?;

    let output = run::execute(&args)?;
    println!("{output}");

    Ok(())
}
