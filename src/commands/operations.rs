//! # Operations Command Implementation
//!
//! Lists every operation with its command templates in execution order,
//! marking operations that must be configured. Useful for auditing exactly
//! what will run before pointing the tool at a real repository.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use cmdline_vcs::operation::Operation;

use super::load_config;

/// List configured operations
#[derive(Args, Debug)]
pub struct OperationsArgs {
    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the `operations` command.
pub fn execute(config_path: &Path, args: OperationsArgs) -> Result<()> {
    let config = load_config(config_path)?;

    if args.json {
        let listing: Vec<_> = Operation::ALL
            .iter()
            .map(|op| {
                json!({
                    "operation": op.name(),
                    "key": op.config_key(),
                    "required": config.is_required(*op),
                    "commands": config.commands_for(*op),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Timeout: {}ms", config.timeout().as_millis());
    for op in Operation::ALL {
        let commands = config.commands_for(op);
        let marker = if config.is_required(op) { " (required)" } else { "" };
        if commands.is_empty() {
            println!("{}{}: not configured", op, marker);
            continue;
        }
        println!("{}{}:", op, marker);
        for (index, command) in commands.iter().enumerate() {
            println!("  {}. {}", index + 1, command);
        }
    }
    Ok(())
}
