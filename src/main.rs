//! guarded-input - constrained text input toolkit
//!
//! Usage:
//!   guarded-input sanitize --field name --trim "jOHN admin"
//!   guarded-input replay scripts/resources.yaml
//!   guarded-input filename --branch CSE --sem SEM3 --name John --year 2024 --ise1

use anyhow::Result;
use clap::Parser;

use guarded_input::cli::{run_filename, run_replay, run_sanitize, CliArgs, Command, ReplayScript};
use guarded_input::editable::SanitizeOptions;

fn main() -> Result<()> {
    guarded_input::tracing::init();

    let args = CliArgs::parse();
    let config = args.load_config()?;
    tracing::debug!(?args, "starting");

    match args.command {
        Command::Sanitize {
            field,
            trim,
            no_collapse,
            text,
        } => {
            let options = SanitizeOptions::new(!no_collapse, trim);
            let report = run_sanitize(&config, field, &text, options);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Replay { script, field } => {
            let mut script = ReplayScript::from_file(&script)?;
            if let Some(field) = field {
                script.field = field;
            }
            for outcome in run_replay(&config, script) {
                println!("{}", serde_json::to_string(&outcome)?);
            }
        }
        Command::Filename(filename_args) => {
            for name in run_filename(&config, &filename_args)? {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
