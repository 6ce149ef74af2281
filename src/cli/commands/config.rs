use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::Path;

use crate::DocumentFormat;
use crate::config::FieldcutConfig;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Display current merged configuration
    Show {
        /// Output format: json, toml, yaml
        #[arg(short, long, value_enum, default_value = "toml")]
        format: DocumentFormat,
    },
}

pub fn execute(args: ConfigArgs, custom_config: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommand::Show { format } => {
            let config = FieldcutConfig::load(custom_config, None::<()>)?;
            let settings = config.settings()?;
            let mut text = config.export(format)?;
            if !text.ends_with('\n') {
                text.push('\n');
            }

            if settings.output.highlight.enabled() {
                print!("{}", format.highlight(&text));
            } else {
                print!("{text}");
            }
        }
    }

    Ok(())
}
