use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::FilterProcessor;
use crate::config::{FieldcutConfig, Settings};

pub mod apply;
pub mod check;
pub mod config;
pub mod explain;
pub mod version;

use super::Output;

#[derive(Parser)]
#[command(
    name = "fieldcut",
    version = env!("CARGO_PKG_VERSION"),
    about = "Prune JSON, YAML and TOML documents down to the fields you select",
    long_about = "fieldcut keeps only the fields picked by path filters such as \
                  'id', 'owner/name', 'owner/*' or 'owner(id,name)', preserving the \
                  shape of the document."
)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", global = true)]
    pub directory: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter documents and print or write the result
    Apply(apply::ApplyArgs),
    /// Show the decision taken for every node of a document
    Explain(explain::ExplainArgs),
    /// Parse filter expressions and list the normalized filters
    Check(check::CheckArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Show version information
    Version(version::VersionArgs),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Cannot change directory to {}", dir.display()))?;
        }

        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        let custom_config = self.config.as_deref();

        match self.command {
            Some(Commands::Apply(args)) => apply::execute(args, custom_config, &output),
            Some(Commands::Explain(args)) => explain::execute(args, custom_config, &output),
            Some(Commands::Check(args)) => check::execute(args, custom_config, &output),
            Some(Commands::Config(args)) => config::execute(args, custom_config),
            Some(Commands::Version(args)) => version::execute(args),
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        }
    }
}

/// Filter selection shared by every command that filters
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Filter expression, e.g. 'id', 'owner/*' or 'owner(id,name)' (repeatable)
    #[arg(short = 'f', long = "filter", value_name = "EXPR")]
    pub filters: Vec<String>,

    /// Add the expressions of a profile from the [filter.profiles] config table
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,
}

impl FilterArgs {
    /// Profile expressions followed by the `-f` expressions
    pub fn expressions(&self, settings: &Settings) -> Result<Vec<String>> {
        let mut expressions = match &self.profile {
            Some(name) => settings.filter.profile(name)?.to_vec(),
            None => Vec::new(),
        };
        expressions.extend(self.filters.iter().cloned());
        Ok(expressions)
    }

    pub fn processor(&self, settings: &Settings) -> Result<FilterProcessor> {
        let expressions = self.expressions(settings)?;
        let processor = FilterProcessor::with_policy(Some(&expressions), settings.filter.empty)?;
        tracing::debug!(
            "Using {} filters from {} expressions",
            processor.filters().len(),
            expressions.len()
        );
        Ok(processor)
    }
}

/// Load the configuration with no command line overrides
pub(crate) fn load_settings(custom_config: Option<&std::path::Path>) -> Result<Settings> {
    FieldcutConfig::load(custom_config, None::<()>)?.settings()
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
