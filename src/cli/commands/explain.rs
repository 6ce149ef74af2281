use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};

use super::{FilterArgs, load_settings};
use crate::cli::Output;
use crate::input::InputDocument;
use crate::{DocumentFormat, MatchDecision, PruneEvent};

#[derive(Args, Debug)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Input format (default: from the file extension, then the content)
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub from: Option<DocumentFormat>,

    /// Document to explain (default: stdin)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

pub fn execute(args: ExplainArgs, custom_config: Option<&Path>, output: &Output) -> Result<()> {
    let settings = load_settings(custom_config)?;
    let processor = args.filters.processor(&settings)?;

    let document = match &args.path {
        Some(path) => InputDocument::read(path)?,
        None => InputDocument::stdin()?,
    };
    let format = match args.from {
        Some(format) => format,
        None => DocumentFormat::resolve(document.path.as_deref(), &document.text)?,
    };
    let content = format
        .decode(&document.text)
        .with_context(|| format!("Failed to parse {} as {}", document.display_name(), format))?;

    let events = processor.explain(&content);
    if events.is_empty() {
        output.warning(&format!("{} has no fields to decide on", document.display_name()));
        return Ok(());
    }

    for event in &events {
        println!("{}", render(event));
    }

    let removed = events.iter().filter(|event| !event.retained).count();
    output.info(&format!(
        "{} nodes decided, {} kept, {} removed",
        events.len(),
        events.len() - removed,
        removed
    ));
    Ok(())
}

/// `  name  decision  kept|removed`, indented by depth
fn render(event: &PruneEvent) -> String {
    let indent = "  ".repeat(event.path.depth().saturating_sub(1));
    let name = format!("{}{}", indent, event.path.leaf().unwrap_or_default());

    let decision = match event.decision {
        MatchDecision::KeepSubtree => style(event.decision.to_string()).green(),
        MatchDecision::Traverse => style(event.decision.to_string()).cyan(),
        MatchDecision::ExcludeSubtree => style(event.decision.to_string()).red(),
    };
    let verdict = if event.retained {
        style("kept").green().bold()
    } else {
        style("removed").red().bold()
    };

    format!("{name:<40} {decision:<16} {verdict}")
}
