use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use super::FilterArgs;
use crate::cli::Output;
use crate::config::{FieldcutConfig, Settings};
use crate::input::{InputDiscovery, InputDocument};
use crate::parallel::ExecutionStrategy;
use crate::{DocumentFormat, FilterProcessor, PruneStats};

#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Input format (default: from the file extension, then the content)
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub from: Option<DocumentFormat>,

    /// Output format (default: output.format from config, "auto" keeps the input format)
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub to: Option<DocumentFormat>,

    /// Compact JSON/TOML output
    #[arg(long)]
    pub compact: bool,

    /// Write each result to DIR instead of stdout
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Files or directories to filter (default: stdin)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Config keys the flags above map to
#[derive(Serialize)]
struct ApplyOverrides {
    output: OutputOverrides,
}

#[derive(Serialize)]
struct OutputOverrides {
    format: Option<DocumentFormat>,
    pretty: Option<bool>,
}

impl ApplyArgs {
    fn overrides(&self) -> ApplyOverrides {
        ApplyOverrides {
            output: OutputOverrides {
                format: self.to,
                pretty: self.compact.then_some(false),
            },
        }
    }
}

/// One filtered document, ready to be written
struct Filtered {
    name: String,
    source: Option<PathBuf>,
    format: DocumentFormat,
    text: String,
    stats: PruneStats,
}

pub fn execute(args: ApplyArgs, custom_config: Option<&Path>, output: &Output) -> Result<()> {
    let settings = FieldcutConfig::load(custom_config, Some(args.overrides()))?.settings()?;
    let processor = args.filters.processor(&settings)?;

    let sources = input_sources(&args.paths, &settings)?;
    let strategy = ExecutionStrategy::for_documents(&settings.parallel, sources.len());
    let results = strategy.execute(&sources, |source| {
        let document = match source {
            Some(path) => InputDocument::read(path)?,
            None => InputDocument::stdin()?,
        };
        filter_document(&processor, &document, args.from, &settings)
    })?;

    let highlight = args.output_dir.is_none() && settings.output.highlight.enabled();
    let several = results.len() > 1;
    let mut header_printed = false;
    let mut written = HashSet::new();
    let mut failed = 0;

    for result in results {
        let filtered = match result {
            Ok(filtered) => filtered,
            Err(err) => {
                output.error(&format!("{err:#}"));
                failed += 1;
                continue;
            }
        };

        output.verbose(&format!(
            "{}: kept {} of {} nodes",
            filtered.name,
            filtered.stats.retained(),
            filtered.stats.visited
        ));

        match &args.output_dir {
            Some(dir) => {
                if let Err(err) = write_to_dir(dir, &filtered, &mut written, output) {
                    output.error(&format!("{err:#}"));
                    failed += 1;
                }
            }
            None => {
                if several {
                    output.document_header(&filtered.name, !header_printed);
                    header_printed = true;
                }
                if highlight {
                    output.document(&filtered.format.highlight(&filtered.text));
                } else {
                    output.document(&filtered.text);
                }
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} documents could not be filtered", failed, sources.len());
    }
    Ok(())
}

/// Files to read, or a single `None` for stdin
fn input_sources(paths: &[PathBuf], settings: &Settings) -> Result<Vec<Option<PathBuf>>> {
    if paths.is_empty() {
        return Ok(vec![None]);
    }

    let discovery = InputDiscovery::new(&settings.input)?;
    let files = discovery.discover(paths)?;
    if files.is_empty() {
        bail!("No input documents found");
    }
    Ok(files.into_iter().map(Some).collect())
}

fn filter_document(
    processor: &FilterProcessor,
    document: &InputDocument,
    from: Option<DocumentFormat>,
    settings: &Settings,
) -> Result<Filtered> {
    let name = document.display_name();
    let format = match from {
        Some(format) => format,
        None => DocumentFormat::resolve(document.path.as_deref(), &document.text)?,
    };

    let mut content = format
        .decode(&document.text)
        .with_context(|| format!("Failed to parse {name} as {format}"))?;
    let stats = processor.process_content(&mut content);

    let out_format = settings.output.format.resolve(format);
    let text = out_format
        .encode(&content, settings.output.pretty)
        .with_context(|| format!("Failed to write {name} as {out_format}"))?;

    tracing::info!("Filtered {}: {} of {} nodes kept", name, stats.retained(), stats.visited);
    Ok(Filtered {
        name,
        source: document.path.clone(),
        format: out_format,
        text,
        stats,
    })
}

fn write_to_dir(
    dir: &Path,
    filtered: &Filtered,
    written: &mut HashSet<PathBuf>,
    output: &Output,
) -> Result<()> {
    let target = output_path(dir, filtered);
    if !written.insert(target.clone()) {
        bail!(
            "{} would overwrite {}, already written in this run",
            filtered.name,
            target.display()
        );
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut text = filtered.text.clone();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    std::fs::write(&target, text).with_context(|| format!("Failed to write {}", target.display()))?;

    output.success(&format!("{} -> {}", filtered.name, target.display()));
    Ok(())
}

/// `dir` joined with the input path (relative to the working directory when
/// possible), with the extension of the output format.
fn output_path(dir: &Path, filtered: &Filtered) -> PathBuf {
    let relative: PathBuf = match filtered.source.as_deref() {
        Some(source) => {
            let cwd = std::env::current_dir().unwrap_or_default();
            source
                .strip_prefix(&cwd)
                .unwrap_or(source)
                .components()
                .filter_map(|component| match component {
                    Component::Normal(part) => Some(part),
                    _ => None,
                })
                .collect()
        }
        None => PathBuf::from("stdin"),
    };
    dir.join(relative).with_extension(filtered.format.extension())
}
