use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::{FilterArgs, load_settings};
use crate::FilterOrigin;
use crate::cli::Output;

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
}

pub fn execute(args: CheckArgs, custom_config: Option<&Path>, output: &Output) -> Result<()> {
    let settings = load_settings(custom_config)?;
    let processor = args.filters.processor(&settings)?;
    let filters = processor.filters();

    output.success(&format!("{} filters parsed", filters.len()));
    for filter in filters {
        let origin = match filter.origin() {
            FilterOrigin::Standalone => "standalone",
            FilterOrigin::SubselectMember => "sub-selection member",
        };
        let kind = if filter.is_wildcard() { "wildcard" } else { "field" };
        output.table_row(&filter.to_string(), &format!("{kind}, {origin}"));
    }
    Ok(())
}
