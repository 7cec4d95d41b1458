//! Style listing command

use anyhow::Result;

use crate::cli::output::{OutputFormat, indent, print_formatted};
use crate::config::Config;
use crate::style;

pub fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let definitions = style::registry(config.ui.locale);

    print_formatted(&definitions, format, |defs| {
        defs.iter()
            .map(|d| format!("{:<8} {}\n{}", d.id, d.label, indent(d.prompt_template, "         ")))
            .collect::<Vec<_>>()
            .join("\n\n")
    });

    Ok(())
}
