//! One-shot remix command

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tokio::io::AsyncReadExt;

use crate::cli::output::{OutputFormat, print_formatted};
use crate::config::Config;
use crate::generator;
use crate::session::{self, RemixOutcome};
use crate::style::StyleId;

#[derive(Args, Debug)]
pub struct RemixArgs {
    /// Target style
    #[arg(short, long, value_enum, default_value_t = StyleId::Tweet)]
    pub style: StyleId,

    /// Text to remix (read from stdin when omitted)
    pub text: Option<String>,
}

#[derive(Serialize)]
struct RemixResult {
    style: StyleId,
    generator: &'static str,
    output: Option<String>,
    error: Option<String>,
}

pub async fn run(args: RemixArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let text = match args.text {
        Some(text) => text,
        None => read_stdin().await?,
    };
    if text.is_empty() {
        anyhow::bail!("Nothing to remix: input text is empty");
    }

    let generator = generator::from_config(config)?;
    let generator_name = generator.name();
    let session = session::spawn(generator, config.ui.locale);
    session.set_input_text(text);
    session.set_selected_style(args.style);

    let snapshot = match session.remix().await {
        Some(RemixOutcome::Completed(snapshot)) => snapshot,
        Some(RemixOutcome::Rejected(_)) => anyhow::bail!("Remix request was rejected"),
        None => anyhow::bail!("Session ended unexpectedly"),
    };

    let result = RemixResult {
        style: args.style,
        generator: generator_name,
        output: snapshot.state.output_text,
        error: snapshot.state.error_message,
    };

    if let Some(error) = result.error.clone() {
        if format == OutputFormat::Json {
            print_formatted(&result, format, |_| String::new());
        }
        anyhow::bail!(error);
    }

    print_formatted(&result, format, |r| r.output.clone().unwrap_or_default());
    Ok(())
}

/// Read the whole of stdin, dropping the trailing newline a shell pipe adds
async fn read_stdin() -> Result<String> {
    let mut text = String::new();
    tokio::io::stdin().read_to_string(&mut text).await?;
    Ok(text.trim_end_matches(['\r', '\n']).to_string())
}
