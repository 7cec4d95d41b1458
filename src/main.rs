mod app;
mod cli;
mod config;
mod generator;
mod locale;
mod remix;
mod session;
mod style;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so CLI output on stdout stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "remixer=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let loaded = Config::load();

    match cli.command {
        Some(command) => cli::run(command, &loaded?, &cli.output).await,
        None => {
            let (config, config_error) = gui_config(loaded);
            run_gui(config, config_error)
        }
    }
}

/// The window still opens on a broken configuration, with defaults and the
/// load error shown to the user.
fn gui_config(loaded: Result<Config>) -> (Config, Option<String>) {
    match loaded {
        Ok(config) => (config, None),
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            (Config::default(), Some(format!("{:#}", e)))
        }
    }
}

/// Open the single-page remix window
fn run_gui(config: Config, config_error: Option<String>) -> Result<()> {
    tracing::info!("Starting Remixer");

    let generator = generator::from_config(&config)?;
    let offline = generator.name() == "offline";
    let session = session::spawn(generator, config.ui.locale);

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([720.0, 760.0])
        .with_min_inner_size([480.0, 520.0])
        .with_title(config.ui.locale.app_title());

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Remixer",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(app::RemixerApp::new(
                cc,
                session,
                &config,
                offline,
                config_error,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gui_config_keeps_loaded_config() {
        let mut config = Config::default();
        config.api.endpoint = Some("https://svc.test/complete".to_string());
        let (config, error) = gui_config(Ok(config));
        assert_eq!(config.api.endpoint.as_deref(), Some("https://svc.test/complete"));
        assert!(error.is_none());
    }

    #[test]
    fn test_gui_config_reports_load_error() {
        let (config, error) = gui_config(Err(anyhow::anyhow!("Unknown locale 'en_us'")));
        assert!(config.api.endpoint.is_none());
        assert_eq!(error.as_deref(), Some("Unknown locale 'en_us'"));
    }
}
