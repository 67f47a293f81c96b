//! SocialSaver - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use social_saver::{
    app::App,
    cli::{Args, Command, HistoryCommand, HistoryListArgs, SettingsCommand},
    config::{default_config_path, Config},
    error::{exit_codes, Error, Result},
    output::{
        create_fraction_bar, create_spinner, follow_session, print_banner, print_config_summary,
        print_error, print_history, print_history_stats, print_info, print_media_info,
        print_settings, print_success, print_warning, ConsoleNotifier, HistoryStats,
    },
    platform::Platform,
    settings::Quality,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Resolution(_) => ExitCode::from(exit_codes::RESOLUTION_ERROR as u8),
                Error::Persistence(_) | Error::Precondition(_) | Error::Cancelled => {
                    ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8)
                }
                Error::Storage(_) => ExitCode::from(exit_codes::STORAGE_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&default_config_path())?,
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    let app = App::build(config).await?;

    match args.command {
        Command::Info { url, platform } => {
            let hint = app.settings.load().await.platform_hint(platform.hint())?;
            info(&app, &url, hint).await
        }
        Command::Download {
            url,
            platform,
            quality,
            format,
        } => {
            let hint = app.settings.load().await.platform_hint(platform.hint())?;
            download(&app, &url, hint, quality.map(Into::into), format).await
        }
        Command::History { action, list } => history(&app, action, list).await,
        Command::Settings { action } => settings(&app, action).await,
    }
}

/// Resolve and print media info.
async fn info(app: &App, url: &str, hint: Option<Platform>) -> Result<()> {
    let spinner = create_spinner("Resolving media...");
    let result = app.resolver.resolve(url, hint).await;
    spinner.finish_and_clear();

    print_media_info(&result?);
    Ok(())
}

/// Resolve, then download with a progress bar.
async fn download(
    app: &App,
    url: &str,
    hint: Option<Platform>,
    quality: Option<Quality>,
    format: Option<String>,
) -> Result<()> {
    print_banner();
    print_config_summary(
        &app.config.downloads.persistence.to_string(),
        &app.config.download_directory().display().to_string(),
        &app.config.data_directory().display().to_string(),
    );

    let settings = app.settings.load().await;
    if settings.wifi_only {
        print_warning("Wi-Fi only is enabled; network type is not checked on this host");
    }

    let orchestrator = app.orchestrator(Arc::new(ConsoleNotifier));

    let spinner = create_spinner("Resolving media...");
    let resolved = orchestrator.request_info(url, hint).await;
    spinner.finish_and_clear();
    let info = resolved?;

    if settings.preview_media {
        print_media_info(&info);
    }

    let quality = quality.unwrap_or(settings.download_quality);
    let format = format.unwrap_or_else(|| info.media_type.default_format().to_string());

    let bar = create_fraction_bar(&info.title);
    let follower = tokio::spawn(follow_session(orchestrator.subscribe(), bar.clone()));

    let result = orchestrator.start_download(quality, &format).await;
    drop(orchestrator);
    let _ = follower.await;

    match result {
        Ok(record) => {
            bar.finish_and_clear();
            if let Some(path) = &record.file_path {
                print_info(&format!("File: {}", path.display()));
            }
            Ok(())
        }
        Err(e) => {
            bar.abandon();
            Err(e)
        }
    }
}

async fn history(
    app: &App,
    action: Option<HistoryCommand>,
    list: HistoryListArgs,
) -> Result<()> {
    match action.unwrap_or(HistoryCommand::List(list)) {
        HistoryCommand::List(list) => {
            let mut records = app.history.filter(&list.filter()).await?;
            if let Some(limit) = list.limit {
                records.truncate(limit);
            }
            print_history(&records);
        }
        HistoryCommand::Remove { id } => {
            if app.history.remove(&id).await? {
                print_success(&format!("Removed {}", id));
            } else {
                print_warning(&format!("No history record with ID {}", id));
            }
        }
        HistoryCommand::Clear => {
            app.history.clear().await?;
            print_success("History cleared");
        }
        HistoryCommand::Stats => {
            let records = app.history.list(None).await?;
            print_history_stats(&HistoryStats::from_records(&records));
        }
    }
    Ok(())
}

async fn settings(app: &App, action: Option<SettingsCommand>) -> Result<()> {
    let updated = match action.unwrap_or(SettingsCommand::Show) {
        SettingsCommand::Show => app.settings.load().await,
        SettingsCommand::Set(set) => {
            let patch = set.into_patch();
            if patch.is_empty() {
                print_warning("Nothing to change");
            }
            let saved = app.save_settings(&patch).await?;
            print_success("Settings saved");
            saved
        }
        SettingsCommand::Reset => {
            let defaults = app.reset_settings().await?;
            print_success("Settings reset to defaults");
            defaults
        }
        SettingsCommand::ToggleTheme => {
            let toggled = app.settings.toggle_theme().await?;
            print_success(&format!("Theme is now {}", toggled.theme));
            toggled
        }
    };

    print_settings(&updated);
    Ok(())
}
