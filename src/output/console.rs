//! Console output utilities.

use console::style;

use crate::media::MediaInfo;
use crate::notify::{Notification, NotificationEvent, Notifier};
use crate::settings::Settings;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     SocialSaver                                       ║
║     Instagram, YouTube and Twitter media saver        ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print where downloads and documents go.
pub fn print_config_summary(persistence: &str, download_dir: &str, data_dir: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Persistence: {}", persistence);
    println!("  Downloads:   {}", download_dir);
    println!("  Data:        {}", data_dir);
    println!();
}

/// Print resolved media info.
pub fn print_media_info(info: &MediaInfo) {
    println!();
    println!("{}", style(&info.title).bold());
    if !info.description.is_empty() {
        println!("  {}", style(&info.description).dim());
    }
    println!("  Platform: {}", info.platform);
    println!("  Type:     {}", info.media_type);
    if let Some(duration) = &info.duration {
        println!("  Duration: {}", duration);
    }
    println!("  Quality:  {}", info.quality);
    println!("  Size:     {}", info.approximate_size);
    if !info.candidate_formats.is_empty() {
        println!("  Formats:  {}", info.candidate_formats.join(", "));
    }
    println!("  Source:   {}", info.source_url);
    println!();
}

/// Print all user settings.
pub fn print_settings(settings: &Settings) {
    let flag = |on: bool| if on { style("on").green() } else { style("off").dim() };

    println!();
    println!("{}", style("Settings:").bold());
    println!("  theme:                    {}", settings.theme);
    println!("  download_quality:         {}", settings.download_quality);
    println!("  save_location:            {}", settings.save_location);
    if !settings.custom_location.is_empty() {
        println!("  custom_location:          {}", settings.custom_location);
    }
    println!("  wifi_only:                {}", flag(settings.wifi_only));
    println!("  notifications:            {}", flag(settings.notifications));
    println!("  auto_detect_platform:     {}", flag(settings.auto_detect_platform));
    println!("  preview_media:            {}", flag(settings.preview_media));
    println!("  keep_screen_on:           {}", flag(settings.keep_screen_on));
    println!("  max_concurrent_downloads: {}", settings.max_concurrent_downloads);
    println!("  max_history_items:        {}", settings.max_history_items);
    println!("  consent_adult_content:    {}", flag(settings.consent_adult_content));
    println!();
}

/// Notifier that prints lifecycle events to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.event {
            NotificationEvent::DownloadStarted => print_info(&format!(
                "Downloading {} from {}",
                notification.title, notification.platform
            )),
            NotificationEvent::DownloadCompleted => {
                let path = notification
                    .file_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                print_success(&format!("Saved {} to {}", notification.title, path));
            }
            NotificationEvent::DownloadFailed => print_error(&format!(
                "Download of {} failed: {}",
                notification.title,
                notification.error.as_deref().unwrap_or("unknown error")
            )),
        }
    }
}
