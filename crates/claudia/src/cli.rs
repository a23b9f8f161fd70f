//! Command line interface

use std::io::Write;
use std::path::PathBuf;
use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};

use claudia_core::LogLevel;
use theme::{catalog, ThemeName};

use crate::Appearance;

#[derive(Debug, Parser)]
#[command(name = "claudia", about = "Inspect and change Claudia's appearance settings", version)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show or select the theme (dark, light, custom)
    Theme { name: Option<String> },

    /// Compose the custom theme with a preset accent color
    Accent { name: String },

    /// Compose the custom theme with a background palette
    Background { name: String },

    /// Show or change the zoom level: in, out, reset, or a percentage
    Zoom {
        #[arg(allow_hyphen_values = true)]
        level: Option<String>,
    },

    /// Print the applied presentation properties as CSS
    Css,

    /// Print the assistant settings document
    Settings,

    /// Print the current theme and zoom
    Status,
}

pub async fn run(command: Commands, appearance: &Appearance, out: &mut dyn Write) -> Result<()> {
    let theme = appearance.theme();
    let zoom = appearance.zoom();

    match command {
        Commands::Theme { name: Some(name) } => {
            theme.set_theme_by_name(&name)?;
            writeln!(out, "theme: {}", theme.current_theme())?;
        }
        Commands::Theme { name: None } => {
            let current = theme.current_theme();
            for t in theme.all_themes() {
                let marker = if t.id == current { '*' } else { ' ' };
                writeln!(out, "{marker} {:<8} {}", t.id, t.description)?;
            }
        }
        Commands::Accent { name } => {
            let accent = catalog::preset_color(&name)
                .ok_or_else(|| anyhow!("unknown accent color: {name}"))?;
            theme.set_custom_theme(accent, &theme.custom_background())?;
            writeln!(out, "custom accent: {}", accent.name)?;
            hint_custom(theme.current_theme(), out)?;
        }
        Commands::Background { name } => {
            let background = catalog::background_theme(&name)
                .ok_or_else(|| anyhow!("unknown background: {name}"))?;
            theme.set_custom_theme(&theme.custom_accent(), background)?;
            writeln!(out, "custom background: {}", background.name)?;
            hint_custom(theme.current_theme(), out)?;
        }
        Commands::Zoom { level } => {
            let level = match level.as_deref() {
                None => zoom.current_zoom(),
                Some("in") => zoom.increase_zoom(),
                Some("out") => zoom.decrease_zoom(),
                Some("reset") => zoom.reset_zoom(),
                Some(raw) => {
                    let value: i64 = raw
                        .trim_end_matches('%')
                        .parse()
                        .map_err(|_| anyhow!("invalid zoom level: {raw}"))?;
                    zoom.set_zoom(value)
                }
            };
            writeln!(out, "zoom: {level}")?;
        }
        Commands::Css => {
            write!(out, "{}", appearance.scope().to_css())?;
        }
        Commands::Settings => {
            let mut panel = appearance.settings_panel();
            panel.load().await;
            if let Some(error) = panel.error() {
                bail!("{error}");
            }
            writeln!(out, "{}", panel.raw_json())?;
        }
        Commands::Status => {
            let range = zoom.zoom_range();
            let current = zoom.current_zoom();
            writeln!(out, "theme: {}", theme.current_theme())?;
            writeln!(
                out,
                "custom: {} on {}",
                theme.custom_accent().name,
                theme.custom_background().name
            )?;
            writeln!(
                out,
                "zoom: {current} ({}..{}%, step {})",
                range.min, range.max, range.step
            )?;
        }
    }

    Ok(())
}

fn hint_custom(current: ThemeName, out: &mut dyn Write) -> Result<()> {
    if current != ThemeName::Custom {
        writeln!(out, "run `claudia theme custom` to use it")?;
    }
    Ok(())
}
